//! Rejection reasons and the caret picture shown for a rejected line.
use thiserror::Error;

/// Why a line was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Rejection {
    /// A character outside the token alphabet.
    #[error("unrecognized character {0:?}")]
    Lexical(char),

    /// A well-formed token arriving in a state that cannot take it.
    #[error("unexpected {found} {state}")]
    UnexpectedToken { found: String, state: &'static str },

    /// An operator applied with too few operands on the stack.
    #[error("`{op}` needs {needed} operand(s) but the stack holds {found}")]
    Underflow { op: char, needed: usize, found: usize },

    /// End of line reached with nothing left to assign.
    #[error("no value left to assign")]
    NothingToCommit,

    /// The expression ended with more than one value on the stack.
    #[error("{0} values left on the stack at end of line")]
    Residual(usize),
}

/// A rejection pinned to the line and column where the evaluator stopped.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct Diagnostic {
    pub kind: Rejection,
    /// The raw line, including its trailing newline.
    pub line: String,
    /// 0-based character column of the last character read.
    pub column: usize,
}

impl Diagnostic {
    pub fn new(kind: Rejection, line: impl Into<String>, column: usize) -> Self {
        Self {
            kind,
            line: line.into(),
            column,
        }
    }

    /// The offending line without its terminator.
    pub fn echo_line(&self) -> &str {
        self.line.trim_end_matches(['\n', '\r'])
    }

    /// One space per preceding character, then `^`.
    pub fn caret_line(&self) -> String {
        format!("{}^", " ".repeat(self.column))
    }

    /// Message, echoed line and caret marker, each newline-terminated.
    pub fn render(&self) -> String {
        format!("error: {}\n{}\n{}\n", self, self.echo_line(), self.caret_line())
    }
}

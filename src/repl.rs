//! The plain read-eval-print loop.
//!
//! Every line prints either its value or the diagnostic picture followed by
//! `no value`. `SessionOptions::echo_no_value` turns the trailing
//! `no value` off.
use std::io::{self, Write};

use crate::config::Config;
use crate::error::{EvalError, InputError};
use crate::evaluator::Evaluator;
use crate::format::format_value;
use crate::source::{LineSource, Prompted};
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub echo_no_value: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            echo_no_value: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Exit,
    EndOfInput,
}

pub fn run<S: LineSource, W: Write>(
    evaluator: &mut Evaluator<S>,
    out: &mut W,
    options: &SessionOptions,
) -> io::Result<SessionEnd> {
    loop {
        match evaluator.evaluate() {
            Ok(value) => writeln!(out, "{}", format_value(value))?,
            Err(EvalError::Rejected(diagnostic)) => {
                write!(out, "{}", diagnostic.render())?;
                if options.echo_no_value {
                    writeln!(out, "no value")?;
                }
            }
            Err(EvalError::Input(err)) => {
                let end = match err {
                    InputError::Exit => SessionEnd::Exit,
                    InputError::EndOfInput => SessionEnd::EndOfInput,
                    InputError::Io(e) => return Err(e),
                    InputError::Pushback(e) => return Err(io::Error::other(e)),
                };
                writeln!(out, "\nBye")?;
                out.flush()?;
                log::info!("session ended: {:?}", end);
                return Ok(end);
            }
        }
        out.flush()?;
    }
}

/// Runs a session on the process's stdin and stdout.
pub fn run_stdio(config: &Config) -> io::Result<SessionEnd> {
    let source = Prompted::new(io::stdin().lock(), io::stdout(), config.prompt.clone());
    let tokenizer = Tokenizer::new(source).with_exit_word(config.exit_word.clone());
    let mut evaluator = Evaluator::with_tokenizer(tokenizer);
    run(&mut evaluator, &mut io::stdout(), &config.session_options())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedLines;

    fn session(lines: &[&str], options: SessionOptions) -> (SessionEnd, String) {
        let source: ScriptedLines = lines.iter().copied().collect();
        let mut evaluator = Evaluator::with_tokenizer(Tokenizer::new(source).with_exit_word("exit"));
        let mut out = Vec::new();
        let end = run(&mut evaluator, &mut out, &options).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    #[test]
    fn values_print_one_per_line() {
        let (end, out) = session(&["3 4 +", "it 2 *"], SessionOptions::default());
        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(out, "7.0\n14.0\n\nBye\n");
    }

    #[test]
    fn rejection_is_reported_twice_by_default() {
        let (_, out) = session(&["~ 4"], SessionOptions::default());
        assert_eq!(
            out,
            "error: unexpected `~` at start of expression\n~ 4\n^\nno value\n\nBye\n"
        );
    }

    #[test]
    fn no_value_line_can_be_suppressed() {
        let options = SessionOptions {
            echo_no_value: false,
        };
        let (_, out) = session(&["1 2"], options);
        assert!(!out.contains("no value"));
        assert!(out.starts_with("error: 2 values left on the stack at end of line\n1 2\n   ^\n"));
    }

    #[test]
    fn exit_word_ends_the_session_early() {
        let (end, out) = session(&["1", "exit", "2"], SessionOptions::default());
        assert_eq!(end, SessionEnd::Exit);
        assert_eq!(out, "1.0\n\nBye\n");
    }
}

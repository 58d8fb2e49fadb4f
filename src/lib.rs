//! # pdacalc
//!
//! An interactive postfix desk calculator.
//!
//! Input arrives one line at a time. Each line is a postfix expression,
//! optionally assigned to a variable (`x = 3 4 +`); without an assignment
//! the value goes to `it`. Variables persist across lines.
//!
//! - [`tokenizer`] turns characters into [`Token`]s,
//! - [`evaluator`] runs the pushdown acceptor over them,
//! - [`repl`] is the plain prompt-and-print loop around both.
//!
//! ```rust
//! use pdacalc::{Evaluator, ScriptedLines};
//!
//! let lines: ScriptedLines = ["x = 5", "x 1 +"].into_iter().collect();
//! let mut evaluator = Evaluator::new(lines);
//! assert_eq!(evaluator.evaluate().unwrap(), 5.0);
//! assert_eq!(evaluator.evaluate().unwrap(), 6.0);
//! assert_eq!(evaluator.symbols().get("it"), Some(6.0));
//! ```
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod repl;
pub mod source;
pub mod symtab;
pub mod token;
pub mod tokenizer;

pub use config::{Config, Mode};
pub use diagnostic::{Diagnostic, Rejection};
pub use error::{CursorError, EvalError, InputError};
pub use evaluator::{EvaluationTrace, Evaluator, OperandStack, State, Step};
pub use format::format_value;
pub use repl::{SessionEnd, SessionOptions};
pub use source::{LineSource, Prompted, ScriptedLines};
pub use symtab::{SymbolTable, DEFAULT_TARGET};
pub use token::{BinaryOp, Token};
pub use tokenizer::{LineCursor, Tokenizer};

//! # Error types
//!
//! Failures are split by where they originate:
//!
//! - [`CursorError`]: misuse of the single-slot pushback of a line cursor,
//! - [`InputError`]: the line source ran dry, asked to exit, or failed to read,
//! - [`EvalError`]: a line was rejected, or the input above stopped.
//!
//! A rejected line is not fatal. Only [`InputError`] ends a session.
use crate::diagnostic::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// `unread` was called before any read, or twice in a row.
    #[error("no character available to unread")]
    NothingToUnread,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("end of input")]
    EndOfInput,

    /// The source produced the exit sentinel line.
    #[error("exit requested")]
    Exit,

    #[error("failed to read input line")]
    Io(#[from] std::io::Error),

    #[error("tokenizer pushback failed")]
    Pushback(#[from] CursorError),
}

impl InputError {
    /// True for the two orderly ways a session ends.
    pub fn is_halt(&self) -> bool {
        matches!(self, InputError::EndOfInput | InputError::Exit)
    }
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("{0}")]
    Rejected(Diagnostic),

    #[error(transparent)]
    Input(#[from] InputError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Rejection;

    #[test]
    fn io_errors_convert_into_input_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: InputError = io.into();
        assert!(matches!(err, InputError::Io(_)));
        assert!(!err.is_halt());
    }

    #[test]
    fn exit_and_end_of_input_halt() {
        assert!(InputError::Exit.is_halt());
        assert!(InputError::EndOfInput.is_halt());
        assert!(!InputError::Pushback(CursorError::NothingToUnread).is_halt());
    }

    #[test]
    fn rejected_displays_the_diagnostic_message() {
        let diag = Diagnostic::new(Rejection::Residual(2), "4 5 + 6\n", 7);
        let err = EvalError::Rejected(diag);
        assert_eq!(err.to_string(), "2 values left on the stack at end of line");
    }

    #[test]
    fn input_error_passes_through_transparently() {
        let err: EvalError = InputError::Exit.into();
        assert_eq!(err.to_string(), "exit requested");
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn errors_are_send_sync_static() {
        _assert_send_sync_static::<InputError>();
        _assert_send_sync_static::<EvalError>();
    }
}

//! Error types for the `PostGen` evaluator.

use std::fmt;

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of errors.
///
/// None of these are fatal: every error aborts at most the current input
/// line and is reported through the console. The only way to stop the
/// interpreter is the explicit `quit` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Blank input line (only whitespace).
    NoCommand,
    /// Command name not in the registry, or invisible in restricted mode.
    UnknownCommand,
    /// Argument count outside the command's accepted range.
    Usage,
    /// Drawing or session command issued with no active session.
    NoSession,
    /// Non-numeric text where a numeric argument was expected.
    NumericParse,
    /// The session output file could not be created.
    SessionCreate,
    /// Script file name without the required suffix.
    ScriptName,
    /// Script file could not be read.
    ScriptRead,
    /// Writing to or closing the session sink failed.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCommand => write!(f, "no command"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::Usage => write!(f, "invalid arguments"),
            Self::NoSession => write!(f, "no active session"),
            Self::NumericParse => write!(f, "invalid number"),
            Self::SessionCreate => write!(f, "session creation failed"),
            Self::ScriptName => write!(f, "bad script name"),
            Self::ScriptRead => write!(f, "script read failed"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error produced while evaluating one input line.
///
/// For [`ErrorKind::Usage`] the message is the command's usage string;
/// for everything else it is the user-facing error text.
#[derive(Debug, Clone)]
pub struct EvalError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl EvalError {
    /// Create a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

/// Convenience type alias for results using [`EvalError`].
pub type EvalResult<T> = Result<T, EvalError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_message() {
        let err = EvalError::new(ErrorKind::NoSession, "No active session!");
        assert_eq!(format!("{err}"), "No active session!");
    }

    #[test]
    fn kind_display() {
        assert_eq!(format!("{}", ErrorKind::NumericParse), "invalid number");
        assert_eq!(format!("{}", ErrorKind::Io), "I/O error");
    }
}

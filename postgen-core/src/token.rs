//! Line tokenization and argument parsing.
//!
//! Commands arrive one line at a time. A line is split on whitespace into
//! owned tokens, so nothing aliases the input buffer once the line is
//! consumed. The numeric parsers return explicit results: non-numeric input
//! is always an error, never a silent zero.

use crate::error::{ErrorKind, EvalError, EvalResult};

/// Split one input line into owned, whitespace-delimited tokens.
///
/// A blank (or all-whitespace) line yields an empty vector. That is not an
/// error at this level; the dispatcher reports it as "no command".
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}

/// Parse a coordinate, radius, or angle argument.
pub fn parse_number(token: &str) -> EvalResult<f64> {
    token
        .parse()
        .map_err(|_| EvalError::new(ErrorKind::NumericParse, "Arguments must be numbers!"))
}

/// Parse a repeat or vertex count argument (non-negative integer).
pub fn parse_count(token: &str) -> EvalResult<u32> {
    token
        .parse()
        .map_err(|_| EvalError::new(ErrorKind::NumericParse, "Arguments must be numbers!"))
}

/// Parse an optional flag argument. Any non-zero numeric value sets the flag.
pub fn parse_flag(token: &str) -> EvalResult<bool> {
    Ok(parse_number(token)? != 0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

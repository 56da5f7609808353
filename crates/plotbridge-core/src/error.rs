// File: crates/plotbridge-core/src/error.rs
// Summary: Error type for recoverable boundary failures and the fatal path for contract violations.

use crate::context::ContextId;
use crate::format::FormatterToken;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failures a caller can observe and recover from.
///
/// Contract violations that leave the engine in an undefined state (value kind
/// mismatch on a style variable, unbalanced pops, unknown formatter tokens at
/// render time) do not appear here; they go through [`fatal`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation needed a current context and none is set.
    #[error("no current plot context")]
    NoContext,

    /// The id does not name a live context.
    #[error("unknown plot context {0:?}")]
    UnknownContext(ContextId),

    /// The token does not name a registered tick formatter.
    #[error("unknown tick formatter token {0:?}")]
    UnknownFormatter(FormatterToken),

    /// X and Y sequences of an XY series have different lengths.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        x_len: usize,
        y_len: usize,
    },

    /// A strided view would read past the end of its backing buffer.
    #[error("strided view out of bounds: offset {offset} + {count} x stride {stride} exceeds {len} bytes")]
    StrideOutOfBounds {
        offset: usize,
        count: usize,
        stride: usize,
        len: usize,
    },

    /// An integer does not map to any member of a closed enumeration.
    #[error("invalid {kind} value {value}")]
    InvalidEnum {
        kind: &'static str,
        value: i32,
    },
}

/// Report a contract violation and stop.
///
/// Panics; when reached through an `extern "C"` entry point the panic cannot
/// unwind across the boundary and the process aborts (guaranteed since Rust 1.81,
/// the workspace `rust-version`).
#[track_caller]
pub fn fatal(message: &str) -> ! {
    tracing::error!(target: "plotbridge", "{message}");
    panic!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_length_mismatch() {
        let err = Error::DataLengthMismatch { x_len: 10, y_len: 20 };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn fatal_panics_with_message() {
        fatal("boom");
    }
}

//! Error types for simdreg slice operations.
//!
//! Register operations are total and never fail. The slice helpers accept
//! caller-supplied buffers, and those inputs are validated here instead of
//! panicking.

use std::fmt;

/// Errors that can occur during simdreg slice operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimdregError {
    /// Two or more input slices that must be processed element by element
    /// have different lengths.
    LengthMismatch {
        /// Length of the first slice.
        left: usize,
        /// Length of the offending slice.
        right: usize,
    },
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for SimdregError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimdregError::LengthMismatch { left, right } => write!(
                f,
                "Length mismatch: slices must have the same length (left: {}, right: {})",
                left, right
            ),
            SimdregError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
        }
    }
}

impl std::error::Error for SimdregError {}

/// Result type alias for simdreg operations.
pub type Result<T> = std::result::Result<T, SimdregError>;

/// Creates a length mismatch error.
pub fn length_mismatch(left: usize, right: usize) -> SimdregError {
    SimdregError::LengthMismatch { left, right }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> SimdregError {
    SimdregError::ValidationError {
        message: message.into(),
    }
}

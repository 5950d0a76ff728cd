//! Error types for the Galaxy3D camera crate
//!
//! This module defines the error types raised by planes, frustums,
//! cameras and bounds classification.

use std::fmt;

/// Result type for Galaxy3D camera operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D camera errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A required input is missing or unusable
    InvalidArgument(String),

    /// A slice was read outside of its bounds
    OutOfRange {
        /// First element requested
        offset: usize,
        /// Number of elements requested
        len: usize,
        /// Number of elements actually available
        available: usize,
    },

    /// Non-finite input, or a computation that produced a non-finite result
    NumericDomain(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::OutOfRange { offset, len, available } => write!(
                f,
                "Out of range: {} element(s) at offset {} exceed slice of length {}",
                len, offset, available
            ),
            Error::NumericDomain(msg) => write!(f, "Numeric domain error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

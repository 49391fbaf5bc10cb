//! Error types for gesture-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Geometry and linear-algebra routines return degenerate values for
//! numerically degenerate input; only structurally invalid input (empty
//! gestures, mismatched lengths, malformed streams) produces an error.

use thiserror::Error;

/// gesture-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// An operation that requires at least one point received none
    #[error("null or empty input: {0}")]
    EmptyInput(&'static str),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two sequences that must have equal length do not
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Timestamps missing for some points or decreasing
    #[error("invalid timestamps: {0}")]
    InvalidTimestamps(String),

    /// No feature subset yields an invertible matrix
    #[error("matrix is singular: {retained} features retained")]
    SingularMatrix { retained: usize },

    /// Malformed binary stream
    #[error("format error at byte {position}: {message}")]
    Format { position: u64, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gesture-core operations
pub type Result<T> = std::result::Result<T, Error>;

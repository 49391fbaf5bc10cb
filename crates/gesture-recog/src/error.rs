//! Error types for gesture-recog

use thiserror::Error;

/// Errors that can occur during training, classification or persistence
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] gesture_core::Error),

    /// No class with this name exists
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// A class with this name already exists
    #[error("duplicate class: {0}")]
    DuplicateClass(String),

    /// Too few examples to estimate a pooled covariance
    #[error("insufficient examples: {examples} examples for {classes} classes")]
    InsufficientExamples { examples: usize, classes: usize },

    /// The pooled covariance could not be made invertible
    #[error("singular covariance: {retained} features retained")]
    SingularCovariance { retained: usize },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed classifier definition
    #[error("format error at byte {position} (class {class_index:?}): {message}")]
    Format {
        class_index: Option<usize>,
        position: u64,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;

impl RecogError {
    /// Attach a class index to a decoding error.
    pub(crate) fn in_class(err: gesture_core::Error, class_index: Option<usize>) -> Self {
        match err {
            gesture_core::Error::Format { position, message } => Self::Format {
                class_index,
                position,
                message,
            },
            gesture_core::Error::Io(e) => Self::Io(e),
            other => Self::Core(other),
        }
    }
}

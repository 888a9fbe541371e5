//! Error types for pixkit-filter

use pixkit_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixkit_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid tone curve definition or edit
    #[error("invalid tone curve: {0}")]
    InvalidCurve(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl FilterError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::Core(e) => e.kind(),
            FilterError::InvalidKernel(_)
            | FilterError::InvalidCurve(_)
            | FilterError::InvalidParameters(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

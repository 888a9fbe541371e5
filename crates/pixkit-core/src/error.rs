//! Error types for pixkit-core
//!
//! Provides the error type for buffer construction and pixel access.
//!
//! Every error in the workspace can be classified with [`ErrorKind`], which
//! is the taxonomy callers (a GUI shell, a CLI) use to decide how to report
//! a failure.

use thiserror::Error;

/// Coarse classification shared by every error type in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter is out of range or otherwise unusable
    InvalidArgument,
    /// A referenced definition file does not exist
    NotFound,
    /// A definition file exists but its contents cannot be parsed
    MalformedData,
    /// Anything else (I/O failures, codec errors)
    Other,
}

/// pixkit error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel data length does not match `height * stride`
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl Error {
    /// Classify this error.
    ///
    /// Every core error is a caller mistake.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDimension { .. }
            | Error::BufferSizeMismatch { .. }
            | Error::IndexOutOfBounds { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type alias for pixkit operations
pub type Result<T> = std::result::Result<T, Error>;

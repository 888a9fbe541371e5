//! I/O error types
//!
//! Provides a unified error type for reading and writing images and filter
//! definitions. Parse failures carry the offending path and line so that a
//! caller can point the user at the broken definition.

use pixkit_core::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for pixkit I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (permission denied, disk full, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A referenced definition or image file does not exist
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A definition file could not be parsed
    #[error("malformed data at line {line}: {message}")]
    MalformedData { line: usize, message: String },

    /// The image format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image codec returned an error
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] pixkit_core::Error),

    /// A parsed definition was rejected by the filter library
    #[error("filter error: {0}")]
    Filter(#[from] pixkit_filter::FilterError),
}

impl IoError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IoError::NotFound { .. } => ErrorKind::NotFound,
            IoError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            IoError::MalformedData { .. } => ErrorKind::MalformedData,
            // only raised for definitions parsed from a file
            IoError::Filter(_) => ErrorKind::MalformedData,
            IoError::UnsupportedFormat(_) => ErrorKind::InvalidArgument,
            IoError::Core(e) => e.kind(),
            IoError::Io(_) | IoError::Image(_) => ErrorKind::Other,
        }
    }

    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        IoError::MalformedData {
            line,
            message: message.into(),
        }
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;

/// Open a file, mapping a missing file to [`IoError::NotFound`].
pub(crate) fn open(path: &std::path::Path) -> IoResult<std::fs::File> {
    std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let e = IoError::NotFound {
            path: PathBuf::from("x.conv"),
        };
        assert_eq!(e.kind(), ErrorKind::NotFound);
        assert_eq!(IoError::malformed(3, "bad").kind(), ErrorKind::MalformedData);
        let e = IoError::from(pixkit_filter::FilterError::InvalidKernel("0x0".into()));
        assert_eq!(e.kind(), ErrorKind::MalformedData);
        assert_eq!(
            IoError::UnsupportedFormat("tga".into()).kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_open_missing() {
        let err = open(std::path::Path::new("/nonexistent/definitely/missing.filter")).unwrap_err();
        assert!(matches!(err, IoError::NotFound { .. }));
    }
}

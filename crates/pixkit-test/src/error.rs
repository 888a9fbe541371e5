//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write an image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_write_message() {
        let err = TestError::ImageWrite {
            path: "tests/regout/x.01.png".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write image 'tests/regout/x.01.png': disk full"
        );
    }
}

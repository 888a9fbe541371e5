//! Error types for pixkit-color

use pixkit_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during dithering and quantization
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixkit_core::Error),

    /// Invalid parameters (shade, division, color or cluster counts)
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Bayer matrix size outside the supported set
    #[error("unsupported Bayer matrix size {0} (expected 2, 3, 4 or 6)")]
    UnsupportedBayerSize(u32),

    /// Unknown error-diffusion filter name
    #[error("unknown error diffusion filter: {0}")]
    UnknownFilter(String),

    /// Palette has no colors to map onto
    #[error("empty palette")]
    EmptyPalette,
}

impl ColorError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ColorError::Core(e) => e.kind(),
            ColorError::InvalidParameters(_)
            | ColorError::UnsupportedBayerSize(_)
            | ColorError::UnknownFilter(_)
            | ColorError::EmptyPalette => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;

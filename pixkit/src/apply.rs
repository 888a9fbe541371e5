//! Load a persisted definition, then apply it
//!
//! Each helper reads one definition file with [`pixkit_io`] and runs the
//! matching transform from [`pixkit_filter`].

use pixkit_core::{ErrorKind, PixelBuffer};
use pixkit_filter::{ConvolveOptions, FilterError, convert_to_grayscale, convolve};
use pixkit_io::{IoError, read_grayscale_options_or_default, read_kernel, read_tone_map};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Failure while loading or applying a definition
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The definition could not be read
    #[error(transparent)]
    Io(#[from] IoError),

    /// The transform rejected the definition or the buffer
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl ApplyError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplyError::Io(e) => e.kind(),
            ApplyError::Filter(e) => e.kind(),
        }
    }
}

pub type ApplyResult<T> = Result<T, ApplyError>;

/// Convolve `buf` with the kernel stored at `path`.
///
/// # Errors
///
/// [`ErrorKind::NotFound`] if the file is missing, [`ErrorKind::MalformedData`]
/// if it cannot be parsed.
pub fn apply_kernel_file<P: AsRef<Path>>(
    buf: &PixelBuffer,
    path: P,
    options: &ConvolveOptions,
) -> ApplyResult<PixelBuffer> {
    let path = path.as_ref();
    let kernel = read_kernel(path)?;
    debug!(path = %path.display(), "apply kernel file");
    Ok(convolve(buf, &kernel, options)?)
}

/// Map `buf` through the tone curve or lookup table stored at `path`.
pub fn apply_curve_file<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> ApplyResult<PixelBuffer> {
    let path = path.as_ref();
    let map = read_tone_map(path)?;
    debug!(path = %path.display(), "apply curve file");
    Ok(map.apply(buf)?)
}

/// Convert `buf` to grayscale with the weights stored at `path`.
///
/// A missing file means the default Rec. 601 weights.
pub fn apply_grayscale_file<P: AsRef<Path>>(
    buf: &PixelBuffer,
    path: P,
) -> ApplyResult<PixelBuffer> {
    let options = read_grayscale_options_or_default(path)?;
    Ok(convert_to_grayscale(buf, &options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample() -> PixelBuffer {
        let data: Vec<u8> = (0..16u8).flat_map(|i| [i * 10, i * 5, i * 3, 255]).collect();
        PixelBuffer::from_bgra(4, 4, data).unwrap()
    }

    #[test]
    fn test_kernel_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.conv");
        fs::write(&path, "3,3\n0,0,0\n0,1,0\n0,0,0\n").unwrap();
        let buf = sample();
        let opts = ConvolveOptions::with_border(pixkit_filter::BorderPolicy::Copy);
        let out = apply_kernel_file(&buf, &path, &opts).unwrap();
        assert_eq!(out.data(), buf.data());
    }

    #[test]
    fn test_curve_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invert.filter");
        fs::write(&path, "0,255\n255,0\n").unwrap();
        let out = apply_curve_file(&sample(), &path).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_grayscale_file_default() {
        let dir = tempfile::tempdir().unwrap();
        let out = apply_grayscale_file(&sample(), dir.path().join("missing")).unwrap();
        assert!(out.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn test_error_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let err = apply_kernel_file(&sample(), dir.path().join("nope.conv"), &Default::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let path = dir.path().join("broken.filter");
        fs::write(&path, "0,0\nfoo\n").unwrap();
        let err = apply_curve_file(&sample(), &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
    }
}

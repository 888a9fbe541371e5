//! Grayscale weight parameter files
//!
//! One `key value` pair per line, separated by whitespace:
//!
//! ```text
//! R_weight 0.299
//! G_weight 0.587
//! B_weight 0.114
//! ```
//!
//! Keys that are absent keep their Rec. 601 default. Unknown keys are skipped.

use crate::error::open;
use crate::{IoError, IoResult};
use pixkit_filter::GrayscaleOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Read grayscale weights from a parameter file.
///
/// # Errors
///
/// Returns [`IoError::NotFound`] if the file is missing and
/// [`IoError::MalformedData`] if a known key has a non-numeric value.
pub fn read_grayscale_options<P: AsRef<Path>>(path: P) -> IoResult<GrayscaleOptions> {
    let path = path.as_ref();
    let opts = read_grayscale_options_from_reader(BufReader::new(open(path)?))?;
    debug!(
        path = %path.display(),
        r = opts.red_weight,
        g = opts.green_weight,
        b = opts.blue_weight,
        "loaded grayscale weights"
    );
    Ok(opts)
}

/// Read grayscale weights, falling back to the defaults when the file is missing.
pub fn read_grayscale_options_or_default<P: AsRef<Path>>(path: P) -> IoResult<GrayscaleOptions> {
    match read_grayscale_options(path) {
        Err(IoError::NotFound { .. }) => Ok(GrayscaleOptions::default()),
        other => other,
    }
}

/// Read grayscale weights from any buffered reader.
pub fn read_grayscale_options_from_reader<R: BufRead>(reader: R) -> IoResult<GrayscaleOptions> {
    let mut opts = GrayscaleOptions::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        let slot = match key {
            "R_weight" => &mut opts.red_weight,
            "G_weight" => &mut opts.green_weight,
            "B_weight" => &mut opts.blue_weight,
            _ => continue,
        };
        *slot = value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| IoError::malformed(i + 1, format!("invalid weight '{value}' for {key}")))?;
    }
    Ok(opts)
}

/// Write grayscale weights to a parameter file.
pub fn write_grayscale_options<P: AsRef<Path>>(opts: &GrayscaleOptions, path: P) -> IoResult<()> {
    let mut file = std::fs::File::create(path.as_ref())?;
    write_grayscale_options_to_writer(opts, &mut file)
}

/// Write grayscale weights to any writer.
pub fn write_grayscale_options_to_writer<W: Write>(
    opts: &GrayscaleOptions,
    writer: &mut W,
) -> IoResult<()> {
    writeln!(writer, "R_weight {}", opts.red_weight)?;
    writeln!(writer, "G_weight {}", opts.green_weight)?;
    writeln!(writer, "B_weight {}", opts.blue_weight)?;
    Ok(())
}

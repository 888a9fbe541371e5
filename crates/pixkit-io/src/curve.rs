//! Tone-curve definition files (`.filter`)
//!
//! Two forms are accepted:
//!
//! - **Points**: one `input,output` byte pair per line
//! - **Table**: a single line of 256 comma-separated bytes, the full lookup table
//!
//! A file whose only non-blank line has more than two fields is read as a
//! table. Blank lines are ignored in both forms. Missing curve endpoints
//! are synthesized by [`ToneCurve::new`].

use crate::error::open;
use crate::{IoError, IoResult};
use pixkit_core::PixelBuffer;
use pixkit_filter::{ControlPoint, FilterResult, Lut, ToneCurve, apply_lut};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// A loaded tone mapping, in whichever form the file used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToneMap {
    /// Sparse control points
    Curve(ToneCurve),
    /// Precomputed 256-entry table
    Table(Lut),
}

impl ToneMap {
    /// The mapping as a lookup table.
    pub fn to_lut(&self) -> Lut {
        match self {
            ToneMap::Curve(c) => c.to_lut(),
            ToneMap::Table(t) => *t,
        }
    }

    /// Map R, G and B of every pixel.
    pub fn apply(&self, buf: &PixelBuffer) -> FilterResult<PixelBuffer> {
        apply_lut(buf, &self.to_lut())
    }
}

/// Read a tone-curve definition file.
///
/// # Errors
///
/// Returns [`IoError::NotFound`] if the file is missing and
/// [`IoError::MalformedData`] if the contents cannot be parsed.
pub fn read_tone_map<P: AsRef<Path>>(path: P) -> IoResult<ToneMap> {
    let path = path.as_ref();
    let map = read_tone_map_from_reader(BufReader::new(open(path)?))?;
    match &map {
        ToneMap::Curve(c) => {
            debug!(path = %path.display(), points = c.points().len(), "loaded tone curve")
        }
        ToneMap::Table(_) => debug!(path = %path.display(), "loaded lookup table"),
    }
    Ok(map)
}

/// Read a tone-curve definition from any buffered reader.
pub fn read_tone_map_from_reader<R: BufRead>(reader: R) -> IoResult<ToneMap> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push((i + 1, line));
        }
    }

    if let [(line_no, line)] = lines.as_slice() {
        if line.split(',').count() > 2 {
            return parse_table(*line_no, line).map(ToneMap::Table);
        }
    }

    let mut points = Vec::with_capacity(lines.len());
    for (line_no, line) in &lines {
        points.push(parse_point(*line_no, line)?);
    }
    Ok(ToneMap::Curve(ToneCurve::new(points)))
}

/// Parse a tone-curve definition held in memory.
pub fn read_tone_map_from_str(text: &str) -> IoResult<ToneMap> {
    read_tone_map_from_reader(text.as_bytes())
}

fn parse_byte(line_no: usize, field: &str) -> IoResult<u8> {
    let field = field.trim();
    field
        .parse::<u8>()
        .map_err(|_| IoError::malformed(line_no, format!("invalid byte value '{field}'")))
}

fn parse_point(line_no: usize, line: &str) -> IoResult<ControlPoint> {
    match line.split(',').collect::<Vec<_>>().as_slice() {
        [input, output] => Ok(ControlPoint::new(
            parse_byte(line_no, input)?,
            parse_byte(line_no, output)?,
        )),
        _ => Err(IoError::malformed(
            line_no,
            format!("expected 'input,output', found '{line}'"),
        )),
    }
}

fn parse_table(line_no: usize, line: &str) -> IoResult<Lut> {
    let values = line
        .split(',')
        .map(|f| parse_byte(line_no, f))
        .collect::<IoResult<Vec<u8>>>()?;
    if values.len() != 256 {
        return Err(IoError::malformed(
            line_no,
            format!("lookup table needs 256 entries, found {}", values.len()),
        ));
    }
    Ok(Lut::from_slice(&values)?)
}

/// Write a tone curve as control points.
pub fn write_tone_curve<P: AsRef<Path>>(curve: &ToneCurve, path: P) -> IoResult<()> {
    let mut file = std::fs::File::create(path.as_ref())?;
    write_tone_curve_to_writer(curve, &mut file)
}

/// Write a tone curve as control points to any writer.
pub fn write_tone_curve_to_writer<W: Write>(curve: &ToneCurve, writer: &mut W) -> IoResult<()> {
    for p in curve.points() {
        writeln!(writer, "{},{}", p.input, p.output)?;
    }
    Ok(())
}

/// Write a lookup table as a single line of 256 values.
pub fn write_lut<P: AsRef<Path>>(lut: &Lut, path: P) -> IoResult<()> {
    let mut file = std::fs::File::create(path.as_ref())?;
    write_lut_to_writer(lut, &mut file)
}

/// Write a lookup table to any writer.
pub fn write_lut_to_writer<W: Write>(lut: &Lut, writer: &mut W) -> IoResult<()> {
    let fields: Vec<String> = lut.as_slice().iter().map(u8::to_string).collect();
    writeln!(writer, "{}", fields.join(","))?;
    Ok(())
}

/// Write either form.
pub fn write_tone_map<P: AsRef<Path>>(map: &ToneMap, path: P) -> IoResult<()> {
    match map {
        ToneMap::Curve(c) => write_tone_curve(c, path),
        ToneMap::Table(t) => write_lut(t, path),
    }
}

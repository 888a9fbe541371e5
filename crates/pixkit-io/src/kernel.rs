//! Kernel definition files (`.conv`)
//!
//! Text format:
//!
//! ```text
//! rows,cols
//! w00,w01,...,w0(cols-1)
//! ...
//! ```
//!
//! Weights use `.` as the decimal separator. A header consisting of a single
//! integer `n` is read as an `n x n` kernel. Blank lines are ignored.

use crate::error::open;
use crate::{IoError, IoResult};
use pixkit_filter::Kernel;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Read a kernel definition file.
///
/// # Errors
///
/// Returns [`IoError::NotFound`] if the file is missing and
/// [`IoError::MalformedData`] if the contents cannot be parsed.
pub fn read_kernel<P: AsRef<Path>>(path: P) -> IoResult<Kernel> {
    let path = path.as_ref();
    let kernel = read_kernel_from_reader(BufReader::new(open(path)?))?;
    debug!(
        path = %path.display(),
        rows = kernel.rows(),
        cols = kernel.cols(),
        "loaded kernel"
    );
    Ok(kernel)
}

/// Read a kernel definition from any buffered reader.
pub fn read_kernel_from_reader<R: BufRead>(reader: R) -> IoResult<Kernel> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push((i + 1, line));
        }
    }
    parse_lines(&lines)
}

/// Parse a kernel definition held in memory.
pub fn read_kernel_from_str(text: &str) -> IoResult<Kernel> {
    read_kernel_from_reader(text.as_bytes())
}

fn parse_lines(lines: &[(usize, String)]) -> IoResult<Kernel> {
    let (header_line, header) = lines
        .first()
        .ok_or_else(|| IoError::malformed(1, "empty kernel definition"))?;
    let (rows, cols) = parse_header(*header_line, header)?;

    let body = &lines[1..];
    if body.len() != rows as usize {
        let line = body.last().map_or(*header_line, |(n, _)| *n);
        return Err(IoError::malformed(
            line,
            format!("expected {rows} weight rows, found {}", body.len()),
        ));
    }

    let mut weights = Vec::new();
    for (line_no, line) in body {
        let before = weights.len();
        for field in line.split(',') {
            let field = field.trim();
            let w: f64 = field
                .parse()
                .map_err(|_| IoError::malformed(*line_no, format!("invalid weight '{field}'")))?;
            if !w.is_finite() {
                return Err(IoError::malformed(*line_no, format!("non-finite weight '{field}'")));
            }
            weights.push(w);
        }
        let found = weights.len() - before;
        if found != cols as usize {
            return Err(IoError::malformed(
                *line_no,
                format!("expected {cols} weights, found {found}"),
            ));
        }
    }

    Ok(Kernel::from_slice(rows, cols, &weights)?)
}

fn parse_header(line_no: usize, header: &str) -> IoResult<(u32, u32)> {
    let parse_dim = |s: &str| -> IoResult<u32> {
        let s = s.trim();
        match s.parse::<u32>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(IoError::malformed(line_no, format!("invalid kernel dimension '{s}'"))),
        }
    };
    let parts: Vec<&str> = header.split(',').collect();
    match parts.as_slice() {
        [n] => {
            let n = parse_dim(n)?;
            Ok((n, n))
        }
        [r, c] => Ok((parse_dim(r)?, parse_dim(c)?)),
        _ => Err(IoError::malformed(
            line_no,
            format!("expected 'rows,cols' header, found '{header}'"),
        )),
    }
}

/// Write a kernel definition file.
pub fn write_kernel<P: AsRef<Path>>(kernel: &Kernel, path: P) -> IoResult<()> {
    let mut file = std::fs::File::create(path.as_ref())?;
    write_kernel_to_writer(kernel, &mut file)
}

/// Write a kernel definition to any writer.
///
/// Weights are written in their shortest round-trip decimal form.
pub fn write_kernel_to_writer<W: Write>(kernel: &Kernel, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "{},{}", kernel.rows(), kernel.cols())?;
    for row in kernel.row_slices() {
        let fields: Vec<String> = row.iter().map(|w| w.to_string()).collect();
        writeln!(writer, "{}", fields.join(","))?;
    }
    Ok(())
}

/// Serialize a kernel definition to a string.
pub fn write_kernel_to_string(kernel: &Kernel) -> IoResult<String> {
    let mut out = Vec::new();
    write_kernel_to_writer(kernel, &mut out)?;
    String::from_utf8(out).map_err(|e| IoError::malformed(0, e.to_string()))
}

//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use pixkit_core::PixelBuffer;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Run checks only (default)
    #[default]
    Compare,
    /// Run checks and write intermediate images
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "median")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two buffers for exact equality of dimensions and bytes
    pub fn compare_buffers(&mut self, buf1: &PixelBuffer, buf2: &PixelBuffer) -> bool {
        self.index += 1;

        if !buf1.sizes_equal(buf2) {
            let msg = format!(
                "Failure in {}_reg: buffer comparison for index {} - dimension mismatch \
                 ({}x{} vs {}x{})",
                self.test_name,
                self.index,
                buf1.width(),
                buf1.height(),
                buf2.width(),
                buf2.height()
            );
            self.fail(msg);
            return false;
        }

        let mismatch = buf1
            .data()
            .chunks_exact(4)
            .zip(buf2.data().chunks_exact(4))
            .position(|(a, b)| a != b);
        if let Some(p) = mismatch {
            let w = buf1.width() as usize;
            let msg = format!(
                "Failure in {}_reg: buffer comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name,
                self.index,
                p % w,
                p / w
            );
            self.fail(msg);
            return false;
        }

        true
    }

    /// Compare two byte arrays (serialized definitions, tables)
    pub fn compare_bytes(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Record a boolean condition
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        condition
    }

    /// Write a buffer as PNG in display mode; no-op otherwise
    ///
    /// Output goes to `tests/regout/<name>.<index>.png`.
    pub fn write_buffer(&mut self, buf: &PixelBuffer) -> TestResult<()> {
        self.index += 1;
        if !self.display() {
            return Ok(());
        }

        let path = format!("{}/{}.{:02}.png", regout_dir(), self.test_name, self.index);
        pixkit_io::write_image(buf, &path).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
        assert_eq!(rp.index(), 3);
    }

    #[test]
    fn test_compare_buffers() {
        let a = PixelBuffer::from_bgra(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let b = PixelBuffer::from_bgra(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 9]).unwrap();
        let c = PixelBuffer::new(1, 2).unwrap();
        let mut rp = RegParams::new("test_buffers");
        assert!(rp.compare_buffers(&a, &a.clone()));
        assert!(!rp.compare_buffers(&a, &b));
        assert!(rp.failures()[0].contains("(1, 0)"));
        assert!(!rp.compare_buffers(&a, &c));
    }

    #[test]
    fn test_check_and_bytes() {
        let mut rp = RegParams::new("test_check");
        assert!(rp.check(true, "ok"));
        assert!(rp.compare_bytes(b"abc", b"abc"));
        assert!(!rp.compare_bytes(b"abc", b"abd"));
        assert!(!rp.cleanup());
    }
}

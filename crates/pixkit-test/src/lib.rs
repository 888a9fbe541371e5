//! pixkit-test - Regression test framework for pixkit
//!
//! Regression tests record a sequence of numbered checks in a [`RegParams`]
//! and assert on the overall outcome at the end. Two modes are supported:
//!
//! - **Compare**: Run the checks (default)
//! - **Display**: Run the checks and also write every buffer passed to
//!   [`RegParams::write_buffer`] as a PNG for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use pixkit_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("median");
//! let buf = fixtures::gradient(64, 64);
//! rp.compare_values(64.0, buf.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixkit-test is at crates/pixkit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

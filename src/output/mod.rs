//! Output formatters for Broodminder readings.
//!
//! Each formatter writes one line per reading: a human-readable text line
//! or a JSON record for machine consumers.

pub mod json;
pub mod text;

use crate::reading::Reading;
use std::io::{self, Write};

/// Trait for rendering readings to an output stream.
pub trait OutputFormatter: Send + Sync {
    /// Write one reading as a single newline-terminated line.
    fn write_reading(&self, reading: &Reading, out: &mut dyn Write) -> io::Result<()>;
}

//! Human-readable byte sizes

use std::fmt;

const UNITS: [char; 7] = ['B', 'K', 'M', 'G', 'T', 'P', 'E'];

/// Byte count that renders as `<mantissa><unit>`, e.g. `1.5M (1572864)`.
///
/// The mantissa is scaled by 1024 per unit and rounded up to one decimal.
/// Anything at or above a kibibyte also shows the exact byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSize(pub u64);

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mantissa = self.0 as f64;
        let mut unit = 0;
        while mantissa >= 1024.0 && unit < UNITS.len() - 1 {
            mantissa /= 1024.0;
            unit += 1;
        }
        let rounded = (mantissa * 10.0).ceil() / 10.0;
        write!(f, "{}{}", rounded, UNITS[unit])?;
        if unit > 0 {
            write!(f, " ({})", self.0)?;
        }
        Ok(())
    }
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    FileSize(bytes).to_string()
}

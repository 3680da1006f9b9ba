//! Human-readable size formatting.

use serde::{Deserialize, Serialize};

/// Unit system used by [`friendly_size`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnits {
    /// Powers of 1024 (KiB, MiB, ...).
    #[default]
    Binary,
    /// Powers of 1000 (kB, MB, ...).
    Decimal,
}

/// Format a byte count for display, e.g. `1536` → `"1.50 KiB"`.
pub fn friendly_size(bytes: u64, units: SizeUnits) -> String {
    match units {
        SizeUnits::Binary => humansize::format_size(bytes, humansize::BINARY),
        SizeUnits::Decimal => humansize::format_size(bytes, humansize::DECIMAL),
    }
}

//! Severity band classification
//!
//! Maps a concentration to a qualitative label using the configured
//! threshold bands. Bands are independent: they may overlap or leave
//! gaps, and classification does not validate their consistency.

use crate::models::{Band, Level, ThresholdBands};

/// Classify a concentration against the configured bands.
///
/// Evaluation order is fixed: low, then medium, then high; the first band
/// containing the value wins. Low and medium use half-open `[min, max)`
/// intervals; high uses a closed `[min, max]` interval so the top of the
/// measurable range stays classifiable. (The asymmetry is preserved
/// observed behavior, not a deliberate convention.) Absent bands are
/// skipped; no match yields `OutOfRange`.
pub fn classify(bands: &ThresholdBands, concentration: f32) -> Level {
    if let Some(low) = bands.low {
        if contains_half_open(low, concentration) {
            return Level::Low;
        }
    }
    if let Some(medium) = bands.medium {
        if contains_half_open(medium, concentration) {
            return Level::Medium;
        }
    }
    if let Some(high) = bands.high {
        if high.min <= concentration && concentration <= high.max {
            return Level::High;
        }
    }
    Level::OutOfRange
}

#[inline]
fn contains_half_open(band: Band, value: f32) -> bool {
    band.min <= value && value < band.max
}

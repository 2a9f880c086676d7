//! Calibration curve validation
//!
//! Gates every write to an analyte's calibration curve. A proposed point
//! set is either accepted wholesale or rejected with a specific reason,
//! leaving the prior curve untouched.

use crate::models::{Analyte, CalibrationPoint, ThresholdBands};

/// Validate a proposed calibration point set.
///
/// Requirements: at least 2 points, unique concentrations (exact
/// equality), and rgb-sum strictly decreasing as concentration increases.
pub fn validate_points(points: &[CalibrationPoint]) -> Result<(), String> {
    if points.len() < 2 {
        return Err("At least 2 points are required.".to_string());
    }

    let mut sorted: Vec<CalibrationPoint> = points.to_vec();
    sorted.sort_by(|a, b| a.concentration.total_cmp(&b.concentration));

    for pair in sorted.windows(2) {
        if pair[0].concentration == pair[1].concentration {
            return Err("Duplicate concentrations are not allowed.".to_string());
        }
    }

    for pair in sorted.windows(2) {
        if pair[1].rgb_sum - pair[0].rgb_sum >= 0 {
            return Err(
                "RGB totals must strictly decrease as concentration increases.".to_string(),
            );
        }
    }

    Ok(())
}

impl Analyte {
    /// Replace this analyte's calibration curve with a validated point
    /// set. Rejection leaves the existing curve in place; acceptance
    /// swaps the whole curve at once.
    pub fn replace_calibration(&mut self, points: Vec<CalibrationPoint>) -> Result<(), String> {
        validate_points(&points)?;
        self.points = points;
        Ok(())
    }

    /// Replace this analyte's threshold bands. Band consistency (overlap,
    /// gaps) is a configuration concern and is not validated here.
    pub fn replace_thresholds(&mut self, thresholds: ThresholdBands) {
        self.thresholds = thresholds;
    }
}

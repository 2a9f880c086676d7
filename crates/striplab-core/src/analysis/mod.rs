//! Colorimetric estimation engine
//!
//! Walks each sample point through the sampler, the curve interpolator and
//! the band classifier, producing one result record per point. Every call
//! receives its own image and profile snapshot and holds no state between
//! invocations, so callers may run analyses concurrently without
//! coordination.

pub mod background;
pub mod classify;
pub mod interpolation;
pub mod layout;
pub mod sampling;

#[cfg(test)]
mod tests;

// Re-export public API
pub use background::{estimate_background, BackgroundEstimate};
pub use classify::classify;
pub use interpolation::interpolate;
pub use layout::{auto_layout, pair_user_points};
pub use sampling::{sample_mean_rgb, sample_rgb_sum};

use crate::color::scientific_color_data;
use crate::config::EngineDefaults;
use crate::models::{
    AnalysisMode, PointResult, Profile, Reading, RgbImage, RunRecord, SamplePoint,
};
use crate::verbose_println;

/// Identifier of the neighborhood scheme recorded on every run.
pub const SAMPLING_SCHEME: &str = "5-pixel";

/// Per-invocation engine options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzeOptions {
    pub mode: AnalysisMode,

    /// Subtract an estimated background tint before sampling
    pub normalize: bool,

    /// Reference patch center; `None` anchors the patch at the top-left
    /// corner
    pub background_point: Option<SamplePoint>,

    pub patch_size: u32,
    pub black_threshold: f32,

    /// Cap on auto-placed points in quantifying modes
    pub max_auto_points: usize,

    /// Point count in scientific mode
    pub scientific_points: usize,
}

impl AnalyzeOptions {
    /// Build options from loaded engine defaults.
    pub fn from_defaults(defaults: &EngineDefaults) -> Self {
        Self {
            mode: defaults.mode,
            normalize: false,
            background_point: None,
            patch_size: defaults.patch_size,
            black_threshold: defaults.black_threshold,
            max_auto_points: defaults.max_auto_points,
            scientific_points: defaults.scientific_points,
        }
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self::from_defaults(&EngineDefaults::default())
    }
}

/// Run one analysis over `image`.
///
/// In quantifying modes ([`AnalysisMode::Default`] /
/// [`AnalysisMode::Customize`]), each point is paired with an active
/// analyte of `profile` in order and read as intensity → concentration →
/// severity level. In [`AnalysisMode::Scientific`], points are read as
/// averaged color and reported as display conversions instead.
///
/// `points` are user-placed coordinates; `None` lays points out
/// automatically along the image midline. User points are truncated to
/// the applicable cap and sorted left-to-right before pairing.
pub fn analyze(
    image: &RgbImage,
    profile: &Profile,
    points: Option<Vec<SamplePoint>>,
    options: &AnalyzeOptions,
) -> RunRecord {
    match options.mode {
        AnalysisMode::Scientific => analyze_scientific(image, points, options),
        AnalysisMode::Default | AnalysisMode::Customize => {
            analyze_quantified(image, profile, points, options)
        }
    }
}

fn analyze_quantified(
    image: &RgbImage,
    profile: &Profile,
    points: Option<Vec<SamplePoint>>,
    options: &AnalyzeOptions,
) -> RunRecord {
    let analytes = profile.active_analytes();

    let points = match points {
        Some(user_points) => {
            let cap = user_points.len().min(analytes.len());
            layout::pair_user_points(user_points, cap)
        }
        None => {
            let n = analytes.len().clamp(1, options.max_auto_points);
            layout::auto_layout(image.width, image.height, n)
        }
    };

    let mut sampler_offsets = None;
    let mut used_normalization = false;
    if options.normalize {
        let estimate = background::estimate_background(
            image,
            options.background_point,
            options.patch_size,
            options.black_threshold,
        );
        verbose_println!(
            "[BG] offsets=({:.2}, {:.2}, {:.2}) applied={}",
            estimate.offsets[0],
            estimate.offsets[1],
            estimate.offsets[2],
            estimate.applied
        );
        sampler_offsets = estimate.sampler_offsets();
        used_normalization = estimate.applied;
    }

    let results = analytes
        .iter()
        .zip(&points)
        .map(|(analyte, point)| {
            let rgb_sum = sampling::sample_rgb_sum(image, point.x, point.y, sampler_offsets);
            let concentration = interpolation::interpolate(&analyte.points, rgb_sum);
            let concentration = round_to_hundredths(concentration);
            let level = classify::classify(&analyte.thresholds, concentration);
            PointResult {
                analyte_key: analyte.key.clone(),
                analyte_name: analyte.display_name.clone(),
                x: point.x,
                y: point.y,
                rgb_sum,
                reading: Reading::Quantified {
                    concentration,
                    level,
                },
            }
        })
        .collect();

    RunRecord {
        mode: options.mode,
        image_width: image.width,
        image_height: image.height,
        used_normalization,
        background_point: options.background_point.unwrap_or_default(),
        sampling_scheme: SAMPLING_SCHEME.to_string(),
        results,
    }
}

fn analyze_scientific(
    image: &RgbImage,
    points: Option<Vec<SamplePoint>>,
    options: &AnalyzeOptions,
) -> RunRecord {
    let points = match points {
        Some(user_points) => layout::pair_user_points(user_points, options.scientific_points),
        None => layout::auto_layout(image.width, image.height, options.scientific_points),
    };

    let results = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let (r, g, b) = sampling::sample_mean_rgb(image, point.x, point.y);
            let rgb_sum = r as i32 + g as i32 + b as i32;
            PointResult {
                analyte_key: format!("point_{}", i + 1),
                analyte_name: format!("Point {}", i + 1),
                x: point.x,
                y: point.y,
                rgb_sum,
                reading: Reading::Scientific {
                    color: scientific_color_data(r, g, b),
                },
            }
        })
        .collect();

    RunRecord {
        mode: AnalysisMode::Scientific,
        image_width: image.width,
        image_height: image.height,
        used_normalization: false,
        background_point: SamplePoint::default(),
        sampling_scheme: SAMPLING_SCHEME.to_string(),
        results,
    }
}

/// Concentrations are reported to two decimals.
#[inline]
fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

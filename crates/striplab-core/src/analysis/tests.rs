//! Tests for the colorimetric estimation engine

use super::background::estimate_background;
use super::classify::classify;
use super::interpolation::interpolate;
use super::layout::{auto_layout, pair_user_points};
use super::sampling::{sample_mean_rgb, sample_rgb_sum};
use super::{analyze, AnalyzeOptions};
use crate::models::{
    AnalysisMode, Analyte, Band, CalibrationPoint, Level, Profile, Reading, RgbImage, SamplePoint,
    ThresholdBands,
};

/// Create a test image with uniform color
fn create_uniform_image(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    let pixel_count = (width * height) as usize;
    let mut data = Vec::with_capacity(pixel_count * 3);
    for _ in 0..pixel_count {
        data.extend_from_slice(&color);
    }
    RgbImage::from_raw(width, height, data).unwrap()
}

/// Overwrite a single pixel of a test image
fn set_pixel(image: &mut RgbImage, x: u32, y: u32, color: [u8; 3]) {
    let idx = (y as usize * image.width as usize + x as usize) * 3;
    image.data[idx..idx + 3].copy_from_slice(&color);
}

fn acephate_curve() -> Vec<CalibrationPoint> {
    vec![
        CalibrationPoint::new(0.0, 359),
        CalibrationPoint::new(0.3, 337),
        CalibrationPoint::new(1.0, 311),
    ]
}

fn acephate_bands() -> ThresholdBands {
    ThresholdBands {
        low: Some(Band::new(0.01, 0.10)),
        medium: Some(Band::new(0.10, 0.50)),
        high: Some(Band::new(0.50, 1.00)),
    }
}

fn one_analyte_profile(points: Vec<CalibrationPoint>, thresholds: ThresholdBands) -> Profile {
    Profile {
        name: "Test".to_string(),
        analytes: vec![Analyte {
            key: "acephate".to_string(),
            display_name: "Acephate".to_string(),
            order_index: 0,
            active: true,
            points,
            thresholds,
        }],
    }
}

// ========================================================================
// Sampling
// ========================================================================

#[test]
fn test_sample_rgb_sum_uniform() {
    let image = create_uniform_image(10, 10, [100, 150, 200]);
    assert_eq!(sample_rgb_sum(&image, 5, 5, None), 450);
}

#[test]
fn test_sample_rgb_sum_corner_clipping() {
    // At (0, 0) only center, right and down neighbors are in bounds.
    let mut image = create_uniform_image(10, 10, [0, 0, 0]);
    set_pixel(&mut image, 0, 0, [30, 0, 0]);
    set_pixel(&mut image, 1, 0, [60, 0, 0]);
    set_pixel(&mut image, 0, 1, [90, 0, 0]);

    // Mean R over the 3 retained pixels is 60.
    assert_eq!(sample_rgb_sum(&image, 0, 0, None), 60);
}

#[test]
fn test_sample_rgb_sum_single_pixel_image() {
    let image = create_uniform_image(1, 1, [10, 20, 30]);
    assert_eq!(sample_rgb_sum(&image, 0, 0, None), 60);
}

#[test]
fn test_sample_rgb_sum_all_out_of_bounds() {
    let image = create_uniform_image(2, 2, [255, 255, 255]);
    assert_eq!(sample_rgb_sum(&image, 50, 50, None), 0);
}

#[test]
fn test_sample_rgb_sum_background_offset_clamps_at_zero() {
    let image = create_uniform_image(10, 10, [100, 100, 100]);

    // Blue offset exceeds the channel value; it floors at 0 instead of
    // going negative.
    let total = sample_rgb_sum(&image, 5, 5, Some([10.5, 20.5, 100.5]));
    assert_eq!(total, 169); // 89.5 + 79.5 + 0.0
}

#[test]
fn test_sample_mean_rgb_rounds_channels_independently() {
    // 2x1 image: sampling at (0, 0) retains center and right neighbors.
    let mut image = create_uniform_image(2, 1, [0, 0, 0]);
    set_pixel(&mut image, 0, 0, [10, 0, 5]);
    set_pixel(&mut image, 1, 0, [11, 1, 6]);

    // Means are (10.5, 0.5, 5.5); each rounds half away from zero.
    assert_eq!(sample_mean_rgb(&image, 0, 0), (11, 1, 6));
}

#[test]
fn test_sample_mean_rgb_all_out_of_bounds() {
    let image = create_uniform_image(2, 2, [255, 255, 255]);
    assert_eq!(sample_mean_rgb(&image, 50, 50), (0, 0, 0));
}

// ========================================================================
// Background estimation
// ========================================================================

#[test]
fn test_background_true_black_suppressed() {
    let image = create_uniform_image(20, 20, [3, 3, 3]);
    let estimate = estimate_background(&image, None, 9, 5.0);

    assert!(!estimate.applied);
    assert_eq!(estimate.offsets, [0.0, 0.0, 0.0]);
    assert!(estimate.sampler_offsets().is_none());

    // Suppressed normalization leaves sampled intensities identical to
    // the unnormalized path.
    let raw = sample_rgb_sum(&image, 10, 10, None);
    let normalized = sample_rgb_sum(&image, 10, 10, estimate.sampler_offsets());
    assert_eq!(raw, normalized);
}

#[test]
fn test_background_threshold_is_inclusive() {
    // Means exactly at the threshold still count as true black.
    let image = create_uniform_image(20, 20, [5, 5, 5]);
    let estimate = estimate_background(&image, None, 9, 5.0);
    assert!(!estimate.applied);
}

#[test]
fn test_background_tint_detected() {
    let image = create_uniform_image(20, 20, [10, 12, 14]);
    let estimate = estimate_background(&image, None, 9, 5.0);

    assert!(estimate.applied);
    assert!((estimate.offsets[0] - 10.0).abs() < 1e-4);
    assert!((estimate.offsets[1] - 12.0).abs() < 1e-4);
    assert!((estimate.offsets[2] - 14.0).abs() < 1e-4);
}

#[test]
fn test_background_patch_clipped_to_small_image() {
    // A 4x4 image cannot hold a full 9x9 patch; clipping keeps it valid.
    let image = create_uniform_image(4, 4, [40, 40, 40]);
    let estimate = estimate_background(&image, None, 9, 5.0);
    assert!(estimate.applied);
    assert!((estimate.offsets[0] - 40.0).abs() < 1e-4);
}

#[test]
fn test_background_explicit_point() {
    let mut image = create_uniform_image(30, 30, [0, 0, 0]);
    // Paint a 3x3 region around (20, 20)
    for y in 19..=21 {
        for x in 19..=21 {
            set_pixel(&mut image, x, y, [60, 60, 60]);
        }
    }

    let estimate = estimate_background(&image, Some(SamplePoint::new(20, 20)), 3, 5.0);
    assert!(estimate.applied);
    assert!((estimate.offsets[0] - 60.0).abs() < 1e-4);
}

// ========================================================================
// Interpolation
// ========================================================================

#[test]
fn test_interpolate_empty_curve() {
    assert_eq!(interpolate(&[], 300), 0.0);
}

#[test]
fn test_interpolate_endpoint_clamping() {
    let curve = acephate_curve();
    assert_eq!(interpolate(&curve, 400), 0.0);
    assert_eq!(interpolate(&curve, 359), 0.0);
    assert_eq!(interpolate(&curve, 311), 1.0);
    assert_eq!(interpolate(&curve, 300), 1.0);
}

#[test]
fn test_interpolate_midpoint() {
    // 348 is the exact midpoint between intensities 359 and 337 (t = 0.5).
    let curve = acephate_curve();
    assert!((interpolate(&curve, 348) - 0.15).abs() < 1e-5);
}

#[test]
fn test_interpolate_second_segment() {
    // 324 is the midpoint between 337 and 311.
    let curve = acephate_curve();
    assert!((interpolate(&curve, 324) - 0.65).abs() < 1e-5);
}

#[test]
fn test_interpolate_unsorted_input() {
    let curve = vec![
        CalibrationPoint::new(1.0, 311),
        CalibrationPoint::new(0.0, 359),
        CalibrationPoint::new(0.3, 337),
    ];
    assert!((interpolate(&curve, 348) - 0.15).abs() < 1e-5);
}

#[test]
fn test_interpolate_duplicate_intensities_defined() {
    // An unvalidated curve with a repeated intensity still resolves via
    // the first bracketing pair in descending scan order.
    let curve = vec![
        CalibrationPoint::new(0.0, 350),
        CalibrationPoint::new(0.5, 300),
        CalibrationPoint::new(0.7, 300),
        CalibrationPoint::new(1.0, 250),
    ];
    assert!((interpolate(&curve, 275) - 0.85).abs() < 1e-5);
    assert!((interpolate(&curve, 325) - 0.25).abs() < 1e-5);
}

// ========================================================================
// Classification
// ========================================================================

#[test]
fn test_classify_boundaries() {
    let bands = acephate_bands();

    // Low excludes its own max; high includes it.
    assert_eq!(classify(&bands, 0.10), Level::Medium);
    assert_eq!(classify(&bands, 1.00), Level::High);
    assert_eq!(classify(&bands, 0.005), Level::OutOfRange);

    assert_eq!(classify(&bands, 0.01), Level::Low);
    assert_eq!(classify(&bands, 0.09), Level::Low);
    assert_eq!(classify(&bands, 0.49), Level::Medium);
    assert_eq!(classify(&bands, 0.50), Level::High);
    assert_eq!(classify(&bands, 1.01), Level::OutOfRange);
}

#[test]
fn test_classify_no_bands() {
    let bands = ThresholdBands::default();
    assert_eq!(classify(&bands, 0.5), Level::OutOfRange);
}

#[test]
fn test_classify_partial_bands() {
    let bands = ThresholdBands {
        low: None,
        medium: None,
        high: Some(Band::new(0.5, 1.0)),
    };
    assert_eq!(classify(&bands, 0.7), Level::High);
    assert_eq!(classify(&bands, 0.2), Level::OutOfRange);
}

#[test]
fn test_classify_overlap_first_match_wins() {
    let bands = ThresholdBands {
        low: Some(Band::new(0.0, 1.0)),
        medium: Some(Band::new(0.0, 1.0)),
        high: Some(Band::new(0.0, 1.0)),
    };
    assert_eq!(classify(&bands, 0.5), Level::Low);
}

// ========================================================================
// Layout
// ========================================================================

#[test]
fn test_auto_layout_spacing() {
    let points = auto_layout(600, 101, 5);
    let xs: Vec<u32> = points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![100, 200, 300, 400, 500]);
    assert!(points.iter().all(|p| p.y == 50));
}

#[test]
fn test_auto_layout_single_point() {
    let points = auto_layout(100, 10, 1);
    assert_eq!(points, vec![SamplePoint::new(50, 5)]);
}

#[test]
fn test_pair_user_points_truncates_before_sorting() {
    let points = vec![
        SamplePoint::new(50, 5),
        SamplePoint::new(10, 5),
        SamplePoint::new(30, 5),
    ];
    // The cap applies to the points as handed over; sorting happens after.
    let paired = pair_user_points(points, 2);
    let xs: Vec<u32> = paired.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![10, 50]);
}

// ========================================================================
// Full analysis
// ========================================================================

#[test]
fn test_analyze_quantifies_against_curve() {
    // Uniform 117 gray gives rgb_sum 351, which sits between the 337 and
    // 359 calibration intensities.
    let image = create_uniform_image(100, 20, [117, 117, 117]);
    let profile = one_analyte_profile(acephate_curve(), acephate_bands());
    let options = AnalyzeOptions::default();

    let record = analyze(&image, &profile, None, &options);
    assert_eq!(record.mode, AnalysisMode::Default);
    assert_eq!(record.results.len(), 1);
    assert_eq!(record.sampling_scheme, "5-pixel");
    assert!(!record.used_normalization);

    let result = &record.results[0];
    assert_eq!(result.analyte_key, "acephate");
    assert_eq!(result.rgb_sum, 351);
    match &result.reading {
        Reading::Quantified {
            concentration,
            level,
        } => {
            assert!((concentration - 0.11).abs() < 1e-5);
            assert_eq!(*level, Level::Medium);
        }
        Reading::Scientific { .. } => panic!("expected quantified reading"),
    }
}

#[test]
fn test_analyze_auto_layout_uses_all_analytes() {
    let image = create_uniform_image(600, 100, [117, 117, 117]);
    let profile = crate::profiles::defaults::default_profile();
    let options = AnalyzeOptions::default();

    let record = analyze(&image, &profile, None, &options);
    assert_eq!(record.results.len(), 5);
    let xs: Vec<u32> = record.results.iter().map(|r| r.x).collect();
    assert_eq!(xs, vec![100, 200, 300, 400, 500]);
    assert!(record.results.iter().all(|r| r.y == 50));
}

#[test]
fn test_analyze_user_points_paired_in_x_order() {
    let image = create_uniform_image(100, 20, [117, 117, 117]);
    let mut profile = one_analyte_profile(acephate_curve(), acephate_bands());
    profile.analytes.push(Analyte {
        key: "glyphosate".to_string(),
        display_name: "Glyphosate".to_string(),
        order_index: 1,
        active: true,
        points: vec![
            CalibrationPoint::new(0.0, 381),
            CalibrationPoint::new(1.0, 348),
        ],
        thresholds: ThresholdBands::default(),
    });

    let user_points = vec![SamplePoint::new(80, 10), SamplePoint::new(20, 10)];
    let record = analyze(&image, &profile, Some(user_points), &AnalyzeOptions::default());

    assert_eq!(record.results.len(), 2);
    // First analyte gets the leftmost point.
    assert_eq!(record.results[0].analyte_key, "acephate");
    assert_eq!(record.results[0].x, 20);
    assert_eq!(record.results[1].analyte_key, "glyphosate");
    assert_eq!(record.results[1].x, 80);
}

#[test]
fn test_analyze_user_points_truncated_to_analyte_count() {
    let image = create_uniform_image(100, 20, [117, 117, 117]);
    let profile = one_analyte_profile(acephate_curve(), acephate_bands());

    let user_points = vec![
        SamplePoint::new(30, 10),
        SamplePoint::new(60, 10),
        SamplePoint::new(90, 10),
    ];
    let record = analyze(&image, &profile, Some(user_points), &AnalyzeOptions::default());
    assert_eq!(record.results.len(), 1);
    assert_eq!(record.results[0].x, 30);
}

#[test]
fn test_analyze_inactive_analytes_skipped() {
    let image = create_uniform_image(100, 20, [117, 117, 117]);
    let mut profile = one_analyte_profile(acephate_curve(), acephate_bands());
    profile.analytes[0].active = false;

    let record = analyze(&image, &profile, None, &AnalyzeOptions::default());
    assert!(record.results.is_empty());
}

#[test]
fn test_analyze_normalization_black_reference_suppressed() {
    let mut image = create_uniform_image(100, 20, [117, 117, 117]);
    // Paint the top-left reference patch true black.
    for y in 0..10 {
        for x in 0..10 {
            set_pixel(&mut image, x, y, [2, 2, 2]);
        }
    }
    let profile = one_analyte_profile(acephate_curve(), acephate_bands());
    let options = AnalyzeOptions {
        normalize: true,
        ..AnalyzeOptions::default()
    };

    let record = analyze(&image, &profile, None, &options);
    assert!(!record.used_normalization);
    assert_eq!(record.results[0].rgb_sum, 351);
}

#[test]
fn test_analyze_normalization_subtracts_tint() {
    // The whole image reads as the background tint, so normalized samples
    // collapse to zero signal and clamp to the curve's highest
    // concentration.
    let image = create_uniform_image(100, 20, [27, 27, 27]);
    let profile = one_analyte_profile(acephate_curve(), acephate_bands());
    let options = AnalyzeOptions {
        normalize: true,
        ..AnalyzeOptions::default()
    };

    let record = analyze(&image, &profile, None, &options);
    assert!(record.used_normalization);

    let result = &record.results[0];
    assert_eq!(result.rgb_sum, 0);
    match &result.reading {
        Reading::Quantified {
            concentration,
            level,
        } => {
            assert_eq!(*concentration, 1.0);
            assert_eq!(*level, Level::High);
        }
        Reading::Scientific { .. } => panic!("expected quantified reading"),
    }
}

#[test]
fn test_analyze_scientific_mode() {
    let image = create_uniform_image(600, 100, [200, 100, 50]);
    let profile = crate::profiles::defaults::default_profile();
    let options = AnalyzeOptions {
        mode: AnalysisMode::Scientific,
        ..AnalyzeOptions::default()
    };

    let record = analyze(&image, &profile, None, &options);
    assert_eq!(record.mode, AnalysisMode::Scientific);
    assert_eq!(record.results.len(), 5);
    assert!(!record.used_normalization);

    let result = &record.results[0];
    assert_eq!(result.analyte_key, "point_1");
    assert_eq!(result.analyte_name, "Point 1");
    assert_eq!(result.rgb_sum, 350);
    match &result.reading {
        Reading::Scientific { color } => {
            assert_eq!(color.rgb, [200, 100, 50]);
            assert_eq!(color.hex, "#c86432");
        }
        Reading::Quantified { .. } => panic!("expected scientific reading"),
    }
}

#[test]
fn test_analyze_scientific_caps_user_points() {
    let image = create_uniform_image(600, 100, [200, 100, 50]);
    let profile = crate::profiles::defaults::default_profile();
    let options = AnalyzeOptions {
        mode: AnalysisMode::Scientific,
        ..AnalyzeOptions::default()
    };

    let user_points: Vec<SamplePoint> =
        (0..7).map(|i| SamplePoint::new(10 + i * 20, 50)).collect();
    let record = analyze(&image, &profile, Some(user_points), &options);
    assert_eq!(record.results.len(), 5);
}

#[test]
fn test_run_record_json_shape() {
    let image = create_uniform_image(100, 20, [117, 117, 117]);
    let profile = one_analyte_profile(acephate_curve(), acephate_bands());
    let record = analyze(&image, &profile, None, &AnalyzeOptions::default());

    let value = serde_json::to_value(&record).unwrap();
    let result = &value["results"][0];
    // Reading fields are flattened into the result object.
    assert!(result.get("concentration").is_some());
    assert_eq!(result["level"], "Medium");
    assert_eq!(value["sampling_scheme"], "5-pixel");
}

//! Single-image analysis command.

use crate::parsers::{parse_mode, parse_point, parse_points};
use std::path::PathBuf;
use striplab_core::analysis::{analyze, AnalyzeOptions};
use striplab_core::models::{Profile, Reading, RunRecord};

#[allow(clippy::too_many_arguments)]
pub fn cmd_analyze(
    input: PathBuf,
    profile_path: Option<PathBuf>,
    mode: Option<String>,
    normalize: bool,
    points: Option<String>,
    background_point: Option<String>,
    json: bool,
) -> Result<(), String> {
    striplab_core::config::log_config_usage();
    let defaults = &striplab_core::config::engine_config_handle().config.defaults;

    let mut options = AnalyzeOptions::from_defaults(defaults);
    if let Some(mode_str) = mode {
        options.mode = parse_mode(&mode_str)?;
    }
    options.normalize = normalize;
    if let Some(point_str) = background_point {
        options.background_point = Some(parse_point(&point_str)?);
    }

    let profile = load_or_default_profile(profile_path)?;
    let sample_points = points.as_deref().map(parse_points).transpose()?;

    let image = striplab_core::decoders::decode_image(&input)?;
    let record = analyze(&image, &profile, sample_points, &options);

    if json {
        let out = serde_json::to_string_pretty(&record)
            .map_err(|e| format!("Failed to serialize results: {}", e))?;
        println!("{}", out);
    } else {
        print_record(&input, &profile, &record);
    }

    Ok(())
}

/// Load the profile file if given, otherwise fall back to the built-in
/// Default profile.
pub(crate) fn load_or_default_profile(path: Option<PathBuf>) -> Result<Profile, String> {
    match path {
        Some(path) => striplab_core::profiles::load_profile(path),
        None => Ok(striplab_core::profiles::defaults::default_profile()),
    }
}

fn print_record(input: &PathBuf, profile: &Profile, record: &RunRecord) {
    println!(
        "Analyzed {} ({}x{}, profile: {}, mode: {})",
        input.display(),
        record.image_width,
        record.image_height,
        profile.name,
        record.mode
    );
    if record.used_normalization {
        println!("Background normalization applied");
    }
    println!();

    for result in &record.results {
        match &result.reading {
            Reading::Quantified {
                concentration,
                level,
            } => {
                println!(
                    "  {:<14} ({:>4},{:>4})  rgb_sum={:<4} concentration={:.2}  {}",
                    result.analyte_name, result.x, result.y, result.rgb_sum, concentration, level
                );
            }
            Reading::Scientific { color } => {
                println!(
                    "  {:<14} ({:>4},{:>4})  rgb_sum={:<4} rgb=[{}, {}, {}] hex={} hsv=({}) hsl=({})",
                    result.analyte_name,
                    result.x,
                    result.y,
                    result.rgb_sum,
                    color.rgb[0],
                    color.rgb[1],
                    color.rgb[2],
                    color.hex,
                    color.hsv,
                    color.hsl
                );
            }
        }
    }
}

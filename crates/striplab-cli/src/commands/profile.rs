//! Calibration profile management commands.

use crate::parsers::{parse_band, parse_curve_points};
use std::path::PathBuf;
use striplab_core::models::{Profile, ThresholdBands};
use striplab_core::profiles;

/// List available profiles in the specified or default directory.
pub fn cmd_profile_list(dir: Option<PathBuf>) -> Result<(), String> {
    let dir = dir.unwrap_or_else(|| {
        profiles::get_profiles_dir().unwrap_or_else(|_| PathBuf::from("profiles"))
    });

    println!("Listing profiles in: {}", dir.display());
    match profiles::list_profiles(&dir) {
        Ok(names) => {
            if names.is_empty() {
                println!("No profiles found.");
            } else {
                for name in names {
                    println!("  {}", name);
                }
            }
            Ok(())
        }
        Err(e) => Err(format!("Failed to list profiles: {}", e)),
    }
}

/// Display a profile's analytes, curves and thresholds.
pub fn cmd_profile_show(profile: String) -> Result<(), String> {
    let profile_obj = resolve_profile(&profile)?;

    println!("Profile: {}", profile_obj.name);
    for analyte in &profile_obj.analytes {
        println!(
            "\n  {} ({}){}",
            analyte.display_name,
            analyte.key,
            if analyte.active { "" } else { " [inactive]" }
        );

        println!("    Calibration points:");
        for point in &analyte.points {
            println!(
                "      concentration={:.3} rgb_sum={}",
                point.concentration, point.rgb_sum
            );
        }

        println!("    Thresholds:");
        for (label, band) in [
            ("low", analyte.thresholds.low),
            ("medium", analyte.thresholds.medium),
            ("high", analyte.thresholds.high),
        ] {
            match band {
                Some(band) => println!("      {}: [{:.2}, {:.2}]", label, band.min, band.max),
                None => println!("      {}: (not set)", label),
            }
        }
    }

    Ok(())
}

/// Write the built-in Default profile out as a starting point.
pub fn cmd_profile_init(out: Option<PathBuf>, force: bool) -> Result<(), String> {
    let path = match out {
        Some(path) => path,
        None => profiles::get_profiles_dir()?.join("default.yml"),
    };

    if path.exists() && !force {
        return Err(format!(
            "Profile file {} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let profile = profiles::defaults::default_profile();
    profiles::save_profile(&profile, &path)?;
    println!("Wrote default profile to {}", path.display());
    Ok(())
}

/// Replace one analyte's calibration curve. The proposed points go
/// through the validator; rejection leaves the file untouched.
pub fn cmd_profile_set_curve(
    file: PathBuf,
    analyte: String,
    points: String,
) -> Result<(), String> {
    let mut profile = profiles::load_profile(&file)?;
    let points = parse_curve_points(&points)?;

    let target = profile
        .analyte_mut(&analyte)
        .ok_or_else(|| format!("No analyte '{}' in profile", analyte))?;
    target.replace_calibration(points)?;

    profiles::save_profile(&profile, &file)?;
    println!("Updated calibration curve for {} in {}", analyte, file.display());
    Ok(())
}

/// Replace one analyte's threshold bands. Omitted bands are cleared.
pub fn cmd_profile_set_thresholds(
    file: PathBuf,
    analyte: String,
    low: Option<String>,
    medium: Option<String>,
    high: Option<String>,
) -> Result<(), String> {
    let mut profile = profiles::load_profile(&file)?;

    let thresholds = ThresholdBands {
        low: low.as_deref().map(parse_band).transpose()?,
        medium: medium.as_deref().map(parse_band).transpose()?,
        high: high.as_deref().map(parse_band).transpose()?,
    };

    let target = profile
        .analyte_mut(&analyte)
        .ok_or_else(|| format!("No analyte '{}' in profile", analyte))?;
    target.replace_thresholds(thresholds);

    profiles::save_profile(&profile, &file)?;
    println!("Updated thresholds for {} in {}", analyte, file.display());
    Ok(())
}

/// Resolve a profile argument: an existing file path wins, otherwise the
/// name is validated and looked up in the profiles directory.
fn resolve_profile(profile: &str) -> Result<Profile, String> {
    let profile_path = PathBuf::from(profile);
    if profile_path.exists() {
        return profiles::load_profile(&profile_path);
    }

    // Validate profile name before constructing path to prevent path traversal
    profiles::validate_profile_name(profile)?;
    let dir = profiles::get_profiles_dir().unwrap_or_else(|_| PathBuf::from("profiles"));
    let full_path = dir.join(format!("{}.yml", profile));
    profiles::load_profile(&full_path)
}

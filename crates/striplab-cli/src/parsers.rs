//! Parsing functions for CLI argument strings.

use striplab_core::models::{AnalysisMode, Band, CalibrationPoint, SamplePoint};

/// Parse an analysis mode name: "default", "customize" or "scientific".
pub fn parse_mode(mode_str: &str) -> Result<AnalysisMode, String> {
    match mode_str.to_lowercase().as_str() {
        "default" => Ok(AnalysisMode::Default),
        "customize" => Ok(AnalysisMode::Customize),
        "scientific" => Ok(AnalysisMode::Scientific),
        _ => Err(format!(
            "Unknown mode: {} (expected default, customize or scientific)",
            mode_str
        )),
    }
}

/// Parse a sample point in format "x,y"
pub fn parse_point(point_str: &str) -> Result<SamplePoint, String> {
    let parts: Vec<&str> = point_str.split(',').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Point must be in format x,y (e.g., 120,48), got: {}",
            point_str
        ));
    }

    let x = parts[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid x coordinate: {}", parts[0]))?;
    let y = parts[1]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid y coordinate: {}", parts[1]))?;

    Ok(SamplePoint::new(x, y))
}

/// Parse a semicolon-separated point list in format "x,y;x,y;..."
pub fn parse_points(points_str: &str) -> Result<Vec<SamplePoint>, String> {
    let points: Result<Vec<SamplePoint>, String> = points_str
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(parse_point)
        .collect();

    let points = points?;
    if points.is_empty() {
        return Err("At least one point is required".to_string());
    }
    Ok(points)
}

/// Parse calibration points in format "concentration:rgb_sum;..."
/// (e.g. "0.0:359;0.3:337;1.0:311")
pub fn parse_curve_points(points_str: &str) -> Result<Vec<CalibrationPoint>, String> {
    points_str
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let pieces: Vec<&str> = part.split(':').collect();
            if pieces.len() != 2 {
                return Err(format!(
                    "Calibration point must be in format concentration:rgb_sum, got: {}",
                    part
                ));
            }
            let concentration = pieces[0]
                .trim()
                .parse::<f32>()
                .map_err(|_| format!("Invalid concentration: {}", pieces[0]))?;
            let rgb_sum = pieces[1]
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("Invalid rgb_sum: {}", pieces[1]))?;
            Ok(CalibrationPoint::new(concentration, rgb_sum))
        })
        .collect()
}

/// Parse a threshold band in format "min,max"
pub fn parse_band(band_str: &str) -> Result<Band, String> {
    let parts: Vec<&str> = band_str.split(',').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Band must be in format min,max (e.g., 0.10,0.50), got: {}",
            band_str
        ));
    }

    let min = parts[0]
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid band min: {}", parts[0]))?;
    let max = parts[1]
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid band max: {}", parts[1]))?;

    if max < min {
        return Err(format!("Band max {} must not be below min {}", max, min));
    }

    Ok(Band::new(min, max))
}

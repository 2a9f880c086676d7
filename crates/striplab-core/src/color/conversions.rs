//! RGB to hex / HSV / HSL conversions

use crate::models::ColorReport;

/// HSV color representation
/// - H (hue): 0.0-360.0 degrees
/// - S (saturation): 0.0-1.0
/// - V (value): 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// HSL color representation
/// - H (hue): 0.0-360.0 degrees
/// - S (saturation): 0.0-1.0
/// - L (lightness): 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Format an RGB triple as a lowercase `#rrggbb` string.
///
/// Inputs are taken as plain integers and clamped to [0, 255] before
/// formatting, so out-of-range values degrade instead of failing.
pub fn rgb_to_hex(r: i32, g: i32, b: i32) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        r.clamp(0, 255),
        g.clamp(0, 255),
        b.clamp(0, 255)
    )
}

/// Parse a `#rrggbb` (or `rrggbb`) string back to an RGB triple.
pub fn parse_hex(hex: &str) -> Result<(u8, u8, u8), String> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!(
            "Invalid hex color: expected 6 characters, got {}",
            hex.len()
        ));
    }

    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|e| format!("Invalid red value: {}", e))?;
    let g =
        u8::from_str_radix(&hex[2..4], 16).map_err(|e| format!("Invalid green value: {}", e))?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|e| format!("Invalid blue value: {}", e))?;

    Ok((r, g, b))
}

/// Convert an 8-bit RGB triple to HSV.
#[inline]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;

    // Achromatic case
    if delta < 1e-6 {
        return Hsv { h: 0.0, s: 0.0, v };
    }

    let s = delta / max;
    let h = hue_degrees(r, g, b, max, delta);

    Hsv { h, s, v }
}

/// Convert an 8-bit RGB triple to HSL.
#[inline]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    // Lightness
    let l = (max + min) / 2.0;

    // Achromatic case
    if delta < 1e-6 {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    // Saturation
    let s = if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let h = hue_degrees(r, g, b, max, delta);

    Hsl { h, s, l }
}

/// Shared hue computation for HSV and HSL.
#[inline]
fn hue_degrees(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    let h = if (max - r).abs() < 1e-6 {
        let mut h = (g - b) / delta;
        if g < b {
            h += 6.0;
        }
        h * 60.0
    } else if (max - g).abs() < 1e-6 {
        ((b - r) / delta + 2.0) * 60.0
    } else {
        ((r - g) / delta + 4.0) * 60.0
    };
    h % 360.0
}

/// Display string for an HSV triple: `"h°, s%, v%"`, whole units.
pub fn format_hsv(hsv: Hsv) -> String {
    format!("{:.0}°, {:.0}%, {:.0}%", hsv.h, hsv.s * 100.0, hsv.v * 100.0)
}

/// Display string for an HSL triple: `"h°, s%, l%"`, whole units.
pub fn format_hsl(hsl: Hsl) -> String {
    format!("{:.0}°, {:.0}%, {:.0}%", hsl.h, hsl.s * 100.0, hsl.l * 100.0)
}

/// Build the scientific-mode color report for one sampled point.
pub fn scientific_color_data(r: u8, g: u8, b: u8) -> ColorReport {
    ColorReport {
        rgb: [r, g, b],
        hex: rgb_to_hex(r as i32, g as i32, b as i32),
        hsv: format_hsv(rgb_to_hsv(r, g, b)),
        hsl: format_hsl(rgb_to_hsl(r, g, b)),
    }
}

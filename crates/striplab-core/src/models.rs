//! Data models for striplab
//!
//! Core data structures for calibration profiles, analytes, sample points,
//! and analysis results.

use serde::{Deserialize, Serialize};

/// One point on a calibration curve: a known concentration and the
/// rgb-sum intensity measured for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    /// Concentration in the analyte's reporting unit (e.g. mg/kg)
    pub concentration: f32,

    /// Measured rgb-sum intensity (sum of mean R, G, B; 0-765)
    pub rgb_sum: i32,
}

impl CalibrationPoint {
    pub fn new(concentration: f32, rgb_sum: i32) -> Self {
        Self {
            concentration,
            rgb_sum,
        }
    }
}

/// A severity band: the half-open or closed concentration interval that
/// maps to one qualitative label. Interval convention is decided by the
/// classifier, not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f32,
    pub max: f32,
}

impl Band {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Threshold bands for one analyte. Any subset may be configured; bands
/// may overlap or leave gaps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdBands {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Band>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<Band>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Band>,
}

/// Qualitative severity label for a classified concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
    #[serde(rename = "Out of range")]
    OutOfRange,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::OutOfRange => "Out of range",
        };
        f.write_str(s)
    }
}

/// One analyte (e.g. a pesticide) with its calibration curve and bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analyte {
    /// Stable identifier (e.g. "acephate")
    pub key: String,

    /// Human-readable name (e.g. "Acephate")
    pub display_name: String,

    /// Position within the profile; determines pairing with sample points
    #[serde(default)]
    pub order_index: u32,

    /// Inactive analytes are skipped during analysis
    #[serde(default = "default_active")]
    pub active: bool,

    /// Calibration curve points, in entry order
    pub points: Vec<CalibrationPoint>,

    /// Severity bands for classification
    #[serde(default)]
    pub thresholds: ThresholdBands,
}

fn default_active() -> bool {
    true
}

/// A named set of analytes; the unit of calibration versioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub analytes: Vec<Analyte>,
}

impl Profile {
    /// Active analytes in order_index order, the order sample points are
    /// paired with.
    pub fn active_analytes(&self) -> Vec<&Analyte> {
        let mut active: Vec<&Analyte> = self.analytes.iter().filter(|a| a.active).collect();
        active.sort_by_key(|a| a.order_index);
        active
    }

    /// Look up an analyte by key.
    pub fn analyte_mut(&mut self, key: &str) -> Option<&mut Analyte> {
        self.analytes.iter_mut().find(|a| a.key == key)
    }
}

/// A pixel coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: u32,
    pub y: u32,
}

impl SamplePoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Analysis mode, mirroring the application modes of the capture UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Quantify against calibration curves
    #[default]
    Default,

    /// Same quantification path; additionally permits threshold editing
    Customize,

    /// Per-point color diagnostics instead of concentrations
    Scientific,
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AnalysisMode::Default => "default",
            AnalysisMode::Customize => "customize",
            AnalysisMode::Scientific => "scientific",
        };
        f.write_str(s)
    }
}

/// An in-memory image: an immutable grid of 8-bit RGB triples, interleaved
/// row-major. The engine never mutates it and never does I/O on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    /// Interleaved RGB bytes, `width * height * 3` long
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Wrap raw interleaved RGB data, checking the buffer length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(format!(
                "RGB buffer size mismatch: expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Read the RGB triple at `(x, y)`. Caller must stay in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }
}

/// Color representations of one sampled point, for scientific display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    /// Averaged neighborhood color, channels rounded independently
    pub rgb: [u8; 3],

    /// `#rrggbb`
    pub hex: String,

    /// `"h°, s%, v%"` with whole-unit rounding
    pub hsv: String,

    /// `"h°, s%, l%"` with whole-unit rounding
    pub hsl: String,
}

/// The outcome attached to one sample point: either a quantified
/// concentration with its severity label, or a scientific color report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Quantified { concentration: f32, level: Level },
    Scientific { color: ColorReport },
}

/// Result for one sample point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointResult {
    pub analyte_key: String,
    pub analyte_name: String,
    pub x: u32,
    pub y: u32,
    pub rgb_sum: i32,

    #[serde(flatten)]
    pub reading: Reading,
}

/// Output record of one engine invocation. Transient: callers serialize
/// or discard it; the engine keeps nothing between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub mode: AnalysisMode,
    pub image_width: u32,
    pub image_height: u32,
    pub used_normalization: bool,
    pub background_point: SamplePoint,
    pub sampling_scheme: String,
    pub results: Vec<PointResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_display_strings() {
        assert_eq!(Level::Low.to_string(), "Low");
        assert_eq!(Level::Medium.to_string(), "Medium");
        assert_eq!(Level::High.to_string(), "High");
        assert_eq!(Level::OutOfRange.to_string(), "Out of range");
    }

    #[test]
    fn test_level_serde_rename() {
        let json = serde_json::to_string(&Level::OutOfRange).unwrap();
        assert_eq!(json, "\"Out of range\"");
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Level::OutOfRange);
    }

    #[test]
    fn test_analysis_mode_serde_lowercase() {
        let yaml = serde_yaml::to_string(&AnalysisMode::Scientific).unwrap();
        assert_eq!(yaml.trim(), "scientific");
    }

    #[test]
    fn test_rgb_image_from_raw_size_check() {
        assert!(RgbImage::from_raw(2, 2, vec![0u8; 12]).is_ok());
        assert!(RgbImage::from_raw(2, 2, vec![0u8; 11]).is_err());
    }

    #[test]
    fn test_rgb_image_pixel_and_bounds() {
        let mut data = vec![0u8; 2 * 2 * 3];
        data[(1 * 2 + 1) * 3..(1 * 2 + 1) * 3 + 3].copy_from_slice(&[10, 20, 30]);
        let image = RgbImage::from_raw(2, 2, data).unwrap();

        assert_eq!(image.pixel(1, 1), [10, 20, 30]);
        assert!(image.in_bounds(0, 0));
        assert!(image.in_bounds(1, 1));
        assert!(!image.in_bounds(-1, 0));
        assert!(!image.in_bounds(2, 0));
        assert!(!image.in_bounds(0, 2));
    }

    #[test]
    fn test_active_analytes_ordering() {
        let profile = Profile {
            name: "Test".to_string(),
            analytes: vec![
                Analyte {
                    key: "b".to_string(),
                    display_name: "B".to_string(),
                    order_index: 1,
                    active: true,
                    points: Vec::new(),
                    thresholds: ThresholdBands::default(),
                },
                Analyte {
                    key: "c".to_string(),
                    display_name: "C".to_string(),
                    order_index: 2,
                    active: false,
                    points: Vec::new(),
                    thresholds: ThresholdBands::default(),
                },
                Analyte {
                    key: "a".to_string(),
                    display_name: "A".to_string(),
                    order_index: 0,
                    active: true,
                    points: Vec::new(),
                    thresholds: ThresholdBands::default(),
                },
            ],
        };

        let active = profile.active_analytes();
        let keys: Vec<&str> = active.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}

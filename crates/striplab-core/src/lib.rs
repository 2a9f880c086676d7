//! Striplab Core Library
//!
//! Colorimetric estimation for reagent-strip photographs: sample pixel
//! neighborhoods, normalize against an estimated background, invert
//! intensities through per-analyte calibration curves, and classify
//! concentrations into severity bands.

pub mod analysis;
pub mod calibration;
pub mod color;
pub mod config;
pub mod decoders;
pub mod models;
pub mod profiles;

// Re-export commonly used types
pub use analysis::{analyze, AnalyzeOptions, BackgroundEstimate};
pub use models::{
    AnalysisMode, Analyte, Band, CalibrationPoint, ColorReport, Level, PointResult, Profile,
    Reading, RgbImage, RunRecord, SamplePoint, ThresholdBands,
};

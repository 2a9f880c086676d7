//! Seeded default profile
//!
//! The built-in "Default" profile: five pesticide analytes with
//! laboratory-measured three-point curves and severity bands.

use crate::models::{Analyte, Band, CalibrationPoint, Profile, ThresholdBands};

struct SeedAnalyte {
    key: &'static str,
    display_name: &'static str,
    points: [(f32, i32); 3],
    low: (f32, f32),
    medium: (f32, f32),
    high: (f32, f32),
}

const SEED_ANALYTES: &[SeedAnalyte] = &[
    SeedAnalyte {
        key: "acephate",
        display_name: "Acephate",
        points: [(0.0, 359), (0.3, 337), (1.0, 311)],
        low: (0.01, 0.10),
        medium: (0.10, 0.50),
        high: (0.50, 1.00),
    },
    SeedAnalyte {
        key: "glyphosate",
        display_name: "Glyphosate",
        points: [(0.0, 381), (0.3, 367), (1.0, 348)],
        low: (0.10, 0.30),
        medium: (0.30, 0.70),
        high: (0.70, 1.00),
    },
    SeedAnalyte {
        key: "malathion",
        display_name: "Malathion",
        points: [(0.0, 273), (0.3, 209), (1.0, 183)],
        low: (0.10, 0.40),
        medium: (0.40, 0.80),
        high: (0.80, 1.00),
    },
    SeedAnalyte {
        key: "chlorpyrifos",
        display_name: "Chlorpyrifos",
        points: [(0.0, 179), (0.3, 164), (1.0, 147)],
        low: (0.01, 0.05),
        medium: (0.05, 0.10),
        high: (0.10, 1.00),
    },
    SeedAnalyte {
        key: "acetamiprid",
        display_name: "Acetamiprid",
        points: [(0.0, 358), (0.3, 343), (1.0, 333)],
        low: (0.01, 0.10),
        medium: (0.10, 0.50),
        high: (0.50, 1.00),
    },
];

/// Build the built-in "Default" profile.
pub fn default_profile() -> Profile {
    let analytes = SEED_ANALYTES
        .iter()
        .enumerate()
        .map(|(idx, seed)| Analyte {
            key: seed.key.to_string(),
            display_name: seed.display_name.to_string(),
            order_index: idx as u32,
            active: true,
            points: seed
                .points
                .iter()
                .map(|&(concentration, rgb_sum)| CalibrationPoint::new(concentration, rgb_sum))
                .collect(),
            thresholds: ThresholdBands {
                low: Some(Band::new(seed.low.0, seed.low.1)),
                medium: Some(Band::new(seed.medium.0, seed.medium.1)),
                high: Some(Band::new(seed.high.0, seed.high.1)),
            },
        })
        .collect();

    Profile {
        name: "Default".to_string(),
        analytes,
    }
}

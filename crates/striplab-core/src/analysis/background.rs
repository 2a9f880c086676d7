//! Background reference estimation
//!
//! Estimates the substrate tint from a small reference patch so it can be
//! subtracted from sampled pixels. A patch that reads as true black means
//! there is no printed background to correct for, and normalization is
//! suppressed rather than subtracting noise.

use crate::models::{RgbImage, SamplePoint};
use serde::{Deserialize, Serialize};

/// Default side length of the square reference patch, in pixels.
pub const DEFAULT_PATCH_SIZE: u32 = 9;

/// Default per-channel mean at or below which the patch is judged true
/// black.
pub const DEFAULT_BLACK_THRESHOLD: f32 = 5.0;

/// Estimated background offsets for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundEstimate {
    /// Per-channel patch means (R, G, B)
    pub offsets: [f32; 3],

    /// Whether the offsets should be applied. False when the patch reads
    /// true black, in which case the offsets are zeroed.
    pub applied: bool,
}

impl BackgroundEstimate {
    /// Offsets to feed the sampler, or `None` when normalization is
    /// suppressed.
    pub fn sampler_offsets(&self) -> Option<[f32; 3]> {
        if self.applied {
            Some(self.offsets)
        } else {
            None
        }
    }
}

/// Estimate the background tint from a square patch of side `patch_size`
/// centered at `point`, clipped to image bounds.
///
/// When `point` is `None`, the patch is anchored at the top-left corner,
/// centered at `(patch_size / 2, patch_size / 2)`. If every channel mean
/// is at or below `black_threshold`, the patch is judged true black and
/// the estimate comes back zeroed with `applied == false`.
pub fn estimate_background(
    image: &RgbImage,
    point: Option<SamplePoint>,
    patch_size: u32,
    black_threshold: f32,
) -> BackgroundEstimate {
    let half = (patch_size / 2) as i64;
    let (cx, cy) = match point {
        Some(p) => (p.x as i64, p.y as i64),
        None => (half, half),
    };

    let left = (cx - half).max(0);
    let top = (cy - half).max(0);
    let right = (cx + half + 1).min(image.width as i64);
    let bottom = (cy + half + 1).min(image.height as i64);

    let mut sums = [0.0f32; 3];
    let mut count = 0u32;
    for py in top..bottom {
        for px in left..right {
            let [r, g, b] = image.pixel(px as u32, py as u32);
            sums[0] += r as f32;
            sums[1] += g as f32;
            sums[2] += b as f32;
            count += 1;
        }
    }

    // A fully clipped patch (point far outside the image) reads as no
    // background; with the default anchor the patch always has >= 1 pixel.
    if count == 0 {
        return BackgroundEstimate {
            offsets: [0.0; 3],
            applied: false,
        };
    }

    let means = sums.map(|sum| sum / count as f32);
    if means.iter().all(|&mean| mean <= black_threshold) {
        return BackgroundEstimate {
            offsets: [0.0; 3],
            applied: false,
        };
    }

    BackgroundEstimate {
        offsets: means,
        applied: true,
    }
}

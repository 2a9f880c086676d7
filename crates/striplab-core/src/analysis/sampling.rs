//! Pixel neighborhood sampling
//!
//! Reduces a small neighborhood around a sample point to a single scalar
//! intensity (the rgb-sum), or to an averaged RGB triple for scientific
//! display. Out-of-bounds neighbors are skipped; absent data degrades to
//! zero signal rather than failing.

use crate::models::RgbImage;

/// The 5-point cross neighborhood: center plus the four axis-adjacent
/// pixels.
#[inline]
fn neighborhood(x: u32, y: u32) -> [(i64, i64); 5] {
    let (x, y) = (x as i64, y as i64);
    [(x, y), (x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
}

/// Sample the rgb-sum intensity at `(x, y)`.
///
/// Averages the R, G and B channels over the in-bounds pixels of the
/// 5-point neighborhood, then returns the sum of the three channel means
/// rounded half away from zero. If a background offset is supplied, it is
/// subtracted per channel before averaging, with each channel floored at
/// zero. Returns 0 when every neighbor is out of bounds.
pub fn sample_rgb_sum(
    image: &RgbImage,
    x: u32,
    y: u32,
    background: Option<[f32; 3]>,
) -> i32 {
    let mut sums = [0.0f32; 3];
    let mut count = 0u32;

    for (px, py) in neighborhood(x, y) {
        if !image.in_bounds(px, py) {
            continue;
        }
        let [r, g, b] = image.pixel(px as u32, py as u32);
        let mut channels = [r as f32, g as f32, b as f32];
        if let Some(offsets) = background {
            for (channel, offset) in channels.iter_mut().zip(offsets) {
                *channel = (*channel - offset).max(0.0);
            }
        }
        for (sum, channel) in sums.iter_mut().zip(channels) {
            *sum += channel;
        }
        count += 1;
    }

    if count == 0 {
        return 0;
    }

    let total: f32 = sums.iter().map(|sum| sum / count as f32).sum();
    total.round() as i32
}

/// Sample the averaged RGB triple at `(x, y)`, without background
/// correction.
///
/// Each channel mean is rounded half away from zero independently.
/// Returns `(0, 0, 0)` when every neighbor is out of bounds. Used for
/// scientific/diagnostic display only.
pub fn sample_mean_rgb(image: &RgbImage, x: u32, y: u32) -> (u8, u8, u8) {
    let mut sums = [0.0f32; 3];
    let mut count = 0u32;

    for (px, py) in neighborhood(x, y) {
        if !image.in_bounds(px, py) {
            continue;
        }
        let [r, g, b] = image.pixel(px as u32, py as u32);
        sums[0] += r as f32;
        sums[1] += g as f32;
        sums[2] += b as f32;
        count += 1;
    }

    if count == 0 {
        return (0, 0, 0);
    }

    let mean = |sum: f32| (sum / count as f32).round() as u8;
    (mean(sums[0]), mean(sums[1]), mean(sums[2]))
}

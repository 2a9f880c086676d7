//! Sample point layout
//!
//! Auto-placed points are equally spaced along the image midline; user
//! points are sorted left-to-right so they pair with analytes in curve
//! order.

use crate::models::SamplePoint;

/// Lay out `n` equally spaced points along the horizontal midline:
/// `x_i = round((i + 1) * width / (n + 1))`, `y = height / 2`.
pub fn auto_layout(width: u32, height: u32, n: usize) -> Vec<SamplePoint> {
    let y = height / 2;
    (0..n)
        .map(|i| {
            let x = ((i + 1) as f32 * width as f32 / (n + 1) as f32).round() as u32;
            SamplePoint::new(x, y)
        })
        .collect()
}

/// Prepare user-placed points for pairing: truncate to `cap`, then sort
/// left-to-right. Truncation happens before sorting, matching how the
/// capture UI hands points over.
pub fn pair_user_points(mut points: Vec<SamplePoint>, cap: usize) -> Vec<SamplePoint> {
    points.truncate(cap);
    points.sort_by_key(|p| p.x);
    points
}

//! Seeded film grain.

use crate::canvas::Canvas;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::Range;

/// Grain amplitude on row `y`: full `base_strength` on the first row of the
/// region, fading linearly towards its last row.
pub fn grain_strength_at(y: u32, rows: &Range<u32>, base_strength: f32) -> i32 {
    if rows.is_empty() || !rows.contains(&y) {
        return 0;
    }
    let span = (rows.end - rows.start) as f32;
    let factor = 1.0 - (y - rows.start) as f32 / span;
    (base_strength * factor).round().max(0.0) as i32
}

/// Add a pseudo-random brightness offset in `[-s, s]` to every pixel of the
/// rows in `rows`, the same offset on R, G and B. Alpha is left untouched.
///
/// The generator is seeded from `seed` alone and visits pixels in row-major
/// order, so a given seed always yields the same grain.
pub fn apply_grain(canvas: &mut Canvas, rows: Range<u32>, base_strength: f32, seed: u64) {
    let rows = rows.start.min(canvas.height())..rows.end.min(canvas.height());
    let mut rng = StdRng::seed_from_u64(seed);
    let width = canvas.width();
    let image = canvas.image_mut();

    for y in rows.clone() {
        let s = grain_strength_at(y, &rows, base_strength);
        for x in 0..width {
            let n: i32 = rng.gen_range(-s..=s);
            if n == 0 {
                continue;
            }
            let px = image.get_pixel_mut(x, y);
            for c in 0..3 {
                px[c] = (px[c] as i32 + n).clamp(0, 255) as u8;
            }
        }
    }
}

//! Full-canvas atmospheric layers: the horizon mist band and the vignette.

use crate::blur::blur;
use crate::canvas::{Canvas, Layer};
use crate::geometry::{elliptical_ring, ScenePoint};
use crate::scene::{MistSpec, VignetteSpec};
use std::f32::consts::PI;
use tracing::debug;

/// Alpha of row `i` of an `n`-row band: `peak * sin(pi * i / n)`.
pub fn mist_alpha(i: u32, rows: u32, peak: u8) -> u8 {
    if rows == 0 {
        return 0;
    }
    let t = i as f32 / rows as f32;
    (peak as f32 * (PI * t).sin()).max(0.0) as u8
}

/// Soft band centered on the horizon, strongest in its middle row.
pub fn draw_horizon_glow(canvas: &mut Canvas, horizon_y: f32, spec: &MistSpec) {
    let rows = spec.height.round().max(1.0) as u32;
    let top = horizon_y.round() as i32 - (rows / 2) as i32;
    let width = canvas.width() as i32;

    let mut layer = Layer::transparent(canvas.width(), canvas.height());
    for i in 0..rows {
        let alpha = mist_alpha(i, rows, spec.peak_alpha);
        layer.fill_row(top + i as i32, 0, width, spec.color.with_alpha(alpha));
    }
    debug!(rows, top, blur_radius = spec.blur_radius, "horizon glow band painted");
    blur(&mut layer, spec.blur_radius);
    canvas.composite(&layer);
}

/// Alpha of vignette ring `i` out of `rings`, the outermost ring being darkest.
/// Rings outside `0..rings` get no shade.
pub fn vignette_alpha(i: u32, spec: &VignetteSpec) -> u8 {
    if i >= spec.rings {
        return 0;
    }
    let t = (spec.rings - i) as f32 / spec.rings as f32;
    (spec.max_alpha as f32 * (1.0 - t).powf(spec.exponent)) as u8
}

/// Concentric dark rings growing from the center outward, blurred heavily
/// into a smooth edge falloff.
pub fn draw_vignette(canvas: &mut Canvas, spec: &VignetteSpec) {
    let size = canvas.width().min(canvas.height()) as f32;
    let center = ScenePoint::new(canvas.width() as f32 / 2.0, canvas.height() as f32 / 2.0);

    let mut layer = Layer::transparent(canvas.width(), canvas.height());
    for i in 0..spec.rings {
        let t = (spec.rings - i) as f32 / spec.rings as f32;
        let alpha = vignette_alpha(i, spec);
        if alpha == 0 {
            continue;
        }
        let radius = size * spec.base_radius_fraction + size * spec.spread_fraction * (1.0 - t);
        let ring = elliptical_ring(center, radius, radius, spec.ring_width);
        layer.paint_polygon(&ring, spec.color.with_alpha(alpha));
    }
    debug!(rings = spec.rings, blur_radius = spec.blur_radius, "vignette layer painted");
    blur(&mut layer, spec.blur_radius);
    canvas.composite(&layer);
}

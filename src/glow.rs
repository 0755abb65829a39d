//! Sun bloom and disc at the vanishing point.

use crate::blur::blur;
use crate::canvas::{Canvas, Layer};
use crate::geometry::{circle, ellipse, ScenePoint};
use crate::scene::{BloomRing, DiscRing};
use tracing::debug;

/// Paint the bloom ellipses (largest first) as flat fills into one layer,
/// blur the layer once and composite it onto the canvas.
pub fn draw_bloom(canvas: &mut Canvas, center: ScenePoint, rings: &[BloomRing], blur_radius: f32) {
    let mut layer = Layer::transparent(canvas.width(), canvas.height());
    for ring in rings {
        layer.paint_polygon(&ellipse(center, ring.radius_x, ring.radius_y), ring.color);
    }
    debug!(rings = rings.len(), blur_radius, "sun bloom layer painted");
    blur(&mut layer, blur_radius);
    canvas.composite(&layer);
}

/// Crisp concentric circles drawn straight onto the canvas after the bloom.
/// The treeline and road drawn later cover the part below the horizon.
pub fn draw_disc(canvas: &mut Canvas, center: ScenePoint, rings: &[DiscRing]) {
    for ring in rings {
        canvas.fill_polygon(&circle(center, ring.radius), ring.color);
    }
}

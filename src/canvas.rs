//! Owned RGBA pixel buffer and the compositing primitives every stage draws with.

use crate::color::Color;
use crate::geometry::ScenePoint;
use image::{GrayImage, Rgba, RgbaImage, RgbImage};

/// Vertical sub-scanlines sampled per pixel row when filling polygons.
const SUBSAMPLES: usize = 4;

/// A fixed-size straight-alpha RGBA canvas.
///
/// Writes outside of the canvas bounds are clipped, never an error: scene
/// geometry legitimately reaches past the edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: RgbaImage,
}

/// A transient canvas used to accumulate one effect before it is blurred and
/// composited onto the main canvas.
pub type Layer = Canvas;

impl Canvas {
    /// Create a canvas filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, fill.to_rgba()),
        }
    }

    /// Create a fully transparent layer.
    pub fn transparent(width: u32, height: u32) -> Layer {
        Self::new(width, height, Color::TRANSPARENT)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        let px = color.to_rgba();
        self.pixels.pixels_mut().for_each(|p| *p = px);
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(Color::from(*self.pixels.get_pixel(x as u32, y as u32)))
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            self.pixels.put_pixel(x as u32, y as u32, color.to_rgba());
        }
    }

    /// Composite `color` over pixel `(x, y)` at opacity `alpha`.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if self.in_bounds(x, y) {
            blend_over(self.pixels.get_pixel_mut(x as u32, y as u32), color, alpha);
        }
    }

    /// Overwrite the pixels of row `y` in `[x0, x1)` with `color`.
    pub fn fill_row(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < 0 || y as u32 >= self.height() {
            return;
        }
        let x0 = x0.max(0) as u32;
        let x1 = x1.clamp(0, self.width() as i32) as u32;
        let px = color.to_rgba();
        for x in x0..x1 {
            self.pixels.put_pixel(x, y as u32, px);
        }
    }

    /// Alpha-composite a solid polygon (nonzero winding) over the canvas.
    pub fn fill_polygon(&mut self, points: &[ScenePoint], color: Color) {
        self.rasterize(points, |px, coverage| blend_over(px, color, coverage));
    }

    /// Flat-fill a polygon, replacing what is underneath (including alpha).
    /// Edge pixels are interpolated by their coverage.
    pub fn paint_polygon(&mut self, points: &[ScenePoint], color: Color) {
        self.rasterize(points, |px, coverage| {
            let mixed = Color::from(*px).lerp(color, coverage);
            *px = mixed.to_rgba();
        });
    }

    /// Source-over composite an equally sized layer onto this canvas.
    pub fn composite(&mut self, layer: &Layer) {
        for (dst, src) in self.pixels.pixels_mut().zip(layer.pixels.pixels()) {
            if src[3] != 0 {
                blend_over(dst, Color::from(*src), 1.0);
            }
        }
    }

    /// Composite the canvas over an opaque background and drop the alpha channel.
    pub fn flatten(&self, background: Color) -> RgbImage {
        let background = background.with_alpha(255);
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            let mut px = background.to_rgba();
            blend_over(&mut px, Color::from(*self.pixels.get_pixel(x, y)), 1.0);
            image::Rgb([px[0], px[1], px[2]])
        })
    }

    /// Multiply the alpha channel by a single-channel mask of the same size.
    pub fn multiply_alpha(&mut self, mask: &GrayImage) {
        for (px, m) in self.pixels.pixels_mut().zip(mask.pixels()) {
            let a = px[3] as u32 * m[0] as u32;
            px[3] = ((a + 127) / 255) as u8;
        }
    }

    /// Scanline rasterizer shared by the polygon fills.
    ///
    /// Each row is sampled on `SUBSAMPLES` sub-scanlines; spans between winding
    /// crossings contribute exact horizontal coverage, so `paint` receives a
    /// coverage in `(0, 1]` for every touched pixel.
    fn rasterize(&mut self, points: &[ScenePoint], mut paint: impl FnMut(&mut Rgba<u8>, f32)) {
        if points.len() < 3 {
            return;
        }
        let width = self.width() as usize;
        let height = self.height() as i32;

        let edges: Vec<Edge> = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .filter_map(|(a, b)| Edge::new(*a, *b))
            .collect();
        if edges.is_empty() {
            return;
        }

        let min_y = edges.iter().map(|e| e.y0).fold(f32::INFINITY, f32::min);
        let max_y = edges.iter().map(|e| e.y1).fold(f32::NEG_INFINITY, f32::max);
        let row_start = (min_y.floor() as i32).max(0);
        let row_end = (max_y.ceil() as i32).min(height);

        let mut coverage = vec![0.0f32; width + 1];
        let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(edges.len());
        let weight = 1.0 / SUBSAMPLES as f32;

        for y in row_start..row_end {
            coverage.iter_mut().for_each(|c| *c = 0.0);
            let mut touched = false;

            for s in 0..SUBSAMPLES {
                let sy = y as f32 + (s as f32 + 0.5) * weight;
                crossings.clear();
                for edge in &edges {
                    if sy >= edge.y0 && sy < edge.y1 {
                        crossings.push((edge.x_at(sy), edge.winding));
                    }
                }
                crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

                let mut winding = 0;
                let mut span_start = 0.0;
                for &(x, dir) in &crossings {
                    let was_inside = winding != 0;
                    winding += dir;
                    if !was_inside && winding != 0 {
                        span_start = x;
                    } else if was_inside && winding == 0 {
                        touched |= add_span(&mut coverage[..width], span_start, x, weight);
                    }
                }
            }

            if !touched {
                continue;
            }
            for (x, &c) in coverage[..width].iter().enumerate() {
                if c > 0.0 {
                    paint(self.pixels.get_pixel_mut(x as u32, y as u32), c.min(1.0));
                }
            }
        }
    }
}

/// Non-horizontal polygon edge, stored top to bottom.
struct Edge {
    x0: f32,
    y0: f32,
    y1: f32,
    slope: f32,
    winding: i32,
}

impl Edge {
    fn new(a: ScenePoint, b: ScenePoint) -> Option<Self> {
        if a.y == b.y || !a.y.is_finite() || !b.y.is_finite() {
            return None;
        }
        let (top, bottom, winding) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
        Some(Self {
            x0: top.x,
            y0: top.y,
            y1: bottom.y,
            slope: (bottom.x - top.x) / (bottom.y - top.y),
            winding,
        })
    }

    fn x_at(&self, y: f32) -> f32 {
        self.x0 + (y - self.y0) * self.slope
    }
}

/// Accumulate coverage `weight` over `[xa, xb)`, clipped to the row.
/// Returns whether anything was added.
fn add_span(row: &mut [f32], xa: f32, xb: f32, weight: f32) -> bool {
    let width = row.len() as f32;
    let xa = xa.clamp(0.0, width);
    let xb = xb.clamp(0.0, width);
    if xb <= xa {
        return false;
    }
    let ia = xa.floor() as usize;
    let ib = xb.floor() as usize;
    if ia == ib {
        row[ia] += (xb - xa) * weight;
        return true;
    }
    row[ia] += (ia as f32 + 1.0 - xa) * weight;
    let end = ib.min(row.len());
    for c in &mut row[ia + 1..end] {
        *c += weight;
    }
    if ib < row.len() {
        row[ib] += (xb - ib as f32) * weight;
    }
    true
}

/// Porter-Duff "over" for straight alpha, `src` weighted by `alpha` on top of
/// its own alpha. Over an opaque pixel this is
/// `out = src * alpha + dst * (1 - alpha)` per channel.
fn blend_over(dst: &mut Rgba<u8>, src: Color, alpha: f32) {
    let sa = (src.a as f32 / 255.0) * alpha.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    *dst = Rgba([
        channel(src.r, dst[0]),
        channel(src.g, dst[1]),
        channel(src.b, dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_coverage_is_exact_at_fractional_ends() {
        let mut row = vec![0.0f32; 6];
        assert!(add_span(&mut row, 1.25, 3.5, 1.0));
        assert_eq!(row, vec![0.0, 0.75, 1.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn span_reaching_the_row_end_fills_the_tail() {
        let mut row = vec![0.0f32; 4];
        assert!(add_span(&mut row, 0.5, 9.0, 1.0));
        assert_eq!(row, vec![0.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn span_inside_one_pixel() {
        let mut row = vec![0.0f32; 3];
        add_span(&mut row, 1.25, 1.75, 0.5);
        assert_eq!(row, vec![0.0, 0.25, 0.0]);
    }

    #[test]
    fn span_outside_row_is_ignored() {
        let mut row = vec![0.0f32; 3];
        assert!(!add_span(&mut row, -5.0, -1.0, 1.0));
        assert!(!add_span(&mut row, 4.0, 9.0, 1.0));
        assert!(row.iter().all(|c| *c == 0.0));
    }

    #[test]
    fn blend_pixel_over_opaque_is_weighted_average() {
        let mut canvas = Canvas::new(2, 2, Color::rgb(0, 0, 200));
        canvas.blend_pixel(1, 1, Color::rgb(200, 100, 0), 0.25);
        assert_eq!(canvas.get_pixel(1, 1), Some(Color::rgb(50, 25, 150)));
        // Out of bounds is a no-op.
        canvas.blend_pixel(-1, 5, Color::WHITE, 1.0);
        assert_eq!(canvas.get_pixel(0, 0), Some(Color::rgb(0, 0, 200)));
    }

    #[test]
    fn polygon_fill_covers_whole_pixels_exactly() {
        let mut canvas = Canvas::new(4, 4, Color::BLACK);
        let square = crate::geometry::rect(1.0, 1.0, 3.0, 3.0);
        canvas.fill_polygon(&square, Color::WHITE);
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(canvas.get_pixel(x, y), Some(Color::WHITE));
        }
        for (x, y) in [(0, 0), (3, 1), (1, 3), (3, 3)] {
            assert_eq!(canvas.get_pixel(x, y), Some(Color::BLACK));
        }
    }

    #[test]
    fn over_transparent_keeps_source_color() {
        let mut px = Rgba([0, 0, 0, 0]);
        blend_over(&mut px, Color::rgba(200, 100, 50, 128), 1.0);
        assert_eq!(px, Rgba([200, 100, 50, 128]));
    }
}

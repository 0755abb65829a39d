//! Rounded-rectangle icon mask.

use crate::blur::blur_mask;
use crate::canvas::Canvas;
use image::{GrayImage, Luma};

/// Whether the pixel center `(x + 0.5, y + 0.5)` lies inside a
/// `width` x `height` rectangle with corner radius `radius`.
fn inside_rounded_rect(x: u32, y: u32, width: u32, height: u32, radius: f32) -> bool {
    let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
    let (w, h) = (width as f32, height as f32);
    // Nearest point of the inner rectangle the corner circles are centered on.
    let cx = px.clamp(radius, w - radius);
    let cy = py.clamp(radius, h - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

/// Smallest corner radius, in pixels, that keeps the corner pixel's center
/// outside of the rounded rectangle.
pub const MIN_CORNER_RADIUS: f32 = 2.0;

/// Single-channel mask: 255 inside a rounded rectangle of corner radius
/// `radius_fraction * min(width, height)`, 0 outside. The boundary is softened
/// by a blur of `blur_radius` on the inside only, so pixels outside the shape
/// stay fully clear. A non-finite fraction gives square corners.
pub fn rounded_mask(width: u32, height: u32, radius_fraction: f32, blur_radius: f32) -> GrayImage {
    let fraction = if radius_fraction.is_finite() {
        radius_fraction.clamp(0.0, 0.5)
    } else {
        0.0
    };
    let radius = fraction * width.min(height) as f32;
    let shape = GrayImage::from_fn(width, height, |x, y| {
        if inside_rounded_rect(x, y, width, height, radius) {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    let mut mask = shape.clone();
    blur_mask(&mut mask, blur_radius);
    for (soft, hard) in mask.pixels_mut().zip(shape.pixels()) {
        soft[0] = soft[0].min(hard[0]);
    }
    mask
}

/// Multiply the canvas alpha by the mask.
pub fn apply_mask(canvas: &mut Canvas, mask: &GrayImage) {
    canvas.multiply_alpha(mask);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_pixel_is_outside_from_the_minimum_radius() {
        let size = 64;
        let radius = MIN_CORNER_RADIUS;
        assert!(!inside_rounded_rect(0, 0, size, size, radius));
        assert!(inside_rounded_rect(1, 1, size, size, radius));
    }

    #[test]
    fn non_finite_fraction_gives_square_corners() {
        let mask = rounded_mask(16, 16, f32::NAN, 1.0);
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
        let mask = rounded_mask(16, 16, f32::INFINITY, 0.0);
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
    }
}

//! Multi-stop vertical gradients for the sky and ground bands.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::SceneError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// An ordered list of stops, first at offset 0 and last at offset 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Build a gradient, rejecting malformed stop lists.
    pub fn new(stops: Vec<GradientStop>) -> Result<Self, SceneError> {
        let gradient = Self { stops };
        gradient.validate("gradient")?;
        Ok(gradient)
    }

    /// Build a gradient without checking it; `SceneConfig::validate` reports
    /// malformed stops before rendering.
    pub fn from_stops(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    /// Check the stop list; `band` names the gradient in the error.
    pub fn validate(&self, band: &str) -> Result<(), SceneError> {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) if self.stops.len() >= 2 => (first, last),
            _ => return Err(SceneError::gradient(band, "at least two stops are required")),
        };
        if self.stops.iter().any(|s| !s.offset.is_finite()) {
            return Err(SceneError::gradient(band, "offsets must be finite"));
        }
        if first.offset != 0.0 {
            return Err(SceneError::gradient(band, "first stop must be at offset 0"));
        }
        if last.offset != 1.0 {
            return Err(SceneError::gradient(band, "last stop must be at offset 1"));
        }
        if let Some(pair) = self.stops.windows(2).find(|w| w[1].offset <= w[0].offset) {
            return Err(SceneError::gradient(
                band,
                format!(
                    "offsets must be strictly increasing ({} is followed by {})",
                    pair[0].offset, pair[1].offset
                ),
            ));
        }
        Ok(())
    }

    /// Color at `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        match self.stops.as_slice() {
            [] => return Color::TRANSPARENT,
            [only] => return only.color,
            _ => {}
        }
        let upper = self
            .stops
            .iter()
            .position(|s| s.offset >= t)
            .unwrap_or(self.stops.len() - 1)
            .max(1);
        let (lo, hi) = (&self.stops[upper - 1], &self.stops[upper]);
        let span = hi.offset - lo.offset;
        let local = if span > 0.0 { (t - lo.offset) / span } else { 0.0 };
        lo.color.lerp(hi.color, local)
    }
}

/// Overwrite the rows `[y_start, y_end)` with the gradient, `t` running from 0
/// on the first row to `(n - 1) / n` on the last.
pub fn render_vertical_gradient(canvas: &mut Canvas, y_start: u32, y_end: u32, gradient: &Gradient) {
    if y_end <= y_start {
        return;
    }
    let span = (y_end - y_start) as f32;
    let width = canvas.width() as i32;
    for y in y_start..y_end {
        let t = (y - y_start) as f32 / span;
        canvas.fill_row(y as i32, 0, width, gradient.sample(t));
    }
}

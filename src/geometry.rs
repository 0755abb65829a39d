//! Scene geometry derived from a single set of perspective parameters.
//!
//! Every stage that needs road, shoulder, dash or treeline coordinates asks
//! [`PerspectiveParams`] for them, so the formulas live in exactly one place.

use crate::error::SceneError;
use crate::scene::{DashSpec, ShoulderSpec};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// A point in canvas coordinates, before rounding to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScenePoint {
    pub x: f32,
    pub y: f32,
}

impl ScenePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Reflect about the vertical line `x = width / 2`.
    pub fn mirrored(self, width: f32) -> Self {
        Self::new(width - self.x, self.y)
    }
}

/// Ordered vertices of a fill region.
pub type Polygon = Vec<ScenePoint>;

/// Four corners of a road-aligned quadrilateral:
/// top-left, top-right, bottom-right, bottom-left.
pub type Quad = [ScenePoint; 4];

/// One silhouette tree of a treeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PineSpec {
    pub center_x: f32,
    pub height: f32,
    pub base_half_width: f32,
}

impl PineSpec {
    pub const fn new(center_x: f32, height: f32, base_half_width: f32) -> Self {
        Self {
            center_x,
            height,
            base_half_width,
        }
    }

    pub fn mirrored(self, width: f32) -> Self {
        Self {
            center_x: width - self.center_x,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// One dash of the centerline together with the depth slot it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub slot_start: f32,
    pub slot_end: f32,
    pub corners: Quad,
}

impl Dash {
    pub fn y_start(&self) -> f32 {
        self.corners[0].y
    }

    pub fn y_end(&self) -> f32 {
        self.corners[2].y
    }
}

/// Horizon, vanishing point and road half-widths of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveParams {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub horizon_y: f32,
    pub vanishing_x: f32,
    /// Road half-width where it meets the horizon.
    pub horizon_half_width: f32,
    /// Road half-width at the bottom edge of the canvas.
    pub bottom_half_width: f32,
}

impl PerspectiveParams {
    pub fn new(
        width: u32,
        height: u32,
        horizon_y: f32,
        horizon_half_width: f32,
        bottom_half_width: f32,
    ) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::geometry("canvas must be at least 1x1"));
        }
        if !horizon_y.is_finite() || horizon_y <= 0.0 || horizon_y >= height as f32 {
            return Err(SceneError::geometry(format!(
                "horizon_y {horizon_y} must lie strictly between 0 and {height}"
            )));
        }
        let horizon_row = horizon_y.round();
        if horizon_row <= 0.0 || horizon_row >= height as f32 {
            return Err(SceneError::geometry(format!(
                "horizon_y {horizon_y} leaves an empty sky or ground region"
            )));
        }
        for (field, value) in [
            ("road.horizon_half_width", horizon_half_width),
            ("road.bottom_half_width", bottom_half_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::parameter(field, "must be a finite, non-negative width"));
            }
        }
        Ok(Self {
            canvas_width: width as f32,
            canvas_height: height as f32,
            horizon_y,
            vanishing_x: width as f32 / 2.0,
            horizon_half_width,
            bottom_half_width,
        })
    }

    /// First pixel row of the ground region.
    pub fn horizon_row(&self) -> u32 {
        self.horizon_y.round() as u32
    }

    pub fn sky_rows(&self) -> u32 {
        self.horizon_row()
    }

    pub fn ground_rows(&self) -> u32 {
        self.canvas_height as u32 - self.horizon_row()
    }

    /// Normalized depth of row `y`: 0 at the horizon, 1 at the bottom edge.
    pub fn depth_at(&self, y: f32) -> f32 {
        (y - self.horizon_y) / (self.canvas_height - self.horizon_y)
    }

    pub fn y_at_depth(&self, t: f32) -> f32 {
        self.horizon_y + (self.canvas_height - self.horizon_y) * t
    }

    pub fn road_half_width_at(&self, y: f32) -> f32 {
        let t = self.depth_at(y);
        self.horizon_half_width + (self.bottom_half_width - self.horizon_half_width) * t
    }

    pub fn vanishing_point(&self) -> ScenePoint {
        ScenePoint::new(self.vanishing_x, self.horizon_y)
    }

    /// Quad centered on the vanishing line with the given half-widths at the
    /// horizon and at the bottom edge.
    fn centered_quad(&self, top_half: f32, bottom_half: f32) -> Quad {
        let (vx, hy, h) = (self.vanishing_x, self.horizon_y, self.canvas_height);
        [
            ScenePoint::new(vx - top_half, hy),
            ScenePoint::new(vx + top_half, hy),
            ScenePoint::new(vx + bottom_half, h),
            ScenePoint::new(vx - bottom_half, h),
        ]
    }

    pub fn road_trapezoid(&self) -> Quad {
        self.centered_quad(self.horizon_half_width, self.bottom_half_width)
    }

    /// Lighter strip down the middle of the road, a fraction of its width.
    pub fn center_strip(&self, width_fraction: f32) -> Quad {
        self.centered_quad(
            self.horizon_half_width * width_fraction,
            self.bottom_half_width * width_fraction,
        )
    }

    /// Edge strips running just inside the road edges, `[left, right]`.
    pub fn shoulders(&self, spec: &ShoulderSpec) -> [Quad; 2] {
        let (vx, hy, h) = (self.vanishing_x, self.horizon_y, self.canvas_height);
        let (top, bottom) = (self.horizon_half_width, self.bottom_half_width);
        let left = [
            ScenePoint::new(vx - top, hy),
            ScenePoint::new(vx - top + spec.top_width, hy),
            ScenePoint::new(vx - bottom + spec.bottom_width, h),
            ScenePoint::new(vx - bottom, h),
        ];
        let right = [
            ScenePoint::new(vx + top - spec.top_width, hy),
            ScenePoint::new(vx + top, hy),
            ScenePoint::new(vx + bottom, h),
            ScenePoint::new(vx + bottom - spec.bottom_width, h),
        ];
        [left, right]
    }

    /// Perspective dashes: the road depth is split into `count` equal slots and
    /// each dash fills the leading `fill_fraction` of its slot.
    pub fn dashes(&self, spec: &DashSpec) -> Vec<Dash> {
        let slots = spec.count.max(1) as f32;
        (0..spec.count)
            .filter_map(|i| {
                let slot_start = self.y_at_depth(i as f32 / slots);
                let slot_end = self.y_at_depth((i + 1) as f32 / slots);
                if slot_start >= self.canvas_height {
                    return None;
                }
                let y_start = slot_start;
                let y_end = self
                    .y_at_depth((i as f32 + spec.fill_fraction) / slots)
                    .min(self.canvas_height);
                let w_start = self.road_half_width_at(y_start) * spec.width_fraction;
                let w_end = self.road_half_width_at(y_end) * spec.width_fraction;
                let vx = self.vanishing_x;
                Some(Dash {
                    slot_start,
                    slot_end,
                    corners: [
                        ScenePoint::new(vx - w_start, y_start),
                        ScenePoint::new(vx + w_start, y_start),
                        ScenePoint::new(vx + w_end, y_end),
                        ScenePoint::new(vx - w_end, y_end),
                    ],
                })
            })
            .collect()
    }

    /// Serrated silhouette for one side of the road.
    ///
    /// The outline starts at the outer canvas edge on the bottom row, climbs to
    /// the horizon, zig-zags across the pines (outer valley, peak, inner
    /// valley), reaches the road edge at the horizon and follows that edge
    /// down to the bottom row. `pines` are listed from the outer edge inward.
    pub fn treeline(&self, side: Side, pines: &[PineSpec], valley_offset: f32) -> Polygon {
        let (hy, h) = (self.horizon_y, self.canvas_height);
        let valley_y = hy + valley_offset;
        // `outward` is the x direction pointing away from the road.
        let (outer_x, outward) = match side {
            Side::Left => (0.0, -1.0),
            Side::Right => (self.canvas_width, 1.0),
        };
        let road_edge = |half_width: f32| self.vanishing_x + outward * half_width;

        let mut outline = Vec::with_capacity(pines.len() * 3 + 4);
        outline.push(ScenePoint::new(outer_x, h));
        outline.push(ScenePoint::new(outer_x, hy));
        for pine in pines {
            let cx = pine.center_x;
            outline.push(ScenePoint::new(cx + outward * pine.base_half_width, valley_y));
            outline.push(ScenePoint::new(cx, hy - pine.height));
            outline.push(ScenePoint::new(cx - outward * pine.base_half_width, valley_y));
        }
        outline.push(ScenePoint::new(road_edge(self.horizon_half_width), hy));
        outline.push(ScenePoint::new(road_edge(self.bottom_half_width), h));
        outline
    }
}

/// Reflect every point about the vertical center line of a `width`-wide canvas.
pub fn mirror_x(points: &[ScenePoint], width: f32) -> Polygon {
    points.iter().map(|p| p.mirrored(width)).collect()
}

fn ellipse_segments(rx: f32, ry: f32) -> usize {
    let perimeter = TAU * rx.max(ry);
    ((perimeter / 3.0).ceil() as usize).clamp(24, 720)
}

/// Polygonal approximation of an axis-aligned ellipse.
pub fn ellipse(center: ScenePoint, rx: f32, ry: f32) -> Polygon {
    let n = ellipse_segments(rx, ry);
    (0..n)
        .map(|i| {
            let a = TAU * i as f32 / n as f32;
            ScenePoint::new(center.x + rx * a.cos(), center.y + ry * a.sin())
        })
        .collect()
}

pub fn circle(center: ScenePoint, r: f32) -> Polygon {
    ellipse(center, r, r)
}

/// Elliptical ring of the given thickness as a single polygon: the outer loop
/// followed by the inner loop in the opposite direction, so nonzero winding
/// leaves the middle empty.
pub fn elliptical_ring(center: ScenePoint, rx: f32, ry: f32, thickness: f32) -> Polygon {
    let n = ellipse_segments(rx, ry);
    let (irx, iry) = ((rx - thickness).max(0.0), (ry - thickness).max(0.0));
    let point = |rx: f32, ry: f32, i: usize| {
        let a = TAU * (i % n) as f32 / n as f32;
        ScenePoint::new(center.x + rx * a.cos(), center.y + ry * a.sin())
    };
    let mut ring = Vec::with_capacity(2 * n + 2);
    ring.extend((0..=n).map(|i| point(rx, ry, i)));
    ring.extend((0..=n).rev().map(|i| point(irx, iry, i)));
    ring
}

/// Axis-aligned rectangle from its corners.
pub fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Polygon {
    vec![
        ScenePoint::new(x0, y0),
        ScenePoint::new(x1, y0),
        ScenePoint::new(x1, y1),
        ScenePoint::new(x0, y1),
    ]
}

/// Shapes of the motorcycle and rider: solid `body` parts and the lighter
/// wheel `hubs` drawn on top.
#[derive(Debug, Clone, PartialEq)]
pub struct RiderSilhouette {
    pub body: Vec<Polygon>,
    pub hubs: Vec<Polygon>,
}

/// Side-on motorcycle with a crouched rider, `scale` being roughly the wheel
/// diameter in pixels and `base_y` the row of the wheel axles.
pub fn rider_silhouette(center_x: f32, base_y: f32, scale: f32) -> RiderSilhouette {
    let s = scale;
    let p = ScenePoint::new;

    let rear = p(center_x - 0.7 * s, base_y);
    let rear_r = 0.55 * s;
    let front = p(center_x + 0.85 * s, base_y);
    let front_r = 0.5 * s;
    let rear_edge = rear.x + rear_r;
    let front_edge = front.x - front_r;

    let frame = vec![
        p(rear_edge - 0.1 * s, base_y - 0.3 * s),
        p(rear_edge, base_y - 0.85 * s),
        p(center_x + 0.1 * s, base_y - 0.95 * s),
        p(front_edge + 0.16 * s, base_y - 0.4 * s),
        p(front_edge + 0.05 * s, base_y - 0.15 * s),
    ];
    let exhaust = rect(
        rear_edge - 0.05 * s,
        base_y - 0.35 * s,
        front_edge + 0.1 * s,
        base_y - 0.2 * s,
    );
    let fork = vec![
        p(front.x - 0.12 * s, base_y - front_r),
        p(front.x + 0.08 * s, base_y - front_r),
        p(front.x + 0.04 * s, base_y - 0.8 * s),
        p(front.x - 0.16 * s, base_y - 0.8 * s),
    ];

    let seat_x = center_x - 0.05 * s;
    let seat_y = base_y - 0.9 * s;
    let torso = vec![
        p(seat_x - 0.2 * s, seat_y),
        p(seat_x + 0.15 * s, seat_y),
        p(seat_x + 0.4 * s, seat_y - 0.55 * s),
        p(seat_x + 0.15 * s, seat_y - 0.65 * s),
        p(seat_x - 0.1 * s, seat_y - 0.5 * s),
    ];
    let helmet_r = 0.28 * s;
    let helmet = ellipse(
        p(seat_x + 0.28 * s, seat_y - 0.85 * s - 0.1 * helmet_r),
        helmet_r,
        0.9 * helmet_r,
    );
    let arms = vec![
        p(seat_x + 0.35 * s, seat_y - 0.5 * s),
        p(front.x - 0.08 * s, base_y - 0.75 * s),
        p(front.x + 0.05 * s, base_y - 0.7 * s),
        p(seat_x + 0.45 * s, seat_y - 0.45 * s),
    ];
    let bar_y = base_y - 0.78 * s;
    let handlebar = rect(
        front.x - 0.25 * s,
        bar_y - 0.08 * s,
        front.x + 0.18 * s,
        bar_y + 0.08 * s,
    );

    RiderSilhouette {
        body: vec![
            circle(rear, rear_r),
            circle(front, front_r),
            frame,
            exhaust,
            fork,
            torso,
            helmet,
            arms,
            handlebar,
        ],
        hubs: vec![circle(rear, rear_r * 0.45), circle(front, front_r * 0.42)],
    }
}

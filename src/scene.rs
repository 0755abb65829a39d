//! Immutable scene description consumed by the pipeline.
//!
//! A `SceneConfig` carries every color, size and seed of one icon variant. It
//! is validated as a whole before rendering starts.

use crate::color::Color;
use crate::error::SceneError;
use crate::geometry::{PerspectiveParams, PineSpec};
use crate::gradient::Gradient;
use crate::mask::MIN_CORNER_RADIUS;
use crate::presets::ICON_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Initial fill of the canvas before any band is drawn.
    pub background: Color,
    /// Opaque color the rounded icon is flattened onto.
    pub matte: Color,
    pub horizon_y: f32,
    pub sky: Gradient,
    pub ground: Gradient,
    #[serde(default)]
    pub horizon_glow: Option<MistSpec>,
    pub sun: SunSpec,
    pub treeline: TreelineSpec,
    pub road: RoadSpec,
    pub dashes: DashSpec,
    #[serde(default)]
    pub rider: Option<RiderSpec>,
    #[serde(default)]
    pub grain: Option<GrainSpec>,
    #[serde(default)]
    pub vignette: Option<VignetteSpec>,
    pub mask: MaskSpec,
}

/// Soft horizontal band straddling the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistSpec {
    pub color: Color,
    /// Band height in pixels, centered on the horizon.
    pub height: f32,
    /// Alpha at the middle of the band; it falls off as `sin(pi * t)`.
    pub peak_alpha: u8,
    pub blur_radius: f32,
}

/// Soft bloom and crisp disc of the sun at the vanishing point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunSpec {
    /// Flat ellipses, largest and faintest first.
    pub bloom: Vec<BloomRing>,
    pub bloom_blur: f32,
    /// Unblurred circles drawn after the bloom, largest first.
    pub disc: Vec<DiscRing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomRing {
    pub radius_x: f32,
    pub radius_y: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscRing {
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreelineSpec {
    pub color: Color,
    /// How far below the horizon the valleys between pines sit.
    pub valley_offset: f32,
    /// Pines from the left canvas edge towards the road.
    pub left: Vec<PineSpec>,
    /// Pines from the right canvas edge towards the road.
    pub right: Vec<PineSpec>,
}

impl TreelineSpec {
    /// Right side as the mirror image of the left side.
    pub fn symmetric(color: Color, valley_offset: f32, left: Vec<PineSpec>, width: f32) -> Self {
        let right = left.iter().map(|p| p.mirrored(width)).collect();
        Self {
            color,
            valley_offset,
            left,
            right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSpec {
    pub horizon_half_width: f32,
    pub bottom_half_width: f32,
    pub color: Color,
    #[serde(default)]
    pub shoulder: Option<ShoulderSpec>,
    #[serde(default)]
    pub reflection: Option<ReflectionSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoulderSpec {
    pub top_width: f32,
    pub bottom_width: f32,
    pub color: Color,
}

/// Translucent strip down the road center catching the sunlight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReflectionSpec {
    pub width_fraction: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashSpec {
    pub count: u32,
    /// Leading fraction of each slot covered by the dash.
    pub fill_fraction: f32,
    /// Dash half-width relative to the road half-width at the same row.
    pub width_fraction: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiderSpec {
    pub base_y: f32,
    pub scale: f32,
    pub color: Color,
    pub hub_color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrainSpec {
    pub y_start: u32,
    pub y_end: u32,
    /// Maximum perturbation at the top of the region.
    pub strength: f32,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VignetteSpec {
    pub color: Color,
    pub rings: u32,
    pub max_alpha: u8,
    pub exponent: f32,
    /// Radius of the innermost ring as a fraction of the canvas size.
    pub base_radius_fraction: f32,
    /// Extra radius reached by the outermost ring, as a fraction of the canvas size.
    pub spread_fraction: f32,
    pub ring_width: f32,
    pub blur_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskSpec {
    /// Corner radius as a fraction of `min(width, height)`.
    pub radius_fraction: f32,
    pub blur_radius: f32,
}

/// Accepted number of bloom ellipses around the sun.
pub const BLOOM_RINGS: RangeInclusive<usize> = 4..=6;

/// Number of crisp circles making up the sun disc.
pub const DISC_RINGS: usize = 3;

fn check(ok: bool, field: &str, reason: &str) -> Result<(), SceneError> {
    if ok {
        Ok(())
    } else {
        Err(SceneError::parameter(field, reason))
    }
}

fn check_blur(value: f32, field: &str) -> Result<(), SceneError> {
    check(value.is_finite() && value >= 0.0, field, "blur radius must be finite and >= 0")
}

fn check_extent(value: f32, field: &str) -> Result<(), SceneError> {
    check(value.is_finite() && value > 0.0, field, "must be finite and > 0")
}

impl SceneConfig {
    /// Load a scene from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        let scene: SceneConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse scene file {}", path.display()))?;
        scene
            .validate()
            .with_context(|| format!("Invalid scene in {}", path.display()))?;
        Ok(scene)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize scene")
    }

    /// Same scene with a different grain seed. Scenes without grain are unchanged.
    pub fn with_seed(mut self, seed: u64) -> Self {
        if let Some(grain) = self.grain.as_mut() {
            grain.seed = seed;
        }
        self
    }

    pub fn perspective(&self) -> Result<PerspectiveParams, SceneError> {
        PerspectiveParams::new(
            self.width,
            self.height,
            self.horizon_y,
            self.road.horizon_half_width,
            self.road.bottom_half_width,
        )
    }

    /// Reject malformed parameters before anything is rendered.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            check(
                value == ICON_SIZE,
                field,
                &format!("the icon is always {ICON_SIZE}x{ICON_SIZE}, got {value}"),
            )?;
        }
        let perspective = self.perspective()?;
        self.sky.validate("sky")?;
        self.ground.validate("ground")?;

        if let Some(mist) = &self.horizon_glow {
            check_extent(mist.height, "horizon_glow.height")?;
            check_blur(mist.blur_radius, "horizon_glow.blur_radius")?;
        }

        self.validate_sun()?;
        self.validate_treeline()?;

        if let Some(shoulder) = &self.road.shoulder {
            for (field, value) in [
                ("road.shoulder.top_width", shoulder.top_width),
                ("road.shoulder.bottom_width", shoulder.bottom_width),
            ] {
                check(value.is_finite() && value >= 0.0, field, "must be finite and >= 0")?;
            }
        }
        if let Some(reflection) = &self.road.reflection {
            check(
                reflection.width_fraction > 0.0 && reflection.width_fraction <= 1.0,
                "road.reflection.width_fraction",
                "must be in (0, 1]",
            )?;
        }

        check(self.dashes.count > 0, "dashes.count", "at least one dash slot is required")?;
        check(
            self.dashes.fill_fraction > 0.0 && self.dashes.fill_fraction < 1.0,
            "dashes.fill_fraction",
            "must be in (0, 1) so consecutive dashes never touch",
        )?;
        check(
            self.dashes.width_fraction > 0.0 && self.dashes.width_fraction < 1.0,
            "dashes.width_fraction",
            "must be in (0, 1)",
        )?;

        if let Some(rider) = &self.rider {
            check_extent(rider.scale, "rider.scale")?;
            check(
                rider.base_y > perspective.horizon_y && rider.base_y <= self.height as f32,
                "rider.base_y",
                "the rider must stand on the ground region",
            )?;
        }

        if let Some(grain) = &self.grain {
            if grain.y_start >= grain.y_end {
                return Err(SceneError::geometry(format!(
                    "grain region {}..{} is empty",
                    grain.y_start, grain.y_end
                )));
            }
            check(grain.y_end <= self.height, "grain.y_end", "must not exceed the canvas height")?;
            check(
                grain.strength.is_finite() && grain.strength >= 0.0,
                "grain.strength",
                "must be finite and >= 0",
            )?;
        }

        if let Some(vignette) = &self.vignette {
            check(vignette.rings > 0, "vignette.rings", "at least one ring is required")?;
            check_extent(vignette.exponent, "vignette.exponent")?;
            check_extent(vignette.ring_width, "vignette.ring_width")?;
            check_extent(vignette.base_radius_fraction, "vignette.base_radius_fraction")?;
            check(
                vignette.spread_fraction.is_finite() && vignette.spread_fraction >= 0.0,
                "vignette.spread_fraction",
                "must be finite and >= 0",
            )?;
            check_blur(vignette.blur_radius, "vignette.blur_radius")?;
        }

        check(
            (0.0..=0.5).contains(&self.mask.radius_fraction),
            "mask.radius_fraction",
            "must be in [0, 0.5]",
        )?;
        let corner_radius = self.mask.radius_fraction * self.width.min(self.height) as f32;
        check(
            self.mask.radius_fraction == 0.0 || corner_radius >= MIN_CORNER_RADIUS,
            "mask.radius_fraction",
            &format!("rounded corners need a radius of at least {MIN_CORNER_RADIUS}px"),
        )?;
        check_blur(self.mask.blur_radius, "mask.blur_radius")?;
        Ok(())
    }

    fn validate_sun(&self) -> Result<(), SceneError> {
        check(
            BLOOM_RINGS.contains(&self.sun.bloom.len()),
            "sun.bloom",
            "the bloom is made of 4 to 6 ellipses",
        )?;
        check(
            self.sun.disc.len() == DISC_RINGS,
            "sun.disc",
            "the disc is made of 3 concentric circles",
        )?;
        check_blur(self.sun.bloom_blur, "sun.bloom_blur")?;
        for ring in &self.sun.bloom {
            check_extent(ring.radius_x, "sun.bloom.radius_x")?;
            check_extent(ring.radius_y, "sun.bloom.radius_y")?;
        }
        for pair in self.sun.bloom.windows(2) {
            check(
                pair[1].radius_x < pair[0].radius_x && pair[1].radius_y < pair[0].radius_y,
                "sun.bloom",
                "rings must be listed from the largest to the smallest",
            )?;
            check(
                pair[1].color.a >= pair[0].color.a,
                "sun.bloom",
                "inner rings must not be more transparent than outer rings",
            )?;
        }
        for ring in &self.sun.disc {
            check_extent(ring.radius, "sun.disc.radius")?;
        }
        for pair in self.sun.disc.windows(2) {
            check(
                pair[1].radius < pair[0].radius,
                "sun.disc",
                "circles must be listed from the largest to the smallest",
            )?;
        }
        Ok(())
    }

    fn validate_treeline(&self) -> Result<(), SceneError> {
        let tree = &self.treeline;
        check(
            tree.valley_offset.is_finite(),
            "treeline.valley_offset",
            "must be finite",
        )?;
        for pine in tree.left.iter().chain(&tree.right) {
            check(pine.center_x.is_finite(), "treeline.center_x", "must be finite")?;
            check_extent(pine.height, "treeline.height")?;
            check_extent(pine.base_half_width, "treeline.base_half_width")?;
        }
        Ok(())
    }
}

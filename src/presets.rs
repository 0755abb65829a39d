//! The icon variants, all rendered by the same pipeline.

use crate::color::Color;
use crate::geometry::PineSpec;
use crate::gradient::{Gradient, GradientStop};
use crate::scene::{
    BloomRing, DashSpec, DiscRing, GrainSpec, MaskSpec, MistSpec, ReflectionSpec, RiderSpec,
    RoadSpec, SceneConfig, ShoulderSpec, SunSpec, TreelineSpec, VignetteSpec,
};

/// Edge length of the App Store icon slot.
pub const ICON_SIZE: u32 = 1024;

/// Grain seed shared by the presets so every run reproduces the same icon.
pub const DEFAULT_SEED: u64 = 0x5EED_2E01;

/// iOS-style corner radius relative to the icon size.
pub const IOS_CORNER_FRACTION: f32 = 0.2236;

fn stops(list: &[(f32, Color)]) -> Gradient {
    Gradient::from_stops(list.iter().map(|&(o, c)| GradientStop::new(o, c)).collect())
}

fn pine(center_x: f32, height: f32, base_half_width: f32) -> PineSpec {
    PineSpec::new(center_x, height, base_half_width)
}

/// Pines of the dawn and dusk forests, listed from the left edge inward.
fn forest_bank() -> Vec<PineSpec> {
    vec![
        pine(20.0, 192.0, 30.0),
        pine(65.0, 168.0, 28.0),
        pine(110.0, 210.0, 30.0),
        pine(150.0, 156.0, 26.0),
        pine(195.0, 186.0, 28.0),
        pine(235.0, 174.0, 27.0),
        pine(275.0, 144.0, 25.0),
        pine(315.0, 162.0, 26.0),
        pine(350.0, 120.0, 22.0),
        pine(385.0, 102.0, 19.0),
    ]
}

impl SceneConfig {
    /// Amber dawn over a deep green forest: the complete scene.
    pub fn zen_dawn() -> Self {
        let size = ICON_SIZE as f32;
        let horizon_y = (size * 0.55).floor();
        Self {
            name: "zen-dawn".to_string(),
            width: ICON_SIZE,
            height: ICON_SIZE,
            background: Color::rgb(26, 61, 26),
            matte: Color::WHITE,
            horizon_y,
            sky: stops(&[
                (0.0, Color::rgb(245, 166, 35)),
                (0.5, Color::rgb(232, 200, 140)),
                (1.0, Color::rgb(180, 205, 175)),
            ]),
            ground: stops(&[
                (0.0, Color::rgb(107, 158, 107)),
                (0.4, Color::rgb(45, 90, 45)),
                (1.0, Color::rgb(26, 61, 26)),
            ]),
            horizon_glow: Some(MistSpec {
                color: Color::rgb(200, 220, 195),
                height: (size * 0.08).floor(),
                peak_alpha: 120,
                blur_radius: 8.0,
            }),
            sun: SunSpec {
                bloom: vec![
                    BloomRing { radius_x: 520.0, radius_y: 240.0, color: Color::rgba(220, 140, 30, 12) },
                    BloomRing { radius_x: 360.0, radius_y: 180.0, color: Color::rgba(240, 160, 40, 30) },
                    BloomRing { radius_x: 220.0, radius_y: 120.0, color: Color::rgba(245, 180, 60, 60) },
                    BloomRing { radius_x: 120.0, radius_y: 70.0, color: Color::rgba(255, 200, 80, 100) },
                    BloomRing { radius_x: 60.0, radius_y: 35.0, color: Color::rgba(255, 220, 100, 160) },
                ],
                bloom_blur: 30.0,
                disc: vec![
                    DiscRing { radius: 44.0, color: Color::rgba(255, 214, 130, 200) },
                    DiscRing { radius: 30.0, color: Color::rgb(255, 232, 178) },
                    DiscRing { radius: 18.0, color: Color::rgb(255, 248, 230) },
                ],
            },
            treeline: TreelineSpec::symmetric(Color::rgb(20, 50, 20), 8.0, forest_bank(), size),
            road: RoadSpec {
                horizon_half_width: 16.0,
                bottom_half_width: 280.0,
                color: Color::rgb(42, 42, 42),
                shoulder: Some(ShoulderSpec {
                    top_width: 3.0,
                    bottom_width: 18.0,
                    color: Color::rgb(68, 65, 55),
                }),
                reflection: Some(ReflectionSpec {
                    width_fraction: 0.5,
                    color: Color::rgba(55, 55, 55, 60),
                }),
            },
            dashes: DashSpec {
                count: 10,
                fill_fraction: 0.45,
                width_fraction: 0.04,
                color: Color::rgb(212, 180, 131),
            },
            rider: Some(RiderSpec {
                base_y: (size * 0.78).floor(),
                scale: 38.0,
                color: Color::rgb(13, 31, 13),
                hub_color: Color::rgb(42, 42, 42),
            }),
            grain: Some(GrainSpec {
                y_start: 0,
                y_end: horizon_y as u32,
                strength: 5.0,
                seed: DEFAULT_SEED,
            }),
            vignette: Some(VignetteSpec {
                color: Color::BLACK,
                rings: 18,
                max_alpha: 110,
                exponent: 2.5,
                base_radius_fraction: 0.45,
                spread_fraction: 0.5,
                ring_width: (size * 0.03).floor(),
                blur_radius: 40.0,
            }),
            mask: MaskSpec {
                radius_fraction: IOS_CORNER_FRACTION,
                blur_radius: 1.0,
            },
        }
    }

    /// Deep red dusk with a banded sun and near-black forest.
    pub fn ember_dusk() -> Self {
        let size = ICON_SIZE as f32;
        let horizon_y = 480.0;
        let base = Self::zen_dawn();
        Self {
            name: "ember-dusk".to_string(),
            background: Color::rgb(5, 10, 2),
            horizon_y,
            sky: stops(&[
                (0.0, Color::rgb(0x1A, 0x00, 0x00)),
                (0.4, Color::rgb(0x6E, 0x15, 0x00)),
                (0.7, Color::rgb(0xE2, 0x54, 0x00)),
                (1.0, Color::rgb(0xFF, 0x9D, 0x00)),
            ]),
            ground: stops(&[
                (0.0, Color::rgb(0x0E, 0x21, 0x08)),
                (1.0, Color::rgb(0x05, 0x0A, 0x02)),
            ]),
            horizon_glow: Some(MistSpec {
                color: Color::rgb(255, 140, 40),
                height: 60.0,
                peak_alpha: 90,
                blur_radius: 10.0,
            }),
            sun: SunSpec {
                bloom: vec![
                    BloomRing { radius_x: 480.0, radius_y: 260.0, color: Color::rgba(255, 110, 20, 20) },
                    BloomRing { radius_x: 320.0, radius_y: 190.0, color: Color::rgba(255, 130, 30, 45) },
                    BloomRing { radius_x: 200.0, radius_y: 150.0, color: Color::rgba(255, 170, 50, 80) },
                    BloomRing { radius_x: 150.0, radius_y: 120.0, color: Color::rgba(255, 200, 80, 120) },
                ],
                bloom_blur: 28.0,
                disc: vec![
                    DiscRing { radius: 140.0, color: Color::rgb(0xE2, 0xC4, 0x31) },
                    DiscRing { radius: 100.0, color: Color::rgb(0xF5, 0xE7, 0x8C) },
                    DiscRing { radius: 60.0, color: Color::WHITE },
                ],
            },
            treeline: TreelineSpec::symmetric(Color::rgb(0x08, 0x21, 0x10), 6.0, forest_bank(), size),
            road: RoadSpec {
                horizon_half_width: 20.0,
                bottom_half_width: 368.0,
                color: Color::rgb(0x14, 0x14, 0x16),
                shoulder: Some(ShoulderSpec {
                    top_width: 2.0,
                    bottom_width: 20.0,
                    color: Color::rgb(0x0C, 0x0C, 0x0D),
                }),
                reflection: Some(ReflectionSpec {
                    width_fraction: 0.35,
                    color: Color::rgba(255, 140, 40, 28),
                }),
            },
            dashes: DashSpec {
                count: 6,
                fill_fraction: 0.4,
                width_fraction: 0.05,
                color: Color::rgb(0xC8, 0x97, 0x2F),
            },
            rider: None,
            grain: Some(GrainSpec {
                y_start: 0,
                y_end: horizon_y as u32,
                strength: 8.0,
                seed: DEFAULT_SEED,
            }),
            vignette: base.vignette.map(|v| VignetteSpec { max_alpha: 140, ..v }),
            ..base
        }
    }

    /// Soft pastel sunset over a light meadow.
    pub fn pastel_meadow() -> Self {
        let size = ICON_SIZE as f32;
        let horizon_y = 520.0;
        let base = Self::zen_dawn();
        let meadow = vec![
            pine(40.0, 120.0, 34.0),
            pine(110.0, 150.0, 36.0),
            pine(185.0, 110.0, 30.0),
            pine(250.0, 90.0, 26.0),
            pine(310.0, 70.0, 22.0),
            pine(365.0, 52.0, 18.0),
        ];
        Self {
            name: "pastel-meadow".to_string(),
            background: Color::rgb(0x88, 0xC2, 0x5B),
            horizon_y,
            sky: stops(&[
                (0.0, Color::rgb(0xFF, 0xB3, 0x9A)),
                (0.35, Color::rgb(0xFF, 0xCF, 0x9E)),
                (0.7, Color::rgb(0xFF, 0xE8, 0xA1)),
                (1.0, Color::rgb(0xFF, 0xF6, 0xD1)),
            ]),
            ground: stops(&[
                (0.0, Color::rgb(0xA5, 0xDB, 0x7A)),
                (1.0, Color::rgb(0x88, 0xC2, 0x5B)),
            ]),
            horizon_glow: Some(MistSpec {
                color: Color::rgb(0xFF, 0xF6, 0xD1),
                height: 70.0,
                peak_alpha: 110,
                blur_radius: 10.0,
            }),
            sun: SunSpec {
                bloom: vec![
                    BloomRing { radius_x: 300.0, radius_y: 200.0, color: Color::rgba(0xFF, 0xF1, 0xB8, 30) },
                    BloomRing { radius_x: 250.0, radius_y: 175.0, color: Color::rgba(0xFF, 0xF1, 0xB8, 50) },
                    BloomRing { radius_x: 200.0, radius_y: 150.0, color: Color::rgba(0xFF, 0xF1, 0xB8, 70) },
                    BloomRing { radius_x: 160.0, radius_y: 120.0, color: Color::rgba(0xFF, 0xFD, 0xF0, 120) },
                ],
                bloom_blur: 24.0,
                disc: vec![
                    DiscRing { radius: 90.0, color: Color::rgba(0xFF, 0xF1, 0xB8, 160) },
                    DiscRing { radius: 64.0, color: Color::rgb(0xFF, 0xFD, 0xF0) },
                    DiscRing { radius: 40.0, color: Color::WHITE },
                ],
            },
            treeline: TreelineSpec::symmetric(Color::rgb(0x4C, 0x8B, 0x47), 10.0, meadow, size),
            road: RoadSpec {
                horizon_half_width: 30.0,
                bottom_half_width: 300.0,
                color: Color::rgb(0xDC, 0xD0, 0xBD),
                shoulder: Some(ShoulderSpec {
                    top_width: 4.0,
                    bottom_width: 12.0,
                    color: Color::rgb(0xC5, 0xB6, 0xA3),
                }),
                reflection: Some(ReflectionSpec {
                    width_fraction: 0.4,
                    color: Color::rgba(0xFF, 0xF8, 0xE7, 40),
                }),
            },
            dashes: DashSpec {
                count: 8,
                fill_fraction: 0.33,
                width_fraction: 0.05,
                color: Color::rgba(0xFF, 0xF8, 0xE7, 230),
            },
            rider: None,
            grain: Some(GrainSpec {
                y_start: horizon_y as u32,
                y_end: ICON_SIZE,
                strength: 3.0,
                seed: DEFAULT_SEED,
            }),
            vignette: base.vignette.map(|v| VignetteSpec { max_alpha: 60, ..v }),
            ..base
        }
    }
}

//! Procedural renderer for the ZenRide app icon: a road running to a sunlit
//! horizon between two pine treelines, drawn on a square canvas and saved as
//! an opaque PNG.
//!
//! The same input always produces byte-identical output. Every random choice
//! goes through a seeded generator and no stage reads the clock.

pub mod atmosphere;
pub mod blur;
pub mod canvas;
pub mod color;
pub mod contents_json;
pub mod error;
pub mod geometry;
pub mod glow;
pub mod gradient;
pub mod mask;
pub mod noise;
pub mod pipeline;
pub mod presets;
pub mod scene;

pub use canvas::{Canvas, Layer};
pub use color::Color;
pub use error::SceneError;
pub use geometry::{PerspectiveParams, ScenePoint};
pub use gradient::{Gradient, GradientStop};
pub use pipeline::{generate_icon, render, render_canvas, write_png, Stage, STAGE_ORDER};
pub use presets::{DEFAULT_SEED, ICON_SIZE, IOS_CORNER_FRACTION};
pub use scene::SceneConfig;

//! Fixed-order rendering pipeline and PNG persistence.
//!
//! Later stages draw over earlier ones, so [`STAGE_ORDER`] defines the image:
//! reordering it changes the output.

use crate::atmosphere::{draw_horizon_glow, draw_vignette};
use crate::canvas::Canvas;
use crate::error::SceneError;
use crate::geometry::{rider_silhouette, PerspectiveParams, Side};
use crate::glow::{draw_bloom, draw_disc};
use crate::gradient::render_vertical_gradient;
use crate::mask::{apply_mask, rounded_mask};
use crate::noise::apply_grain;
use crate::scene::SceneConfig;
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage,
};
use std::{
    fs::create_dir_all,
    io::{BufWriter, Write},
    path::Path,
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Background,
    SkyGradient,
    GroundGradient,
    HorizonGlow,
    SunBloom,
    Treeline,
    Road,
    CenterReflection,
    CenterDashes,
    Rider,
    FilmGrain,
    Vignette,
    RoundedMask,
}

/// Every stage in the order it is applied to the canvas.
pub const STAGE_ORDER: [Stage; 13] = [
    Stage::Background,
    Stage::SkyGradient,
    Stage::GroundGradient,
    Stage::HorizonGlow,
    Stage::SunBloom,
    Stage::Treeline,
    Stage::Road,
    Stage::CenterReflection,
    Stage::CenterDashes,
    Stage::Rider,
    Stage::FilmGrain,
    Stage::Vignette,
    Stage::RoundedMask,
];

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Background => "background",
            Stage::SkyGradient => "sky gradient",
            Stage::GroundGradient => "ground gradient",
            Stage::HorizonGlow => "horizon glow",
            Stage::SunBloom => "sun bloom and disc",
            Stage::Treeline => "treeline silhouettes",
            Stage::Road => "road and shoulders",
            Stage::CenterReflection => "road center reflection",
            Stage::CenterDashes => "center dashes",
            Stage::Rider => "rider silhouette",
            Stage::FilmGrain => "film grain",
            Stage::Vignette => "vignette",
            Stage::RoundedMask => "rounded corners",
        }
    }
}

/// Run one stage against the canvas. Optional stages the scene leaves out
/// are no-ops.
fn apply_stage(stage: Stage, canvas: &mut Canvas, scene: &SceneConfig, view: &PerspectiveParams) {
    match stage {
        Stage::Background => canvas.clear(scene.background),
        Stage::SkyGradient => {
            render_vertical_gradient(canvas, 0, view.horizon_row(), &scene.sky);
        }
        Stage::GroundGradient => {
            render_vertical_gradient(canvas, view.horizon_row(), scene.height, &scene.ground);
        }
        Stage::HorizonGlow => {
            if let Some(mist) = &scene.horizon_glow {
                draw_horizon_glow(canvas, view.horizon_y, mist);
            }
        }
        Stage::SunBloom => {
            let center = view.vanishing_point();
            draw_bloom(canvas, center, &scene.sun.bloom, scene.sun.bloom_blur);
            draw_disc(canvas, center, &scene.sun.disc);
        }
        Stage::Treeline => {
            let tree = &scene.treeline;
            for (side, pines) in [(Side::Left, &tree.left), (Side::Right, &tree.right)] {
                let outline = view.treeline(side, pines, tree.valley_offset);
                debug!(?side, vertices = outline.len(), "treeline outline");
                canvas.fill_polygon(&outline, tree.color);
            }
        }
        Stage::Road => {
            canvas.fill_polygon(&view.road_trapezoid(), scene.road.color);
            if let Some(shoulder) = &scene.road.shoulder {
                for quad in view.shoulders(shoulder) {
                    canvas.fill_polygon(&quad, shoulder.color);
                }
            }
        }
        Stage::CenterReflection => {
            if let Some(reflection) = &scene.road.reflection {
                canvas.fill_polygon(&view.center_strip(reflection.width_fraction), reflection.color);
            }
        }
        Stage::CenterDashes => {
            let dashes = view.dashes(&scene.dashes);
            debug!(count = dashes.len(), "center dashes");
            for dash in &dashes {
                canvas.fill_polygon(&dash.corners, scene.dashes.color);
            }
        }
        Stage::Rider => {
            if let Some(rider) = &scene.rider {
                let shapes = rider_silhouette(view.vanishing_x, rider.base_y, rider.scale);
                for part in &shapes.body {
                    canvas.fill_polygon(part, rider.color);
                }
                for hub in &shapes.hubs {
                    canvas.fill_polygon(hub, rider.hub_color);
                }
            }
        }
        Stage::FilmGrain => {
            if let Some(grain) = &scene.grain {
                apply_grain(canvas, grain.y_start..grain.y_end, grain.strength, grain.seed);
            }
        }
        Stage::Vignette => {
            if let Some(vignette) = &scene.vignette {
                draw_vignette(canvas, vignette);
            }
        }
        Stage::RoundedMask => {
            let mask = rounded_mask(
                scene.width,
                scene.height,
                scene.mask.radius_fraction,
                scene.mask.blur_radius,
            );
            apply_mask(canvas, &mask);
        }
    }
}

/// Validate the scene and run every stage, returning the masked canvas
/// (alpha still present).
pub fn render_canvas(scene: &SceneConfig) -> Result<Canvas, SceneError> {
    scene.validate()?;
    let view = scene.perspective()?;
    let mut canvas = Canvas::transparent(scene.width, scene.height);
    for stage in STAGE_ORDER {
        info!("  Drawing {}...", stage.name());
        apply_stage(stage, &mut canvas, scene, &view);
    }
    Ok(canvas)
}

/// Render the scene and flatten it onto its opaque matte.
pub fn render(scene: &SceneConfig) -> Result<RgbImage, SceneError> {
    let canvas = render_canvas(scene)?;
    info!("  Flattening onto {}...", scene.matte);
    Ok(canvas.flatten(scene.matte))
}

/// Encode `image` as PNG and move it into place at `path`.
///
/// Missing parent directories are created. The PNG is written to a temporary
/// file next to the destination and renamed on success, so a failed run never
/// leaves a partial file behind.
pub fn write_png(image: &RgbImage, path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_dir_all(parent)
        .with_context(|| format!("Can't create output directory {}", parent.display()))?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Can't create a temporary file in {}", parent.display()))?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let encoder =
            PngEncoder::new_with_quality(&mut writer, CompressionType::Best, PngFilterType::Adaptive);
        encoder
            .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
            .with_context(|| format!("Failed to encode PNG for {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write PNG for {}", path.display()))?;
    }
    temp.persist(path)
        .with_context(|| format!("Failed to move PNG into place at {}", path.display()))?;
    debug!(path = %path.display(), "png persisted");
    Ok(())
}

/// Render `scene` and persist it at `output`.
pub fn generate_icon(scene: &SceneConfig, output: &Path) -> Result<()> {
    info!("Generating {} icon ({}x{})...", scene.name, scene.width, scene.height);
    let image = render(scene).context("Invalid scene configuration")?;
    write_png(&image, output)?;
    info!("✓ Generated {}", output.display());
    Ok(())
}

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};
use zenride_icon::{contents_json::write_contents_json, generate_icon, SceneConfig};

const DEFAULT_OUTPUT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/Resources/Assets.xcassets/AppIcon.appiconset/icon_1024.png"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Amber dawn over a deep green forest
    ZenDawn,
    /// Deep red dusk with a banded sun
    EmberDusk,
    /// Soft pastel sunset over a light meadow
    PastelMeadow,
}

impl Variant {
    fn scene(self) -> SceneConfig {
        match self {
            Variant::ZenDawn => SceneConfig::zen_dawn(),
            Variant::EmberDusk => SceneConfig::ember_dusk(),
            Variant::PastelMeadow => SceneConfig::pastel_meadow(),
        }
    }
}

#[derive(Debug, Parser)]
#[clap(
    name = "zenride-icon",
    about = "Render the ZenRide app icon: a road running to a sunlit horizon"
)]
struct Args {
    /// Built-in scene to render.
    #[clap(long, value_enum, default_value = "zen-dawn")]
    variant: Variant,

    /// Render a scene loaded from a JSON file instead of a built-in variant.
    #[clap(long, value_name = "FILE", conflicts_with = "variant")]
    scene: Option<PathBuf>,

    /// Print the resolved scene as JSON and exit without rendering.
    #[clap(long)]
    dump_scene: bool,

    /// Seed for the film grain. The default keeps the output reproducible.
    #[clap(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Where to write the PNG.
    #[clap(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also write the asset catalog Contents.json next to the PNG.
    #[clap(long)]
    contents_json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::from_level(level).into());
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_scene(args: &Args) -> Result<SceneConfig> {
    let scene = match &args.scene {
        Some(path) => SceneConfig::from_json_file(path)?,
        None => args.variant.scene(),
    };
    Ok(match args.seed {
        Some(seed) => scene.with_seed(seed),
        None => scene,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let scene = resolve_scene(&args)?;
    if args.dump_scene {
        println!("{}", scene.to_json_pretty()?);
        return Ok(());
    }

    generate_icon(&scene, &args.output)?;

    if args.contents_json {
        let dir = match args.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let filename = args
            .output
            .file_name()
            .context("Output path has no file name")?
            .to_string_lossy();
        write_contents_json(dir, &filename, scene.width)?;
        info!("✓ Wrote {}", dir.join("Contents.json").display());
    }
    Ok(())
}

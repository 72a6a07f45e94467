//! `lumen` - render a sphere scene to PPM (and optionally PNG).
//!
//! Run with: cargo run --release -- --width 400 --samples 50 --out render

mod output;
mod scene_file;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render, Camera, RenderConfig};

use crate::output::{save_png, save_ppm, PpmFormat};
use crate::scene_file::{image_height, SceneDescription};

/// Physically based sphere path tracer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image width in pixels; height follows the camera aspect ratio
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Samples per pixel [default: 20]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    samples: Option<u32>,

    /// Maximum ray bounce depth [default: 15]
    #[arg(long)]
    depth: Option<u32>,

    /// Output file prefix (writes <out>.ppm, and <out>.png with --png)
    #[arg(long, default_value = "render")]
    out: String,

    /// Seed for the random streams; equal seeds give identical images
    #[arg(long)]
    seed: Option<u64>,

    /// JSON scene description; the built-in scene is used when omitted
    #[arg(long)]
    scene: Option<PathBuf>,

    /// PPM encoding
    #[arg(long, value_enum, default_value_t = PpmFormat::Ascii)]
    format: PpmFormat,

    /// Also write a PNG next to the PPM
    #[arg(long)]
    png: bool,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
}

const DEFAULT_SAMPLES: u32 = 20;
const DEFAULT_DEPTH: u32 = 15;

impl Args {
    /// Merge command-line overrides into the scene's render settings.
    fn render_config(&self, from_scene: Option<RenderConfig>) -> RenderConfig {
        let from_file = from_scene.is_some();
        let mut config = from_scene.unwrap_or_default();

        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        } else if !from_file {
            config.samples_per_pixel = DEFAULT_SAMPLES;
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        } else if !from_file {
            config.max_depth = DEFAULT_DEPTH;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let description = match &args.scene {
        Some(path) => SceneDescription::load(path)?,
        None => SceneDescription::builtin(),
    };

    let config = args.render_config(description.render);
    description.camera.validate()?;
    let camera = Camera::from_settings(description.camera);
    let width = args.width;
    let height = image_height(width, camera.aspect_ratio());
    config.validate(width, height)?;

    let start = Instant::now();
    let image = render(&description.scene, &camera, width, height, &config);
    let elapsed = start.elapsed();

    let ppm_path = PathBuf::from(format!("{}.ppm", args.out));
    save_ppm(&ppm_path, &image, args.format)?;
    println!("Done. Wrote {} ({}x{}) in {:?}", ppm_path.display(), width, height, elapsed);

    if args.png {
        let png_path = PathBuf::from(format!("{}.png", args.out));
        save_png(&png_path, &image)?;
        println!("Also wrote {}", png_path.display());
    }

    Ok(())
}

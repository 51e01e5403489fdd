mod app_arguments;
mod scene;

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render, save_ppm, RenderSettings};

use crate::app_arguments::AppArguments;

fn main() -> Result<()> {
    env_logger::init();

    let args = AppArguments::parse();

    let mut settings = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Read settings file {}", path.display()))?;
            serde_json::from_str::<RenderSettings>(&text)
                .with_context(|| format!("Parse settings file {}", path.display()))?
        }
        None => RenderSettings::default(),
    };
    args.apply(&mut settings);

    // Setup errors surface here, before any pixel is traced
    let camera = settings.camera().context("Invalid camera settings")?;
    settings
        .render
        .validate()
        .context("Invalid render settings")?;

    let start = Instant::now();
    let world = scene::build_scene();
    log::info!("Scene built in {:?}", start.elapsed());

    let image = render(&camera, &world, &settings.render).context("Render failed")?;

    save_ppm(&args.output, &image)
        .with_context(|| format!("Write image {}", args.output.display()))?;

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use glint_renderer::RenderSettings;

/// Render the reference sphere scene to a plain-text PPM image.
#[derive(Parser, Debug)]
#[command(name = "glint", version)]
pub struct AppArguments {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub vfov: Option<f32>,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AppArguments {
    /// Apply the flags that were given on top of `settings`.
    pub fn apply(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.camera.width = width;
        }
        if let Some(height) = self.height {
            settings.camera.height = height;
        }
        if let Some(vfov) = self.vfov {
            settings.camera.vfov = vfov;
        }
        if let Some(samples) = self.samples {
            settings.render.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.render.max_depth = max_depth;
        }
        if let Some(seed) = self.seed {
            settings.render.seed = seed;
        }
    }
}

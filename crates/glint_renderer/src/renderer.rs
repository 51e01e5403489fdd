//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce depth bound
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction of the averaged result
//!
//! Rendering is single threaded and draws from one seeded generator, so a
//! given scene, camera and seed always produce the same image.

use std::time::Instant;

use crate::camera::CameraError;
use crate::{Camera, Color, Hittable, Ray};
use glint_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hits closer than this to the ray origin are ignored, which keeps a
/// scattered ray from re-hitting the surface it left.
pub const T_MIN: f32 = 1e-4;

/// Sky color straight down (and at the horizon's lower half).
const SKY_WHITE: Color = Color::new(1.0, 1.0, 1.0);
/// Sky color straight up.
const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Errors that stop a render before any pixel is traced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Camera must be initialized before rendering")]
    NotInitialized,

    #[error("samples_per_pixel must be at least 1")]
    NoSamples,
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for the render's random generator
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 10,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Each bounce multiplies in the material's attenuation. Reaching
/// `depth == 0` or being absorbed contributes black; escaping to the sky
/// is the only source of light.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical white-to-blue sky gradient.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * SKY_WHITE + a * SKY_BLUE
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct a linear color and clamp each channel to [0, 1].
pub fn gamma_correct(color: Color) -> Color {
    let intensity = Interval::new(0.0, 1.0);
    Color::new(
        intensity.clamp(linear_to_gamma(color.x)),
        intensity.clamp(linear_to_gamma(color.y)),
        intensity.clamp(linear_to_gamma(color.z)),
    )
}

/// Render a single pixel with multi-sampling.
///
/// Returns the linear mean of the samples, before gamma.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Row-major image of gamma-corrected colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Image {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// One row of pixels, left to right.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        // An image with zero width has no pixels, so the chunk size only
        // needs to be non-zero
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Copy out as a `[height][width]` array.
    pub fn to_rows(&self) -> Vec<Vec<Color>> {
        self.rows().map(<[Color]>::to_vec).collect()
    }

    /// Mean color over all pixels.
    pub fn average(&self) -> Color {
        if self.pixels.is_empty() {
            return Color::ZERO;
        }
        self.pixels.iter().copied().sum::<Color>() / self.pixels.len() as f32
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene with a generator seeded from `config.seed`.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> RenderResult<Image> {
    log::info!("Seeding sampler with {}", config.seed);
    let mut rng = StdRng::seed_from_u64(config.seed);
    render_with_rng(camera, world, config, &mut rng)
}

/// Render the entire scene drawing from `rng`.
///
/// Pixels are traced top to bottom, left to right, samples in order.
pub fn render_with_rng(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<Image> {
    if !camera.is_initialized() {
        return Err(RenderError::NotInitialized);
    }
    config.validate()?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        camera.image_width(),
        camera.image_height(),
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let mut image = Image::new(camera.image_width(), camera.image_height());

    for y in 0..camera.image_height() {
        for x in 0..camera.image_width() {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, gamma_correct(color));
        }
        log::trace!("Scanline {}/{} done", y + 1, camera.image_height());
    }

    log::info!("Rendered in {:?}", start.elapsed());

    Ok(image)
}

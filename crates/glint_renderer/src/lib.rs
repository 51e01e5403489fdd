//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials, lit by a sky gradient.
//!
//! The scene is any [`Hittable`], usually a [`HittableList`] of [`Sphere`]s.
//! [`render`] produces a gamma-corrected [`Image`]; [`save_ppm`] writes it out.

mod camera;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod settings;
mod sphere;

pub use camera::{Camera, CameraError, CameraResult, CameraSettings};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use ppm::{
    color_to_rgb8, quantize, read_ppm, save_ppm, write_image, write_ppm, PpmError, PpmImage,
    PpmResult,
};
pub use renderer::{
    gamma_correct, linear_to_gamma, ray_color, render, render_pixel, render_with_rng,
    sky_gradient, Image, RenderConfig, RenderError, RenderResult, T_MIN,
};
pub use settings::RenderSettings;
pub use sphere::Sphere;

/// Re-export the math types from glint_math
pub use glint_math::{Color, Interval, Ray, Vec3};

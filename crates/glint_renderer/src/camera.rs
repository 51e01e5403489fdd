//! Camera for ray generation.

use crate::Ray;
use glint_math::{gen_f32, Vec3, Vec3Ext};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from camera setup. All of them are caught before rendering starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("look_from and look_at must differ")]
    CoincidentLookAt,

    #[error("Up vector is parallel to the view direction")]
    DegenerateBasis,

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),
}

/// Result type for camera operations.
pub type CameraResult<T> = Result<T, CameraError>;

/// Serializable camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            vfov: 20.0,
            look_from: Vec3::new(-2.0, 2.0, 1.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
        }
    }
}

/// Camera for generating rays into the scene.
#[derive(Clone, Debug)]
pub struct Camera {
    // Image settings
    image_width: u32,
    image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    vfov: f32, // Vertical field of view in degrees

    // Cached computed values (set by initialize())
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    initialized: bool,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::from_settings(&CameraSettings::default())
    }

    /// Create a camera from serialized settings. Still needs `initialize()`.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            image_width: settings.width,
            image_height: settings.height,
            look_from: settings.look_from,
            look_at: settings.look_at,
            vup: settings.vup,
            vfov: settings.vfov,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            initialized: false,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self.initialized = false;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.initialized = false;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self.initialized = false;
        self
    }

    /// Validate the parameters and compute the viewport.
    ///
    /// Must succeed before generating rays.
    pub fn initialize(&mut self) -> CameraResult<()> {
        self.initialized = false;

        if self.image_width == 0 || self.image_height == 0 {
            return Err(CameraError::InvalidDimensions {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }

        let view = self.look_from - self.look_at;
        let focal_length = view.length();
        self.w = view.try_unit().ok_or(CameraError::CoincidentLookAt)?;
        self.u = self
            .vup
            .cross(self.w)
            .try_unit()
            .ok_or(CameraError::DegenerateBasis)?;
        self.v = self.w.cross(self.u);
        self.center = self.look_from;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * focal_length;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate viewport vectors
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - focal_length * self.w - viewport_u / 2.0 - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
        self.initialized = true;

        log::debug!(
            "Camera initialized: {}x{}, vfov={}, focal_length={:.3}, basis u={:?} v={:?} w={:?}",
            self.image_width,
            self.image_height,
            self.vfov,
            focal_length,
            self.u,
            self.v,
            self.w
        );

        Ok(())
    }

    /// True once `initialize()` has succeeded for the current parameters.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Generate a ray for column `x`, row `y` with random sub-pixel jitter.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((x as f32) + offset.x) * self.pixel_delta_u
            + ((y as f32) + offset.y) * self.pixel_delta_v;

        Ray::new(self.center, pixel_sample - self.center)
    }

    /// Ray through the exact center of pixel (x, y).
    pub fn center_ray(&self, x: u32, y: u32) -> Ray {
        let pixel_center =
            self.pixel00_loc + (x as f32) * self.pixel_delta_u + (y as f32) * self.pixel_delta_v;
        Ray::new(self.center, pixel_center - self.center)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the square [-0.5, 0.5) x [-0.5, 0.5).
///
/// The two offsets are drawn independently.
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simple_camera() -> Camera {
        Camera::new()
            .with_resolution(100, 100)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_vfov(90.0)
    }

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_resolution(800, 600)
            .with_position(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
            .with_vfov(90.0);

        assert!(!camera.is_initialized());
        camera.initialize().unwrap();
        assert!(camera.is_initialized());

        assert_eq!(camera.center, Vec3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 0.001);
        assert!((camera.v - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_camera_ray_direction() {
        let mut camera = simple_camera();
        camera.initialize().unwrap();

        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point roughly towards -Z
        let ray = camera.get_ray(50, 50, &mut rng);
        assert!(ray.direction().z < 0.0);
        assert_eq!(ray.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_pixel_grid_orientation() {
        let mut camera = simple_camera();
        camera.initialize().unwrap();

        // Row 0 is the top of the image, column 0 the left edge
        let top_left = camera.center_ray(0, 0).direction();
        let bottom_right = camera.center_ray(99, 99).direction();
        assert!(top_left.x < 0.0 && top_left.y > 0.0);
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);

        // 90 degree vfov at focal length 1 spans [-1, 1]
        let edge = 1.0 - 1.0 / 100.0;
        assert!((top_left - Vec3::new(-edge, edge, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_jitter_stays_within_pixel() {
        let mut camera = simple_camera();
        camera.initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let center = camera.center_ray(10, 20).direction();
        let half_pixel = 1.0 / 100.0;
        for _ in 0..500 {
            let d = camera.get_ray(10, 20, &mut rng).direction();
            assert!((d.x - center.x).abs() <= half_pixel + 1e-6);
            assert!((d.y - center.y).abs() <= half_pixel + 1e-6);
            assert_eq!(d.z, -1.0);
        }
    }

    #[test]
    fn test_focal_length_from_look_at() {
        let mut camera = Camera::new()
            .with_resolution(10, 10)
            .with_position(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_vfov(90.0);
        camera.initialize().unwrap();

        // Viewport sits on the look_at plane
        let ray = camera.center_ray(5, 5);
        assert!((ray.at(1.0).z - 0.0).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let mut camera = simple_camera().with_resolution(0, 10);
        assert_eq!(
            camera.initialize(),
            Err(CameraError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert!(!camera.is_initialized());
    }

    #[test]
    fn test_resize_requires_reinitialize() {
        let mut camera = simple_camera();
        camera.initialize().unwrap();

        let mut camera = camera.with_resolution(40, 10);
        assert!(!camera.is_initialized());
        camera.initialize().unwrap();
        assert_eq!((camera.image_width(), camera.image_height()), (40, 10));

        let mut camera = camera.with_resolution(0, 10);
        assert!(!camera.is_initialized());
        assert!(camera.initialize().is_err());
        assert!(!camera.is_initialized());
    }

    #[test]
    fn test_rejects_coincident_look_at() {
        let mut camera = simple_camera().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(camera.initialize(), Err(CameraError::CoincidentLookAt));
    }

    #[test]
    fn test_rejects_parallel_up_vector() {
        let mut camera =
            simple_camera().with_position(Vec3::ZERO, Vec3::new(0.0, -5.0, 0.0), Vec3::Y);
        assert_eq!(camera.initialize(), Err(CameraError::DegenerateBasis));
    }

    #[test]
    fn test_rejects_bad_fov() {
        for vfov in [0.0, -10.0, 180.0, f32::NAN] {
            let mut camera = simple_camera().with_vfov(vfov);
            assert!(matches!(
                camera.initialize(),
                Err(CameraError::InvalidFieldOfView(_))
            ));
        }
    }

    #[test]
    fn test_settings_defaults_match_reference_shot() {
        let settings = CameraSettings::default();
        assert_eq!((settings.width, settings.height), (800, 400));
        assert_eq!(settings.vfov, 20.0);

        let mut camera = Camera::from_settings(&settings);
        camera.initialize().unwrap();
        assert_eq!(camera.center(), Vec3::new(-2.0, 2.0, 1.0));
    }
}

//! Glint math primitives.
//!
//! `Vec3` comes from glam and doubles as point, direction and color.
//! This crate adds the scalar [`Interval`], the [`Ray`], the vector
//! helpers the scattering model needs, and explicitly seeded sampling.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod random;
mod vec;

pub use interval::Interval;
pub use random::{gen_f32, gen_range_f32, random_on_hemisphere, random_unit_vector, random_vec3};
pub use ray::Ray;
pub use vec::Vec3Ext;

/// RGB color, components nominally in [0, 1].
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_color_is_vec3() {
        let c: Color = Color::new(0.5, 0.7, 1.0);
        assert_eq!(c * Color::ONE, c);
    }
}

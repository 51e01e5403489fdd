//! Scattering helpers on top of glam's `Vec3`.

use crate::Vec3;

/// Components below this magnitude count as zero.
const NEAR_ZERO: f32 = 1e-8;

/// Vector operations used by the scattering model.
pub trait Vec3Ext {
    /// True if every component's magnitude is below 1e-8.
    fn is_near_zero(&self) -> bool;

    /// Mirror this vector about the normal `n`: `v - 2 (v . n) n`.
    fn reflected(&self, n: Vec3) -> Vec3;

    /// Refract this unit vector through a surface with unit normal `n`.
    ///
    /// `eta_ratio` is the ratio of indices of refraction (incident / transmitted).
    /// Callers check for total internal reflection before calling.
    fn refracted(&self, n: Vec3, eta_ratio: f32) -> Vec3;

    /// Normalize, or `None` when the vector has zero or non-finite length.
    fn try_unit(&self) -> Option<Vec3>;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn is_near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO && self.y.abs() < NEAR_ZERO && self.z.abs() < NEAR_ZERO
    }

    #[inline]
    fn reflected(&self, n: Vec3) -> Vec3 {
        *self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refracted(&self, n: Vec3, eta_ratio: f32) -> Vec3 {
        let cos_theta = (-*self).dot(n).min(1.0);
        let r_out_perp = eta_ratio * (*self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }

    #[inline]
    fn try_unit(&self) -> Option<Vec3> {
        self.try_normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.is_near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 5e-9).is_near_zero());
        assert!(!Vec3::new(1e-9, 1e-7, 0.0).is_near_zero());
        assert!(!Vec3::X.is_near_zero());
    }

    #[test]
    fn test_reflect_about_normal() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = v.reflected(Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_reflect_preserves_length() {
        let v = Vec3::new(0.3, -0.8, 0.52).normalize();
        let n = Vec3::new(0.1, 0.9, -0.2).normalize();
        assert!((v.reflected(n).length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_refract_straight_through() {
        // Head-on incidence does not bend regardless of the ratio
        let v = Vec3::NEG_Y;
        let r = v.refracted(Vec3::Y, 1.0 / 1.5);
        assert!((r - Vec3::NEG_Y).length() < EPS);
    }

    #[test]
    fn test_refract_obeys_snell() {
        let eta = 1.0 / 1.5;
        let v = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = v.refracted(Vec3::Y, eta);

        let sin_in = v.x;
        let sin_out = r.normalize().x;
        assert!((sin_out - eta * sin_in).abs() < EPS);
        assert!((r.length() - 1.0).abs() < EPS);
        assert!(r.y < 0.0);
    }

    #[test]
    fn test_try_unit() {
        assert!(Vec3::ZERO.try_unit().is_none());
        assert!(Vec3::splat(f32::NAN).try_unit().is_none());

        let u = Vec3::new(3.0, 0.0, 4.0).try_unit().unwrap();
        assert!((u - Vec3::new(0.6, 0.0, 0.8)).length() < EPS);
    }
}

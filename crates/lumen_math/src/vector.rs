//! Optics helpers on top of `Vec3`.

use crate::Vec3;

/// Threshold below which every component counts as zero.
const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Returns true if the vector is close to zero in all dimensions.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Reflect a vector about a unit normal.
///
/// r = v - 2 (v . n) n
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit direction through a surface with unit normal `n`.
///
/// `n` must point against `uv` and `etai_over_etat` is the ratio of the
/// refractive index on the incident side to the one on the far side.
/// Callers check for total internal reflection first; the radicand is
/// clamped at zero so a grazing ray never produces NaN.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).max(0.0).sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1e-3, 0.0)));
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_reflect_preserves_length() {
        let v = Vec3::new(0.3, -0.8, 0.52).normalize();
        let n = Vec3::new(0.1, 1.0, -0.2).normalize();
        assert!((reflect(v, n).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_refract_normal_incidence_passes_straight() {
        let r = refract(Vec3::NEG_Y, Vec3::Y, 1.0 / 1.5);
        assert!((r - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_refract_obeys_snell() {
        let ratio = 1.0 / 1.5;
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, Vec3::Y, ratio);

        let sin_in = uv.x;
        let sin_out = r.x;
        assert!((sin_out - ratio * sin_in).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(r.y < 0.0);
    }

    #[test]
    fn test_refract_grazing_is_finite() {
        // Beyond the critical angle the radicand is negative.
        let uv = Vec3::new(0.9, -0.1, 0.0).normalize();
        let r = refract(uv, Vec3::Y, 1.5);
        assert!(r.is_finite());
    }
}

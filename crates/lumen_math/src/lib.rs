//! Math types for the lumen path tracer.
//!
//! Vectors come straight from glam; this crate adds the ray, the
//! parameter interval used by intersection queries, the optics helpers
//! (reflection and refraction) and the random sampling routines.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub mod sample;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use sample::{gen_f32, random_in_pixel_square, random_in_unit_sphere, random_unit_vector};
pub use vector::{near_zero, reflect, refract};

/// Colors share the vector type; components are linear RGB radiance.
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_color_blend_is_componentwise() {
        let albedo = Color::new(0.5, 0.25, 1.0);
        let light = Color::new(2.0, 4.0, 0.5);
        assert_eq!(albedo * light, Color::new(1.0, 1.0, 0.5));
    }
}

//! Random sampling helpers.
//!
//! Every helper takes the generator explicitly so each render worker can
//! own an independent, seedable stream.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform random value in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform random value in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Uniform random point strictly inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
        );
        let len_sq = p.length_squared();
        if len_sq > 1e-12 && len_sq < 1.0 {
            return p;
        }
    }
}

/// Uniform random direction on the unit sphere.
///
/// Adding this to a unit surface normal gives a direction whose density is
/// proportional to the cosine of its angle with that normal, which is how
/// diffuse scattering importance-samples the cosine term.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let p = random_in_unit_sphere(rng);
    p / p.length()
}

/// Random offset in the square [0, 1) x [0, 1), used to jitter samples
/// inside a pixel footprint.
#[inline]
pub fn random_in_pixel_square(rng: &mut dyn RngCore) -> (f32, f32) {
    (gen_f32(rng), gen_f32(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gen_f32_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_random_in_unit_sphere() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_normal_offset_is_cosine_weighted() {
        // For a cosine-weighted lobe around +Y, E[cos theta] = 2/3.
        let mut rng = StdRng::seed_from_u64(1234);
        let n = 20_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let d = (Vec3::Y + random_unit_vector(&mut rng)).normalize_or_zero();
            sum += d.y;
        }
        let mean = sum / n as f32;
        assert!((mean - 2.0 / 3.0).abs() < 0.02, "mean cosine was {mean}");
    }

    #[test]
    fn test_pixel_square_offsets() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (dx, dy) = random_in_pixel_square(&mut rng);
            assert!((0.0..1.0).contains(&dx));
            assert!((0.0..1.0).contains(&dy));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..16 {
            assert_eq!(random_unit_vector(&mut a), random_unit_vector(&mut b));
        }
    }
}

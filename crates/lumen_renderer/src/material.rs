//! Surface scattering models.
//!
//! The set of materials is closed: a sphere carries one `Material`, and
//! `Material::scatter` dispatches to the matching model.

use crate::hittable::HitRecord;
use lumen_math::{gen_f32, near_zero, random_unit_vector, reflect, refract, Color, Ray};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Color multiplier applied to light returning along `scattered`
    pub attenuation: Color,
    /// The continuation ray, or `None` if the path is absorbed
    pub scattered: Option<Ray>,
}

impl ScatterResult {
    fn scattered(attenuation: Color, ray: Ray) -> Self {
        Self {
            attenuation,
            scattered: Some(ray),
        }
    }

    fn absorbed(attenuation: Color) -> Self {
        Self {
            attenuation,
            scattered: None,
        }
    }
}

/// The materials a sphere can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian(Lambertian::new(albedo))
    }

    /// Metal with the given albedo and roughness.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal(Metal::new(albedo, fuzz))
    }

    /// Clear dielectric with the given index of refraction.
    pub fn dielectric(ior: f32) -> Self {
        Self::Dielectric(Dielectric::new(ior))
    }

    /// Scatter an incoming ray at a hit point.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> ScatterResult {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }

    /// Reflectance used to weight direct point-light illumination.
    ///
    /// Only diffuse surfaces respond to point lights; metal and glass carry
    /// light through their scattered ray alone.
    pub fn direct_response(&self) -> Option<Color> {
        match self {
            Material::Lambertian(m) => Some(m.albedo),
            Material::Metal(_) | Material::Dielectric(_) => None,
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lambertian {
    pub albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    /// Scatter along the normal offset by a random unit vector, which is
    /// cosine-distributed about the normal. Diffuse surfaces never absorb.
    pub fn scatter(&self, _ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> ScatterResult {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        ScatterResult::scattered(self.albedo, Ray::new(rec.p, scatter_direction))
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metal {
    pub albedo: Color,
    /// Roughness, 0.0 = perfect mirror, 1.0 = very rough
    #[serde(default)]
    pub fuzz: f32,
}

impl Metal {
    /// Create a new Metal material. `fuzz` is clamped to [0, 1].
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Mirror reflection perturbed by `fuzz`. Rays pushed below the surface
    /// are absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> ScatterResult {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        if scattered_dir.dot(rec.normal) > 0.0 {
            ScatterResult::scattered(self.albedo, Ray::new(rec.p, scattered_dir))
        } else {
            ScatterResult::absorbed(self.albedo)
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dielectric {
    /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for Fresnel reflectance.
    pub fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
        let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    /// Reflect or refract. Dielectrics never absorb, so attenuation is white.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> ScatterResult {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || gen_f32(rng) < Self::reflectance(cos_theta, refraction_ratio)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        ScatterResult::scattered(Color::ONE, Ray::new(rec.p, direction))
    }
}

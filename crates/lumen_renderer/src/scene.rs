//! Scene container: spheres plus point lights.
//!
//! The scene is built once and then only read during rendering, so it is
//! shared by reference across render workers without synchronisation.

use crate::error::{SceneError, SceneResult};
use crate::hittable::{HitRecord, Hittable};
use crate::{Material, PointLight, Sphere};
use lumen_math::{Color, Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Lower bound on accepted hit parameters, suppresses self-intersection
/// of rays spawned on a surface.
pub const T_MIN: f32 = 0.001;

/// Gap kept between a shadow ray's far end and the light position.
pub const SHADOW_EPSILON: f32 = 0.001;

/// An ordered list of spheres and a list of point lights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    spheres: Vec<Sphere>,
    #[serde(default)]
    lights: Vec<PointLight>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Add a point light to the scene.
    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene has no geometry.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Nearest intersection along `ray` beyond `T_MIN`.
    pub fn closest_hit(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.hit(ray, Interval::new(T_MIN, f32::INFINITY))
    }

    /// Returns true if anything lies between `point` and the light.
    pub fn shadow_blocked(&self, point: Vec3, light: &PointLight) -> bool {
        let to_light = light.position - point;
        let distance = to_light.length();
        let shadow_ray = Ray::new(point, to_light / distance);
        let range = Interval::new(T_MIN, distance - SHADOW_EPSILON);

        self.spheres
            .iter()
            .any(|sphere| sphere.hit(&shadow_ray, range).is_some())
    }

    /// Check the scene for values that would make rendering meaningless.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            let radius = sphere.radius();
            if !(radius.is_finite() && radius > 0.0) {
                return Err(SceneError::InvalidRadius { index, radius });
            }

            match *sphere.material() {
                Material::Lambertian(m) => {
                    if !valid_color(m.albedo) {
                        return Err(SceneError::InvalidAlbedo { index });
                    }
                }
                Material::Metal(m) => {
                    if !valid_color(m.albedo) {
                        return Err(SceneError::InvalidAlbedo { index });
                    }
                    if !Interval::UNIT.contains(m.fuzz) {
                        return Err(SceneError::InvalidFuzz { index, fuzz: m.fuzz });
                    }
                }
                Material::Dielectric(m) => {
                    if !(m.ior.is_finite() && m.ior > 0.0) {
                        return Err(SceneError::InvalidRefractiveIndex { index, ior: m.ior });
                    }
                }
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            if !light.position.is_finite() || !valid_color(light.intensity) {
                return Err(SceneError::InvalidLight { index });
            }
        }

        Ok(())
    }
}

fn valid_color(c: Color) -> bool {
    c.is_finite() && c.min_element() >= 0.0
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
        let mut closest_so_far = ray_t.max;

        for sphere in &self.spheres {
            if let Some(rec) = sphere.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> Material {
        Material::lambertian(Color::splat(0.5))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.closest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none());
    }

    #[test]
    fn test_closest_hit_picks_nearest_regardless_of_order() {
        let far = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, Material::dielectric(1.5));
        let near = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey());

        let mut scene = Scene::new();
        scene.add_sphere(far);
        scene.add_sphere(near);
        assert_eq!(scene.len(), 2);

        let rec = scene.closest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert_eq!(*rec.material, grey());
    }

    #[test]
    fn test_shadow_blocked_by_occluder() {
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5, grey()));
        let light = PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE);

        assert!(scene.shadow_blocked(Vec3::ZERO, &light));
        assert!(!scene.shadow_blocked(Vec3::new(3.0, 0.0, 0.0), &light));
    }

    #[test]
    fn test_occluder_behind_light_does_not_shadow() {
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, 8.0, 0.0), 1.0, grey()));
        let light = PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE);

        assert!(!scene.shadow_blocked(Vec3::ZERO, &light));
    }

    #[test]
    fn test_surface_point_does_not_shadow_itself() {
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, grey()));
        let light = PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE);

        assert!(!scene.shadow_blocked(Vec3::Y, &light));
        assert!(scene.shadow_blocked(Vec3::NEG_Y, &light));
    }

    #[test]
    fn test_validate() {
        let mut scene = Scene::new();
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, grey()));
        assert_eq!(scene.validate(), Ok(()));

        scene.add_sphere(Sphere::new(Vec3::ZERO, -0.45, Material::dielectric(1.5)));
        assert_eq!(
            scene.validate(),
            Err(SceneError::InvalidRadius { index: 1, radius: -0.45 })
        );

        let mut glass = Scene::new();
        glass.add_sphere(Sphere::new(Vec3::ZERO, 1.0, Material::dielectric(0.0)));
        assert!(matches!(
            glass.validate(),
            Err(SceneError::InvalidRefractiveIndex { index: 0, .. })
        ));

        let mut lit = Scene::new();
        lit.add_light(PointLight::new(Vec3::ZERO, Color::new(1.0, -1.0, 1.0)));
        assert_eq!(lit.validate(), Err(SceneError::InvalidLight { index: 0 }));
    }

    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "spheres": [
                { "center": [0.0, -100.5, -1.0], "radius": 100.0,
                  "material": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] } },
                { "center": [-1.0, 0.0, -1.0], "radius": 0.5,
                  "material": { "type": "dielectric", "ior": 1.5 } }
            ],
            "lights": [ { "position": [5.0, 5.0, -2.0], "intensity": [6.0, 6.0, 6.0] } ]
        }"#;

        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.spheres()[1].material(), &Material::dielectric(1.5));
        assert_eq!(scene.validate(), Ok(()));
    }
}

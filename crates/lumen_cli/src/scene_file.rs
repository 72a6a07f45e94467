//! Scene descriptions: the built-in demo scene and JSON scene files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lumen_renderer::{
    CameraSettings, Color, Material, PointLight, RenderConfig, Scene, Sphere, Vec3,
};
use serde::{Deserialize, Serialize};

/// Aspect ratio of the built-in scene.
pub const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Everything needed to render: geometry, lights, camera and optional
/// render settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraSettings,
    #[serde(default)]
    pub render: Option<RenderConfig>,
    #[serde(flatten)]
    pub scene: Scene,
}

impl SceneDescription {
    /// Parse a JSON scene description.
    pub fn from_json(json: &str) -> Result<Self> {
        let description: SceneDescription =
            serde_json::from_str(json).context("Invalid scene description")?;
        description.camera.validate()?;
        description.scene.validate()?;
        Ok(description)
    }

    /// Load and validate a JSON scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        let description = Self::from_json(&json)
            .with_context(|| format!("Failed to load scene file {}", path.display()))?;

        log::info!(
            "Loaded {} spheres and {} lights from {}",
            description.scene.len(),
            description.scene.lights().len(),
            path.display()
        );
        Ok(description)
    }

    /// Ground, a diffuse ball, a glass ball and a brass ball under one light.
    pub fn builtin() -> Self {
        let mut scene = Scene::new();

        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Material::lambertian(Color::new(0.8, 0.8, 0.0)),
        ));
        scene.add_sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Color::new(0.1, 0.2, 0.5)),
        ));
        scene.add_sphere(Sphere::new(
            Vec3::new(-1.0, 0.0, -1.0),
            0.5,
            Material::dielectric(1.5),
        ));
        scene.add_sphere(Sphere::new(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            Material::metal(Color::new(0.8, 0.6, 0.2), 0.0),
        ));

        scene.add_light(PointLight::new(Vec3::new(5.0, 5.0, -2.0), Color::splat(6.0)));

        Self {
            camera: CameraSettings {
                look_from: Vec3::new(3.0, 3.0, 2.0),
                look_at: Vec3::new(0.0, 0.0, -1.0),
                vup: Vec3::Y,
                vfov: 20.0,
                aspect_ratio: DEFAULT_ASPECT_RATIO,
            },
            render: None,
            scene,
        }
    }
}

/// Image height for a given width and aspect ratio, rounded to the nearest
/// row and at least one row.
pub fn image_height(width: u32, aspect_ratio: f32) -> u32 {
    ((width as f64 / aspect_ratio as f64).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Background;

    #[test]
    fn test_builtin_scene_is_valid() {
        let description = SceneDescription::builtin();
        assert_eq!(description.scene.len(), 4);
        assert_eq!(description.scene.lights().len(), 1);
        assert!(description.scene.validate().is_ok());
        assert!(description.camera.validate().is_ok());
    }

    #[test]
    fn test_image_height() {
        assert_eq!(image_height(2000, DEFAULT_ASPECT_RATIO), 1125);
        assert_eq!(image_height(400, DEFAULT_ASPECT_RATIO), 225);
        assert_eq!(image_height(1, DEFAULT_ASPECT_RATIO), 1);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 90, "aspect_ratio": 2.0 },
            "render": { "background": { "solid": [0.1, 0.1, 0.1] } },
            "spheres": [
                { "center": [0, -100, -1], "radius": 100,
                  "material": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] } }
            ]
        }"#;

        let description = SceneDescription::from_json(json).unwrap();
        assert_eq!(description.camera.aspect_ratio, 2.0);
        assert_eq!(description.scene.len(), 1);
        assert!(description.scene.lights().is_empty());

        let render = description.render.unwrap();
        assert_eq!(render.background, Background::Solid(Color::splat(0.1)));
        assert_eq!(render.samples_per_pixel, RenderConfig::default().samples_per_pixel);
    }

    #[test]
    fn test_bundled_scene_matches_builtin() {
        let bundled =
            SceneDescription::from_json(include_str!("../../../scenes/three_spheres.json")).unwrap();
        let builtin = SceneDescription::builtin();

        assert_eq!(bundled.scene, builtin.scene);
        assert_eq!(bundled.camera.look_from, builtin.camera.look_from);
        assert_eq!(bundled.camera.vfov, builtin.camera.vfov);
    }

    #[test]
    fn test_from_json_rejects_bad_radius() {
        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 90, "aspect_ratio": 1.0 },
            "spheres": [
                { "center": [0, 0, -1], "radius": -0.45, "material": { "type": "dielectric", "ior": 1.5 } }
            ]
        }"#;

        let err = SceneDescription::from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("radius"));
    }

    #[test]
    fn test_from_json_rejects_degenerate_camera() {
        let flat = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 90, "aspect_ratio": 0 },
            "spheres": []
        }"#;
        let err = SceneDescription::from_json(flat).unwrap_err();
        assert!(format!("{err:#}").contains("aspect ratio"));

        let coincident = r#"{
            "camera": { "look_from": [1, 2, 3], "look_at": [1, 2, 3], "vfov": 90, "aspect_ratio": 1.5 },
            "spheres": []
        }"#;
        let err = SceneDescription::from_json(coincident).unwrap_err();
        assert!(format!("{err:#}").contains("look_from"));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(SceneDescription::from_json("{ \"camera\": 3 }").is_err());
    }
}

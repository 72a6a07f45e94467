//! Perspective pinhole camera for primary-ray generation.

use crate::error::CameraError;
use lumen_math::{near_zero, random_in_pixel_square, Interval, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Open range of usable vertical fields of view, in degrees.
const VFOV_RANGE: Interval = Interval::new(0.0, 180.0);

/// Camera placement and lens settings, as written in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    #[serde(default = "default_vup")]
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Width over height of the image
    pub aspect_ratio: f32,
}

fn default_vup() -> Vec3 {
    Vec3::Y
}

impl CameraSettings {
    /// Check that the settings describe a non-degenerate view.
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(CameraError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !VFOV_RANGE.surrounds(self.vfov) {
            return Err(CameraError::InvalidFieldOfView(self.vfov));
        }
        if !(self.look_from.is_finite() && self.look_at.is_finite() && self.vup.is_finite()) {
            return Err(CameraError::NonFinitePlacement);
        }

        let view = self.look_from - self.look_at;
        if near_zero(view) {
            return Err(CameraError::CoincidentEye);
        }
        if near_zero(self.vup.normalize_or_zero().cross(view.normalize())) {
            return Err(CameraError::DegenerateUp);
        }
        Ok(())
    }
}

/// Camera for generating rays into the scene.
///
/// Immutable once built; the basis and viewport are derived in `new`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    aspect_ratio: f32,
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Build a camera looking from `look_from` towards `look_at`.
    ///
    /// `vup` must not be parallel to the viewing direction.
    pub fn new(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect_ratio: f32) -> Self {
        Self::from_settings(CameraSettings {
            look_from,
            look_at,
            vup,
            vfov,
            aspect_ratio,
        })
    }

    /// Derive the viewport from settings that passed `CameraSettings::validate`.
    pub fn from_settings(settings: CameraSettings) -> Self {
        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = settings.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = settings.look_from;
        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - w;

        Self {
            aspect_ratio: settings.aspect_ratio,
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Ray through normalized screen coordinates `s, t` in [0, 1], with
    /// (0, 0) at the lower-left corner of the viewport.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }

    /// Jittered ray through pixel (x, y) of a `width` x `height` image.
    ///
    /// Rows are numbered top to bottom, so row 0 maps to the top of the viewport.
    pub fn pixel_ray(&self, x: u32, y: u32, width: u32, height: u32, rng: &mut dyn RngCore) -> Ray {
        let (dx, dy) = random_in_pixel_square(rng);
        let s = (x as f32 + dx) / width as f32;
        let t = ((height - 1 - y) as f32 + dy) / height as f32;
        self.get_ray(s, t)
    }
}

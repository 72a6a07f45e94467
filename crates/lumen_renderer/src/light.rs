//! Point light sources.

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// An infinitesimal light at `position` radiating `intensity` equally in
/// every direction. Irradiance falls off with the square of the distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Color,
}

impl PointLight {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

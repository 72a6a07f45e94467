//! Error types for scene, camera and render-setting validation.
//!
//! Rendering itself is infallible; these errors are raised up front so a
//! malformed scene or configuration never reaches the integrator.

use thiserror::Error;

/// Errors found while validating a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere {index}: radius must be finite and positive, got {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("sphere {index}: metal fuzz must be within [0, 1], got {fuzz}")]
    InvalidFuzz { index: usize, fuzz: f32 },

    #[error("sphere {index}: refractive index must be finite and positive, got {ior}")]
    InvalidRefractiveIndex { index: usize, ior: f32 },

    #[error("sphere {index}: albedo components must be finite and non-negative")]
    InvalidAlbedo { index: usize },

    #[error("light {index}: intensity components must be finite and non-negative")]
    InvalidLight { index: usize },
}

/// Errors found while validating camera settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("vertical field of view must be strictly between 0 and 180 degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("camera position, target and up vector must be finite")]
    NonFinitePlacement,

    #[error("look_from and look_at must be distinct points")]
    CoincidentEye,

    #[error("up vector must be non-zero and not parallel to the view direction")]
    DegenerateUp,
}

/// Errors found while validating render settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("bucket size must be at least 1")]
    ZeroBucketSize,

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Camera(#[from] CameraError),
}

pub type SceneResult<T> = Result<T, SceneError>;

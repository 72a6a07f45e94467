//! lumen renderer - CPU path tracing over analytic spheres.
//!
//! A Monte Carlo path tracer with three surface models (diffuse, metal,
//! glass), shadow-tested point lights and bucket-parallel rendering.
//!
//! ```ignore
//! use lumen_renderer::{Camera, Material, PointLight, RenderConfig, Scene, Sphere, Vec3, Color, render};
//!
//! let mut scene = Scene::new();
//! scene.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Material::lambertian(Color::splat(0.5))));
//! scene.add_light(PointLight::new(Vec3::new(5.0, 5.0, -2.0), Color::splat(6.0)));
//!
//! let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 16.0 / 9.0);
//! let image = render(&scene, &camera, 320, 180, &RenderConfig::default());
//! ```

mod bucket;
mod camera;
mod error;
mod hittable;
mod light;
mod material;
mod renderer;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraSettings};
pub use error::{CameraError, RenderError, SceneError, SceneResult};
pub use hittable::{HitRecord, Hittable};
pub use light::PointLight;
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    clamp_01, color_to_rgb8, direct_light, linear_to_gamma, quantize, ray_color, render,
    render_pixel, render_serial, to_display, Background, ImageBuffer, RenderConfig,
};
pub use scene::{Scene, SHADOW_EPSILON, T_MIN};
pub use sphere::Sphere;

/// Re-export the math types the public API is expressed in.
pub use lumen_math::{Color, Interval, Ray, Vec3};

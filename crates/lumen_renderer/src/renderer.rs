//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative path integration with configurable depth
//! - Shadow-tested point-light illumination on diffuse surfaces
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization for display

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::error::RenderError;
use crate::{Camera, HitRecord, Scene};
use lumen_math::{Color, Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// White looking down blending to light blue looking up
    #[default]
    SkyGradient,
    /// Constant ambient color
    Solid(Color),
}

impl Background {
    /// Radiance arriving along a ray that hits nothing.
    pub fn radiance(&self, ray: &Ray) -> Color {
        match *self {
            Background::SkyGradient => sky_gradient(ray),
            Background::Solid(color) => color,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum number of surface interactions per path
    pub max_depth: u32,
    /// Radiance for rays that escape the scene
    pub background: Background,
    /// Seed for the per-bucket random streams
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Background::SkyGradient,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Check the settings before rendering a `width` x `height` image.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if self.bucket_size == 0 {
            return Err(RenderError::ZeroBucketSize);
        }
        Ok(())
    }
}

/// Compute the radiance carried back along a ray.
///
/// Equivalent to the recursive definition
/// `color(r, d) = direct(hit) + attenuation * color(scattered, d - 1)`
/// with `color(_, 0) = 0`, unrolled into a loop that carries the product of
/// attenuations so far.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut radiance = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = scene.closest_hit(&ray) else {
            return radiance + throughput * config.background.radiance(&ray);
        };

        radiance += throughput * direct_light(scene, &rec);

        let scatter = rec.material.scatter(&ray, &rec, rng);
        match scatter.scattered {
            Some(scattered) => {
                throughput *= scatter.attenuation;
                ray = scattered;
            }
            // Absorbed: only the direct term survives
            None => return radiance,
        }
    }

    // Depth exhausted: truncate the remaining path
    radiance
}

/// Point-light illumination arriving at a hit, weighted by the surface's
/// direct response (Lambert cosine law, inverse-square falloff).
pub fn direct_light(scene: &Scene, rec: &HitRecord<'_>) -> Color {
    let Some(albedo) = rec.material.direct_response() else {
        return Color::ZERO;
    };

    let mut direct = Color::ZERO;
    for light in scene.lights() {
        let to_light = light.position - rec.p;
        let distance_squared = to_light.length_squared();
        // A light sitting on the surface has no direction to it.
        if distance_squared <= 0.0 {
            continue;
        }
        let n_dot_l = rec.normal.dot(to_light / distance_squared.sqrt());
        if n_dot_l <= 0.0 || scene.shadow_blocked(rec.p, light) {
            continue;
        }
        direct += albedo * light.intensity * (n_dot_l / distance_squared);
    }
    direct
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    Interval::UNIT.clamp(x)
}

/// Gamma-correct and clamp a linear color to displayable [0, 1] values.
///
/// Radiance above 1 (possible with additive light) is clipped silently.
pub fn to_display(color: Color) -> Color {
    Color::new(
        clamp_01(linear_to_gamma(color.x)),
        clamp_01(linear_to_gamma(color.y)),
        clamp_01(linear_to_gamma(color.z)),
    )
}

/// Map a display value in [0, 1] to an 8-bit channel, rounding to nearest.
#[inline]
pub fn quantize(value: f32) -> u8 {
    (255.0 * clamp_01(value)).round() as u8
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let display = to_display(color);
    [quantize(display.x), quantize(display.y), quantize(display.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `pixel` is (column, row) with row 0 at the top; `resolution` is the
/// full image size.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    pixel: (u32, u32),
    resolution: (u32, u32),
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let (x, y) = pixel;
    let (width, height) = resolution;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.pixel_ray(x, y, width, height, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, config, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Linear-radiance image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, chunk) in result.pixels.chunks(bucket.width as usize).enumerate() {
            let start = self.offset(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    /// Gamma-corrected 8-bit RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }
}

/// Render the scene with buckets distributed over the rayon thread pool.
///
/// Returns linear radiance; use `ImageBuffer::to_rgb8` for display values.
/// The scene and config are assumed validated.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> ImageBuffer {
    let buckets = generate_buckets(width, height, config.bucket_size);
    let total = buckets.len();
    let finished = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} buckets on {} threads",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        total,
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, scene, camera, width, height, config);
            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("Bucket {} finished ({}/{})", bucket.index, done, total);
            result
        })
        .collect();

    let image = assemble(width, height, &results);
    log::info!("Rendered in {:?}", start.elapsed());
    image
}

/// Render the scene on the calling thread.
///
/// Produces exactly the same image as `render` for the same inputs.
pub fn render_serial(
    scene: &Scene,
    camera: &Camera,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> ImageBuffer {
    let start = Instant::now();
    let results: Vec<BucketResult> = generate_buckets(width, height, config.bucket_size)
        .iter()
        .map(|bucket| render_bucket(bucket, scene, camera, width, height, config))
        .collect();

    let image = assemble(width, height, &results);
    log::info!("Rendered {}x{} serially in {:?}", width, height, start.elapsed());
    image
}

fn assemble(width: u32, height: u32, results: &[BucketResult]) -> ImageBuffer {
    let mut image = ImageBuffer::new(width, height);
    for result in results {
        image.write_bucket(result);
    }
    image
}

//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth cutoff
//! - Emission plus attenuated scattering at every hit
//! - Anti-aliasing via multi-sampling
//! - Parallel bucket rendering with per-bucket seeded random streams

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::error::{RenderError, RenderResult};
use crate::{Camera, Color, Hittable, Ray};
use glint_math::Interval;

/// Smallest ray parameter accepted as a hit; avoids self-intersection.
pub const T_MIN: f32 = 0.0001;

/// Render driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Base seed for the per-bucket random streams
    pub seed: u64,
    /// Edge length of a bucket in pixels
    pub bucket_size: u32,
    /// Worker thread count; `None` uses rayon's global pool
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            threads: None,
        }
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating color.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY), rng) else {
        return background;
    };

    // Get emission from material (for lights)
    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        // Absorbed
        None => emission,
    }
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

/// Convert an averaged linear color to display-encoded 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.000, 0.999);
    let encode = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, camera.background, rng);
    }

    // Average the samples
    pixel_color * camera.samples_scale()
}

/// Linear-radiance image produced by a render.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Row-major, top row first
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
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
        let rows = result.pixels.chunks(bucket.width.max(1) as usize);
        for (local_y, row) in rows.enumerate() {
            let start = self.offset(bucket.x, bucket.y + local_y as u32);
            self.pixels[start..start + row.len()].copy_from_slice(row);
        }
    }

    /// Display-encode every pixel (for saving).
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().copied().map(color_to_rgb8).collect()
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the scene seen by `camera` into an image buffer.
///
/// A camera that was never initialized, or was changed by a builder since,
/// is initialized on a copy first. Buckets are rendered in parallel; for a
/// fixed `config.seed` the result is identical across runs and thread
/// counts.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    let prepared;
    let camera = if camera.is_initialized() {
        camera
    } else {
        log::debug!("Initializing camera before render");
        let mut copy = camera.clone();
        copy.initialize();
        prepared = copy;
        &prepared
    };

    let (width, height) = (camera.image_width, camera.image_height);
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidImage { width, height });
    }

    let buckets = generate_buckets(width, height, config.bucket_size);
    let total = buckets.len();
    log::info!(
        "Rendering {}x{} at {} spp, depth {} ({} buckets)",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth,
        total
    );

    let start = Instant::now();
    let completed = AtomicUsize::new(0);

    let render_all = || -> Vec<BucketResult> {
        buckets
            .par_iter()
            .map(|bucket| {
                let result = render_bucket(bucket, camera, world, config.seed);
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                log::debug!("Bucket {}/{} done", done, total);
                result
            })
            .collect()
    };

    let results = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(render_all),
        None => render_all(),
    };

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

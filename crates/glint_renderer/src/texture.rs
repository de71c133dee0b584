//! Textures: colour as a function of surface coordinates and position.

use std::sync::Arc;

use glint_core::ImageData;
use glint_math::{Interval, Vec3};
use rand::RngCore;

use crate::material::Color;
use crate::perlin::Perlin;

/// Trait for textures sampled at a hit point.
pub trait Texture: Send + Sync {
    /// Colour at surface coordinates `(u, v)` and world position `p`.
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A constant colour.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// 3D checkerboard alternating between two textures.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    /// `scale` is the edge length of one cell in world units.
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let x = (self.inv_scale * p.x).floor() as i32;
        let y = (self.inv_scale * p.y).floor() as i32;
        let z = (self.inv_scale * p.z).floor() as i32;

        // Only parity matters, so wrapping keeps far-away cells correct
        if x.wrapping_add(y).wrapping_add(z).rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Marble-like grey pattern driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
    depth: u32,
}

impl NoiseTexture {
    /// `depth` is the number of turbulence octaves.
    pub fn new(scale: f32, depth: u32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
            depth,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let phase = self.scale * p.z + 10.0 * self.noise.turbulence(p, self.depth);
        Color::splat(0.5) * (1.0 + phase.sin())
    }
}

/// Texture backed by a decoded image, addressed by `(u, v)`.
///
/// An image that failed to load yields the magenta sentinel everywhere.
pub struct ImageTexture {
    image: Arc<ImageData>,
}

impl ImageTexture {
    pub fn new(image: Arc<ImageData>) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &ImageData {
        &self.image
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Image rows run top to bottom
        let v = 1.0 - unit.clamp(v);

        let i = (u * self.image.width() as f32) as i32;
        let j = (v * self.image.height() as f32) as i32;
        let [r, g, b] = self.image.pixel_data(i, j);

        let color_scale = 1.0 / 255.0;
        Color::new(r as f32, g as f32, b as f32) * color_scale
    }
}

//! JSON overrides for a preset's camera and render settings.
//!
//! Every field is optional; anything left out keeps the preset's value.
//!
//! ```json
//! {
//!     "image_width": 800,
//!     "samples_per_pixel": 64,
//!     "look_from": [13.0, 2.0, 3.0],
//!     "background": [0.7, 0.8, 1.0],
//!     "render": { "seed": 7, "bucket_size": 32 }
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glint_math::Vec3;
use glint_renderer::{Camera, Color, RenderConfig};
use serde::{Deserialize, Serialize};

/// Optional camera fields read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraOverrides {
    pub aspect_ratio: Option<f32>,
    pub image_width: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub vfov: Option<f32>,
    pub look_from: Option<Vec3>,
    pub look_at: Option<Vec3>,
    pub vup: Option<Vec3>,
    pub defocus_angle: Option<f32>,
    pub focus_dist: Option<f32>,
    pub background: Option<Color>,
    pub render: Option<RenderConfig>,
}

impl CameraOverrides {
    /// Read overrides from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply the overrides to an uninitialized camera.
    pub fn apply(&self, camera: Camera) -> Camera {
        let aspect_ratio = self.aspect_ratio.unwrap_or(camera.aspect_ratio);
        let image_width = self.image_width.unwrap_or(camera.image_width);
        let samples = self.samples_per_pixel.unwrap_or(camera.samples_per_pixel);
        let max_depth = self.max_depth.unwrap_or(camera.max_depth);
        let look_from = self.look_from.unwrap_or(camera.look_from());
        let look_at = self.look_at.unwrap_or(camera.look_at());
        let vup = self.vup.unwrap_or(camera.vup());
        let vfov = self.vfov.unwrap_or(camera.vfov());
        let defocus_angle = self.defocus_angle.unwrap_or(camera.defocus_angle());
        let focus_dist = self.focus_dist.unwrap_or(camera.focus_dist());
        let background = self.background.unwrap_or(camera.background);

        camera
            .with_image(aspect_ratio, image_width)
            .with_quality(samples, max_depth)
            .with_position(look_from, look_at, vup)
            .with_lens(vfov, defocus_angle, focus_dist)
            .with_background(background)
    }
}

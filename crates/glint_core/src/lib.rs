//! Glint Core - image input and output for the glint path tracer.
//!
//! This crate provides:
//!
//! - **Texture images**: `ImageData` decoded from disk into packed 8-bit
//!   RGB, with edge clamping and a sentinel colour for failed loads, and
//!   an `ImageCache` that shares decoded images between textures.
//! - **Output**: text PPM (`P3`) and PNG writers for rendered pixels.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{save_image, ImageCache};
//!
//! let mut cache = ImageCache::with_base_dir("assets/images");
//! let earth = cache.load_or_missing("earthmap.jpg");
//! println!("{}x{}", earth.width(), earth.height());
//!
//! save_image("out.ppm", width, height, &pixels)?;
//! ```

pub mod error;
pub mod output;
pub mod texture;

// Re-export commonly used types
pub use error::{ImageError, ImageResult, OutputError, OutputResult};
pub use output::{save_image, save_png, save_ppm, write_ppm};
pub use texture::{ImageCache, ImageData, MISSING_PIXEL};

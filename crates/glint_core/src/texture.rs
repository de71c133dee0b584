//! Texture image loading and caching.
//!
//! Images are decoded with the `image` crate into linear float RGB, then
//! quantised to a packed 8-bit RGB buffer that the renderer samples with
//! [`ImageData::pixel_data`]. A texture whose file failed to load still
//! answers lookups, with a magenta sentinel pixel.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ColorType;

use crate::error::{ImageError, ImageResult};

const BYTES_PER_PIXEL: usize = 3;

/// Pixel returned by every lookup on an image that failed to load.
pub const MISSING_PIXEL: [u8; 3] = [255, 0, 255];

/// Gamma used to linearise 8/16-bit source images.
const SOURCE_GAMMA: f32 = 2.2;

/// A decoded image stored as packed 8-bit RGB, row-major, top row first.
#[derive(Clone, Debug, Default)]
pub struct ImageData {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
    /// Original file path (for debugging)
    path: String,
}

impl ImageData {
    /// An image with no pixels. Every lookup yields [`MISSING_PIXEL`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an image from linear float RGB pixels in row-major order.
    pub fn from_linear(width: u32, height: u32, pixels: &[[f32; 3]]) -> ImageResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ImageError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let bytes = pixels
            .iter()
            .flat_map(|p| p.iter().map(|&c| float_to_byte(c)))
            .collect();

        Ok(Self {
            width,
            height,
            bytes,
            path: "<memory>".to_string(),
        })
    }

    /// Decode an image file.
    pub fn load(path: impl AsRef<Path>) -> ImageResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| match source {
            image::ImageError::IoError(e) => ImageError::Io(e),
            source => ImageError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let is_float = matches!(img.color(), ColorType::Rgb32F | ColorType::Rgba32F);
        let rgb = img.to_rgb32f();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::Empty {
                path: path.to_path_buf(),
            });
        }

        let pixels: Vec<[f32; 3]> = rgb
            .pixels()
            .map(|p| {
                if is_float {
                    p.0
                } else {
                    [
                        p.0[0].powf(SOURCE_GAMMA),
                        p.0[1].powf(SOURCE_GAMMA),
                        p.0[2].powf(SOURCE_GAMMA),
                    ]
                }
            })
            .collect();

        let mut data = Self::from_linear(width, height, &pixels)?;
        data.path = path.to_string_lossy().to_string();

        log::debug!(
            "Loaded image: {} ({}x{}, {:.1} KB)",
            data.path,
            width,
            height,
            data.size_bytes() as f32 / 1024.0
        );

        Ok(data)
    }

    /// Decode an image file, falling back to an empty image on failure.
    ///
    /// The failure is reported through the log; lookups on the returned
    /// image produce the sentinel colour.
    pub fn load_or_missing(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Could not load image '{}': {}", path.display(), e);
                Self {
                    path: path.to_string_lossy().to_string(),
                    ..Self::empty()
                }
            }
        }
    }

    /// Width in pixels, 0 if nothing was loaded.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, 0 if nothing was loaded.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_loaded(&self) -> bool {
        !self.bytes.is_empty()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// RGB bytes of the pixel at `(x, y)`.
    ///
    /// Coordinates outside the image are clamped to the nearest edge pixel.
    pub fn pixel_data(&self, x: i32, y: i32) -> [u8; 3] {
        if !self.is_loaded() {
            return MISSING_PIXEL;
        }

        let x = x.clamp(0, self.width as i32 - 1) as usize;
        let y = y.clamp(0, self.height as i32 - 1) as usize;
        let idx = (y * self.width as usize + x) * BYTES_PER_PIXEL;

        [self.bytes[idx], self.bytes[idx + 1], self.bytes[idx + 2]]
    }

    /// Get total size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Cache for loaded images.
///
/// Images are loaded on demand and shared between every texture that
/// references the same file.
pub struct ImageCache {
    /// Cached images by requested path
    images: HashMap<String, Arc<ImageData>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl ImageCache {
    /// Create a new empty image cache.
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create an image cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            images: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load an image, using the cache if available.
    pub fn load(&mut self, path: &str) -> ImageResult<Arc<ImageData>> {
        if let Some(image) = self.images.get(path) {
            return Ok(image.clone());
        }

        let full_path = self.resolve_path(path);
        let image = Arc::new(ImageData::load(&full_path)?);
        self.images.insert(path.to_string(), image.clone());

        Ok(image)
    }

    /// Load an image, or hand back an empty one (sentinel lookups) on failure.
    ///
    /// Failed loads are cached too, so a missing file is reported once.
    pub fn load_or_missing(&mut self, path: &str) -> Arc<ImageData> {
        if let Some(image) = self.images.get(path) {
            return image.clone();
        }

        let full_path = self.resolve_path(path);
        let image = Arc::new(ImageData::load_or_missing(&full_path));
        self.images.insert(path.to_string(), image.clone());
        image
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Quantise a linear value in [0, 1] to a byte.
fn float_to_byte(value: f32) -> u8 {
    if value <= 0.0 {
        0
    } else if value >= 1.0 {
        255
    } else {
        (256.0 * value) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_to_byte() {
        assert_eq!(float_to_byte(-1.0), 0);
        assert_eq!(float_to_byte(0.0), 0);
        assert_eq!(float_to_byte(0.5), 128);
        assert_eq!(float_to_byte(0.999), 255);
        assert_eq!(float_to_byte(1.0), 255);
        assert_eq!(float_to_byte(7.0), 255);
    }

    #[test]
    fn test_pixel_lookup_and_clamping() {
        let pixels = [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
        ];
        let image = ImageData::from_linear(2, 2, &pixels).unwrap();

        assert_eq!(image.pixel_data(0, 0), [255, 0, 0]);
        assert_eq!(image.pixel_data(1, 0), [0, 255, 0]);
        assert_eq!(image.pixel_data(0, 1), [0, 0, 255]);
        assert_eq!(image.pixel_data(1, 1), [255, 255, 255]);

        // Out of range clamps to the edges
        assert_eq!(image.pixel_data(-4, -4), [255, 0, 0]);
        assert_eq!(image.pixel_data(2, 0), [0, 255, 0]);
        assert_eq!(image.pixel_data(9, 9), [255, 255, 255]);
    }

    #[test]
    fn test_empty_image_returns_sentinel() {
        let image = ImageData::empty();
        assert!(!image.is_loaded());
        assert_eq!(image.width(), 0);
        assert_eq!(image.pixel_data(0, 0), MISSING_PIXEL);
        assert_eq!(image.pixel_data(10, -3), MISSING_PIXEL);
    }

    #[test]
    fn test_size_mismatch() {
        let result = ImageData::from_linear(2, 2, &[[0.0; 3]; 3]);
        assert!(matches!(
            result,
            Err(ImageError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let _ = env_logger::builder().is_test(true).try_init();

        let image = ImageData::load_or_missing("definitely/not/here.png");
        assert!(!image.is_loaded());
        assert_eq!(image.pixel_data(3, 3), MISSING_PIXEL);
        assert!(ImageData::load("definitely/not/here.png").is_err());
    }

    #[test]
    fn test_cache_reuses_failed_loads() {
        let mut cache = ImageCache::with_base_dir("no/such/dir");
        assert!(cache.is_empty());

        let a = cache.load_or_missing("earth.png");
        let b = cache.load_or_missing("earth.png");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_load_png_linearises() {
        let dir = std::env::temp_dir().join("glint_core_image_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("grey.png");

        let img = image::RgbImage::from_pixel(3, 2, image::Rgb([128, 255, 0]));
        img.save(&path).unwrap();

        let data = ImageData::load(&path).unwrap();
        assert_eq!(data.width(), 3);
        assert_eq!(data.height(), 2);

        let [r, g, b] = data.pixel_data(1, 1);
        // (128/255)^2.2 ~= 0.219 -> 56
        assert!((50..=62).contains(&r), "r = {}", r);
        assert_eq!(g, 255);
        assert_eq!(b, 0);
    }
}

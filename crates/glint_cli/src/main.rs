mod cli;
mod config;
mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{save_image, ImageCache};
use glint_renderer::{render, Camera, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::{init_logger, Args};
use config::CameraOverrides;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let overrides = match &args.config {
        Some(path) => CameraOverrides::load(path)?,
        None => CameraOverrides::default(),
    };
    let render_config = render_config(&args, &overrides);

    let mut rng = StdRng::seed_from_u64(render_config.seed);
    let mut images = ImageCache::with_base_dir(&args.textures);
    let scene = args.scene.build(&mut images, &mut rng);
    if !images.is_empty() {
        log::debug!("Loaded {} texture image(s)", images.len());
    }

    let mut camera = apply_flags(&args, overrides.apply(scene.camera));
    camera.initialize();

    let image = render(&camera, &*scene.world, &render_config).context("Render failed")?;

    save_image(&args.output, image.width, image.height, &image.to_rgb8())
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}

/// Config file settings first, then command line flags on top.
fn render_config(args: &Args, overrides: &CameraOverrides) -> RenderConfig {
    let mut config = overrides.render.clone().unwrap_or_default();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(threads) = args.threads {
        config.threads = Some(threads);
    }
    if let Some(bucket_size) = args.bucket_size {
        config.bucket_size = bucket_size;
    }
    config
}

fn apply_flags(args: &Args, camera: Camera) -> Camera {
    let width = args.width.unwrap_or(camera.image_width);
    let samples = args.samples.unwrap_or(camera.samples_per_pixel);
    let depth = args.depth.unwrap_or(camera.max_depth);
    let aspect = camera.aspect_ratio;
    camera.with_image(aspect, width).with_quality(samples, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_beat_config_file() {
        let args = Args::parse_from(["glint", "--seed", "5", "--width", "50", "-s", "3"]);
        let overrides = CameraOverrides::from_json(
            r#"{ "image_width": 80, "max_depth": 4, "render": { "seed": 1, "bucket_size": 16 } }"#,
        )
        .unwrap();

        let config = render_config(&args, &overrides);
        assert_eq!(config.seed, 5);
        assert_eq!(config.bucket_size, 16);
        assert_eq!(config.threads, None);

        let camera = apply_flags(&args, overrides.apply(Camera::new()));
        assert_eq!(camera.image_width, 50);
        assert_eq!(camera.samples_per_pixel, 3);
        assert_eq!(camera.max_depth, 4);
    }

    #[test]
    fn test_defaults_without_config() {
        let args = Args::parse_from(["glint"]);
        assert_eq!(render_config(&args, &CameraOverrides::default()), RenderConfig::default());
    }
}

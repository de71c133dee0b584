use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::scenes::ScenePreset;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Offline Monte Carlo path tracer")]
pub struct Args {
    /// Built-in scene to render
    #[arg(long, value_enum, default_value = "cornell-smoke")]
    pub scene: ScenePreset,

    /// Output image path (.ppm or .png)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Image width in pixels (height follows the scene's aspect ratio)
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Seed for scene layout and sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Bucket edge length in pixels
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// JSON file overriding camera and render settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Directory holding texture images
    #[arg(long, default_value = "images")]
    pub textures: PathBuf,
}

/// Initialize the logger with the specified level
///
/// `RUST_LOG` is read first; the explicit level wins.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["glint"]);
        assert_eq!(args.scene, ScenePreset::CornellSmoke);
        assert_eq!(args.output, PathBuf::from("image.ppm"));
        assert!(args.width.is_none());
        assert!(args.config.is_none());
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "glint",
            "--scene",
            "simple-light",
            "--output",
            "out.png",
            "--width",
            "320",
            "-s",
            "16",
            "--depth",
            "8",
            "--seed",
            "9",
            "--threads",
            "2",
            "--bucket-size",
            "32",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.scene, ScenePreset::SimpleLight);
        assert_eq!(args.width, Some(320));
        assert_eq!(args.samples, Some(16));
        assert_eq!(args.depth, Some(8));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.bucket_size, Some(32));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(Args::try_parse_from(["glint", "--scene", "teapot"]).is_err());
    }
}

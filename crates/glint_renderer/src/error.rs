//! Error types for the render driver.

use thiserror::Error;

/// Errors that can occur when starting a render.
///
/// Numerical edge cases inside the integrator are handled locally and
/// never surface here.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid image size {width}x{height}")]
    InvalidImage { width: u32, height: u32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

//! Glint Renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for offline rendering: spheres, quads,
//! triangles and constant-density media behind a BVH, shaded with
//! diffuse, metal, glass, emissive and isotropic materials.
//!
//! Scene objects are built once, wrapped in `Arc`, and shared read-only
//! across render threads. All randomness flows through an explicit
//! `&mut dyn RngCore`.

mod bucket;
mod bvh;
mod camera;
mod error;
mod hittable;
mod instance;
mod material;
mod medium;
mod perlin;
mod quad;
mod renderer;
mod sphere;
mod texture;
mod triangle;

pub mod sampling;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{RotateY, Translate};
pub use material::{
    reflect, refract, Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal,
    ScatterResult,
};
pub use medium::ConstantMedium;
pub use perlin::Perlin;
pub use quad::{make_box, Quad};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
    T_MIN,
};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};

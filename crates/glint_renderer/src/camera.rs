//! Camera for ray generation.

use crate::sampling::{gen_f32, random_in_unit_disk, sample_square};
use crate::{Color, Ray};
use glint_math::Vec3;
use rand::RngCore;

/// A thin-lens camera.
///
/// Configure with the `with_*` builders, then call [`Camera::initialize`]
/// before generating rays.
#[derive(Debug, Clone)]
pub struct Camera {
    pub aspect_ratio: f32,
    pub image_width: u32,
    /// Derived from width and aspect by `initialize`
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Vertical field of view in degrees
    vfov: f32,
    /// Cone angle of rays through each pixel, in degrees
    defocus_angle: f32,
    focus_dist: f32,

    /// Radiance returned by rays that escape the scene
    pub background: Color,

    frame: Frame,
    /// Cleared by every builder call, set by `initialize`
    initialized: bool,
}

/// Image-plane geometry derived from the camera settings.
#[derive(Debug, Clone, Copy)]
struct Frame {
    center: Vec3,
    /// Centre of pixel (0, 0), the top-left corner of the image
    pixel00: Vec3,
    step_u: Vec3,
    step_v: Vec3,
    lens_u: Vec3,
    lens_v: Vec3,
}

impl Frame {
    fn unset() -> Self {
        Self {
            center: Vec3::ZERO,
            pixel00: Vec3::ZERO,
            step_u: Vec3::ZERO,
            step_v: Vec3::ZERO,
            lens_u: Vec3::ZERO,
            lens_v: Vec3::ZERO,
        }
    }

    fn build(camera: &Camera) -> Self {
        let (width, height) = (camera.image_width as f32, camera.image_height as f32);

        let half_height = (camera.vfov.to_radians() * 0.5).tan();
        let plane_height = 2.0 * half_height * camera.focus_dist;
        let plane_width = plane_height * width / height;

        // Orthonormal basis with `w` pointing back toward the viewer
        let w = (camera.look_from - camera.look_at).normalize();
        let u = camera.vup.cross(w).normalize();
        let v = w.cross(u);

        // Rows run downward in the image
        let across = u * plane_width;
        let down = v * -plane_height;
        let step_u = across / width;
        let step_v = down / height;

        let corner = camera.look_from - w * camera.focus_dist - 0.5 * (across + down);
        let lens_radius = camera.focus_dist * (camera.defocus_angle * 0.5).to_radians().tan();

        Self {
            center: camera.look_from,
            pixel00: corner + 0.5 * (step_u + step_v),
            step_u,
            step_v,
            lens_u: u * lens_radius,
            lens_v: v * lens_radius,
        }
    }
}

impl Camera {
    /// Camera at the origin looking down -Z with a 90 degree field of view.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            image_height: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: Color::ZERO,
            frame: Frame::unset(),
            initialized: false,
        }
    }

    /// Set the image width and aspect ratio; the height is derived.
    pub fn with_image(self, aspect_ratio: f32, image_width: u32) -> Self {
        Self {
            aspect_ratio,
            image_width,
            initialized: false,
            ..self
        }
    }

    pub fn with_quality(self, samples_per_pixel: u32, max_depth: u32) -> Self {
        Self {
            samples_per_pixel,
            max_depth,
            initialized: false,
            ..self
        }
    }

    pub fn with_position(self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        Self {
            look_from,
            look_at,
            vup,
            initialized: false,
            ..self
        }
    }

    /// Field of view and thin-lens parameters. A `defocus_angle` of zero
    /// gives a pinhole.
    pub fn with_lens(self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        Self {
            vfov,
            defocus_angle,
            focus_dist,
            initialized: false,
            ..self
        }
    }

    pub fn with_background(self, background: Color) -> Self {
        Self {
            background,
            initialized: false,
            ..self
        }
    }

    /// Derive the image height and the image-plane frame.
    ///
    /// Must run after the last builder call and before [`Camera::get_ray`].
    pub fn initialize(&mut self) {
        self.image_width = self.image_width.max(1);
        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);
        self.samples_per_pixel = self.samples_per_pixel.max(1);
        self.frame = Frame::build(self);
        self.initialized = true;

        log::debug!(
            "Camera {}x{}, vfov {}, {:?} -> {:?}",
            self.image_width,
            self.image_height,
            self.vfov,
            self.look_from,
            self.look_at
        );
    }

    /// Whether the frame matches the current settings.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Jittered ray through pixel (i, j), with `j` counted from the top.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let f = &self.frame;
        let jitter = sample_square(rng);
        let target = f.pixel00
            + (i as f32 + jitter.x) * f.step_u
            + (j as f32 + jitter.y) * f.step_v;

        let origin = if self.defocus_angle > 0.0 {
            let d = random_in_unit_disk(rng);
            f.center + d.x * f.lens_u + d.y * f.lens_v
        } else {
            f.center
        };

        Ray::new(origin, target - origin, gen_f32(rng))
    }

    /// Weight of a single sample in the pixel average.
    pub fn samples_scale(&self) -> f32 {
        1.0 / self.samples_per_pixel.max(1) as f32
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn vup(&self) -> Vec3 {
        self.vup
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn defocus_angle(&self) -> f32 {
        self.defocus_angle
    }

    pub fn focus_dist(&self) -> f32 {
        self.focus_dist
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn axis_camera(width: u32) -> Camera {
        let mut camera = Camera::new()
            .with_image(1.0, width)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();
        camera
    }

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_image(16.0 / 9.0, 400)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);

        camera.initialize();

        assert_eq!(camera.image_height, 225);
        assert_eq!(camera.frame.center, Vec3::ZERO);
        assert!((camera.frame.step_u.normalize() - Vec3::X).length() < 0.001);
        assert!((camera.frame.step_v.normalize() - Vec3::NEG_Y).length() < 0.001);
        assert!(camera.frame.pixel00.z < 0.0);
    }

    #[test]
    fn test_builders_invalidate_frame() {
        let mut camera = Camera::new();
        assert!(!camera.is_initialized());

        camera.initialize();
        assert!(camera.is_initialized());

        let camera = camera.with_image(2.0, 50);
        assert!(!camera.is_initialized());
        let mut camera = camera.with_background(Color::ONE);
        camera.initialize();
        assert!(camera.is_initialized());
        assert!(!camera.with_lens(30.0, 0.0, 5.0).is_initialized());
    }

    #[test]
    fn test_image_height_at_least_one() {
        let mut camera = Camera::new().with_image(1000.0, 10);
        camera.initialize();
        assert_eq!(camera.image_height, 1);
    }

    #[test]
    fn test_unit_viewport() {
        // 90 degree fov at focus distance 1 gives a 2x2 viewport
        let camera = axis_camera(2);
        assert!((camera.frame.step_u - Vec3::X).length() < 1e-5);
        assert!((camera.frame.step_v - Vec3::NEG_Y).length() < 1e-5);
        assert!((camera.frame.pixel00 - Vec3::new(-0.5, 0.5, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_ray_direction() {
        let camera = axis_camera(100);
        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point roughly towards -Z
        let ray = camera.get_ray(50, 50, &mut rng);
        assert!(ray.direction().z < 0.0);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((0.0..1.0).contains(&ray.time()));
    }

    #[test]
    fn test_samples_stay_within_pixel() {
        let camera = axis_camera(10);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let ray = camera.get_ray(0, 0, &mut rng);
            // Pixel (0,0) covers x in [-1, -0.8], y in [0.8, 1] on the z = -1 plane
            let d = ray.direction();
            assert!(d.x >= -1.0 - 1e-5 && d.x <= -0.8 + 1e-5);
            assert!(d.y >= 0.8 - 1e-5 && d.y <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_defocus_origins_on_lens_disk() {
        let mut camera = Camera::new()
            .with_image(1.0, 10)
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 10.0, 5.0);
        camera.initialize();

        let radius = 5.0 * (5.0f32).to_radians().tan();
        let mut rng = StdRng::seed_from_u64(9);
        let mut moved = false;
        for _ in 0..100 {
            let ray = camera.get_ray(5, 5, &mut rng);
            let offset = ray.origin() - Vec3::new(0.0, 0.0, 5.0);
            assert!(offset.z.abs() < 1e-5);
            assert!(offset.length() <= radius + 1e-5);
            moved |= offset.length() > 1e-4;
        }
        assert!(moved);
    }
}

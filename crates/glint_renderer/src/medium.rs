//! Constant-density participating media (smoke, fog).

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    material::{Color, Isotropic},
    sampling::gen_f32,
    texture::Texture,
    Material, Ray,
};
use glint_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// A volume of uniform density bounded by a closed surface.
///
/// A ray entering the boundary travels an exponentially distributed free
/// path before scattering; rays whose path exceeds the chord pass through.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f32,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self::with_phase(boundary, density, Arc::new(Isotropic::new(albedo)))
    }

    pub fn from_texture(boundary: Arc<dyn Hittable>, density: f32, texture: Arc<dyn Texture>) -> Self {
        Self::with_phase(boundary, density, Arc::new(Isotropic::from_texture(texture)))
    }

    fn with_phase(boundary: Arc<dyn Hittable>, density: f32, phase_function: Arc<dyn Material>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function,
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        let entry = self.boundary.hit(ray, Interval::UNIVERSE, rng)?;
        let exit = self
            .boundary
            .hit(ray, Interval::new(entry.t + 0.0001, f32::INFINITY), rng)?;

        let mut t1 = entry.t.max(ray_t.min);
        let t2 = exit.t.min(ray_t.max);

        if t1 >= t2 {
            return None;
        }

        // The ray starts inside the volume
        if t1 < 0.0 {
            t1 = 0.0;
        }

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t2 - t1) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f32(rng).ln();

        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = t1 + hit_distance / ray_length;

        // No surface: the normal and face flag are arbitrary
        Some(HitRecord {
            p: ray.at(t),
            normal: Vec3::X,
            material: self.phase_function.as_ref(),
            u: 0.0,
            v: 0.0,
            t,
            front_face: true,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}

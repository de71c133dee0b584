//! Triangle primitive for ray tracing.
//!
//! A triangle is the half of a quad's parallelogram where the planar
//! coordinates satisfy `alpha + beta <= 1`.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    quad::PlaneBasis,
    Material, Ray,
};
use glint_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// A triangle with vertex `q` and edges `u`, `v`.
pub struct Triangle {
    plane: PlaneBasis,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Triangle {
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let edge_u = Aabb::from_points(q, q + u);
        let edge_v = Aabb::from_points(q, q + v);

        Self {
            plane: PlaneBasis::new(q, u, v),
            material,
            bbox: Aabb::surrounding(&edge_u, &edge_v),
        }
    }

    /// Create a triangle from three vertices.
    pub fn from_vertices(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<dyn Material>) -> Self {
        Self::new(v0, v1 - v0, v2 - v0, material)
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal
    }

    fn is_interior(alpha: f32, beta: f32) -> bool {
        alpha >= 0.0 && beta >= 0.0 && Interval::new(0.0, 1.0).contains(alpha + beta)
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        let hit = self.plane.intersect(ray, ray_t)?;

        if !Self::is_interior(hit.alpha, hit.beta) {
            return None;
        }

        Some(HitRecord::new(
            ray,
            hit.t,
            self.plane.normal,
            hit.alpha,
            hit.beta,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

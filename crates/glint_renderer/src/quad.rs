//! Planar parallelogram primitive, and the plane math shared with triangles.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    Material, Ray,
};
use glint_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// Rays closer to parallel than this never hit a plane.
const PARALLEL_EPSILON: f32 = 1e-9;

/// A plane spanned by an origin `q` and two edge vectors `u`, `v`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PlaneBasis {
    pub q: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    /// `n / (n . n)` with `n = u x v`, used to project hits onto (u, v)
    w: Vec3,
    pub normal: Vec3,
    d: f32,
}

/// Ray parameter and planar coordinates of a plane hit.
pub(crate) struct PlaneHit {
    pub t: f32,
    pub alpha: f32,
    pub beta: f32,
}

impl PlaneBasis {
    pub fn new(q: Vec3, u: Vec3, v: Vec3) -> Self {
        let n = u.cross(v);
        let normal = n.normalize_or_zero();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        Self { q, u, v, w, normal, d }
    }

    /// Intersect with the infinite plane, returning the hit inside `ray_t`
    /// together with its coordinates in the (u, v) basis.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<PlaneHit> {
        let denom = self.normal.dot(ray.direction());

        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let planar = ray.at(t) - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));

        Some(PlaneHit { t, alpha, beta })
    }
}

/// A parallelogram with corner `q` and edges `u`, `v`.
pub struct Quad {
    plane: PlaneBasis,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        // Union of the two diagonals' boxes
        let diagonal1 = Aabb::from_points(q, q + u + v);
        let diagonal2 = Aabb::from_points(q + u, q + v);

        Self {
            plane: PlaneBasis::new(q, u, v),
            material,
            bbox: Aabb::surrounding(&diagonal1, &diagonal2),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal
    }

    fn is_interior(alpha: f32, beta: f32) -> bool {
        let unit = Interval::new(0.0, 1.0);
        unit.contains(alpha) && unit.contains(beta)
    }
}

impl Hittable for Quad {
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

/// Build the six faces of the axis-aligned box with opposite corners `a`
/// and `b`.
pub fn make_box(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Vec3::new(min.x, min.y, max.z), dx, dy),  // front
        (Vec3::new(max.x, min.y, max.z), -dz, dy), // right
        (Vec3::new(max.x, min.y, min.z), -dx, dy), // back
        (Vec3::new(min.x, min.y, min.z), dz, dy),  // left
        (Vec3::new(min.x, max.y, max.z), dx, -dz), // top
        (Vec3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    for (q, u, v) in faces {
        sides.add(Arc::new(Quad::new(q, u, v, material.clone())));
    }

    sides
}

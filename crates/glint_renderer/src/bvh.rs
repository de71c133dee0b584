//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree built once over the scene's primitives. Each level sorts
//! its span along a randomly chosen axis and splits it in half by count.

use std::sync::Arc;

use crate::{HitRecord, Hittable, HittableList, Ray};
use glint_math::{Aabb, Interval};
use rand::{Rng, RngCore};

/// BVH node with exactly two children.
///
/// Children are either primitives or further nodes. A single-primitive span
/// stores the same primitive on both sides.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects.
    pub fn new(mut objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        log::debug!("Building BVH over {} primitives", objects.len());

        if objects.is_empty() {
            let empty: Arc<dyn Hittable> = Arc::new(HittableList::new());
            return Self {
                left: empty.clone(),
                right: empty,
                bbox: Aabb::EMPTY,
            };
        }

        Self::build(&mut objects, rng)
    }

    /// Build from the contents of a `HittableList`.
    pub fn from_list(list: HittableList, rng: &mut dyn RngCore) -> Self {
        Self::new(list.into_objects(), rng)
    }

    /// Recursive construction over a non-empty span.
    fn build(objects: &mut [Arc<dyn Hittable>], rng: &mut dyn RngCore) -> Self {
        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match objects.len() {
            1 => (objects[0].clone(), objects[0].clone()),
            2 => (objects[0].clone(), objects[1].clone()),
            n => {
                let axis = rng.gen_range(0..3);
                objects.sort_by(|a, b| {
                    let a_min = a.bounding_box().axis_interval(axis).min;
                    let b_min = b.bounding_box().axis_interval(axis).min;
                    a_min.total_cmp(&b_min)
                });

                let mid = n / 2;
                let (lower, upper) = objects.split_at_mut(mid);
                (
                    Arc::new(Self::build(lower, rng)),
                    Arc::new(Self::build(upper, rng)),
                )
            }
        };

        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        Self { left, right, bbox }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit(ray, ray_t, rng);

        // Only check right up to closest hit
        let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
        let hit_right = self.right.hit(ray, Interval::new(ray_t.min, right_max), rng);

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

//! Rigid-transform wrappers around another hittable.
//!
//! The ray is moved into the object's local space, intersected against the
//! wrapped object, and the hit point and normal are mapped back to world
//! space. Directions are never renormalized so `t` means the same thing in
//! both spaces.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Ray,
};
use glint_math::{Aabb, Interval, Mat4, Mat4Ext, Vec3};
use rand::RngCore;

/// Moves an object by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self { object, offset, bbox }
    }
}

impl Hittable for Translate {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        let mut rec = self.object.hit(&offset_ray, ray_t, rng)?;
        rec.p += self.offset;
        Some(rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rotates an object about the world Y axis.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    /// Object to world
    transform: Mat4,
    /// World to object
    inv_transform: Mat4,
    bbox: Aabb,
}

impl RotateY {
    /// `angle` is in degrees, counter-clockwise looking down -Y.
    pub fn new(object: Arc<dyn Hittable>, angle: f32) -> Self {
        let transform = Mat4::from_rotation_y(angle.to_radians());
        let inv_transform = transform.inverse();
        let bbox = transform.transform_aabb(&object.bounding_box());

        Self {
            object,
            transform,
            inv_transform,
            bbox,
        }
    }
}

impl Hittable for RotateY {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord<'_>> {
        let local_ray = Ray::new(
            self.inv_transform.transform_point3(ray.origin()),
            self.inv_transform.transform_vector3(ray.direction()),
            ray.time(),
        );

        let mut rec = self.object.hit(&local_ray, ray_t, rng)?;

        // Rotation preserves the angle to the ray, so front_face carries over
        rec.p = self.transform.transform_point3(rec.p);
        rec.normal = self.transform.transform_vector3(rec.normal);
        Some(rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::quad::make_box;
    use crate::Sphere;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_sphere() -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(Vec3::ZERO, 1.0, Arc::new(Lambertian::new(Vec3::ONE))))
    }

    fn front() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_translate_moves_hit() {
        let moved = Translate::new(unit_sphere(), Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(0);

        let rec = moved.hit(&ray, front(), &mut rng).expect("should hit");
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);

        let bbox = moved.bounding_box();
        assert_eq!(bbox.z.min, -6.0);
        assert_eq!(bbox.z.max, -4.0);
    }

    #[test]
    fn test_translate_keeps_t_for_unnormalized_direction() {
        let moved = Translate::new(unit_sphere(), Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        let mut rng = StdRng::seed_from_u64(0);

        let rec = moved.hit(&ray, front(), &mut rng).expect("should hit");
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((ray.at(rec.t) - rec.p).length() < 1e-5);
    }

    #[test]
    fn test_rotate_y_box() {
        // Box spanning x in [1, 3] rotated a quarter turn lands on z in [-3, -1]
        let cube: Arc<dyn Hittable> = Arc::new(make_box(
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(3.0, 1.0, 1.0),
            Arc::new(Lambertian::new(Vec3::ONE)),
        ));
        let rotated = RotateY::new(cube, 90.0);

        let bbox = rotated.bounding_box();
        assert!((bbox.z.min + 3.0).abs() < 1e-4);
        assert!((bbox.z.max + 1.0).abs() < 1e-4);
        assert!((bbox.x.min + 1.0).abs() < 1e-4);
        assert!((bbox.x.max - 1.0).abs() < 1e-4);

        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(rotated.hit(&ray, front(), &mut rng).is_none());

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        let rec = rotated.hit(&ray, front(), &mut rng).expect("should hit");
        assert!((rec.t - 1.0).abs() < 1e-4);
        assert!((rec.p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert!((rec.normal - Vec3::Z).length() < 1e-4);
        assert!(rec.front_face);
    }

    #[test]
    fn test_rotation_keeps_unit_normals() {
        let rotated = RotateY::new(unit_sphere(), 37.0);
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new_simple(Vec3::new(0.3, 0.2, 4.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = rotated.hit(&ray, front(), &mut rng).expect("should hit");
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        assert!(rec.normal.dot(ray.direction()) <= 0.0);
    }
}

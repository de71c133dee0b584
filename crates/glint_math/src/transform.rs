// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3(), transform_vector3() and
// inverse(); this adds the bounding-box transform used by instanced geometry.

use crate::Aabb;
use glam::{Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let lo = aabb.min();
        let hi = aabb.max();

        let mut result_min = Vec3::splat(f32::INFINITY);
        let mut result_max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let corner = Vec3::new(
                        if i == 0 { lo.x } else { hi.x },
                        if j == 0 { lo.y } else { hi.y },
                        if k == 0 { lo.z } else { hi.z },
                    );
                    let transformed = self.transform_point3(corner);
                    result_min = result_min.min(transformed);
                    result_max = result_max.max(transformed);
                }
            }
        }

        Aabb::from_points(result_min, result_max)
    }
}

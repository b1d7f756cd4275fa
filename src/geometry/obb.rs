use crate::math::{Mat3, Quat, Vec3};

use super::aabb::Aabb;

/// An oriented bounding box: a box with arbitrary rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Center in world space
    pub center: Vec3,
    /// Half-dimensions along each local axis
    pub half_extents: Vec3,
    /// Rotation basis; columns are the box's local axes in world space
    pub basis: Mat3,
}

impl Obb {
    /// Creates an OBB from center, half-extents and orientation
    #[inline]
    pub fn from_parts(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            half_extents,
            basis: Mat3::from_quat(rotation),
        }
    }

    /// Creates an OBB from an AABB (identity rotation)
    #[inline]
    pub fn from_aabb(aabb: Aabb) -> Self {
        Self {
            center: aabb.center(),
            half_extents: aabb.half_extents(),
            basis: Mat3::IDENTITY,
        }
    }

    /// Returns the box's i-th local axis in world space
    #[inline]
    pub fn axis(self, index: usize) -> Vec3 {
        self.basis.col(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_axes() {
        let obb = Obb::from_parts(Vec3::ZERO, Vec3::ONE, Quat::IDENTITY);
        assert!(vec3_approx_eq(obb.axis(0), Vec3::X));
        assert!(vec3_approx_eq(obb.axis(1), Vec3::Y));
        assert!(vec3_approx_eq(obb.axis(2), Vec3::Z));
    }

    #[test]
    fn test_rotated_axes() {
        let obb = Obb::from_parts(
            Vec3::ZERO,
            Vec3::ONE,
            Quat::from_axis_angle(Vec3::Z, FRAC_PI_2),
        );
        assert!(vec3_approx_eq(obb.axis(0), Vec3::Y));
        assert!(vec3_approx_eq(obb.axis(1), -Vec3::X));
    }

    #[test]
    fn test_from_aabb() {
        let aabb = Aabb::from_center_half_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
        let obb = Obb::from_aabb(aabb);
        assert_eq!(obb.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(obb.half_extents, Vec3::splat(0.5));
        assert_eq!(obb.basis, Mat3::IDENTITY);
    }
}

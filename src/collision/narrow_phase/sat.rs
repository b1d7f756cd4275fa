use crate::collision::contact::Contact;
use crate::geometry::{Aabb, Obb};
use crate::math::Vec3;

const PARALLEL_AXIS_EPSILON: f32 = 1e-6;

/// OBB-OBB overlap test using the separating axis theorem.
///
/// Candidate axes are the three face normals of each box plus the nine
/// pairwise edge cross products. Cross products of near-parallel edges are
/// skipped. Any axis with positive separation proves the boxes disjoint;
/// otherwise the axis of least penetration becomes the contact normal,
/// oriented from `a` toward `b`.
pub fn obb_vs_obb(a: &Obb, b: &Obb) -> Option<Contact> {
    let mut axes = [Vec3::ZERO; 15];
    for i in 0..3 {
        axes[i] = a.axis(i);
        axes[3 + i] = b.axis(i);
    }
    let mut index = 6;
    for i in 0..3 {
        for j in 0..3 {
            axes[index] = a.axis(i).cross(b.axis(j));
            index += 1;
        }
    }

    let center_delta = b.center - a.center;
    let mut min_penetration = f32::MAX;
    let mut best_axis = Vec3::ZERO;

    for axis in axes {
        if axis.length() < PARALLEL_AXIS_EPSILON {
            continue;
        }
        let axis = axis.normalize();

        let proj_a = projected_half_width(a, axis);
        let proj_b = projected_half_width(b, axis);
        let center_dist = center_delta.dot(axis).abs();

        let overlap = proj_a + proj_b - center_dist;
        if overlap <= 0.0 {
            return None;
        }

        if overlap < min_penetration {
            min_penetration = overlap;
            best_axis = axis;
        }
    }

    // Orient the minimum axis from a toward b
    let normal = if center_delta.dot(best_axis) < 0.0 {
        -best_axis
    } else {
        best_axis
    };

    Some(Contact {
        normal,
        penetration: min_penetration,
    })
}

/// Half-width of the box's projection onto a unit axis
#[inline]
fn projected_half_width(obb: &Obb, axis: Vec3) -> f32 {
    (obb.half_extents.x * axis.dot(obb.axis(0))).abs()
        + (obb.half_extents.y * axis.dot(obb.axis(1))).abs()
        + (obb.half_extents.z * axis.dot(obb.axis(2))).abs()
}

/// OBB-AABB overlap test: the AABB is promoted to an identity-rotation
/// OBB and the standard test is reused. The normal points from the OBB
/// toward the AABB.
pub fn obb_vs_aabb(obb: &Obb, aabb: &Aabb) -> Option<Contact> {
    obb_vs_obb(obb, &Obb::from_aabb(*aabb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn unit_obb(center: Vec3, rotation: Quat) -> Obb {
        Obb::from_parts(center, Vec3::ONE, rotation)
    }

    #[test]
    fn test_axis_aligned_overlap() {
        let a = unit_obb(Vec3::ZERO, Quat::IDENTITY);
        let b = unit_obb(Vec3::new(1.5, 0.0, 0.0), Quat::IDENTITY);

        let contact = obb_vs_obb(&a, &b).unwrap();
        assert_relative_eq!(contact.penetration, 0.5, epsilon = 1e-5);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_axis_aligned_separated() {
        let a = unit_obb(Vec3::ZERO, Quat::IDENTITY);
        let b = unit_obb(Vec3::new(2.5, 0.0, 0.0), Quat::IDENTITY);
        assert!(obb_vs_obb(&a, &b).is_none());
    }

    #[test]
    fn test_normal_orientation_flips_with_sides() {
        let a = unit_obb(Vec3::ZERO, Quat::IDENTITY);
        let b = unit_obb(Vec3::new(-1.5, 0.0, 0.0), Quat::IDENTITY);

        let contact = obb_vs_obb(&a, &b).unwrap();
        assert!(contact.normal.x < -0.9);
    }

    #[test]
    fn test_rotated_box_clears_gap() {
        // A box rotated 45 degrees about Z projects to sqrt(2) on X, so it
        // reaches a neighbor an axis-aligned box would miss
        let a = unit_obb(Vec3::ZERO, Quat::from_axis_angle(Vec3::Z, FRAC_PI_4));
        let b = unit_obb(Vec3::new(2.2, 0.0, 0.0), Quat::IDENTITY);
        assert!(obb_vs_obb(&a, &b).is_some());

        let far = unit_obb(Vec3::new(2.2 + 0.3, 0.0, 0.0), Quat::IDENTITY);
        assert!(obb_vs_obb(&a, &far).is_none());
    }

    #[test]
    fn test_parallel_axes_are_skipped() {
        // Identical rotations make all nine cross products zero; the test
        // must still succeed on the face normals alone
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), FRAC_PI_2);
        let a = unit_obb(Vec3::ZERO, q);
        let b = unit_obb(Vec3::new(0.5, 0.0, 0.0), q);
        assert!(obb_vs_obb(&a, &b).is_some());
    }

    #[test]
    fn test_obb_vs_aabb_promotion() {
        let obb = unit_obb(Vec3::ZERO, Quat::IDENTITY);
        let aabb = Aabb::from_center_half_extents(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE);

        let contact = obb_vs_aabb(&obb, &aabb).unwrap();
        assert_relative_eq!(contact.penetration, 0.5, epsilon = 1e-5);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1e-5);
    }
}

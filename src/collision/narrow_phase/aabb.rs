use crate::collision::contact::Contact;
use crate::geometry::Aabb;
use crate::math::Vec3;

/// AABB-AABB overlap test.
///
/// The axis with the smallest overlap becomes the contact normal, signed
/// so it points from `a` toward `b`.
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> Option<Contact> {
    let overlap_x = (a.max.x - b.min.x).min(b.max.x - a.min.x);
    let overlap_y = (a.max.y - b.min.y).min(b.max.y - a.min.y);
    let overlap_z = (a.max.z - b.min.z).min(b.max.z - a.min.z);

    if overlap_x <= 0.0 || overlap_y <= 0.0 || overlap_z <= 0.0 {
        return None;
    }

    let mut penetration = overlap_x;
    let mut normal = Vec3::X;

    if overlap_y < penetration {
        penetration = overlap_y;
        normal = Vec3::Y;
    }
    if overlap_z < penetration {
        penetration = overlap_z;
        normal = Vec3::Z;
    }

    if (b.center() - a.center()).dot(normal) < 0.0 {
        normal = -normal;
    }

    Some(Contact {
        normal,
        penetration,
    })
}

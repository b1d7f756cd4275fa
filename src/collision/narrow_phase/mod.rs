mod aabb;
mod sat;
mod sphere;

pub use aabb::aabb_vs_aabb;
pub use sat::{obb_vs_aabb, obb_vs_obb};
pub use sphere::sphere_vs_sphere;

use crate::collision::contact::Contact;
use crate::dynamics::{RigidBody, ShapeKind};
use crate::geometry::{Aabb, Obb};

/// Tests two bodies for overlap, dispatching on their shape tags.
///
/// The returned contact normal always points from `a` toward `b`.
/// Sphere-box pairings are unsupported and yield no contact.
pub fn collide(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    match (a.shape, b.shape) {
        (ShapeKind::Sphere, ShapeKind::Sphere) => sphere_vs_sphere(a, b),
        (ShapeKind::Aabb, ShapeKind::Aabb) => {
            let box_a = Aabb::from_center_half_extents(a.position, a.half_extents);
            let box_b = Aabb::from_center_half_extents(b.position, b.half_extents);
            aabb_vs_aabb(&box_a, &box_b)
        }
        (ShapeKind::Obb, ShapeKind::Obb) => {
            let obb_a = Obb::from_parts(a.position, a.half_extents, a.rotation);
            let obb_b = Obb::from_parts(b.position, b.half_extents, b.rotation);
            obb_vs_obb(&obb_a, &obb_b)
        }
        (ShapeKind::Obb, ShapeKind::Aabb) => {
            let obb = Obb::from_parts(a.position, a.half_extents, a.rotation);
            let aabb = Aabb::from_center_half_extents(b.position, b.half_extents);
            obb_vs_aabb(&obb, &aabb)
        }
        (ShapeKind::Aabb, ShapeKind::Obb) => {
            let obb = Obb::from_parts(b.position, b.half_extents, b.rotation);
            let aabb = Aabb::from_center_half_extents(a.position, a.half_extents);
            obb_vs_aabb(&obb, &aabb).map(|contact| Contact {
                normal: -contact.normal,
                penetration: contact.penetration,
            })
        }
        _ => None,
    }
}

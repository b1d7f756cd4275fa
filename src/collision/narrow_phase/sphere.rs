use crate::collision::contact::Contact;
use crate::dynamics::RigidBody;
use crate::math::Vec3;

/// Sphere-sphere overlap test.
///
/// Overlap exists when the center distance is less than the radius sum.
/// Coincident centers fall back to a +X normal so resolution still has a
/// direction to push along.
pub fn sphere_vs_sphere(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    let delta = b.position - a.position;
    let (normal, distance) = delta.normalize_with_length();
    let penetration = a.radius + b.radius - distance;

    if penetration <= 0.0 {
        return None;
    }

    let normal = if distance > 0.0 { normal } else { Vec3::X };

    Some(Contact {
        normal,
        penetration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sphere(pos: Vec3, radius: f32) -> RigidBody {
        RigidBody::new().with_position(pos).with_radius(radius)
    }

    #[test]
    fn test_overlapping_spheres() {
        let a = sphere(Vec3::ZERO, 1.0);
        let b = sphere(Vec3::new(1.5, 0.0, 0.0), 1.0);

        let contact = sphere_vs_sphere(&a, &b).unwrap();
        assert_relative_eq!(contact.penetration, 0.5);
        assert_relative_eq!(contact.normal.x, 1.0);
    }

    #[test]
    fn test_separated_spheres() {
        let a = sphere(Vec3::ZERO, 1.0);
        let b = sphere(Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(sphere_vs_sphere(&a, &b).is_none());

        let c = sphere(Vec3::new(3.0, 0.0, 0.0), 1.0);
        assert!(sphere_vs_sphere(&a, &c).is_none());
    }

    #[test]
    fn test_coincident_centers_default_normal() {
        let a = sphere(Vec3::ZERO, 1.0);
        let b = sphere(Vec3::ZERO, 1.0);

        let contact = sphere_vs_sphere(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec3::X);
        assert_relative_eq!(contact.penetration, 2.0);
    }

    #[test]
    fn test_normal_points_a_to_b() {
        let a = sphere(Vec3::new(1.0, 0.0, 0.0), 1.0);
        let b = sphere(Vec3::ZERO, 1.0);

        let contact = sphere_vs_sphere(&a, &b).unwrap();
        assert_relative_eq!(contact.normal.x, -1.0);
    }
}

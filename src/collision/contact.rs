use crate::dynamics::RigidBody;
use crate::math::Vec3;

/// A handle to a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    /// Invalid/null body handle
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new body handle
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the index of this handle
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this handle is valid
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// An unordered candidate pair from the broad phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// First body (always has the smaller handle)
    pub body_a: BodyHandle,
    /// Second body (always has the larger handle)
    pub body_b: BodyHandle,
}

impl CollisionPair {
    /// Creates a new collision pair, ensuring consistent ordering
    pub fn new(a: BodyHandle, b: BodyHandle) -> Self {
        if a.0 <= b.0 {
            Self {
                body_a: a,
                body_b: b,
            }
        } else {
            Self {
                body_a: b,
                body_b: a,
            }
        }
    }
}

/// A discrete overlap between two bodies for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit contact normal, oriented from body A toward body B
    pub normal: Vec3,
    /// Penetration depth, positive when overlapping
    pub penetration: f32,
}

const CORRECTION_PERCENT: f32 = 0.2;
const PENETRATION_SLOP: f32 = 0.01;
const TANGENT_SPEED_EPSILON: f32 = 1e-6;

/// Resolves a contact between two bodies with positional correction,
/// a restitution impulse and Coulomb friction.
///
/// One policy for every shape pairing: restitution combines as the minimum
/// of the two materials, friction as the geometric mean. Bodies separate
/// along the normal in proportion to their inverse masses. If both bodies
/// are static nothing happens.
pub fn resolve_contact(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) {
    let inv_mass_sum = a.inv_mass + b.inv_mass;
    if inv_mass_sum == 0.0 {
        return;
    }

    // Positional correction, leaving a small slop to avoid jitter
    let depth = (contact.penetration - PENETRATION_SLOP).max(0.0);
    let correction = contact.normal * (depth * CORRECTION_PERCENT / inv_mass_sum);
    a.position -= correction * a.inv_mass;
    b.position += correction * b.inv_mass;

    let relative_velocity = b.velocity - a.velocity;
    let vel_along_normal = relative_velocity.dot(contact.normal);

    // Already separating
    if vel_along_normal > 0.0 {
        return;
    }

    let e = a.material.combine_restitution(b.material);
    let j = -(1.0 + e) * vel_along_normal / inv_mass_sum;
    let impulse = contact.normal * j;
    a.velocity -= impulse * a.inv_mass;
    b.velocity += impulse * b.inv_mass;

    // Friction acts on the post-impulse tangential velocity
    let relative_velocity = b.velocity - a.velocity;
    let vn = relative_velocity.dot(contact.normal);
    let tangent_velocity = relative_velocity - contact.normal * vn;
    let (tangent_dir, tangent_speed) = tangent_velocity.normalize_with_length();
    if tangent_speed <= TANGENT_SPEED_EPSILON {
        return;
    }

    let jt = -tangent_speed / inv_mass_sum;
    let max_friction = a.material.combine_friction(b.material) * j.abs();
    let jt = jt.clamp(-max_friction, max_friction);

    let friction_impulse = tangent_dir * jt;
    a.velocity -= friction_impulse * a.inv_mass;
    b.velocity += friction_impulse * b.inv_mass;
}

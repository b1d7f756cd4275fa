use crate::collision::BodyHandle;
use crate::math::{Mat3, Quat, Vec3};

/// The collision shape carried by a body.
///
/// Sphere-box pairings are not supported shape combinations; the narrow
/// phase produces no contact for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Sphere described by `radius`
    Sphere,
    /// Axis-aligned box described by `half_extents`
    Aabb,
    /// Oriented box described by `half_extents` and the body's rotation
    Obb,
}

/// Surface material properties used when resolving contacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Bounciness in [0, 1]; 0 = no bounce, 1 = perfectly elastic
    pub restitution: f32,
    /// Coulomb friction coefficient
    pub friction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
        }
    }
}

impl Material {
    /// Combined restitution for a contact: the less bouncy surface wins
    #[inline]
    pub fn combine_restitution(self, other: Self) -> f32 {
        self.restitution.min(other.restitution)
    }

    /// Combined friction for a contact: geometric mean of both coefficients
    #[inline]
    pub fn combine_friction(self, other: Self) -> f32 {
        (self.friction * other.friction).sqrt()
    }
}

/// A rigid body in the physics simulation.
///
/// Bodies with zero inverse mass are static: they never move under any
/// force or impulse.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Handle identifying this body inside its world
    pub handle: BodyHandle,

    // Kinematic state
    /// Position in world space
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// Orientation
    pub rotation: Quat,
    /// Angular velocity (radians per second)
    pub angular_velocity: Vec3,

    // Mass properties
    /// Mass (kg); 0 for static bodies
    pub mass: f32,
    /// Inverse mass (0 for static)
    pub inv_mass: f32,
    /// Inertia tensor
    pub inertia_tensor: Mat3,
    /// Inverse inertia tensor (zero for static)
    pub inv_inertia_tensor: Mat3,

    // Collision shape
    /// Shape tag used by the narrow-phase dispatch
    pub shape: ShapeKind,
    /// Sphere radius
    pub radius: f32,
    /// Box half-dimensions
    pub half_extents: Vec3,
    /// Surface material
    pub material: Material,

    // Accumulators, cleared after every integration
    force: Vec3,
    torque: Vec3,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            handle: BodyHandle::INVALID,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            mass: 0.0,
            inv_mass: 0.0,
            inertia_tensor: Mat3::ZERO,
            inv_inertia_tensor: Mat3::ZERO,
            shape: ShapeKind::Sphere,
            radius: 1.0,
            half_extents: Vec3::splat(0.5),
            material: Material::default(),
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }
    }
}

impl RigidBody {
    /// Creates a new static body at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the linear velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the orientation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }

    /// Sets the collision shape tag
    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the sphere radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the box half-extents
    pub fn with_half_extents(mut self, half_extents: Vec3) -> Self {
        self.half_extents = half_extents;
        self
    }

    /// Sets the surface material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Sets restitution, clamped to [0, 1]
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.material.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Sets the friction coefficient
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.material.friction = friction.max(0.0);
        self
    }

    /// Sets the mass and derives the inverse mass properties.
    ///
    /// A non-positive mass makes the body static: zero inverse mass and a
    /// zero inverse inertia tensor, so neither forces nor torques have any
    /// effect. Dynamic bodies use a unit inertia tensor, so their angular
    /// response does not scale with mass.
    pub fn set_mass(&mut self, mass: f32) {
        if mass > 0.0 {
            self.mass = mass;
            self.inv_mass = 1.0 / mass;
            self.inertia_tensor = Mat3::IDENTITY;
            self.inv_inertia_tensor = Mat3::IDENTITY;
        } else {
            self.mass = 0.0;
            self.inv_mass = 0.0;
            self.inertia_tensor = Mat3::ZERO;
            self.inv_inertia_tensor = Mat3::ZERO;
        }
    }

    /// Sets the sphere radius
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Sets the box half-extents
    pub fn set_half_extents(&mut self, half_extents: Vec3) {
        self.half_extents = half_extents;
    }

    /// Returns true if this body never moves
    #[inline]
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Accumulated force, cleared on integration
    #[inline]
    pub fn force_accum(&self) -> Vec3 {
        self.force
    }

    /// Accumulated torque, cleared on integration
    #[inline]
    pub fn torque_accum(&self) -> Vec3 {
        self.torque
    }

    /// Applies a force at the center of mass
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Applies a force at a world point, inducing torque about the center
    pub fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.force += force;
        self.torque += (point - self.position).cross(force);
    }

    /// Applies a torque
    pub fn apply_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    /// Clears accumulated forces and torques. Idempotent.
    pub fn clear_forces(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    /// Advances the body by one timestep using semi-implicit Euler.
    ///
    /// No-op for static bodies. Position is updated with the pre-step
    /// velocity plus the half acceleration term, then velocity picks up the
    /// full acceleration. Orientation follows the first-order quaternion
    /// update and is renormalized. Accumulators are cleared afterwards.
    pub fn integrate(&mut self, dt: f32) {
        if self.inv_mass == 0.0 {
            return;
        }

        let acceleration = self.force * self.inv_mass;
        self.position += self.velocity * dt + acceleration * (0.5 * dt * dt);
        self.velocity += acceleration * dt;

        let angular_acceleration = self.inv_inertia_tensor * self.torque;
        self.angular_velocity += angular_acceleration * dt;
        self.rotation = self.rotation.integrate(self.angular_velocity, dt);

        self.clear_forces();
    }
}

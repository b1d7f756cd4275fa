//! # GridPhy
//!
//! A real-time 3D rigid body physics engine built around a uniform-grid
//! broad phase.
//!
//! ## Features
//!
//! - **Rigid Body Dynamics**: semi-implicit Euler integration of linear and
//!   angular motion, with static bodies expressed as zero inverse mass
//! - **Broad Phase**: uniform hash grid producing candidate pairs from
//!   occupied neighboring cells
//! - **Narrow Phase**: sphere-sphere, AABB-AABB and SAT-based OBB tests
//! - **Contact Resolution**: impulse response with restitution, Coulomb
//!   friction and mass-weighted positional correction
//! - **Joints**: point-to-point, hinge, slider, distance and cone-twist
//!   constraints solved at the velocity level
//!
//! ## Quick Start
//!
//! ```rust
//! use gridphy::prelude::*;
//!
//! let mut world = World::new(WorldConfig::default())?;
//!
//! // A static floor sphere and a ball dropped onto it
//! let _floor = world.add_body(RigidBody::new().with_radius(1.0));
//! let ball = world.add_body(
//!     RigidBody::new()
//!         .with_mass(1.0)
//!         .with_position(Vec3::new(0.0, 5.0, 0.0))
//!         .with_radius(0.5),
//! );
//!
//! // Fixed-step simulation loop
//! for _ in 0..600 {
//!     world.advance(1.0 / 60.0);
//! }
//!
//! let pos = world.body(ball).map(|b| b.position);
//! # let _ = pos;
//! # Ok::<(), gridphy::PhysicsError>(())
//! ```

pub mod collision;
pub mod constraints;
pub mod dynamics;
mod error;
pub mod geometry;
pub mod math;
mod world;

pub use error::PhysicsError;
pub use world::{World, WorldConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{BodyHandle, CollisionPair, Contact};
    pub use crate::constraints::{
        ConeTwistJoint, DistanceJoint, HingeJoint, Joint, JointHandle, PointToPointJoint,
        SliderJoint,
    };
    pub use crate::dynamics::{Material, RigidBody, ShapeKind};
    pub use crate::geometry::{Aabb, Obb};
    pub use crate::math::{Mat3, Quat, Vec3};
    pub use crate::{PhysicsError, World, WorldConfig};
}

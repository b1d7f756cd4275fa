mod rigid_body;

pub use rigid_body::{Material, RigidBody, ShapeKind};

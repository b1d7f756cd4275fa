pub mod broad_phase;
pub mod contact;
pub mod narrow_phase;

pub use broad_phase::{GridCoord, UniformGrid};
pub use contact::{resolve_contact, BodyHandle, CollisionPair, Contact};
pub use narrow_phase::collide;

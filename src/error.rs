use thiserror::Error;

use crate::collision::BodyHandle;

/// Errors reported by fallible construction and setup paths.
///
/// Degenerate geometry during simulation (zero-length axes, coincident
/// centers, zero combined inverse mass) is handled by policy in the hot
/// paths and never surfaces as an error.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    /// Grid cell size must be strictly positive and finite
    #[error("grid cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    /// Fixed timestep must be strictly positive and finite
    #[error("fixed timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    /// A joint referenced a body handle that does not resolve to a live body
    #[error("body handle {0:?} does not refer to a live body")]
    InvalidBodyHandle(BodyHandle),
}

use std::collections::HashMap;

use crate::collision::contact::{BodyHandle, CollisionPair};
use crate::dynamics::RigidBody;
use crate::error::PhysicsError;
use crate::math::Vec3;

/// Integer coordinate of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoord {
    /// Chebyshev adjacency: true when the cells are identical or touch,
    /// including diagonally
    #[inline]
    fn is_neighbor(self, other: Self) -> bool {
        (self.x - other.x).abs() <= 1
            && (self.y - other.y).abs() <= 1
            && (self.z - other.z).abs() <= 1
    }
}

/// Uniform-grid broad phase.
///
/// Bodies are bucketed by cell each step and only bodies in the same or
/// adjacent cells become candidate pairs. The grid is a pure candidate
/// generator: false positives are fine, and no true overlap is missed as
/// long as the cell size is at least the largest body extent.
pub struct UniformGrid {
    cell_size: f32,
    grid: HashMap<GridCoord, Vec<BodyHandle>>,
}

impl UniformGrid {
    /// Creates a grid with the given cell size.
    ///
    /// The cell size must be strictly positive and finite.
    pub fn new(cell_size: f32) -> Result<Self, PhysicsError> {
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(PhysicsError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            grid: HashMap::new(),
        })
    }

    /// Returns the cell size
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Computes the cell coordinate containing a world position.
    /// Floors toward negative infinity on each axis.
    pub fn cell_coord(&self, pos: Vec3) -> GridCoord {
        GridCoord {
            x: (pos.x / self.cell_size).floor() as i32,
            y: (pos.y / self.cell_size).floor() as i32,
            z: (pos.z / self.cell_size).floor() as i32,
        }
    }

    /// Rebuilds the grid from scratch from the current body positions
    pub fn update<'a>(&mut self, bodies: impl Iterator<Item = &'a RigidBody>) {
        self.grid.clear();
        for body in bodies {
            let coord = self.cell_coord(body.position);
            self.grid.entry(coord).or_default().push(body.handle);
        }
    }

    /// Returns all candidate pairs: bodies sharing a cell plus bodies in
    /// cells at Chebyshev distance 1. Each unordered pair appears at most
    /// once; bodies in non-adjacent cells never pair up.
    pub fn potential_pairs(&self) -> Vec<CollisionPair> {
        let mut pairs = Vec::new();

        let occupied: Vec<_> = self.grid.iter().collect();

        for i in 0..occupied.len() {
            let (coord_a, cell_a) = occupied[i];

            // Pairs within the same cell
            for j in 0..cell_a.len() {
                for k in (j + 1)..cell_a.len() {
                    pairs.push(CollisionPair::new(cell_a[j], cell_a[k]));
                }
            }

            // Pairs across adjacent occupied cells; the i < j ordering
            // visits each cell pair once
            for j in (i + 1)..occupied.len() {
                let (coord_b, cell_b) = occupied[j];
                if !coord_a.is_neighbor(*coord_b) {
                    continue;
                }
                for &handle_a in cell_a {
                    for &handle_b in cell_b {
                        pairs.push(CollisionPair::new(handle_a, handle_b));
                    }
                }
            }
        }

        pairs
    }
}

//! Isometric grid <-> world coordinate mapping.
//!
//! The projection is the standard diamond layout: grid X runs toward the
//! lower-right of the screen, grid Y toward the lower-left, logical height
//! maps straight onto world Y. The mapping is affine and bijective over
//! integer grid coordinates as long as both tile extents are positive, so
//! `world_to_grid(grid_to_world(p, h)) == p` holds for any height.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{HEIGHT_SCALE, TILE_HEIGHT, TILE_WIDTH};

/// Integer grid coordinate. The key of the sparse tile store.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Isometric projection parameters.
///
/// `grid_to_world` is the single source of truth for tile world positions;
/// nothing in the workspace stores a world position independently.
#[derive(Resource, Debug, Clone, Copy)]
pub struct IsoProjection {
    pub tile_width: f32,
    pub tile_height: f32,
    pub height_scale: f32,
}

impl Default for IsoProjection {
    fn default() -> Self {
        Self {
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            height_scale: HEIGHT_SCALE,
        }
    }
}

impl IsoProjection {
    /// World-space position of the center of the cell at `pos` with the
    /// given logical height.
    pub fn grid_to_world(&self, pos: GridPos, height: f32) -> Vec3 {
        let (x, y) = (pos.x as f32, pos.y as f32);
        Vec3::new(
            (x - y) * self.tile_width * 0.5,
            height * self.height_scale,
            (x + y) * self.tile_height * 0.5,
        )
    }

    /// Inverse of [`grid_to_world`](Self::grid_to_world), ignoring world Y.
    ///
    /// Solves the 2x2 linear system and rounds to the nearest cell, so any
    /// world point inside a cell's diamond maps back to that cell.
    pub fn world_to_grid(&self, world: Vec3) -> GridPos {
        let a = 2.0 * world.x / self.tile_width; // x - y
        let b = 2.0 * world.z / self.tile_height; // x + y
        GridPos::new(
            ((a + b) * 0.5).round() as i32,
            ((b - a) * 0.5).round() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_roundtrip() {
        let proj = IsoProjection::default();
        for gx in [-17, -1, 0, 1, 50, 255] {
            for gy in [-9, 0, 3, 128, 255] {
                for height in [0.0, 0.75, 12.5] {
                    let pos = GridPos::new(gx, gy);
                    let world = proj.grid_to_world(pos, height);
                    assert_eq!(proj.world_to_grid(world), pos);
                }
            }
        }
    }

    #[test]
    fn test_height_only_moves_y() {
        let proj = IsoProjection::default();
        let pos = GridPos::new(4, -2);
        let low = proj.grid_to_world(pos, 0.0);
        let high = proj.grid_to_world(pos, 3.0);
        assert_eq!(low.x, high.x);
        assert_eq!(low.z, high.z);
        assert!(high.y > low.y);
    }

    #[test]
    fn test_off_center_points_round_to_nearest_cell() {
        let proj = IsoProjection::default();
        let center = proj.grid_to_world(GridPos::new(7, 7), 0.0);
        // Nudge well inside the cell diamond.
        let nudged = center + Vec3::new(proj.tile_width * 0.2, 0.0, 0.0);
        assert_eq!(proj.world_to_grid(nudged), GridPos::new(7, 7));
    }

    #[test]
    fn test_nonuniform_tile_extents() {
        let proj = IsoProjection {
            tile_width: 4.0,
            tile_height: 2.0,
            height_scale: 1.0,
        };
        for gx in -3..3 {
            for gy in -3..3 {
                let pos = GridPos::new(gx, gy);
                assert_eq!(proj.world_to_grid(proj.grid_to_world(pos, 1.0)), pos);
            }
        }
    }
}

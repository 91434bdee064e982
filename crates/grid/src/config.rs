/// Footprint of one tile along the world X diagonal.
pub const TILE_WIDTH: f32 = 2.0;
/// Footprint of one tile along the world Z diagonal.
pub const TILE_HEIGHT: f32 = 2.0;

/// World-space Y units per logical height unit.
pub const HEIGHT_SCALE: f32 = 0.5;

/// Visual thickness of a tile at logical height 0, so flat tiles still
/// render as a slab instead of a degenerate quad.
pub const MIN_TILE_THICKNESS: f32 = 0.2;

/// Height step applied by the raise/lower tools.
pub const HEIGHT_STEP: f32 = 0.25;

pub const DEFAULT_MAP_WIDTH: u32 = 32;
pub const DEFAULT_MAP_HEIGHT: u32 = 32;

/// Seed used for the procedural map when none is configured.
pub const DEFAULT_SEED: u64 = 42;

//! Logical side of the isometric tile grid: coordinates, the sparse tile
//! store, map file parsing, procedural generation, and the ASCII debug view.
//! Everything visual lives in the `rendering` crate.

use bevy::prelude::*;

pub mod ascii_map;
pub mod config;
pub mod coords;
pub mod map_format;
pub mod map_io;
pub mod procedural;
pub mod tile;
pub mod tile_map;
pub mod world_init;

pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<coords::IsoProjection>()
            .init_resource::<tile_map::TileMap>()
            .init_resource::<procedural::ProcGenConfig>()
            .add_event::<map_io::LoadMapEvent>()
            .add_event::<map_io::SaveMapEvent>()
            .add_systems(Startup, world_init::init_world)
            .add_systems(
                Update,
                (map_io::handle_load_map_events, map_io::handle_save_map_events),
            );
    }
}

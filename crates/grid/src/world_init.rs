//! Startup map selection.
//!
//! `TILESCAPE_MAP=<path>` loads a JSON/CSV map file; otherwise a procedural
//! default map is generated. A failed file load logs the error and falls
//! back to the empty map the best-effort policy prescribes.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::map_io::load_map_file;
use crate::procedural::{generate_map, ProcGenConfig};
use crate::tile_map::TileMap;

/// Env var naming the map file to load at startup.
pub const MAP_PATH_ENV: &str = "TILESCAPE_MAP";

/// Marker resource: when present, `init_world` leaves the map empty.
/// Inserted by test harnesses that want a blank grid.
#[derive(Resource)]
pub struct SkipWorldInit;

pub fn init_world(
    mut map: ResMut<TileMap>,
    procgen: Res<ProcGenConfig>,
    skip: Option<Res<SkipWorldInit>>,
) {
    if skip.is_some() {
        return;
    }

    if let Ok(path) = std::env::var(MAP_PATH_ENV) {
        let path = PathBuf::from(path);
        match load_map_file(&path) {
            Ok(doc) => {
                *map = doc.into_map();
                info!("Loaded startup map {:?}: {} tiles", path, map.len());
                return;
            }
            Err(e) => {
                error!("Failed to load startup map {:?}: {e}", path);
                *map = TileMap::default();
                return;
            }
        }
    }

    *map = generate_map(&procgen);
    info!(
        "Generated {}x{} map from seed {} ({} tiles)",
        procgen.width,
        procgen.height,
        procgen.seed,
        map.len()
    );
}

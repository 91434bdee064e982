use bevy::prelude::*;
use std::path::PathBuf;

use grid::ascii_map::build_ascii_map;
use grid::map_io::{LoadMapEvent, SaveMapEvent};
use grid::tile_map::TileMap;

use super::types::{ActiveTool, StatusMessage};

/// File used by the quick save/load keys.
pub const QUICKSAVE_PATH: &str = "map_autosave.json";

/// Quick-access tool shortcuts (I/P/X/R/L).
pub fn keyboard_tool_switch(keys: Res<ButtonInput<KeyCode>>, mut tool: ResMut<ActiveTool>) {
    if keys.just_pressed(KeyCode::KeyI) {
        *tool = ActiveTool::Inspect;
    }
    if keys.just_pressed(KeyCode::KeyP) {
        *tool = ActiveTool::Place;
    }
    if keys.just_pressed(KeyCode::KeyX) {
        *tool = ActiveTool::Remove;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        *tool = ActiveTool::Raise;
    }
    if keys.just_pressed(KeyCode::KeyL) {
        *tool = ActiveTool::Lower;
    }
}

/// Escape clears the selection and falls back to the Inspect tool.
pub fn handle_escape_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut tool: ResMut<ActiveTool>,
    mut map: ResMut<TileMap>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        if map.selected_pos().is_some() {
            map.clear_selection();
        }
        *tool = ActiveTool::Inspect;
    }
}

/// F3 dumps the ASCII map view to the log.
pub fn debug_dump_map(keys: Res<ButtonInput<KeyCode>>, map: Res<TileMap>) {
    if keys.just_pressed(KeyCode::F3) {
        info!("\n{}", build_ascii_map(&map));
    }
}

/// F5/F9: quick save / quick load through the map IO events.
pub fn quick_save_load(
    keys: Res<ButtonInput<KeyCode>>,
    mut save_events: EventWriter<SaveMapEvent>,
    mut load_events: EventWriter<LoadMapEvent>,
    mut status: ResMut<StatusMessage>,
) {
    if keys.just_pressed(KeyCode::F5) {
        save_events.send(SaveMapEvent(PathBuf::from(QUICKSAVE_PATH)));
        status.set(format!("Saving {QUICKSAVE_PATH}"), false);
    }
    if keys.just_pressed(KeyCode::F9) {
        load_events.send(LoadMapEvent(PathBuf::from(QUICKSAVE_PATH)));
        status.set(format!("Loading {QUICKSAVE_PATH}"), false);
    }
}

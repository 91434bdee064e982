use bevy::prelude::*;
use bevy_egui::EguiContexts;

use grid::config::HEIGHT_STEP;
use grid::coords::GridPos;
use grid::tile::TileRecord;
use grid::tile_map::TileMap;

use crate::camera::LeftClickDrag;
use crate::egui_guard::egui_wants_pointer;

use super::types::{ActiveTool, CursorGridPos, PlaceKind, StatusMessage};

/// Apply `tool` at `pos`. Returns the status line to show, with an error
/// flag. Pure over the tile store so the tests can drive it directly.
pub fn apply_tool_at(
    map: &mut TileMap,
    tool: ActiveTool,
    pos: GridPos,
    place_kind: &str,
) -> (String, bool) {
    match tool {
        ActiveTool::Inspect => match map.toggle_exclusive_selection(pos) {
            Some(pos) => (format!("Selected tile {pos}"), false),
            None => ("Selection cleared".to_string(), false),
        },
        ActiveTool::Place => {
            let mut tile = TileRecord::new(place_kind, 0.0);
            tile.navigation.insert("walk".to_string(), true);
            let replaced = map.insert(pos, tile);
            match replaced {
                Some(old) => (format!("Replaced {} at {pos}", old.kind), false),
                None => (format!("Placed {place_kind} at {pos}"), false),
            }
        }
        ActiveTool::Remove => match map.remove(pos) {
            Some(old) => (format!("Removed {} at {pos}", old.kind), false),
            None => (format!("Nothing to remove at {pos}"), true),
        },
        ActiveTool::Raise | ActiveTool::Lower => {
            let step = if tool == ActiveTool::Raise {
                HEIGHT_STEP
            } else {
                -HEIGHT_STEP
            };
            match map.get_mut(pos) {
                Some(tile) => {
                    tile.height = (tile.height + step).max(0.0);
                    (format!("Height at {pos}: {:.2}", tile.height), false)
                }
                None => (format!("No tile at {pos}"), true),
            }
        }
    }
}

/// Left-click tool dispatch. Fires on release so a drag that started as a
/// click can still become a camera pan; must run before the camera's
/// left-drag system resets the gesture state.
pub fn handle_tool_input(
    buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorGridPos>,
    left_drag: Res<LeftClickDrag>,
    tool: Res<ActiveTool>,
    place_kind: Res<PlaceKind>,
    mut contexts: EguiContexts,
    mut map: ResMut<TileMap>,
    mut status: ResMut<StatusMessage>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    if left_drag.is_dragging || !cursor.valid {
        return;
    }
    if egui_wants_pointer(&mut contexts) {
        return;
    }

    let (text, is_error) = apply_tool_at(&mut map, *tool, cursor.grid, &place_kind.0);
    status.set(text, is_error);
}

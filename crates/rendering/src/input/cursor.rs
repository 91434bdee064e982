use bevy::prelude::*;
use bevy_egui::EguiContexts;

use grid::coords::IsoProjection;
use grid::tile_map::TileMap;

use crate::egui_guard::egui_wants_pointer;

use super::types::{CursorGridPos, StatusMessage};

/// Intersect a camera pick ray with the Y=0 ground plane.
pub fn ray_to_ground(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.y.abs() <= 0.001 {
        return None;
    }
    let t = -origin.y / direction.y;
    if t > 0.0 {
        Some(origin + direction * t)
    } else {
        None
    }
}

/// Each frame, cast the cursor into the world and record which cell it hits.
/// No physics engine involved; the ground is an analytic plane.
pub fn update_cursor_grid_pos(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    proj: Res<IsoProjection>,
    mut cursor: ResMut<CursorGridPos>,
) {
    cursor.valid = false;

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    let Some(screen_pos) = window.cursor_position() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) else {
        return;
    };
    let Some(hit) = ray_to_ground(ray.origin, *ray.direction) else {
        return;
    };

    cursor.world = hit;
    cursor.grid = proj.world_to_grid(hit);
    cursor.valid = true;
}

/// Move the exclusive hover highlight to the tile under the cursor.
/// Only touches the map when the hover target actually changed, so change
/// detection doesn't fire every frame.
pub fn update_hover(
    cursor: Res<CursorGridPos>,
    mut contexts: EguiContexts,
    mut map: ResMut<TileMap>,
) {
    let target = if cursor.valid && !egui_wants_pointer(&mut contexts) {
        Some(cursor.grid).filter(|pos| map.contains(*pos))
    } else {
        None
    };

    if map.highlighted_pos() != target {
        map.set_exclusive_highlight(target);
    }
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}

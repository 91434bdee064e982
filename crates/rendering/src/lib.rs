//! Visual side of the tile grid: camera, tile visuals, picking, and tools.

use bevy::prelude::*;

pub mod camera;
pub mod camera_smoothing;
pub mod egui_guard;
pub mod input;
pub mod tile_render;

use camera::{CameraDrag, CameraOrbitDrag, LeftClickDrag};
use camera_smoothing::{CameraSmoothingConfig, CameraTarget, LastSmoothed};
use input::{ActiveTool, CursorGridPos, PlaceKind, StatusMessage};
use tile_render::TileVisualIndex;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraDrag>()
            .init_resource::<CameraOrbitDrag>()
            .init_resource::<LeftClickDrag>()
            .init_resource::<CameraTarget>()
            .init_resource::<CameraSmoothingConfig>()
            .init_resource::<LastSmoothed>()
            .init_resource::<CursorGridPos>()
            .init_resource::<ActiveTool>()
            .init_resource::<PlaceKind>()
            .init_resource::<StatusMessage>()
            .init_resource::<TileVisualIndex>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    camera_smoothing::init_camera_target,
                    setup_lighting,
                    tile_render::setup_tile_assets,
                )
                    .chain()
                    .after(grid::world_init::init_world),
            )
            .add_systems(
                Update,
                (
                    input::update_cursor_grid_pos,
                    input::update_hover,
                    // Tool dispatch reads the drag state of the previous
                    // frame, so it must run before the camera consumes the
                    // left-button gesture.
                    input::handle_tool_input,
                    camera::camera_left_drag,
                    camera::camera_pan_keyboard,
                    camera::camera_pan_drag,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::camera_home,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    camera_smoothing::sync_target_from_external_changes,
                    camera_smoothing::smooth_camera_to_target,
                    camera::apply_orbit_camera,
                )
                    .chain()
                    .after(camera::camera_home),
            )
            .add_systems(
                Update,
                (
                    input::keyboard_tool_switch,
                    input::handle_escape_key,
                    input::debug_dump_map,
                    input::quick_save_load,
                    input::tick_status_message,
                    tile_render::sync_tile_visuals,
                ),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.6, 0.0)),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
    });
}

//! Orbital camera: the camera circles a focus point on the ground plane.
//!
//! Input systems write the *desired* state to [`CameraTarget`]
//! (see `camera_smoothing`); the smoothing system moves [`OrbitCamera`]
//! toward it, and `apply_orbit_camera` pushes the result into the actual
//! `Camera3d` transform.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use grid::coords::IsoProjection;
use grid::tile_map::TileMap;

use crate::camera_smoothing::CameraTarget;

const PAN_SPEED: f32 = 25.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 4.0;
const MAX_DISTANCE: f32 = 250.0;
const MIN_PITCH: f32 = 10.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 85.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
const DRAG_PAN_SENSITIVITY: f32 = 0.05;

/// How far the focus may leave the occupied map extent.
const FOCUS_MARGIN: f32 = 10.0;

/// Pixels of mouse travel before a left press counts as a drag rather than
/// a tool click.
pub const LEFT_DRAG_THRESHOLD: f32 = 5.0;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Ground point the camera looks at.
    pub focus: Vec3,
    /// Horizontal rotation in radians.
    pub yaw: f32,
    /// Elevation angle in radians, clamped between MIN_PITCH and MAX_PITCH.
    pub pitch: f32,
    /// Distance from the focus point.
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 50.0_f32.to_radians(),
            distance: 50.0,
        }
    }
}

/// Cursor bookkeeping shared by the drag gestures: tracks whether the button
/// is held and yields the cursor delta since the previous frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DragState {
    active: bool,
    last_pos: Vec2,
}

impl DragState {
    /// Feed the current button/cursor state for this frame. Returns the drag
    /// delta once the gesture is in progress; the first held frame only
    /// anchors the cursor. Losing the cursor mid-drag pauses the gesture
    /// without ending it.
    pub fn update(&mut self, held: bool, cursor: Option<Vec2>) -> Option<Vec2> {
        if !held {
            self.active = false;
            return None;
        }
        let pos = cursor?;
        if !self.active {
            self.active = true;
            self.last_pos = pos;
            return None;
        }
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        Some(delta)
    }
}

/// Middle-mouse pan gesture.
#[derive(Resource, Default)]
pub struct CameraDrag(pub DragState);

/// Right-mouse orbit gesture.
#[derive(Resource, Default)]
pub struct CameraOrbitDrag(pub DragState);

/// Left-button gesture; becomes a camera pan only after the cursor travels
/// [`LEFT_DRAG_THRESHOLD`] pixels from the press, so short presses stay tool
/// clicks.
#[derive(Resource, Default)]
pub struct LeftClickDrag {
    pub pressed: bool,
    pub start_pos: Vec2,
    pub is_dragging: bool,
    drag: DragState,
}

/// World-space extent of the occupied map, for focus clamping and the Home
/// key. The extent of an isometric diamond is the hull of its four corners.
fn map_extent(map: &TileMap, proj: &IsoProjection) -> (Vec3, Vec3) {
    let Some((min, max)) = map.bounds() else {
        return (Vec3::ZERO, Vec3::ZERO);
    };
    let corners = [
        proj.grid_to_world(min, 0.0),
        proj.grid_to_world(max, 0.0),
        proj.grid_to_world(grid::coords::GridPos::new(min.x, max.y), 0.0),
        proj.grid_to_world(grid::coords::GridPos::new(max.x, min.y), 0.0),
    ];
    let mut lo = corners[0];
    let mut hi = corners[0];
    for c in &corners[1..] {
        lo = lo.min(*c);
        hi = hi.max(*c);
    }
    (lo, hi)
}

fn clamp_focus(focus: &mut Vec3, map: &TileMap, proj: &IsoProjection) {
    let (lo, hi) = map_extent(map, proj);
    focus.x = focus.x.clamp(lo.x - FOCUS_MARGIN, hi.x + FOCUS_MARGIN);
    focus.z = focus.z.clamp(lo.z - FOCUS_MARGIN, hi.z + FOCUS_MARGIN);
}

/// Rotate an input-space direction into the ground plane for the given yaw,
/// so pans follow the screen rather than the world axes.
fn yaw_relative(dir: Vec2, yaw: f32) -> Vec2 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec2::new(
        dir.x * cos_yaw + dir.y * sin_yaw,
        -dir.x * sin_yaw + dir.y * cos_yaw,
    )
}

/// Pan scale grows with zoom so a gesture covers the same screen fraction
/// regardless of how far out the camera sits.
fn pan_scale(distance: f32) -> f32 {
    (distance / 50.0).max(0.2)
}

/// Apply a screen-space drag delta as a ground-plane pan of the target.
/// The world moves with the cursor, so the focus moves against it.
fn pan_by_screen_delta(
    target: &mut CameraTarget,
    delta: Vec2,
    map: &TileMap,
    proj: &IsoProjection,
) {
    let scale = pan_scale(target.distance) * DRAG_PAN_SENSITIVITY;
    let world = yaw_relative(-delta, target.yaw);
    target.focus.x += world.x * scale;
    target.focus.z += world.y * scale;
    clamp_focus(&mut target.focus, map, proj);
}

fn window_cursor(windows: &Query<&Window>) -> Option<Vec2> {
    windows.get_single().ok().and_then(|w| w.cursor_position())
}

/// Spherical-to-cartesian: camera position and look-at for the orbit state.
fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    (orbit.focus + Vec3::new(x, y, z), orbit.focus)
}

pub fn setup_camera(mut commands: Commands, map: Res<TileMap>, proj: Res<IsoProjection>) {
    let (lo, hi) = map_extent(&map, &proj);
    let orbit = OrbitCamera {
        focus: (lo + hi) * 0.5,
        ..default()
    };
    let (pos, look_at) = orbit_to_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(orbit);
}

/// Apply the smoothed orbit state to the camera transform when it changed.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit_to_transform(&orbit);
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// WASD/arrow keys: pan the focus along the ground plane, relative to yaw.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    map: Res<TileMap>,
    proj: Res<IsoProjection>,
    mut target: ResMut<CameraTarget>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    if dir == Vec2::ZERO {
        return;
    }

    let world = yaw_relative(dir.normalize(), target.yaw);
    let step = PAN_SPEED * pan_scale(target.distance) * time.delta_secs();
    target.focus.x += world.x * step;
    target.focus.z += world.y * step;
    clamp_focus(&mut target.focus, &map, &proj);
}

/// Middle-mouse drag: pan the focus.
pub fn camera_pan_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    map: Res<TileMap>,
    proj: Res<IsoProjection>,
    mut drag: ResMut<CameraDrag>,
    mut target: ResMut<CameraTarget>,
) {
    let cursor = window_cursor(&windows);
    if let Some(delta) = drag.0.update(buttons.pressed(MouseButton::Middle), cursor) {
        pan_by_screen_delta(&mut target, delta, &map, &proj);
    }
}

/// Right-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut target: ResMut<CameraTarget>,
) {
    let cursor = window_cursor(&windows);
    if let Some(delta) = drag.0.update(buttons.pressed(MouseButton::Right), cursor) {
        target.yaw += delta.x * ORBIT_SENSITIVITY;
        target.pitch = (target.pitch - delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }
}

/// Left-mouse drag: pan, once the gesture exceeds the click threshold.
pub fn camera_left_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    map: Res<TileMap>,
    proj: Res<IsoProjection>,
    mut left: ResMut<LeftClickDrag>,
    mut target: ResMut<CameraTarget>,
) {
    let cursor = window_cursor(&windows);

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(pos) = cursor {
            left.pressed = true;
            left.start_pos = pos;
            left.is_dragging = false;
            left.drag = DragState::default();
        }
    }
    if buttons.just_released(MouseButton::Left) {
        left.pressed = false;
        left.is_dragging = false;
    }
    if !left.pressed {
        return;
    }
    let Some(pos) = cursor else {
        return;
    };

    if !left.is_dragging && (pos - left.start_pos).length() > LEFT_DRAG_THRESHOLD {
        left.is_dragging = true;
    }
    if left.is_dragging {
        if let Some(delta) = left.drag.update(true, Some(pos)) {
            pan_by_screen_delta(&mut target, delta, &map, &proj);
        }
    }
}

/// Scroll wheel: zoom by scaling the orbit distance.
pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut target: ResMut<CameraTarget>) {
    let lines: f32 = scroll_evts
        .read()
        .map(|evt| match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        })
        .sum();
    if lines != 0.0 {
        let factor = (1.0 - lines * ZOOM_SPEED).max(0.1);
        target.distance = (target.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// Home key: recenter on the map and reset zoom.
pub fn camera_home(
    keys: Res<ButtonInput<KeyCode>>,
    map: Res<TileMap>,
    proj: Res<IsoProjection>,
    mut target: ResMut<CameraTarget>,
) {
    if keys.just_pressed(KeyCode::Home) {
        let (lo, hi) = map_extent(&map, &proj);
        target.focus = (lo + hi) * 0.5;
        target.distance = ((hi - lo).length() * 0.8).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid::coords::GridPos;
    use grid::tile::TileRecord;

    #[test]
    fn test_orbit_transform_looks_at_focus() {
        let orbit = OrbitCamera {
            focus: Vec3::new(3.0, 0.0, -2.0),
            yaw: 1.2,
            pitch: 0.9,
            distance: 40.0,
        };
        let (pos, look_at) = orbit_to_transform(&orbit);
        assert_eq!(look_at, orbit.focus);
        assert!(((pos - orbit.focus).length() - orbit.distance).abs() < 1e-3);
        assert!(pos.y > orbit.focus.y);
    }

    #[test]
    fn test_focus_clamped_to_map_extent() {
        let mut map = TileMap::default();
        map.insert(GridPos::new(0, 0), TileRecord::new("grass", 0.0));
        map.insert(GridPos::new(8, 8), TileRecord::new("grass", 0.0));
        let proj = IsoProjection::default();

        let mut focus = Vec3::new(1e6, 0.0, -1e6);
        clamp_focus(&mut focus, &map, &proj);
        let (lo, hi) = map_extent(&map, &proj);
        assert!(focus.x <= hi.x + FOCUS_MARGIN);
        assert!(focus.z >= lo.z - FOCUS_MARGIN);
    }

    #[test]
    fn test_empty_map_extent_is_origin() {
        let map = TileMap::default();
        let proj = IsoProjection::default();
        assert_eq!(map_extent(&map, &proj), (Vec3::ZERO, Vec3::ZERO));
    }

    #[test]
    fn test_drag_state_yields_deltas_between_frames() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(false, Some(Vec2::ZERO)), None);
        // First held frame anchors the cursor, no delta yet.
        assert_eq!(drag.update(true, Some(Vec2::new(10.0, 10.0))), None);
        assert_eq!(
            drag.update(true, Some(Vec2::new(13.0, 9.0))),
            Some(Vec2::new(3.0, -1.0))
        );
        // Release ends the gesture; a new press re-anchors.
        assert_eq!(drag.update(false, None), None);
        assert_eq!(drag.update(true, Some(Vec2::new(100.0, 100.0))), None);
    }

    #[test]
    fn test_drag_state_pauses_while_cursor_is_gone() {
        let mut drag = DragState::default();
        drag.update(true, Some(Vec2::ZERO));
        assert_eq!(drag.update(true, None), None);
        assert_eq!(
            drag.update(true, Some(Vec2::new(4.0, 0.0))),
            Some(Vec2::new(4.0, 0.0))
        );
    }

    #[test]
    fn test_yaw_relative_rotations() {
        let v = Vec2::new(1.0, 0.0);
        assert!((yaw_relative(v, 0.0) - v).length() < 1e-6);
        let turned = yaw_relative(v, std::f32::consts::FRAC_PI_2);
        assert!((turned - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_drag_pan_moves_against_cursor_and_clamps() {
        let mut map = TileMap::default();
        map.insert(GridPos::new(0, 0), TileRecord::new("grass", 0.0));
        let proj = IsoProjection::default();
        let mut target = CameraTarget::default();

        pan_by_screen_delta(&mut target, Vec2::new(10.0, 0.0), &map, &proj);
        assert!(target.focus.x < 0.0);

        // However long the drag, the focus stays inside the clamp margin.
        for _ in 0..1000 {
            pan_by_screen_delta(&mut target, Vec2::new(100.0, 0.0), &map, &proj);
        }
        assert!(target.focus.x >= -FOCUS_MARGIN - 1e-3);
    }
}

//! Camera smoothing.
//!
//! Input systems never move the camera directly; they write the pose they
//! want into [`CameraTarget`]. Each frame `smooth_camera_to_target` walks
//! [`OrbitCamera`] one exponential step toward that pose
//! (`value += (goal - value) * (1 - exp(-speed * dt))`, frame-rate
//! independent) and snaps a channel once its remainder drops below epsilon.
//!
//! Systems that write `OrbitCamera` directly (tests, scripted shots) are
//! treated as teleports: the mismatch against the last smoothed pose is
//! detected on the next frame and the target re-synced.

use bevy::prelude::*;

use crate::camera::OrbitCamera;

// Per-channel tolerances for treating two poses as the same pose.
const SYNC_TOLERANCE_FOCUS_SQ: f32 = 1e-4;
const SYNC_TOLERANCE_ANGLE: f32 = 1e-4;
const SYNC_TOLERANCE_DISTANCE: f32 = 1e-2;

#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraSmoothingConfig {
    /// Convergence speed; higher is snappier. At 8.0 the camera covers
    /// roughly 12% of the remaining distance per 60 Hz frame.
    pub speed: f32,
    /// Remaining-delta threshold below which a channel snaps to its goal.
    pub epsilon: f32,
}

impl Default for CameraSmoothingConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            epsilon: 0.001,
        }
    }
}

/// The pose the camera is heading for. Dereferences to [`OrbitCamera`] so
/// input systems manipulate it exactly like the live pose.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CameraTarget(pub OrbitCamera);

impl std::ops::Deref for CameraTarget {
    type Target = OrbitCamera;
    fn deref(&self) -> &OrbitCamera {
        &self.0
    }
}

impl std::ops::DerefMut for CameraTarget {
    fn deref_mut(&mut self) -> &mut OrbitCamera {
        &mut self.0
    }
}

/// Pose written by the most recent smoothing step; `None` until the startup
/// sync. A direct write to `OrbitCamera` shows up as a difference from this.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct LastSmoothed(pub Option<OrbitCamera>);

#[inline]
fn exp_lerp_factor(speed: f32, dt: f32) -> f32 {
    1.0 - (-speed * dt).exp()
}

/// One exponential step of a scalar channel, snapping inside `eps`.
fn step(value: f32, goal: f32, factor: f32, eps: f32) -> f32 {
    let delta = goal - value;
    if delta.abs() > eps {
        value + delta * factor
    } else {
        goal
    }
}

impl OrbitCamera {
    /// The pose one smoothing step closer to `goal`.
    fn stepped_toward(&self, goal: &OrbitCamera, factor: f32, eps: f32) -> OrbitCamera {
        let focus_delta = goal.focus - self.focus;
        let focus = if focus_delta.length_squared() > eps * eps {
            self.focus + focus_delta * factor
        } else {
            goal.focus
        };
        OrbitCamera {
            focus,
            yaw: step(self.yaw, goal.yaw, factor, eps),
            pitch: step(self.pitch, goal.pitch, factor, eps),
            distance: step(self.distance, goal.distance, factor, eps),
        }
    }

    /// Whether two poses coincide within the sync tolerances.
    fn matches(&self, other: &OrbitCamera) -> bool {
        (self.focus - other.focus).length_squared() <= SYNC_TOLERANCE_FOCUS_SQ
            && (self.yaw - other.yaw).abs() <= SYNC_TOLERANCE_ANGLE
            && (self.pitch - other.pitch).abs() <= SYNC_TOLERANCE_ANGLE
            && (self.distance - other.distance).abs() <= SYNC_TOLERANCE_DISTANCE
    }
}

/// Re-sync the target after a direct write to `OrbitCamera`.
/// Must run before `smooth_camera_to_target`.
pub fn sync_target_from_external_changes(
    orbit: Res<OrbitCamera>,
    mut target: ResMut<CameraTarget>,
    mut last: ResMut<LastSmoothed>,
) {
    let Some(last_pose) = last.0 else {
        return;
    };
    if !orbit.matches(&last_pose) {
        target.0 = *orbit;
        last.0 = Some(*orbit);
    }
}

/// Walk `OrbitCamera` one smoothing step toward `CameraTarget`. Skips the
/// write when already at the target so change detection stays quiet.
pub fn smooth_camera_to_target(
    target: Res<CameraTarget>,
    config: Res<CameraSmoothingConfig>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
    mut last: ResMut<LastSmoothed>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let factor = exp_lerp_factor(config.speed, dt);
    let next = orbit.stepped_toward(&target.0, factor, config.epsilon);
    if next != *orbit {
        *orbit = next;
    }
    last.0 = Some(next);
}

/// Adopt the pose `setup_camera` placed the camera at. Runs once at startup,
/// after `setup_camera`.
pub fn init_camera_target(
    orbit: Res<OrbitCamera>,
    mut target: ResMut<CameraTarget>,
    mut last: ResMut<LastSmoothed>,
) {
    target.0 = *orbit;
    last.0 = Some(*orbit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_lerp_factor_bounds() {
        assert!(exp_lerp_factor(8.0, 1.0 / 60.0) > 0.1);
        assert!(exp_lerp_factor(8.0, 1.0 / 60.0) < 0.15);
        assert!(exp_lerp_factor(8.0, 10.0) <= 1.0);
        assert_eq!(exp_lerp_factor(8.0, 0.0), 0.0);
    }

    #[test]
    fn test_factor_is_framerate_independent() {
        // Two 1/120s steps should cover the same ground as one 1/60s step.
        let one = exp_lerp_factor(8.0, 1.0 / 60.0);
        let half = exp_lerp_factor(8.0, 1.0 / 120.0);
        let two_steps = half + (1.0 - half) * half;
        assert!((one - two_steps).abs() < 1e-6);
    }

    #[test]
    fn test_step_moves_then_snaps() {
        let moved = step(0.0, 1.0, 0.25, 0.001);
        assert!((moved - 0.25).abs() < 1e-6);
        // Inside epsilon the channel lands exactly on the goal.
        assert_eq!(step(1.0, 1.0005, 0.25, 0.001), 1.0005);
    }

    #[test]
    fn test_pose_converges_exactly_onto_goal() {
        let goal = OrbitCamera {
            focus: Vec3::new(10.0, 0.0, -4.0),
            yaw: 1.0,
            pitch: 0.8,
            distance: 30.0,
        };
        let mut pose = OrbitCamera::default();
        let factor = exp_lerp_factor(8.0, 1.0 / 60.0);
        for _ in 0..500 {
            pose = pose.stepped_toward(&goal, factor, 0.001);
        }
        assert_eq!(pose, goal);
    }

    #[test]
    fn test_external_write_breaks_pose_match() {
        let pose = OrbitCamera::default();
        let mut moved = pose;
        assert!(pose.matches(&moved));
        moved.focus.x += 5.0;
        assert!(!pose.matches(&moved));
        // A sub-tolerance drift is not an external write.
        let mut drifted = pose;
        drifted.yaw += 1e-5;
        assert!(pose.matches(&drifted));
    }
}

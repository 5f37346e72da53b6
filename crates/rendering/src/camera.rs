use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use metrics::camera_framing::CameraPose;
use metrics::config::{IDLE_ROTATION_SPEED, IDLE_ROTATION_SPINUP, IDLE_ROTATION_WAIT};

use crate::interaction::PointerOverUi;
use crate::scene_lifecycle::SceneCamera;

const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 6000.0;
// Keep away from the poles so `looking_at` never degenerates.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const MIN_PITCH: f32 = -MAX_PITCH;
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Orbital camera model: the camera orbits a focus point.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_pose(CameraPose::INITIAL)
    }
}

impl OrbitCamera {
    /// Orbit parameters that place the camera exactly at `pose.position`.
    pub fn from_pose(pose: CameraPose) -> Self {
        let offset = pose.position - pose.target;
        let length = offset.length();
        if length <= f32::EPSILON {
            return Self {
                focus: pose.target,
                yaw: 0.0,
                pitch: 0.0,
                distance: MIN_DISTANCE,
            };
        }
        Self {
            focus: pose.target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / length).clamp(-1.0, 1.0).asin(),
            distance: length,
        }
    }

    pub fn position(&self) -> Vec3 {
        orbit_to_transform(self).0
    }
}

/// Whether the orbit controls react to user input. Attached by scene
/// initialization.
#[derive(Resource, Debug, Default)]
pub struct OrbitControls {
    pub attached: bool,
}

/// Idle auto-rotation: after a few seconds without user input the camera
/// slowly spins around its focus.
#[derive(Resource, Debug)]
pub struct IdleRotation {
    pub enabled: bool,
    /// Seconds since the last user camera input.
    pub idle_secs: f32,
}

impl Default for IdleRotation {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_secs: 0.0,
        }
    }
}

impl IdleRotation {
    pub fn interrupt(&mut self) {
        self.idle_secs = 0.0;
    }

    /// Current yaw speed in radians per second.
    pub fn speed(&self) -> f32 {
        if !self.enabled || self.idle_secs < IDLE_ROTATION_WAIT {
            return 0.0;
        }
        let ramp = ((self.idle_secs - IDLE_ROTATION_WAIT) / IDLE_ROTATION_SPINUP).min(1.0);
        IDLE_ROTATION_SPEED * ramp
    }
}

#[derive(Resource, Default)]
pub struct CameraDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub(crate) fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    // Spherical to cartesian offset from focus
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    let pos = orbit.focus + Vec3::new(x, y, z);
    (pos, orbit.focus)
}

/// Transform for a camera described by `orbit`.
pub(crate) fn camera_transform(orbit: &OrbitCamera) -> Transform {
    let (pos, look_at) = orbit_to_transform(orbit);
    Transform::from_translation(pos).looking_at(look_at, Vec3::Y)
}

/// System: apply OrbitCamera state to the scene camera's Transform.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<SceneCamera>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = camera_transform(&orbit);
}

/// Spin the camera around its focus while the user is idle.
pub fn auto_rotate_camera(
    time: Res<Time>,
    controls: Res<OrbitControls>,
    mut idle: ResMut<IdleRotation>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if !controls.attached {
        return;
    }
    idle.idle_secs += time.delta_secs();
    let speed = idle.speed();
    if speed > 0.0 {
        orbit.yaw += speed * time.delta_secs();
    }
}

/// Left-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    controls: Res<OrbitControls>,
    over_ui: Res<PointerOverUi>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut idle: ResMut<IdleRotation>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    if !controls.attached {
        drag.dragging = false;
        return;
    }

    if buttons.just_pressed(MouseButton::Left) && !over_ui.0 {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            if delta != Vec2::ZERO {
                orbit.yaw -= delta.x * ORBIT_SENSITIVITY;
                orbit.pitch =
                    (orbit.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
                idle.interrupt();
            }
            drag.last_pos = pos;
        }
    }
}

/// Right- or middle-mouse drag: pan focus along the ground plane.
pub fn camera_pan_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    controls: Res<OrbitControls>,
    over_ui: Res<PointerOverUi>,
    mut drag: ResMut<CameraDrag>,
    mut idle: ResMut<IdleRotation>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    if !controls.attached {
        drag.dragging = false;
        return;
    }
    let scale = orbit.distance / 1000.0;
    let pan_buttons = [MouseButton::Right, MouseButton::Middle];

    if buttons.any_just_pressed(pan_buttons) && !over_ui.0 {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.any_just_released(pan_buttons) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            if delta != Vec2::ZERO {
                // Rotate pan direction by current yaw
                let cos_yaw = orbit.yaw.cos();
                let sin_yaw = orbit.yaw.sin();
                let world_x = -delta.x * cos_yaw - delta.y * sin_yaw;
                let world_z = delta.x * sin_yaw - delta.y * cos_yaw;
                orbit.focus.x += world_x * scale;
                orbit.focus.z += world_z * scale;
                idle.interrupt();
            }
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel: zoom (change distance).
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    controls: Res<OrbitControls>,
    over_ui: Res<PointerOverUi>,
    mut idle: ResMut<IdleRotation>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if !controls.attached || over_ui.0 {
        scroll_evts.clear();
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        orbit.distance = (orbit.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        idle.interrupt();
    }
}

use crate::engine::camera::ViewerCamera;
use crate::engine::core::viewport::ViewportState;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    INITIAL_POSITION, ORBIT_DAMPING_FACTOR, ORBIT_PAN_SPEED, ORBIT_PITCH_LIMIT,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use std::f32::consts::TAU;

const MIN_RADIUS: f32 = 1e-3;
const ZOOM_STEP: f32 = 0.95;

/// Orbit camera state: a target point plus a spherical offset to the eye.
///
/// Input accumulates into pending deltas; `update` applies a damped fraction
/// of them each frame so motion eases out after the mouse stops.
#[derive(Resource, Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, zero looking down -Z from +Z.
    pub yaw: f32,
    /// Elevation above the target's horizontal plane.
    pub pitch: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    yaw_delta: f32,
    pitch_delta: f32,
    pan_delta: Vec3,
    zoom_scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::from_eye(INITIAL_POSITION, Vec3::ZERO)
    }
}

impl OrbitControls {
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let mut controls = Self {
            target,
            radius: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            pan_delta: Vec3::ZERO,
            zoom_scale: 1.0,
        };
        controls.look_from(eye, target);
        controls
    }

    /// Re-target the controls and place the eye, dropping any pending motion.
    pub fn look_from(&mut self, eye: Vec3, target: Vec3) {
        self.target = target;

        let offset = eye - target;
        let radius = offset.length();
        if radius > MIN_RADIUS {
            self.yaw = offset.x.atan2(offset.z);
            self.pitch = (offset.y / radius)
                .asin()
                .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        }
        self.radius = radius.max(MIN_RADIUS);

        self.yaw_delta = 0.0;
        self.pitch_delta = 0.0;
        self.pan_delta = Vec3::ZERO;
        self.zoom_scale = 1.0;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    /// Drag in pixels; a drag across the full viewport height is one turn.
    pub fn rotate(&mut self, drag: Vec2, viewport_height: f32) {
        let scale = TAU * self.rotate_speed / viewport_height.max(1.0);
        self.yaw_delta -= drag.x * scale;
        self.pitch_delta += drag.y * scale;
    }

    /// Drag in pixels; the target moves so the point under the cursor follows it.
    pub fn pan(&mut self, drag: Vec2, viewport_height: f32, fov: f32) {
        let world_per_pixel =
            2.0 * self.radius * (fov * 0.5).tan() / viewport_height.max(1.0) * self.pan_speed;
        let rotation = self.transform().rotation;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.pan_delta += (-right * drag.x + up * drag.y) * world_per_pixel;
    }

    /// Positive scroll moves the eye towards the target.
    pub fn dolly(&mut self, scroll: f32) {
        self.zoom_scale *= ZOOM_STEP.powf(self.zoom_speed * scroll);
    }

    /// Advance one frame and return the resulting camera transform.
    pub fn update(&mut self) -> Transform {
        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        self.yaw += self.yaw_delta * step;
        self.pitch = (self.pitch + self.pitch_delta * step)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.target += self.pan_delta * step;
        self.radius = (self.radius * self.zoom_scale).max(MIN_RADIUS);
        self.zoom_scale = 1.0;

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.yaw_delta *= decay;
            self.pitch_delta *= decay;
            self.pan_delta *= decay;
        } else {
            self.yaw_delta = 0.0;
            self.pitch_delta = 0.0;
            self.pan_delta = Vec3::ZERO;
        }

        self.transform()
    }
}

/// Per-frame controller: left drag orbits, right drag pans, wheel dollies.
pub fn orbit_camera_controller(
    mut controls: ResMut<OrbitControls>,
    mut cameras: Query<(&mut Transform, &Projection), With<ViewerCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    viewport: Res<ViewportState>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    let Ok((mut camera_transform, projection)) = cameras.single_mut() else {
        return;
    };

    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            controls.rotate(mouse_delta, viewport.height);
        } else if mouse_button.pressed(MouseButton::Right) {
            let fov = match projection {
                Projection::Perspective(perspective) => perspective.fov,
                _ => std::f32::consts::FRAC_PI_4,
            };
            controls.pan(mouse_delta, viewport.height, fov);
        }
    }

    if scroll_accum.abs() > f32::EPSILON {
        controls.dolly(scroll_accum);
    }

    *camera_transform = controls.update();
}

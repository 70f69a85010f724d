//! Damped orbit camera: drag to rotate around a target, scroll to dolly.

use std::f32::consts::{PI, TAU};

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::scene::SceneState;

const DEFAULT_DAMPING: f32 = 0.05;
const ZOOM_BASE: f32 = 0.95;
const MIN_RADIUS: f32 = 1.0;
const MAX_RADIUS: f32 = 500.0;
const POLE_EPSILON: f32 = 1e-4;
const PIXELS_PER_LINE: f32 = 100.0;

/// Spherical camera state around `target`.
///
/// Input accumulates into pending deltas. Each [`update`](Self::update)
/// applies a `damping` fraction of the pending rotation and decays the rest,
/// so motion eases out over the following frames.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    /// Angle around the Y axis, measured from +Z.
    pub azimuth: f32,
    /// Angle down from +Y.
    pub polar: f32,
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    delta_azimuth: f32,
    delta_polar: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            damping: DEFAULT_DAMPING,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            delta_azimuth: 0.0,
            delta_polar: 0.0,
            scale: 1.0,
        }
    }

    /// Queue a rotation, in radians, left and up.
    pub fn rotate(&mut self, left: f32, up: f32) {
        self.delta_azimuth -= left * self.rotate_speed;
        self.delta_polar -= up * self.rotate_speed;
    }

    /// Positive steps move toward the target.
    pub fn zoom(&mut self, steps: f32) {
        self.scale *= ZOOM_BASE.powf(steps * self.zoom_speed);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    /// Advance one frame and return the new eye position.
    pub fn update(&mut self) -> Vec3 {
        self.azimuth += self.delta_azimuth * self.damping;
        self.polar = (self.polar + self.delta_polar * self.damping)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.radius = (self.radius * self.scale).clamp(MIN_RADIUS, MAX_RADIUS);

        let decay = 1.0 - self.damping;
        self.delta_azimuth *= decay;
        self.delta_polar *= decay;
        self.scale = 1.0;

        self.eye()
    }

    pub fn pending_rotation(&self) -> Vec2 {
        Vec2::new(self.delta_azimuth, self.delta_polar)
    }
}

pub fn orbit_camera_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.add_systems(
        Update,
        orbit_input_system
            .before(update_orbit_cameras)
            .run_if(in_state(SceneState::Looping)),
    );
}

fn orbit_input_system(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
    mut cameras: Query<&mut OrbitControls>,
) {
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    let height = windows
        .get_single()
        .map(|window| window.height())
        .unwrap_or(720.0)
        .max(1.0);
    let drag = if mouse.pressed(MouseButton::Left) {
        motion.delta
    } else {
        Vec2::ZERO
    };
    let steps = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    };

    for mut controls in &mut cameras {
        if drag != Vec2::ZERO {
            controls.rotate(TAU * drag.x / height, TAU * drag.y / height);
        }
        if steps != 0.0 {
            controls.zoom(steps);
        }
    }
}

/// Apply damped orbit state to camera transforms. Runs every looping frame.
pub fn update_orbit_cameras(mut cameras: Query<(&mut OrbitControls, &mut Transform)>) {
    for (mut controls, mut transform) in &mut cameras {
        let eye = controls.update();
        *transform = Transform::from_translation(eye).looking_at(controls.target, Vec3::Y);
    }
}

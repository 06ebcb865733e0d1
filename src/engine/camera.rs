// First-person controller and camera
//
// Camera model:
//   - `position` is the player's feet; the eye sits `eye_height` above it
//   - Yaw/pitch from raw mouse motion (yaw = 0 looks down +Z, the corridor)
//   - WASD moves on XZ relative to yaw, one axis at a time so the player
//     slides along walls instead of sticking to them
//   - Gravity pulls the feet down until they rest on a collider top

use glam::{Mat4, Vec3};
use super::components::Aabb;
use super::input::InputState;
use crate::game::config::PlayerConfig;
use winit::keyboard::KeyCode;

/// Gravity acceleration at `gravity = 1.0`, in units/s².
const GRAVITY_ACCEL: f32 = 9.81;
/// Tallest ledge the feet snap up onto.
const STEP_HEIGHT: f32 = 0.3;
/// Gap kept between the feet and the floor when testing horizontal moves.
const FOOT_CLEARANCE: f32 = 0.05;
const MAX_PITCH: f32 = 85.0_f32.to_radians();
const MAX_FALL_SPEED: f32 = 50.0;

pub struct FirstPersonController {
    /// Feet position in world space.
    pub position: Vec3,
    vertical_speed: f32,
    grounded: bool,

    /// Horizontal rotation in radians (0 = looking along +Z)
    pub yaw: f32,
    /// Vertical rotation in radians, clamped to ±85°
    pub pitch: f32,

    pub fov: f32,
    pub near: f32,
    pub far: f32,

    /// Walk speed in world units per second
    pub move_speed: f32,
    /// Multiplier on standard gravity
    pub gravity: f32,
    pub mouse_sensitivity: f32,
    pub eye_height: f32,

    /// Collision cylinder, approximated as a box
    pub radius: f32,
    pub height: f32,
}

impl FirstPersonController {
    pub fn new(config: &PlayerConfig, spawn: Vec3) -> Self {
        Self {
            position: spawn,
            vertical_speed: 0.0,
            grounded: false,
            yaw: 0.0,
            pitch: 0.0,
            fov: 70.0_f32.to_radians(),
            near: 0.05,
            far: 120.0,
            move_speed: config.move_speed,
            gravity: config.gravity,
            mouse_sensitivity: config.mouse_sensitivity,
            eye_height: config.eye_height,
            radius: 0.4,
            height: 1.8,
        }
    }

    /// Update look and position from input. Call once per frame before the
    /// simulation tick.
    pub fn update(&mut self, input: &InputState, colliders: &[Aabb], dt: f32) {
        let (dx, dy) = input.mouse_delta;
        self.yaw -= dx * self.mouse_sensitivity;
        self.pitch = (self.pitch - dy * self.mouse_sensitivity).clamp(-MAX_PITCH, MAX_PITCH);

        let forward = Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos());
        let right = Vec3::new(-self.yaw.cos(), 0.0, self.yaw.sin());

        let mut move_dir = Vec3::ZERO;
        if input.is_key_held(KeyCode::KeyW) { move_dir += forward; }
        if input.is_key_held(KeyCode::KeyS) { move_dir -= forward; }
        if input.is_key_held(KeyCode::KeyD) { move_dir += right; }
        if input.is_key_held(KeyCode::KeyA) { move_dir -= right; }

        let step = move_dir.normalize_or_zero() * self.move_speed * dt;
        self.try_move(Vec3::new(step.x, 0.0, 0.0), colliders);
        self.try_move(Vec3::new(0.0, 0.0, step.z), colliders);

        self.apply_gravity(colliders, dt);
    }

    /// Teleport, clearing any fall in progress.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.vertical_speed = 0.0;
        self.grounded = false;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn body(&self, feet: Vec3) -> Aabb {
        let bottom = feet.y + FOOT_CLEARANCE;
        Aabb {
            min: Vec3::new(feet.x - self.radius, bottom, feet.z - self.radius),
            max: Vec3::new(feet.x + self.radius, feet.y + self.height, feet.z + self.radius),
        }
    }

    fn try_move(&mut self, delta: Vec3, colliders: &[Aabb]) {
        if delta == Vec3::ZERO {
            return;
        }
        let candidate = self.position + delta;
        let body = self.body(candidate);
        if !colliders.iter().any(|c| c.intersects(&body)) {
            self.position = candidate;
        }
    }

    fn apply_gravity(&mut self, colliders: &[Aabb], dt: f32) {
        self.vertical_speed = (self.vertical_speed - self.gravity * GRAVITY_ACCEL * dt).max(-MAX_FALL_SPEED);
        let next_y = self.position.y + self.vertical_speed * dt;

        // Highest surface under the feet that we are about to pass through.
        let support = colliders
            .iter()
            .filter(|c| c.contains_xz(self.position, 0.0))
            .map(|c| c.max.y)
            .filter(|&top| top <= self.position.y + STEP_HEIGHT && top >= next_y)
            .fold(None, |best: Option<f32>, top| Some(best.map_or(top, |b| b.max(top))));

        match support {
            Some(top) => {
                self.position.y = top;
                self.vertical_speed = 0.0;
                self.grounded = true;
            }
            None => {
                self.position.y = next_y;
                self.grounded = false;
            }
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.eye_height, 0.0)
    }

    pub fn look_direction(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye();
        Mat4::look_at_rh(eye, eye + self.look_direction(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection matrix ready to upload to the GPU.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

use glam::Vec3;

use crate::camera::FollowCamera;
use crate::config::{CameraConfig, MovementConfig};
use crate::geometry::{MOVEMENT_EPSILON, rotate_y};
use crate::input::{Action, ActionMap, InputState};
use crate::physics::{BodyHandle, GROUP_ENVIRONMENT, GROUP_PROPS, PhysicsWorld};

/// How the character moved this frame, as seen by the animation rig.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementState {
    /// Any directional input is held.
    pub walking: bool,
    pub forward: bool,
    pub backward: bool,
}

/// Turns input into body velocity and yaw, and places the follow camera.
#[derive(Clone, Debug)]
pub struct MovementController {
    yaw: f32,
    velocity: Vec3,
    direction: Vec3,
    state: MovementState,
    movement: MovementConfig,
    camera: CameraConfig,
}

impl MovementController {
    pub fn new(movement: &MovementConfig, camera: &CameraConfig) -> Self {
        Self {
            yaw: movement.initial_yaw,
            velocity: Vec3::ZERO,
            direction: Vec3::ZERO,
            state: MovementState::default(),
            movement: movement.clone(),
            camera: camera.clone(),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    /// World-space unit movement direction of the last update.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Direction the model faces.
    pub fn facing(&self) -> Vec3 {
        rotate_y(Vec3::NEG_Z, self.yaw)
    }

    /// Drains the mouse delta into yaw, then smooths the body's horizontal
    /// velocity toward the input direction.
    pub fn update(
        &mut self,
        dt: f32,
        input: &mut InputState,
        actions: &ActionMap<Action>,
        physics: &mut dyn PhysicsWorld,
        body: BodyHandle,
    ) -> MovementState {
        let mouse = input.take_mouse_delta();
        self.yaw -= mouse.x * self.movement.mouse_sensitivity;

        let local = actions.movement_vector(input);
        self.direction = rotate_y(local, self.yaw).normalize_or_zero();
        let target = self.direction * self.movement.move_speed;

        // Per-frame lerp factor expressed for a 60 Hz frame.
        let alpha = 1.0 - (1.0 - self.movement.velocity_smoothing).powf(dt * 60.0);
        self.velocity = self.velocity.lerp(target, alpha);

        let dot = self.facing().dot(self.direction);
        let moving = self.direction.length_squared() > MOVEMENT_EPSILON;
        self.state = MovementState {
            walking: local.length_squared() > MOVEMENT_EPSILON,
            forward: moving && dot < 0.0,
            backward: moving && dot > 0.0,
        };

        if let Some(current) = physics.velocity(body) {
            physics.set_velocity(body, Vec3::new(self.velocity.x, current.y, self.velocity.z));
        }
        self.state
    }

    /// Puts the camera behind the character, pulled in when geometry blocks
    /// the line between them.
    pub fn place_camera(&self, position: Vec3, physics: &dyn PhysicsWorld, camera: &mut FollowCamera) {
        let desired = position + rotate_y(self.camera.offset, self.yaw);
        let eye = match physics.raycast_closest(position, desired, GROUP_ENVIRONMENT | GROUP_PROPS) {
            Some(hit) => {
                let distance = (hit.distance - self.camera.hit_margin).min(self.camera.max_distance).max(0.0);
                position + (desired - position).normalize_or_zero() * distance
            }
            None => desired,
        };
        let look_at = position + rotate_y(self.camera.look_offset, self.yaw);
        camera.place(eye, look_at);
    }
}

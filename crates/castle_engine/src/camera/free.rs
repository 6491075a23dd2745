//! Free-look camera
//!
//! Detached fly-through camera for inspecting the layout. Look input turns
//! it, move input slides it over the XZ plane: pitch never lifts it.

use crate::core::config::{FreeCameraConfig, ProjectionConfig};
use crate::foundation::math::{Vec3, utils};
use crate::input::FrameInput;
use crate::physics::Collidable;
use super::{Camera, CameraRig, CameraTarget};

/// Stick deflection ignored as noise
const STICK_DEAD_ZONE: f32 = 0.01;

/// Free-look camera
#[derive(Debug, Clone)]
pub struct FreeCamera {
    camera: Camera,
    config: FreeCameraConfig,
}

impl FreeCamera {
    /// Create a free camera at the configured position
    pub fn new(config: FreeCameraConfig, projection: &ProjectionConfig) -> Self {
        let camera = Camera::new(projection, config.position, config.initial_yaw, config.initial_pitch);
        Self { camera, config }
    }

    /// Turn by yaw/pitch deltas in degrees
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let limit = self.config.pitch_limit;
        self.camera.yaw += delta_yaw;
        self.camera.pitch = (self.camera.pitch + delta_pitch).clamp(-limit, limit);
        self.camera.look_along_angles();
    }

    /// Slide along the planar forward and right vectors
    pub fn translate(&mut self, forward: f32, right: f32) {
        let yaw = utils::deg_to_rad(self.camera.yaw);
        let forward_dir = Vec3::new(yaw.cos(), 0.0, yaw.sin());
        let right_dir = utils::normalize_or_self(forward_dir.cross(&Vec3::y()));

        let position = self.camera.position() + forward_dir * forward + right_dir * right;
        self.camera.look_at(position, position + self.camera.direction());
    }
}

impl CameraRig for FreeCamera {
    fn update<C: Collidable>(
        &mut self,
        dt: f32,
        _target: &CameraTarget,
        input: &FrameInput,
        _collidables: &[C],
    ) {
        if input.is_looking(STICK_DEAD_ZONE) {
            let speed = self.config.look_speed;
            self.rotate(input.look_vector.x * speed, input.look_vector.y * speed);
        }

        let stick = input.move_vector;
        if stick.x.abs() > STICK_DEAD_ZONE || stick.y.abs() > STICK_DEAD_ZONE {
            let step = self.config.move_speed * dt;
            self.translate(input.forward() * step, input.turn() * step);
        }
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

//! Orbit camera with occlusion avoidance
//!
//! Keeps an over-the-shoulder view of the player. Look input orbits the eye
//! around a target point above the player; while the player drives and the
//! look stick rests, the yaw eases toward the spot behind the player.
//!
//! Before the eye is placed, a ray from the target to the ideal eye is cast
//! against the collidables. If something is in the way the eye moves in
//! front of it, so walls never hide the player.

use crate::core::config::{OrbitCameraConfig, ProjectionConfig};
use crate::foundation::math::{Vec3, utils};
use crate::input::FrameInput;
use crate::physics::{Collidable, Ray, raycast_nearest};
use super::{Camera, CameraRig, CameraTarget};

/// Third-person chase camera
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    camera: Camera,
    config: OrbitCameraConfig,
    target_position: Vec3,
    occluded: bool,
}

impl OrbitCamera {
    /// Create an orbit camera with the configured initial angles
    pub fn new(config: OrbitCameraConfig, projection: &ProjectionConfig) -> Self {
        let camera = Camera::new(projection, Vec3::zeros(), config.initial_yaw, config.initial_pitch);
        Self {
            camera,
            config,
            target_position: Vec3::zeros(),
            occluded: false,
        }
    }

    /// Point the camera looks at
    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    /// Whether the last update had to pull the eye in
    pub fn is_occluded(&self) -> bool {
        self.occluded
    }

    /// Active configuration
    pub fn config(&self) -> &OrbitCameraConfig {
        &self.config
    }

    /// Apply look input and soft follow to yaw/pitch
    fn orient(&mut self, dt: f32, target: &CameraTarget, input: &FrameInput) {
        let config = &self.config;
        let camera = &mut self.camera;

        camera.yaw += input.look_vector.x * config.look_sensitivity;
        camera.pitch = (camera.pitch + input.look_vector.y * config.look_sensitivity)
            .clamp(-config.pitch_limit, config.pitch_limit);

        if target.is_moving && !input.is_looking(config.look_dead_zone) {
            // Facing 0 (+Z) corresponds to yaw 90
            let behind_yaw = 90.0 - utils::rad_to_deg(target.facing);
            let delta = utils::wrap_degrees(behind_yaw - camera.yaw);
            camera.yaw += delta * (config.follow_rate * dt).min(1.0);
        }
    }

    /// Place the eye for the current angles, pulling it in front of the
    /// nearest occluder
    fn place<C: Collidable>(&mut self, player_position: Vec3, collidables: &[C]) {
        let config = &self.config;
        let direction = self.camera.direction();
        let right = utils::normalize_or_self(direction.cross(&Vec3::y()));

        let look_target = player_position + Vec3::new(0.0, config.height_offset, 0.0);
        let ideal_eye = look_target - direction * config.orbit_distance + right * config.side_offset;
        let to_ideal = ideal_eye - look_target;
        let ideal_distance = to_ideal.magnitude();

        let ray = Ray::new(look_target, to_ideal);
        let hit = raycast_nearest(&ray, ideal_distance, collidables);
        let mut eye = match hit {
            Some(hit) => {
                let distance = (hit.distance - config.occlusion_buffer).max(config.min_distance);
                look_target + ray.direction * distance
            }
            None => ideal_eye,
        };
        eye.y = eye.y.max(config.min_eye_height);

        let occluded = hit.is_some();
        if occluded != self.occluded {
            log::debug!(
                "Orbit camera {} (eye distance {:.2} of {:.2})",
                if occluded { "occluded" } else { "clear" },
                (eye - look_target).magnitude(),
                ideal_distance
            );
        }
        self.occluded = occluded;
        self.target_position = look_target;
        self.camera.look_at(eye, look_target);
    }
}

impl CameraRig for OrbitCamera {
    fn update<C: Collidable>(
        &mut self,
        dt: f32,
        target: &CameraTarget,
        input: &FrameInput,
        collidables: &[C],
    ) {
        self.orient(dt, target, input);
        self.place(target.position, collidables);
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{PrimitiveKind, SceneObject, Transform};
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn level_camera() -> OrbitCamera {
        let config = OrbitCameraConfig {
            initial_yaw: -90.0,
            initial_pitch: 0.0,
            ..OrbitCameraConfig::default()
        };
        OrbitCamera::new(config, &ProjectionConfig::default())
    }

    fn standing_at(position: Vec3) -> CameraTarget {
        CameraTarget { position, facing: 0.0, is_moving: false }
    }

    #[test]
    fn test_unobstructed_eye_uses_ideal_offset() {
        let mut rig = level_camera();
        let nothing: Vec<&SceneObject> = Vec::new();
        rig.update(DT, &standing_at(Vec3::new(0.0, 0.5, 0.0)), &FrameInput::idle(), &nothing);

        // Looking down -Z: eye behind on +Z, shifted right along +X
        assert_relative_eq!(rig.camera().position(), Vec3::new(1.0, 2.0, 5.0), epsilon = 1e-4);
        assert_relative_eq!(rig.target_position(), Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-6);
        assert!(!rig.is_occluded());
    }

    #[test]
    fn test_occluder_pulls_eye_closer() {
        let mut rig = level_camera();
        let target = standing_at(Vec3::new(0.0, 0.5, 0.0));
        let blocker = [SceneObject::new(
            "pillar",
            PrimitiveKind::Cube,
            Transform::from_position(Vec3::new(0.2, 2.0, 2.5)).with_uniform_scale(2.0),
        )];

        rig.update(DT, &target, &FrameInput::idle(), &blocker);

        let ideal_distance = Vec3::new(1.0, 0.0, 5.0).magnitude();
        let distance = (rig.camera().position() - rig.target_position()).magnitude();
        assert!(rig.is_occluded());
        assert!(distance < ideal_distance - 1e-3, "{distance} vs {ideal_distance}");
        assert!(distance >= rig.config().min_distance - 1e-6);
    }

    #[test]
    fn test_non_collidable_objects_do_not_occlude() {
        let mut rig = level_camera();
        let ghost = [SceneObject::new(
            "banner",
            PrimitiveKind::Cube,
            Transform::from_position(Vec3::new(0.2, 2.0, 2.5)).with_uniform_scale(2.0),
        )
        .with_collidable(false)];

        rig.update(DT, &standing_at(Vec3::new(0.0, 0.5, 0.0)), &FrameInput::idle(), &ghost);
        assert!(!rig.is_occluded());
    }

    #[test]
    fn test_occluder_around_target_is_ignored() {
        let mut rig = level_camera();
        let shell = [SceneObject::new(
            "room",
            PrimitiveKind::Cube,
            Transform::from_position(Vec3::new(0.0, 2.0, 0.0)).with_uniform_scale(30.0),
        )];
        rig.update(DT, &standing_at(Vec3::new(0.0, 0.5, 0.0)), &FrameInput::idle(), &shell);
        assert!(!rig.is_occluded());
    }

    #[test]
    fn test_eye_height_is_clamped() {
        let mut rig = level_camera();
        let nothing: Vec<&SceneObject> = Vec::new();
        // Looking steeply up puts the ideal eye below the ground
        rig.update(DT, &standing_at(Vec3::new(0.0, 0.5, 0.0)), &FrameInput::idle().with_look(0.0, 50.0), &nothing);
        assert_relative_eq!(rig.camera().pitch, 85.0);
        assert_relative_eq!(rig.camera().position().y, rig.config().min_eye_height);
    }

    #[test]
    fn test_pitch_clamp_both_ways() {
        let mut rig = level_camera();
        let nothing: Vec<&SceneObject> = Vec::new();
        let target = standing_at(Vec3::zeros());
        for _ in 0..100 {
            rig.update(DT, &target, &FrameInput::idle().with_look(0.0, -1.0), &nothing);
        }
        assert_relative_eq!(rig.camera().pitch, -85.0);
    }

    #[test]
    fn test_soft_follow_settles_behind_player() {
        let mut rig = level_camera();
        let nothing: Vec<&SceneObject> = Vec::new();
        let target = CameraTarget { position: Vec3::zeros(), facing: 0.0, is_moving: true };

        rig.update(DT, &target, &FrameInput::idle(), &nothing);
        let first = rig.camera().yaw;
        // Eases instead of snapping
        assert!(first > -90.0 && first < 90.0);

        for _ in 0..240 {
            rig.update(DT, &target, &FrameInput::idle(), &nothing);
        }
        assert_relative_eq!(utils::wrap_degrees(rig.camera().yaw), 90.0, epsilon = 0.1);
    }

    #[test]
    fn test_soft_follow_takes_short_way_round() {
        let mut rig = level_camera();
        let nothing: Vec<&SceneObject> = Vec::new();
        // Facing 170° wants yaw -80°: 10° away from -90°, not 350°
        let target = CameraTarget {
            position: Vec3::zeros(),
            facing: utils::deg_to_rad(170.0),
            is_moving: true,
        };
        rig.update(DT, &target, &FrameInput::idle(), &nothing);
        assert!(rig.camera().yaw > -90.0 && rig.camera().yaw < -80.0);
    }

    #[test]
    fn test_look_input_suspends_follow() {
        let mut rig = level_camera();
        let nothing: Vec<&SceneObject> = Vec::new();
        let target = CameraTarget { position: Vec3::zeros(), facing: 0.0, is_moving: true };
        rig.update(DT, &target, &FrameInput::idle().with_look(0.5, 0.0), &nothing);
        assert_relative_eq!(rig.camera().yaw, -89.0);
    }

    #[test]
    fn test_idle_player_keeps_yaw() {
        let mut rig = level_camera();
        let nothing: Vec<&SceneObject> = Vec::new();
        for _ in 0..30 {
            rig.update(DT, &standing_at(Vec3::zeros()), &FrameInput::idle(), &nothing);
        }
        assert_relative_eq!(rig.camera().yaw, -90.0);
    }
}

//! # Camera System
//!
//! A shared [`Camera`] holds the state every rig needs: eye position,
//! yaw/pitch orientation, projection parameters and the derived matrices.
//! Placement strategies implement [`CameraRig`]:
//!
//! - [`OrbitCamera`]: over-the-shoulder chase camera that pulls in when
//!   geometry blocks the view
//! - [`FreeCamera`]: detached fly-through camera restricted to planar moves
//!
//! ## Conventions
//!
//! Angles are stored in degrees. Yaw 0 looks down +X and yaw -90 looks down
//! -Z; positive pitch looks up. The view direction is
//! `(cos yaw · cos pitch, sin pitch, sin yaw · cos pitch)`.

pub mod orbit;
pub mod free;

pub use orbit::OrbitCamera;
pub use free::FreeCamera;

use crate::character::PlayerState;
use crate::core::config::ProjectionConfig;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3, utils};
use crate::input::FrameInput;
use crate::physics::Collidable;

/// View direction for yaw/pitch in degrees
pub fn direction_from_angles(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let yaw = utils::deg_to_rad(yaw_degrees);
    let pitch = utils::deg_to_rad(pitch_degrees);
    utils::normalize_or_self(Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    ))
}

/// What a camera rig follows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    /// Followed position (the player's sphere center)
    pub position: Vec3,
    /// Facing yaw in radians
    pub facing: f32,
    /// Whether the target is being driven this frame
    pub is_moving: bool,
}

impl From<&PlayerState> for CameraTarget {
    fn from(player: &PlayerState) -> Self {
        Self {
            position: player.position,
            facing: player.facing,
            is_moving: player.is_moving,
        }
    }
}

/// Camera placement strategy
///
/// Rigs receive the collidable set per call and never keep it.
pub trait CameraRig {
    /// Reposition the camera for this frame
    fn update<C: Collidable>(
        &mut self,
        dt: f32,
        target: &CameraTarget,
        input: &FrameInput,
        collidables: &[C],
    );

    /// Shared camera state
    fn camera(&self) -> &Camera;

    /// Mutable shared camera state (projection changes, resizes)
    fn camera_mut(&mut self) -> &mut Camera;
}

/// Perspective camera state shared by all rigs
///
/// The view matrix is rebuilt whenever the eye is placed; the projection
/// whenever one of its parameters changes.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// Create a camera at `position` oriented by `yaw`/`pitch` (degrees)
    pub fn new(projection: &ProjectionConfig, position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            target: position + direction_from_angles(yaw, pitch),
            up: Vec3::y(),
            yaw,
            pitch,
            fov_y_degrees: projection.fov_y_degrees,
            aspect: projection.aspect,
            near: projection.near,
            far: projection.far,
            view: Mat4::identity(),
            projection: Mat4::identity(),
        };
        camera.update_projection();
        camera.update_view();
        camera
    }

    /// Current view direction from yaw/pitch
    pub fn direction(&self) -> Vec3 {
        direction_from_angles(self.yaw, self.pitch)
    }

    /// Eye position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Look-at point
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Place the eye and aim it at `target`
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        self.position = eye;
        self.target = target;
        self.update_view();
        log::trace!("Camera look_at - eye: {:?}, target: {:?}", eye, target);
    }

    /// Aim along yaw/pitch from the current position
    pub fn look_along_angles(&mut self) {
        self.target = self.position + self.direction();
        self.update_view();
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
        self.update_projection();
    }

    /// Replace every projection parameter
    pub fn set_projection(&mut self, projection: &ProjectionConfig) {
        self.fov_y_degrees = projection.fov_y_degrees;
        self.aspect = projection.aspect;
        self.near = projection.near;
        self.far = projection.far;
        self.update_projection();
    }

    /// Vertical field of view in degrees
    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near and far clip distances
    pub fn clip_range(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// `projection · view`
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at(self.position, self.target, self.up);
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective(self.fov_y_degrees, self.aspect, self.near, self.far);
    }
}

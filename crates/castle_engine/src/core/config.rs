//! # Unified Configuration System
//!
//! All tunables of the simulation in one serializable tree. Every struct
//! carries `#[serde(default)]` so a config file only needs the values it
//! overrides.
//!
//! ## Configuration Categories
//!
//! - **Controller**: player sphere motion, gravity, jump and collision response
//! - **Cameras**: orbiting chase camera and free-look camera
//! - **Projection**: perspective parameters shared by both cameras
//! - **Engine**: logging level, frame-step limit and active camera mode
//!
//! Values are checked by [`SimulationConfig::validate`] when a
//! [`crate::engine::Simulation`] is built, never per frame.

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// # Character Controller Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Collision radius of the player sphere (fixed for the session)
    pub radius: f32,
    /// Spawn position of the sphere center
    pub spawn_position: Vec3,
    /// Horizontal speed at full forward input (units/s)
    pub move_speed: f32,
    /// Yaw rate at full turn input (radians/s)
    pub turn_speed: f32,
    /// Vertical acceleration, negative is down (units/s²)
    pub gravity: f32,
    /// Apex height of a jump above the take-off point
    pub jump_height: f32,
    /// Push-out multiplier applied to penetration depth, must exceed 1
    pub push_out_bias: f32,
    /// Maximum collide-and-slide passes per step
    pub max_correction_passes: u32,
    /// Contact normal Y above which a contact counts as ground
    pub ground_normal_threshold: f32,
    /// Input magnitude ignored as stick noise
    pub input_dead_zone: f32,
    /// Breathing animation frequency (radians/s)
    pub breathing_rate: f32,
    /// Breathing squash amplitude
    pub breathing_amount: f32,
}

impl ControllerConfig {
    /// Launch speed reaching `jump_height` at the apex: `sqrt(2·|g|·h)`
    pub fn jump_speed(&self) -> f32 {
        (2.0 * self.gravity.abs() * self.jump_height).sqrt()
    }

    /// Builder pattern: override gravity
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder pattern: override spawn position
    pub fn with_spawn_position(mut self, position: Vec3) -> Self {
        self.spawn_position = position;
        self
    }

    /// Validate ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("controller.radius", self.radius)?;
        positive("controller.move_speed", self.move_speed)?;
        positive("controller.turn_speed", self.turn_speed)?;
        if !self.jump_height.is_finite() || self.jump_height < 0.0 {
            return Err(invalid("controller.jump_height", "must be >= 0"));
        }
        if !(self.push_out_bias > 1.0) {
            return Err(invalid(
                "controller.push_out_bias",
                format!("must be greater than 1.0, got {}", self.push_out_bias),
            ));
        }
        if self.max_correction_passes == 0 {
            return Err(invalid("controller.max_correction_passes", "must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.ground_normal_threshold) {
            return Err(invalid("controller.ground_normal_threshold", "must be in [0, 1)"));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            radius: 0.5,
            spawn_position: Vec3::new(0.0, 0.5, 10.0),
            move_speed: 5.0,
            turn_speed: 2.0,
            gravity: -10.0,
            jump_height: 1.5,
            push_out_bias: 1.001,
            max_correction_passes: 3,
            ground_normal_threshold: 0.7,
            input_dead_zone: 0.01,
            breathing_rate: 2.0,
            breathing_amount: 0.05,
        }
    }
}

/// # Orbit Camera Configuration
///
/// Over-the-shoulder chase camera. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCameraConfig {
    /// Distance from the look-at target to the ideal eye
    pub orbit_distance: f32,
    /// Lateral offset along the camera right vector
    pub side_offset: f32,
    /// Height of the look-at target above the player center
    pub height_offset: f32,
    /// Initial yaw
    pub initial_yaw: f32,
    /// Initial pitch
    pub initial_pitch: f32,
    /// Degrees of yaw/pitch per unit of look input per frame
    pub look_sensitivity: f32,
    /// Closing rate of the soft follow (1/s)
    pub follow_rate: f32,
    /// Symmetric pitch clamp
    pub pitch_limit: f32,
    /// Look input magnitude treated as "not looking"
    pub look_dead_zone: f32,
    /// Gap kept between the eye and an occluder
    pub occlusion_buffer: f32,
    /// Closest the eye may be pulled toward the target
    pub min_distance: f32,
    /// Lowest allowed eye height
    pub min_eye_height: f32,
}

impl OrbitCameraConfig {
    /// Validate ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("orbit_camera.orbit_distance", self.orbit_distance)?;
        positive("orbit_camera.min_distance", self.min_distance)?;
        if self.min_distance > self.orbit_distance {
            return Err(invalid("orbit_camera.min_distance", "must not exceed orbit_distance"));
        }
        if !(0.0..90.0).contains(&self.pitch_limit) {
            return Err(invalid("orbit_camera.pitch_limit", "must be in [0, 90)"));
        }
        if self.occlusion_buffer < 0.0 {
            return Err(invalid("orbit_camera.occlusion_buffer", "must be >= 0"));
        }
        Ok(())
    }
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            orbit_distance: 5.0,
            side_offset: 1.0,
            height_offset: 1.5,
            initial_yaw: -90.0,
            initial_pitch: -15.0,
            look_sensitivity: 2.0,
            follow_rate: 5.0,
            pitch_limit: 85.0,
            look_dead_zone: 0.001,
            occlusion_buffer: 0.2,
            min_distance: 0.5,
            min_eye_height: 0.2,
        }
    }
}

/// # Free Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeCameraConfig {
    /// Starting eye position
    pub position: Vec3,
    /// Initial yaw in degrees (-90 looks down -Z)
    pub initial_yaw: f32,
    /// Initial pitch in degrees
    pub initial_pitch: f32,
    /// Planar speed at full move input (units/s)
    pub move_speed: f32,
    /// Degrees per unit of look input per frame
    pub look_speed: f32,
    /// Symmetric pitch clamp
    pub pitch_limit: f32,
}

impl FreeCameraConfig {
    /// Validate ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("free_camera.move_speed", self.move_speed)?;
        if !self.look_speed.is_finite() {
            return Err(invalid("free_camera.look_speed", "must be finite"));
        }
        if !(0.0..90.0).contains(&self.pitch_limit) {
            return Err(invalid("free_camera.pitch_limit", "must be in [0, 90)"));
        }
        Ok(())
    }
}

impl Default for FreeCameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 8.0),
            initial_yaw: -90.0,
            initial_pitch: -15.0,
            move_speed: 5.0,
            look_speed: 2.0,
            pitch_limit: 89.0,
        }
    }
}

/// # Projection Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl ProjectionConfig {
    /// Validate ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(invalid("projection.fov_y_degrees", "must be in (0, 180)"));
        }
        positive("projection.aspect", self.aspect)?;
        positive("projection.near", self.near)?;
        if self.far <= self.near {
            return Err(invalid(
                "projection.far",
                format!("must be greater than near ({} <= {})", self.far, self.near),
            ));
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Which camera rig drives the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Third-person orbit around the player
    #[default]
    Orbit,
    /// Detached free-look camera
    Free,
}

/// # Engine Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Upper bound on a single simulation step (seconds)
    pub max_frame_dt: f32,
    /// Active camera rig
    pub camera_mode: CameraMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frame_dt: 0.1,
            camera_mode: CameraMode::Orbit,
        }
    }
}

/// # Complete Simulation Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Player controller configuration
    pub controller: ControllerConfig,
    /// Orbit camera configuration
    pub orbit_camera: OrbitCameraConfig,
    /// Free camera configuration
    pub free_camera: FreeCameraConfig,
    /// Projection configuration
    pub projection: ProjectionConfig,
}

impl SimulationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("engine.max_frame_dt", self.engine.max_frame_dt)?;
        self.controller.validate()?;
        self.orbit_camera.validate()?;
        self.free_camera.validate()?;
        self.projection.validate()?;
        Ok(())
    }
}

impl Config for SimulationConfig {}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {value}")))
    }
}

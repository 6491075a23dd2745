//! # Core Engine Module
//!
//! Shared configuration types consumed by every subsystem.
//!
//! ## Organization
//!
//! - **Config**: Tunables for the controller, cameras, projection and frame loop
//! - **Foundation**: Low-level utilities (math, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    SimulationConfig,
    ControllerConfig,
    OrbitCameraConfig,
    FreeCameraConfig,
    ProjectionConfig,
    EngineConfig,
    CameraMode,
};
pub use crate::config::{Config, ConfigError};

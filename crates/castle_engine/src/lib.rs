//! # Castle Engine
//!
//! Spatial core of a third-person castle walk: transforms, bounding volumes,
//! frustum culling, sphere-versus-box collision, a character controller and
//! an orbit camera that keeps walls out of the shot.
//!
//! ## Features
//!
//! - **Transform Nodes**: Cached model and normal matrices per object
//! - **Visibility**: Frustum culling with front-to-back ordering
//! - **Collision**: Sphere against oriented unit boxes, with slide response
//! - **Cameras**: Occlusion-aware orbit camera and a free-look camera
//! - **Headless Rendering Hand-off**: Plain per-frame data for any backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use castle_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = Scene::new();
//!     CastleBuilder::new(CastleLayout::default()).build(&mut scene);
//!
//!     let mut simulation = Simulation::new(SimulationConfig::default(), scene)?;
//!     let mut backend = RecordingBackend::new(1280, 720, 8);
//!     let input = FrameInput::idle().with_move(0.0, -1.0);
//!     simulation.render(1.0 / 60.0, &input, &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod scene;
pub mod physics;
pub mod character;
pub mod camera;
pub mod input;
pub mod render;

mod engine;

pub use engine::{EngineError, Simulation};

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Simulation, EngineError,
        foundation::{
            math::{Vec2, Vec3, Mat4, Mat4Ext},
            time::{FrameTimer, Stopwatch},
        },
        scene::{Scene, SceneObject, ObjectId, PrimitiveKind, Material, Transform, BoundingSphere, Frustum, CastleBuilder, CastleLayout},
        physics::{Collidable, Contact, Ray, sphere_vs_box, raycast_nearest},
        character::{CharacterController, PlayerState, MovementState},
        camera::{Camera, CameraRig, CameraTarget, OrbitCamera, FreeCamera},
        input::{FrameInput, VirtualStick},
        render::{RenderBackend, RecordingBackend, FrameData},
        core::config::{SimulationConfig, ControllerConfig, OrbitCameraConfig, CameraMode},
        config::Config,
    };
}

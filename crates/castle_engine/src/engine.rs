//! Frame loop
//!
//! [`Simulation`] owns the scene, the player controller, both camera rigs and
//! the visibility system, and runs them in a fixed order once per frame:
//! integrate the player, place the camera, cull and sort, hand off.

use crate::camera::{Camera, CameraRig, CameraTarget, FreeCamera, OrbitCamera};
use crate::character::{CharacterController, PlayerState};
use crate::config::ConfigError;
use crate::core::config::{CameraMode, SimulationConfig};
use crate::foundation::time::FrameTimer;
use crate::input::FrameInput;
use crate::render::{DrawItem, FrameData, RenderBackend, RenderError};
use crate::scene::{Material, ObjectId, PrimitiveKind, Scene, SceneObject, VisibilitySystem};
use crate::scene::visibility::VisibilityStats;
use thiserror::Error;

/// Frame loop errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backend refused a frame
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Player, cameras and scene advanced together
pub struct Simulation {
    config: SimulationConfig,
    scene: Scene,
    player_id: ObjectId,
    controller: CharacterController,
    orbit_camera: OrbitCamera,
    free_camera: FreeCamera,
    camera_mode: CameraMode,
    visibility: VisibilitySystem,
    timer: FrameTimer,
}

impl Simulation {
    /// Build the frame loop around an assembled scene.
    ///
    /// The player's sphere is added to `scene` as a non-collidable object.
    pub fn new(config: SimulationConfig, mut scene: Scene) -> Result<Self, EngineError> {
        log::info!("Initializing simulation...");
        config.validate()?;

        let controller = CharacterController::new(config.controller.clone());
        let player_id = scene.add(
            SceneObject::new(
                "player",
                PrimitiveKind::Sphere,
                controller.visual().to_transform(controller.player().radius),
            )
            .with_collidable(false)
            .with_material(Material::marble()),
        );

        let mut orbit_camera = OrbitCamera::new(config.orbit_camera.clone(), &config.projection);
        let free_camera = FreeCamera::new(config.free_camera.clone(), &config.projection);

        let target = CameraTarget::from(controller.player());
        orbit_camera.update(0.0, &target, &FrameInput::idle(), &scene.collidables());

        log::info!(
            "Simulation ready: {} objects, {} collidable, camera {:?}",
            scene.len(),
            scene.collidables().len(),
            config.engine.camera_mode
        );

        Ok(Self {
            camera_mode: config.engine.camera_mode,
            config,
            scene,
            player_id,
            controller,
            orbit_camera,
            free_camera,
            visibility: VisibilitySystem::new(),
            timer: FrameTimer::new(),
        })
    }

    /// Advance one frame and collect what the backend should draw.
    ///
    /// `dt` is clamped to `[0, max_frame_dt]`. In free-camera mode the move
    /// and look sticks steer the camera and the player only falls.
    pub fn step(&mut self, dt: f32, input: &FrameInput) -> FrameData {
        let max_dt = self.config.engine.max_frame_dt;
        let dt = if dt > max_dt {
            log::debug!("Frame dt {dt:.3}s clamped to {max_dt:.3}s");
            max_dt
        } else {
            dt.max(0.0)
        };
        let input = input.clamped();

        let collidables = self.scene.collidables();
        let target = match self.camera_mode {
            CameraMode::Orbit => {
                self.controller.step(dt, &input, &collidables);
                let target = CameraTarget::from(self.controller.player());
                self.orbit_camera.update(dt, &target, &input, &collidables);
                target
            }
            CameraMode::Free => {
                self.controller.step(dt, &FrameInput::idle(), &collidables);
                let target = CameraTarget::from(self.controller.player());
                self.free_camera.update(dt, &target, &input, &collidables);
                target
            }
        };

        let radius = self.controller.player().radius;
        let visual = self.controller.visual().to_transform(radius);
        if let Some(player) = self.scene.get_mut(self.player_id) {
            *player.transform_mut() = visual;
        }

        self.timer.advance(dt);
        let frame = self.collect_frame();
        log::trace!(
            "Frame {}: player {:?}, {} of {} objects visible",
            frame.frame_index,
            target.position,
            frame.draw_items.len(),
            self.scene.len()
        );
        frame
    }

    /// Step one frame and submit it to `backend`
    pub fn render(
        &mut self,
        dt: f32,
        input: &FrameInput,
        backend: &mut dyn RenderBackend,
    ) -> Result<FrameData, EngineError> {
        let aspect = backend.aspect_ratio();
        if (self.active_camera().aspect() - aspect).abs() > f32::EPSILON {
            self.set_aspect_ratio(aspect);
        }
        let frame = self.step(dt, input);
        backend.submit_frame(&frame)?;
        Ok(frame)
    }

    fn collect_frame(&mut self) -> FrameData {
        let camera = match self.camera_mode {
            CameraMode::Orbit => self.orbit_camera.camera(),
            CameraMode::Free => self.free_camera.camera(),
        };
        let view_projection = camera.view_projection();
        let eye = camera.position();

        let scene = &self.scene;
        let draw_items = self
            .visibility
            .update(scene, &view_projection, &eye)
            .iter()
            .filter_map(|visible| {
                scene
                    .get(visible.id)
                    .map(|object| DrawItem::from_object(visible.id, object, visible.distance_squared))
            })
            .collect();

        FrameData {
            frame_index: self.timer.frame_count(),
            view: *camera.view_matrix(),
            projection: *camera.projection_matrix(),
            view_projection,
            eye,
            draw_items,
        }
    }

    /// Switch the camera rig that drives the view
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        if mode != self.camera_mode {
            log::info!("Camera mode {:?} -> {:?}", self.camera_mode, mode);
            self.camera_mode = mode;
        }
    }

    /// Camera rig that drives the view
    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    /// Camera of the active rig
    pub fn active_camera(&self) -> &Camera {
        match self.camera_mode {
            CameraMode::Orbit => self.orbit_camera.camera(),
            CameraMode::Free => self.free_camera.camera(),
        }
    }

    /// Orbit rig, whichever mode is active
    pub fn orbit_camera(&self) -> &OrbitCamera {
        &self.orbit_camera
    }

    /// Update both rigs for a resized drawable
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.orbit_camera.camera_mut().set_aspect_ratio(aspect);
        self.free_camera.camera_mut().set_aspect_ratio(aspect);
    }

    /// Scene being simulated
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for adding or moving props
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Handle of the player's sphere in the scene
    pub fn player_id(&self) -> ObjectId {
        self.player_id
    }

    /// Physical player state
    pub fn player(&self) -> &PlayerState {
        self.controller.player()
    }

    /// Player controller
    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    /// Culling counters of the last frame
    pub fn visibility_stats(&self) -> VisibilityStats {
        self.visibility.stats()
    }

    /// Frame timer fed by [`Self::step`]
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Configuration the simulation was built with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

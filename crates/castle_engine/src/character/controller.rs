//! Character controller
//!
//! Semi-implicit Euler integration of the player sphere followed by an
//! iterative collide-and-slide pass against the static collidables.
//!
//! Each step:
//! 1. turn input rotates the facing
//! 2. forward input sets the horizontal velocity along the facing
//! 3. gravity accumulates; a jump from the ground replaces the vertical speed
//! 4. the position advances by the velocity
//! 5. the floor plane `y = radius` is enforced
//! 6. up to `max_correction_passes` passes push the sphere out of overlapping
//!    collidables, strip the velocity component driving into each contact, and
//!    record ground or ceiling contacts
//! 7. the cosmetic breathing animation advances
//!
//! Discrete steps only: a large `dt` can tunnel through thin geometry, which
//! is why the frame loop clamps it.

use crate::core::config::ControllerConfig;
use crate::foundation::math::{Vec3, constants};
use crate::input::FrameInput;
use crate::physics::Collidable;
use super::{MovementState, PlayerState, PlayerVisual};

/// Diagnostics of a single controller step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Contacts resolved across all passes
    pub contacts: usize,
    /// Correction passes run
    pub passes: u32,
    /// A jump started this step
    pub jumped: bool,
}

/// Drives the player sphere
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: ControllerConfig,
    player: PlayerState,
    visual: PlayerVisual,
    breathing_time: f32,
}

impl CharacterController {
    /// Controller with the player at the configured spawn point
    pub fn new(config: ControllerConfig) -> Self {
        let player = PlayerState::new(config.spawn_position, config.radius);
        let visual = PlayerVisual::at_rest(&player);
        log::debug!(
            "Character controller created at {:?} (radius {})",
            player.position,
            player.radius
        );
        Self {
            config,
            player,
            visual,
            breathing_time: 0.0,
        }
    }

    /// Physical player state
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Cosmetic player transform
    pub fn visual(&self) -> &PlayerVisual {
        &self.visual
    }

    /// Active configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Teleport the player, clearing its velocity
    pub fn reset_to(&mut self, position: Vec3) {
        self.player.position = position;
        self.player.velocity = Vec3::zeros();
        self.player.state = MovementState::Airborne;
        self.visual = PlayerVisual::at_rest(&self.player);
    }

    /// Advance the player by `dt` seconds against `collidables`.
    ///
    /// An empty collidable slice is valid; only the floor plane applies.
    pub fn step<C: Collidable>(&mut self, dt: f32, input: &FrameInput, collidables: &[C]) -> StepReport {
        let config = &self.config;
        let radius = self.player.radius;
        let turn = input.turn();
        let forward = input.forward();
        let turning = turn.abs() > config.input_dead_zone;
        let driving = forward.abs() > config.input_dead_zone;
        let mut report = StepReport::default();

        if turning {
            self.player.facing -= turn * config.turn_speed * dt;
        }
        let facing = self.player.facing;
        let mut visual_yaw = facing;

        let mut velocity = Vec3::new(0.0, self.player.velocity.y + config.gravity * dt, 0.0);
        if driving {
            let speed = forward * config.move_speed;
            velocity.x = facing.sin() * speed;
            velocity.z = facing.cos() * speed;
            if forward < 0.0 {
                visual_yaw += constants::PI;
            }
        }

        if input.jump && self.player.state == MovementState::Grounded {
            velocity.y = config.jump_speed();
            report.jumped = true;
            log::debug!("Jump with launch speed {:.3}", velocity.y);
        }

        let mut position = self.player.position + velocity * dt;
        let mut supported = false;

        if position.y < radius {
            position.y = radius;
            velocity.y = velocity.y.max(0.0);
            supported = true;
        }

        for pass in 0..config.max_correction_passes {
            let mut found = false;
            for collidable in collidables {
                let Some(contact) = collidable.resolve_sphere(&position, radius) else {
                    continue;
                };
                found = true;
                report.contacts += 1;

                let normal = contact.normal;
                position += normal * (contact.depth * config.push_out_bias);

                // Slide: only cancel motion heading into the surface
                let into_surface = velocity.dot(&normal);
                if into_surface < 0.0 {
                    velocity -= normal * into_surface;
                }

                if normal.y > config.ground_normal_threshold {
                    velocity.y = 0.0;
                    supported = true;
                } else if normal.y < -config.ground_normal_threshold && velocity.y > 0.0 {
                    velocity.y = 0.0;
                }
            }
            report.passes = pass + 1;
            if !found {
                break;
            }
        }

        let state = if supported && !report.jumped {
            MovementState::Grounded
        } else {
            MovementState::Airborne
        };
        if state != self.player.state {
            log::debug!("Player {:?} -> {:?} at {:?}", self.player.state, state, position);
        }

        self.player.position = position;
        self.player.velocity = velocity;
        self.player.state = state;
        self.player.is_moving = driving || turning;

        self.breathing_time += dt;
        let breath = (self.breathing_time * config.breathing_rate).sin() * config.breathing_amount;
        self.visual = PlayerVisual {
            position,
            yaw_degrees: visual_yaw.to_degrees(),
            scale: Vec3::new(1.0 + breath * 0.5, 1.0 - breath, 1.0 + breath * 0.5),
        };

        log::trace!(
            "Controller step: pos={:?} vel={:?} contacts={} passes={}",
            position,
            velocity,
            report.contacts,
            report.passes
        );
        report
    }
}

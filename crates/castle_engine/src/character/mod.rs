//! Player character
//!
//! The player is a single dynamic sphere. [`PlayerState`] is the physical
//! state read by the cameras; [`PlayerVisual`] is the cosmetic transform the
//! renderer draws.

pub mod controller;

pub use controller::{CharacterController, StepReport};

use crate::foundation::math::Vec3;
use crate::scene::Transform;

/// Ground contact state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementState {
    /// Standing on the floor or on a collidable top face
    Grounded,
    /// No ground support this step
    #[default]
    Airborne,
}

/// Physical state of the player sphere
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Sphere center
    pub position: Vec3,
    /// Velocity after the last collision response
    pub velocity: Vec3,
    /// Collision radius, fixed for the session
    pub radius: f32,
    /// Yaw in radians; 0 faces +Z, positive turns toward +X
    pub facing: f32,
    /// Ground contact state
    pub state: MovementState,
    /// Movement input was applied during the last step
    pub is_moving: bool,
}

impl PlayerState {
    /// Player at rest at `position`
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            radius,
            facing: 0.0,
            state: MovementState::Airborne,
            is_moving: false,
        }
    }

    /// Whether the last step found ground support
    pub fn is_grounded(&self) -> bool {
        self.state == MovementState::Grounded
    }

    /// Facing in degrees
    pub fn facing_degrees(&self) -> f32 {
        self.facing.to_degrees()
    }
}

/// What the renderer draws for the player
///
/// The breathing squash lives only here; it never changes the collision
/// radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerVisual {
    /// Sphere center
    pub position: Vec3,
    /// Display yaw in degrees, turned around while reversing
    pub yaw_degrees: f32,
    /// Squash and stretch
    pub scale: Vec3,
}

impl PlayerVisual {
    /// Visual matching a player at rest
    pub fn at_rest(player: &PlayerState) -> Self {
        Self {
            position: player.position,
            yaw_degrees: player.facing_degrees(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Transform for the unit sphere primitive, sized to `radius`
    pub fn to_transform(&self, radius: f32) -> Transform {
        Transform::new(
            self.position,
            Vec3::new(0.0, self.yaw_degrees, 0.0),
            self.scale * (radius * 2.0),
        )
    }
}

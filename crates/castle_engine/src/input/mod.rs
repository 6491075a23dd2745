//! Per-frame input snapshot
//!
//! Input is sampled once per frame by the host and handed to the simulation
//! as a [`FrameInput`]. Both sticks use screen conventions: `x` to the right,
//! `y` downward, so pushing a stick "up" yields a negative `y`.

use crate::foundation::math::Vec2;

/// Everything the simulation reads from the player in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Left stick: `x` turns, `-y` drives forward
    pub move_vector: Vec2,
    /// Right stick: `x` yaws the camera, `y` pitches it
    pub look_vector: Vec2,
    /// Jump pressed this frame
    pub jump: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self::idle()
    }
}

impl FrameInput {
    /// No input at all
    pub fn idle() -> Self {
        Self {
            move_vector: Vec2::zeros(),
            look_vector: Vec2::zeros(),
            jump: false,
        }
    }

    /// Builder pattern: Set the move stick
    pub fn with_move(mut self, x: f32, y: f32) -> Self {
        self.move_vector = Vec2::new(x, y);
        self
    }

    /// Builder pattern: Set the look stick
    pub fn with_look(mut self, x: f32, y: f32) -> Self {
        self.look_vector = Vec2::new(x, y);
        self
    }

    /// Builder pattern: Press jump
    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    /// Forward drive, positive when the move stick is pushed up
    pub fn forward(&self) -> f32 {
        -self.move_vector.y
    }

    /// Turn input, positive to the right
    pub fn turn(&self) -> f32 {
        self.move_vector.x
    }

    /// Whether either look axis exceeds `dead_zone`
    pub fn is_looking(&self, dead_zone: f32) -> bool {
        self.look_vector.x.abs() >= dead_zone || self.look_vector.y.abs() >= dead_zone
    }

    /// Copy with every stick component clamped to `[-1, 1]`
    pub fn clamped(&self) -> Self {
        Self {
            move_vector: self.move_vector.map(|c| c.clamp(-1.0, 1.0)),
            look_vector: self.look_vector.map(|c| c.clamp(-1.0, 1.0)),
            jump: self.jump,
        }
    }
}

/// On-screen virtual joystick
///
/// Converts a pointer offset from the stick origin into a vector inside the
/// unit disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualStick {
    radius: f32,
    value: Vec2,
}

impl VirtualStick {
    /// Stick whose knob travels `radius` pixels
    pub fn new(radius: f32) -> Self {
        Self { radius: radius.max(f32::EPSILON), value: Vec2::zeros() }
    }

    /// Pointer moved to `(dx, dy)` pixels from the origin
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let mut offset = Vec2::new(dx, dy);
        let distance = offset.magnitude();
        if distance > self.radius {
            offset *= self.radius / distance;
        }
        self.value = offset / self.radius;
    }

    /// Pointer released
    pub fn release(&mut self) {
        self.value = Vec2::zeros();
    }

    /// Current deflection
    pub fn value(&self) -> Vec2 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stick_up_is_forward() {
        let input = FrameInput::idle().with_move(0.0, -1.0);
        assert_relative_eq!(input.forward(), 1.0);
        assert_relative_eq!(input.turn(), 0.0);
    }

    #[test]
    fn test_clamped() {
        let input = FrameInput::idle().with_move(3.0, -2.0).with_look(0.5, -7.0).clamped();
        assert_eq!(input.move_vector, Vec2::new(1.0, -1.0));
        assert_eq!(input.look_vector, Vec2::new(0.5, -1.0));
    }

    #[test]
    fn test_virtual_stick_saturates() {
        let mut stick = VirtualStick::new(50.0);
        stick.drag(30.0, 40.0);
        assert_relative_eq!(stick.value(), Vec2::new(0.6, 0.8), epsilon = 1e-6);

        stick.drag(300.0, 0.0);
        assert_relative_eq!(stick.value(), Vec2::new(1.0, 0.0), epsilon = 1e-6);

        stick.release();
        assert_eq!(stick.value(), Vec2::zeros());
    }

    #[test]
    fn test_look_dead_zone() {
        assert!(!FrameInput::idle().with_look(0.0005, 0.0).is_looking(0.001));
        assert!(FrameInput::idle().with_look(0.0, 0.2).is_looking(0.001));
    }
}

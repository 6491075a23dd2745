//! Transform node for scene objects
//!
//! Position, Euler rotation (degrees) and per-axis scale, with the model and
//! normal matrices re-derived in every setter. Readers never see a stale
//! matrix and there is no dirty flag to forget.
//!
//! Composition order is fixed: scale, then rotation about X, Y and Z, then
//! translation, i.e. `model = T · Rx · Ry · Rz · S`.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3, utils};

/// Spatial transform of a scene object
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    model_matrix: Mat4,
    normal_matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Origin, no rotation, unit scale
    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            model_matrix: Mat4::identity(),
            normal_matrix: Mat4::identity(),
        }
    }

    /// Unrotated, unscaled transform at `position`
    pub fn from_position(position: Vec3) -> Self {
        Self::identity().with_position(position)
    }

    /// Create from position, rotation (degrees) and scale
    pub fn new(position: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Self {
        let mut transform = Self {
            position,
            rotation: rotation_degrees,
            scale,
            model_matrix: Mat4::identity(),
            normal_matrix: Mat4::identity(),
        };
        transform.update_matrices();
        transform
    }

    /// Same transform moved to `position`
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Same transform with Euler angles in degrees
    pub fn with_rotation(mut self, rotation_degrees: Vec3) -> Self {
        self.set_rotation(rotation_degrees);
        self
    }

    /// Same transform with per-axis scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    /// Same transform scaled equally on every axis
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::new(scale, scale, scale))
    }

    /// Move the object and re-derive its matrices
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_matrices();
    }

    /// Set Euler angles in degrees (applied X, then Y, then Z)
    pub fn set_rotation(&mut self, rotation_degrees: Vec3) {
        self.rotation = rotation_degrees;
        self.update_matrices();
    }

    /// Set per-axis scale.
    ///
    /// Components must be non-zero; this is an authoring contract and is not
    /// checked here.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.update_matrices();
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler angles in degrees
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Per-axis scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// `T · Rx · Ry · Rz · S`
    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    /// `Rx · Ry · Rz · S⁻¹`
    ///
    /// Not the inverse transpose of the model matrix. The two agree for
    /// rotation combined with axis-aligned scale, which is every transform
    /// this type can express, but would diverge under shear.
    pub fn normal_matrix(&self) -> &Mat4 {
        &self.normal_matrix
    }

    /// Forward rotation only (no scale or translation)
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_euler_degrees(&self.rotation)
    }

    /// Inverse rotation, `Rz⁻¹ · Ry⁻¹ · Rx⁻¹`
    pub fn inverse_rotation_matrix(&self) -> Mat4 {
        Mat4::inverse_rotation_euler_degrees(&self.rotation)
    }

    /// Largest absolute axis scale
    pub fn max_scale(&self) -> f32 {
        utils::max_abs_component(&self.scale)
    }

    /// Smallest absolute axis scale
    pub fn min_scale(&self) -> f32 {
        utils::min_abs_component(&self.scale)
    }

    fn update_matrices(&mut self) {
        let rotation = Mat4::rotation_euler_degrees(&self.rotation);
        let inverse_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);

        self.model_matrix = Mat4::new_translation(&self.position)
            * rotation
            * Mat4::new_nonuniform_scaling(&self.scale);
        self.normal_matrix = rotation * Mat4::new_nonuniform_scaling(&inverse_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_matrices() {
        let transform = Transform::identity();
        assert_eq!(*transform.model_matrix(), Mat4::identity());
        assert_eq!(*transform.normal_matrix(), Mat4::identity());
    }

    #[test]
    fn test_setters_rederive_model_matrix() {
        let mut transform = Transform::identity();
        transform.set_scale(Vec3::new(2.0, 2.0, 2.0));
        transform.set_position(Vec3::new(5.0, 0.0, 0.0));

        let corner = transform.model_matrix().project_point(&Vec3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(corner, Vec3::new(6.0, 1.0, 1.0), epsilon = 1e-5);

        transform.set_rotation(Vec3::new(0.0, 90.0, 0.0));
        // +X of the unit box swings to -Z under a 90° yaw
        let face = transform.model_matrix().project_point(&Vec3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(face, Vec3::new(5.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let transform = Transform::identity().with_rotation(Vec3::new(30.0, 40.0, 50.0));
        let expected = Mat4::rotation_x(utils::deg_to_rad(30.0))
            * Mat4::rotation_y(utils::deg_to_rad(40.0))
            * Mat4::rotation_z(utils::deg_to_rad(50.0));
        assert_relative_eq!(*transform.model_matrix(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_uses_inverse_scale() {
        let transform = Transform::identity().with_scale(Vec3::new(4.0, 1.0, 0.5));
        let n = transform.normal_matrix();
        assert_relative_eq!(n[(0, 0)], 0.25);
        assert_relative_eq!(n[(1, 1)], 1.0);
        assert_relative_eq!(n[(2, 2)], 2.0);
        assert_relative_eq!(n[(0, 3)], 0.0);
    }

    #[test]
    fn test_normal_matrix_ignores_translation() {
        let transform = Transform::from_position(Vec3::new(3.0, -1.0, 7.0));
        assert_eq!(*transform.normal_matrix(), Mat4::identity());
    }

    #[test]
    fn test_scale_extremes() {
        let transform = Transform::identity().with_scale(Vec3::new(3.0, -0.5, 2.0));
        assert_relative_eq!(transform.max_scale(), 3.0);
        assert_relative_eq!(transform.min_scale(), 0.5);
    }
}

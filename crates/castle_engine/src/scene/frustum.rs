//! View frustum for visibility culling
//!
//! Planes are extracted from the rows of a combined view-projection matrix
//! (Gribb & Hartmann). With OpenGL clip conventions a point is inside when
//! `-w <= x, y, z <= w`, so each bound is a sum or difference of row 3 with
//! one of rows 0..2:
//!
//! | plane  | coefficients |
//! |--------|--------------|
//! | left   | `r3 + r0`    |
//! | right  | `r3 - r0`    |
//! | bottom | `r3 + r1`    |
//! | top    | `r3 - r1`    |
//! | near   | `r3 + r2`    |
//! | far    | `r3 - r2`    |
//!
//! Normals point into the frustum.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3, Vec4, utils};
use super::bounds::BoundingSphere;

/// Plane `dot(normal, p) + distance = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal (unit length unless the plane is degenerate)
    pub normal: Vec3,
    /// Signed offset from the origin
    pub distance: f32,
}

impl Plane {
    /// Create a new plane
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane from raw `(a, b, c, d)` coefficients, scaled to a unit normal.
    ///
    /// A near-zero normal is left unscaled.
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.xyz();
        let length_squared = normal.magnitude_squared();
        if length_squared > utils::ZERO_LENGTH_SQUARED {
            let inverse_length = 1.0 / length_squared.sqrt();
            Self::new(normal * inverse_length, coefficients.w * inverse_length)
        } else {
            Self::new(normal, coefficients.w)
        }
    }

    /// Signed distance from the plane to a point
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Six clipping planes, rebuilt every frame from the camera matrices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the planes of `view_projection`
    pub fn from_view_projection(view_projection: &Mat4) -> Self {
        let r0 = view_projection.row4(0);
        let r1 = view_projection.row4(1);
        let r2 = view_projection.row4(2);
        let r3 = view_projection.row4(3);

        Self {
            planes: [
                Plane::from_coefficients(r3 + r0),
                Plane::from_coefficients(r3 - r0),
                Plane::from_coefficients(r3 + r1),
                Plane::from_coefficients(r3 - r1),
                Plane::from_coefficients(r3 + r2),
                Plane::from_coefficients(r3 - r2),
            ],
        }
    }

    /// Sphere test. Touching a plane counts as inside.
    pub fn contains_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(&sphere.center) >= -sphere.radius)
    }

    /// Point test
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance_to_point(point) >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera_frustum() -> Frustum {
        // Eye at the origin looking down -Z
        let view = Mat4::look_at(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), Vec3::y());
        let projection = Mat4::perspective(60.0, 1.0, 0.1, 100.0);
        Frustum::from_view_projection(&(projection * view))
    }

    #[test]
    fn test_planes_are_normalized() {
        for plane in camera_frustum().planes {
            assert_relative_eq!(plane.normal.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_near_and_far_planes() {
        let frustum = camera_frustum();
        let near = frustum.planes[4];
        let far = frustum.planes[5];
        assert_relative_eq!(near.normal, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(near.distance, -0.1, epsilon = 1e-4);
        assert_relative_eq!(far.normal, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(far.distance, 100.0, epsilon = 1e-2);
    }

    #[test]
    fn test_sphere_beyond_far_plane_is_culled() {
        let frustum = camera_frustum();
        assert!(!frustum.contains_sphere(&BoundingSphere::new(Vec3::new(0.0, 0.0, -150.0), 1.0)));
        assert!(frustum.contains_sphere(&BoundingSphere::new(Vec3::new(0.0, 0.0, -50.0), 1.0)));
    }

    #[test]
    fn test_sphere_behind_camera_is_culled() {
        let frustum = camera_frustum();
        assert!(!frustum.contains_sphere(&BoundingSphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0)));
    }

    #[test]
    fn test_sphere_around_eye_is_visible() {
        let frustum = camera_frustum();
        assert!(frustum.contains_sphere(&BoundingSphere::new(Vec3::zeros(), 0.5)));
    }

    #[test]
    fn test_sphere_straddling_side_plane_is_visible() {
        let frustum = camera_frustum();
        // 30° half angle: at z = -10 the left edge is at x ≈ -5.77
        assert!(frustum.contains_sphere(&BoundingSphere::new(Vec3::new(-6.5, 0.0, -10.0), 1.0)));
        assert!(!frustum.contains_sphere(&BoundingSphere::new(Vec3::new(-9.0, 0.0, -10.0), 1.0)));
    }

    #[test]
    fn test_degenerate_plane_is_not_scaled() {
        let plane = Plane::from_coefficients(Vec4::new(0.0, 0.0, 0.0, 2.0));
        assert_eq!(plane.normal, Vec3::zeros());
        assert_relative_eq!(plane.distance, 2.0);
    }
}

//! Math utilities and types
//!
//! Provides the vector and matrix types used by every other module, plus the
//! handful of constructors the scene needs (axis rotations, Euler composition,
//! OpenGL-style perspective and look-at).
//!
//! ## Conventions
//!
//! - Right-handed, Y-up world space
//! - Column vectors, so `a * b` applies `b` first (`A.multiply(B)` = `A·B`)
//! - Matrices are stored column-major (nalgebra's native layout), which is
//!   also the layout uploaded to the rendering backend
//! - Clip space follows OpenGL: `-w <= z <= w`
//!
//! Degenerate input (zero-length axis, zero-length vector to normalize,
//! coincident look-at points) yields an identity or no-op result instead of
//! NaN. A frame must always produce numbers.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Axis length below which `rotation_about_axis` becomes a no-op
pub const AXIS_EPSILON: f32 = 1e-4;

/// Homogeneous `w` magnitude below which the perspective divide is skipped
const W_EPSILON: f32 = 1e-12;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Squared length under which a vector counts as zero
    pub const ZERO_LENGTH_SQUARED: f32 = 1e-12;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Wrap an angle in degrees into `(-180, 180]`
    pub fn wrap_degrees(mut degrees: f32) -> f32 {
        degrees %= 360.0;
        if degrees > 180.0 {
            degrees -= 360.0;
        } else if degrees <= -180.0 {
            degrees += 360.0;
        }
        degrees
    }

    /// Normalize `v`, returning it unchanged when its length is ~0
    pub fn normalize_or_self(v: Vec3) -> Vec3 {
        let length_squared = v.magnitude_squared();
        if length_squared > ZERO_LENGTH_SQUARED {
            v / length_squared.sqrt()
        } else {
            v
        }
    }

    /// Largest absolute component of `v`
    pub fn max_abs_component(v: &Vec3) -> f32 {
        v.x.abs().max(v.y.abs()).max(v.z.abs())
    }

    /// Smallest absolute component of `v`
    pub fn min_abs_component(v: &Vec3) -> f32 {
        v.x.abs().min(v.y.abs()).min(v.z.abs())
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Rotation of `angle` radians about an arbitrary axis.
    ///
    /// The axis does not need to be normalized. Returns identity when its
    /// length is below [`AXIS_EPSILON`].
    fn rotation_about_axis(angle: f32, axis: Vec3) -> Mat4;

    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// `Rx · Ry · Rz` from Euler angles in degrees
    fn rotation_euler_degrees(degrees: &Vec3) -> Mat4;

    /// Inverse of [`Mat4Ext::rotation_euler_degrees`]: `Rz⁻¹ · Ry⁻¹ · Rx⁻¹`
    fn inverse_rotation_euler_degrees(degrees: &Vec3) -> Mat4;

    /// OpenGL-style perspective projection (`fov_y` in degrees)
    fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Transform a point, including the homogeneous `w` divide
    fn project_point(&self, point: &Vec3) -> Vec3;

    /// Transform a direction (upper 3x3 only, no translation)
    fn rotate_vector(&self, vector: &Vec3) -> Vec3;

    /// Row `index` as a 4-vector
    fn row4(&self, index: usize) -> Vec4;
}

impl Mat4Ext for Mat4 {
    fn rotation_about_axis(angle: f32, axis: Vec3) -> Mat4 {
        match Unit::try_new(axis, AXIS_EPSILON) {
            Some(axis) => Mat4::from_axis_angle(&axis, angle),
            None => Mat4::identity(),
        }
    }

    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn rotation_euler_degrees(degrees: &Vec3) -> Mat4 {
        Mat4::rotation_x(utils::deg_to_rad(degrees.x))
            * Mat4::rotation_y(utils::deg_to_rad(degrees.y))
            * Mat4::rotation_z(utils::deg_to_rad(degrees.z))
    }

    fn inverse_rotation_euler_degrees(degrees: &Vec3) -> Mat4 {
        Mat4::rotation_z(-utils::deg_to_rad(degrees.z))
            * Mat4::rotation_y(-utils::deg_to_rad(degrees.y))
            * Mat4::rotation_x(-utils::deg_to_rad(degrees.x))
    }

    fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [f/a  0   0            0          ]
        //     [0    f   0            0          ]
        //     [0    0   (f+n)/(n-f)  2fn/(n-f)  ]
        //     [0    0   -1           0          ]
        let f = 1.0 / (utils::deg_to_rad(fov_y_degrees) * 0.5).tan();
        let depth = near - far;
        if aspect.abs() < f32::EPSILON || depth.abs() < f32::EPSILON || !f.is_finite() {
            log::warn!(
                "Degenerate perspective (fov={fov_y_degrees}, aspect={aspect}, near={near}, far={far}), using identity"
            );
            return Mat4::identity();
        }
        let nf = 1.0 / depth;

        let mut result = Mat4::zeros();
        result[(0, 0)] = f / aspect;
        result[(1, 1)] = f;
        result[(2, 2)] = (far + near) * nf;
        result[(2, 3)] = 2.0 * far * near * nf;
        result[(3, 2)] = -1.0;
        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = target - eye;
        if forward.magnitude_squared() <= utils::ZERO_LENGTH_SQUARED {
            return Mat4::identity();
        }
        let forward = forward.normalize();

        // Fall back to another up axis when looking straight along `up`
        let mut side = forward.cross(&up);
        if side.magnitude_squared() <= utils::ZERO_LENGTH_SQUARED {
            side = forward.cross(&Vec3::z());
            if side.magnitude_squared() <= utils::ZERO_LENGTH_SQUARED {
                side = forward.cross(&Vec3::x());
            }
        }
        let side = side.normalize();
        let camera_up = side.cross(&forward);

        Mat4::new(
            side.x, side.y, side.z, -side.dot(&eye),
            camera_up.x, camera_up.y, camera_up.z, -camera_up.dot(&eye),
            -forward.x, -forward.y, -forward.z, forward.dot(&eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn project_point(&self, point: &Vec3) -> Vec3 {
        let h = self * Vec4::new(point.x, point.y, point.z, 1.0);
        if h.w.abs() > W_EPSILON {
            Vec3::new(h.x / h.w, h.y / h.w, h.z / h.w)
        } else {
            h.xyz()
        }
    }

    fn rotate_vector(&self, vector: &Vec3) -> Vec3 {
        self.fixed_view::<3, 3>(0, 0) * vector
    }

    fn row4(&self, index: usize) -> Vec4 {
        Vec4::new(
            self[(index, 0)],
            self[(index, 1)],
            self[(index, 2)],
            self[(index, 3)],
        )
    }
}

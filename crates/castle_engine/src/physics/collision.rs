//! Sphere vs oriented unit box
//!
//! Every static collidable is a unit box `[-0.5, 0.5]³` placed by its
//! [`Transform`]. The sphere is mapped into the box's local space, resolved
//! there, and the contact is mapped back out.
//!
//! Two approximations are kept on purpose because they shape how collisions
//! feel:
//! - the local radius divides by the *smallest* axis scale, while the world
//!   depth multiplies by the *largest*, so non-uniformly scaled boxes push out
//!   a little harder than exact geometry would;
//! - normals go back through the rotation only, without the scale.
//!
//! For uniformly scaled boxes both are exact.

use crate::foundation::math::{Mat4Ext, Vec3, utils};
use crate::scene::bounds::UNIT_HALF_EXTENT;
use crate::scene::transform::Transform;

/// Squared local distance under which the sphere center counts as inside
const INSIDE_EPSILON_SQUARED: f32 = 1e-6;

/// Result of a sphere overlapping a static box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit world-space direction that pushes the sphere out of the box
    pub normal: Vec3,
    /// World-space penetration depth along `normal` (always > 0)
    pub depth: f32,
}

/// Collide a sphere with the unit box placed by `transform`.
///
/// Returns `None` when the sphere does not penetrate. The box must have
/// non-zero scale on every axis.
pub fn sphere_vs_box(center: &Vec3, radius: f32, transform: &Transform) -> Option<Contact> {
    let scale = transform.scale();

    // Into box space: translate, un-rotate (Z, Y, X), un-scale
    let relative = center - transform.position();
    let local_center = transform
        .inverse_rotation_matrix()
        .rotate_vector(&relative)
        .component_div(&scale);

    let closest = local_center.map(|c| c.clamp(-UNIT_HALF_EXTENT, UNIT_HALF_EXTENT));
    let offset = local_center - closest;
    let distance_squared = offset.magnitude_squared();
    let local_radius = radius / transform.min_scale();

    let (local_normal, penetration) = if distance_squared > INSIDE_EPSILON_SQUARED {
        let distance = distance_squared.sqrt();
        (offset / distance, local_radius - distance)
    } else {
        inside_push_out(&local_center, local_radius)
    };

    if penetration <= 0.0 {
        return None;
    }

    let world_normal = transform.rotation_matrix().rotate_vector(&local_normal);
    if world_normal.magnitude_squared() <= utils::ZERO_LENGTH_SQUARED {
        return None;
    }

    Some(Contact {
        normal: world_normal.normalize(),
        depth: penetration * transform.max_scale(),
    })
}

/// Center inside the box: leave through the nearest face.
fn inside_push_out(local_center: &Vec3, local_radius: f32) -> (Vec3, f32) {
    let mut axis = 0;
    let mut face_distance = f32::MAX;
    for i in 0..3 {
        let distance = UNIT_HALF_EXTENT - local_center[i].abs();
        if distance < face_distance {
            face_distance = distance;
            axis = i;
        }
    }

    let mut normal = Vec3::zeros();
    normal[axis] = if local_center[axis] < 0.0 { -1.0 } else { 1.0 };
    (normal, face_distance + local_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn box_of_scale(scale: f32) -> Transform {
        Transform::identity().with_uniform_scale(scale)
    }

    #[test]
    fn test_separated_sphere_has_no_contact() {
        let contact = sphere_vs_box(&Vec3::new(5.0, 0.0, 0.0), 0.5, &box_of_scale(2.0));
        assert!(contact.is_none());
    }

    #[test]
    fn test_face_contact_depth() {
        let contact = sphere_vs_box(&Vec3::new(1.4, 0.0, 0.0), 1.0, &box_of_scale(2.0))
            .expect("sphere overlaps the +X face");
        assert_relative_eq!(contact.normal, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(contact.depth, 0.6, epsilon = 1e-5);
    }

    #[test]
    fn test_touching_is_not_a_contact() {
        // Surface at x = 1.0, sphere of radius 0.5 centered at 1.5
        let contact = sphere_vs_box(&Vec3::new(1.5, 0.0, 0.0), 0.5, &box_of_scale(2.0));
        assert!(contact.is_none());
    }

    #[test]
    fn test_center_inside_pushes_through_nearest_face() {
        let contact = sphere_vs_box(&Vec3::new(0.1, 0.1, 0.9), 0.5, &box_of_scale(2.0))
            .expect("center inside the box");
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
        // Face 0.1 away, plus the radius, in world units
        assert_relative_eq!(contact.depth, 0.6, epsilon = 1e-4);
    }

    #[test]
    fn test_center_inside_negative_side() {
        let contact = sphere_vs_box(&Vec3::new(-0.05, -0.95, 0.2), 0.25, &box_of_scale(2.0))
            .expect("center inside the box");
        assert_relative_eq!(contact.normal, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-5);
        assert!(contact.depth > 0.0);
    }

    #[test]
    fn test_rotated_box_normal_is_rotated() {
        // 90° yaw turns the local +X face toward world -Z
        let transform = Transform::identity()
            .with_rotation(Vec3::new(0.0, 90.0, 0.0))
            .with_uniform_scale(2.0);
        let contact = sphere_vs_box(&Vec3::new(0.0, 0.0, -1.3), 0.5, &transform)
            .expect("sphere overlaps the rotated face");
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(contact.depth, 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_non_uniform_scale_over_corrects() {
        // Thin slab: 10 wide, 1 tall. Exact depth would be 0.3.
        let transform = Transform::identity().with_scale(Vec3::new(10.0, 1.0, 10.0));
        let contact = sphere_vs_box(&Vec3::new(0.0, 0.7, 0.0), 0.5, &transform)
            .expect("sphere resting into the slab");
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
        assert!(contact.depth >= 0.3);
    }

    #[test]
    fn test_corner_contact_normal_is_diagonal() {
        let contact = sphere_vs_box(&Vec3::new(1.2, 1.2, 0.0), 0.5, &box_of_scale(2.0))
            .expect("sphere overlaps the edge");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(contact.normal, expected, epsilon = 1e-5);
    }
}

//! Physics module
//!
//! Static collision for a single dynamic sphere: sphere vs oriented unit box
//! contacts, and ray queries for camera occlusion. Static geometry never
//! moves in response to a contact.

pub mod collision;
pub mod ray;

pub use collision::{Contact, sphere_vs_box};
pub use ray::{Ray, RayHit, raycast_nearest};

use crate::foundation::math::Vec3;
use crate::scene::bounds::{BoundingSphere, UNIT_HALF_EXTENT};
use crate::scene::transform::Transform;

/// A static obstacle shaped as a unit box under a transform.
///
/// The controller and the cameras only read collidables; they receive them
/// as a slice every frame instead of holding on to the scene.
pub trait Collidable {
    /// Placement of the unit box
    fn transform(&self) -> &Transform;

    /// Whether the object blocks movement and camera rays
    fn is_collidable(&self) -> bool;

    /// Contact with a sphere, or `None` when the object is not collidable or
    /// does not overlap
    fn resolve_sphere(&self, center: &Vec3, radius: f32) -> Option<Contact> {
        if !self.is_collidable() {
            return None;
        }
        sphere_vs_box(center, radius, self.transform())
    }

    /// Sphere used for camera occlusion: centered on the object position,
    /// radius half the largest axis scale
    fn occlusion_sphere(&self) -> BoundingSphere {
        let transform = self.transform();
        BoundingSphere::new(transform.position(), UNIT_HALF_EXTENT * transform.max_scale())
    }
}

impl<T: Collidable + ?Sized> Collidable for &T {
    fn transform(&self) -> &Transform {
        (**self).transform()
    }

    fn is_collidable(&self) -> bool {
        (**self).is_collidable()
    }

    fn resolve_sphere(&self, center: &Vec3, radius: f32) -> Option<Contact> {
        (**self).resolve_sphere(center, radius)
    }

    fn occlusion_sphere(&self) -> BoundingSphere {
        (**self).occlusion_sphere()
    }
}

//! Ray queries against the collidable set
//!
//! Used by the orbit camera to find the nearest obstruction between its
//! target and the ideal eye position. Collidables are approximated by their
//! occlusion spheres; see [`Collidable::occlusion_sphere`].

use crate::foundation::math::{Vec3, utils};
use super::Collidable;

/// A ray for occlusion queries
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// Unit direction, or zero for a degenerate ray that hits nothing
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray, normalizing `direction` when it is non-zero
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: utils::normalize_or_self(direction),
        }
    }

    /// Ray from `origin` through `target`
    pub fn between(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest obstruction found by [`raycast_nearest`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index of the collidable in the queried slice
    pub index: usize,
    /// Distance from the ray origin to the entry point
    pub distance: f32,
    /// Entry point in world space
    pub point: Vec3,
}

/// Find the nearest collidable whose occlusion sphere the ray enters within
/// `max_distance`.
///
/// Only entry points in front of the origin count: a sphere that already
/// contains the origin does not occlude.
pub fn raycast_nearest<C: Collidable>(
    ray: &Ray,
    max_distance: f32,
    collidables: &[C],
) -> Option<RayHit> {
    collidables
        .iter()
        .enumerate()
        .filter(|(_, collidable)| collidable.is_collidable())
        .filter_map(|(index, collidable)| {
            let (entry, _) = collidable.occlusion_sphere().intersect_ray(ray)?;
            (entry > 0.0 && entry < max_distance).then_some((index, entry))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, distance)| RayHit {
            index,
            distance,
            point: ray.point_at(distance),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{PrimitiveKind, SceneObject};
    use crate::scene::transform::Transform;
    use approx::assert_relative_eq;

    fn pillar(x: f32, z: f32, scale: f32) -> SceneObject {
        SceneObject::new(
            "pillar",
            PrimitiveKind::Cube,
            Transform::from_position(Vec3::new(x, 0.0, z)).with_uniform_scale(scale),
        )
    }

    #[test]
    fn test_nearest_hit_wins() {
        let objects = [pillar(0.0, -10.0, 2.0), pillar(0.0, -4.0, 2.0), pillar(5.0, -2.0, 2.0)];
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));

        let hit = raycast_nearest(&ray, 20.0, &objects).expect("pillars ahead");
        assert_eq!(hit.index, 1);
        // Occlusion radius is half the largest scale
        assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point, Vec3::new(0.0, 0.0, -3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_hits_beyond_max_distance_are_ignored() {
        let objects = [pillar(0.0, -10.0, 2.0)];
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert!(raycast_nearest(&ray, 5.0, &objects).is_none());
    }

    #[test]
    fn test_sphere_around_origin_does_not_occlude() {
        let objects = [pillar(0.0, 0.0, 4.0)];
        let ray = Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        assert!(raycast_nearest(&ray, 10.0, &objects).is_none());
    }

    #[test]
    fn test_non_collidable_objects_are_skipped() {
        let objects = [pillar(0.0, -4.0, 2.0).with_collidable(false)];
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert!(raycast_nearest(&ray, 10.0, &objects).is_none());
    }

    #[test]
    fn test_between_normalizes() {
        let ray = Ray::between(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, -3.0));
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0));
    }
}

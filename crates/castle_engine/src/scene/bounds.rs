//! Bounding volumes
//!
//! Local bounding spheres come from raw vertex extents; world spheres are
//! derived from a [`Transform`] on demand. The world radius is scaled by the
//! largest axis scale, so the sphere stays conservative under non-uniform
//! scale.

use crate::foundation::math::{Mat4Ext, Vec3, utils};
use crate::physics::ray::Ray;
use super::transform::Transform;

/// Half extent of the unit primitives (`[-0.5, 0.5]` on every axis)
pub const UNIT_HALF_EXTENT: f32 = 0.5;

/// A bounding sphere for culling and ray queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center of the sphere
    pub center: Vec3,
    /// Radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere around an axis-aligned extent: AABB midpoint, half diagonal
    pub fn from_extents(min: Vec3, max: Vec3) -> Self {
        let center = (min + max) * 0.5;
        let radius = (max - min).magnitude() * 0.5;
        Self { center, radius }
    }

    /// Sphere enclosing a set of local-space vertices.
    ///
    /// Returns `None` for an empty set. The sphere is built from the AABB of
    /// the vertices, not the minimal enclosing sphere.
    pub fn from_vertices(vertices: &[Vec3]) -> Option<Self> {
        let (first, rest) = vertices.split_first()?;
        let (min, max) = rest.iter().fold((*first, *first), |(min, max), v| {
            (min.inf(v), max.sup(v))
        });
        Some(Self::from_extents(min, max))
    }

    /// Sphere enclosing the unit primitive `[-0.5, 0.5]³`
    pub fn unit_box() -> Self {
        let half = Vec3::new(UNIT_HALF_EXTENT, UNIT_HALF_EXTENT, UNIT_HALF_EXTENT);
        Self::from_extents(-half, half)
    }

    /// Map a local sphere into world space through `transform`
    pub fn to_world(&self, transform: &Transform) -> Self {
        Self {
            center: transform.model_matrix().project_point(&self.center),
            radius: self.radius * transform.max_scale(),
        }
    }

    /// Check if this sphere contains a point (surface included)
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }

    /// Geometric ray-sphere test.
    ///
    /// Returns the entry and exit distances `(t0, t1)` along the ray, either of
    /// which may be negative when the origin is inside or past the sphere.
    /// A ray with a zero direction never hits.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        if ray.direction.magnitude_squared() <= utils::ZERO_LENGTH_SQUARED {
            return None;
        }

        let to_center = self.center - ray.origin;
        let tca = to_center.dot(&ray.direction);
        let d2 = to_center.magnitude_squared() - tca * tca;
        let r2 = self.radius * self.radius;
        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        Some((tca - thc, tca + thc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_vertices() {
        let vertices = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(1.0, -2.0, 4.0),
        ];
        let sphere = BoundingSphere::from_vertices(&vertices).expect("non-empty");
        assert_relative_eq!(sphere.center, Vec3::new(1.0, 0.0, 2.0));
        assert_relative_eq!(sphere.radius, (16.0f32 + 16.0 + 16.0).sqrt() * 0.5, epsilon = 1e-5);

        assert!(BoundingSphere::from_vertices(&[]).is_none());
    }

    #[test]
    fn test_unit_box_radius() {
        assert_relative_eq!(BoundingSphere::unit_box().radius, 3.0f32.sqrt() * 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_to_world_uses_largest_scale() {
        let transform = Transform::from_position(Vec3::new(0.0, 4.0, 0.0))
            .with_scale(Vec3::new(1.0, 8.0, 2.0));
        let world = BoundingSphere::new(Vec3::zeros(), 0.5).to_world(&transform);
        assert_relative_eq!(world.center, Vec3::new(0.0, 4.0, 0.0));
        assert_relative_eq!(world.radius, 4.0);
    }

    #[test]
    fn test_ray_hits_sphere_ahead() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        let (t0, t1) = sphere.intersect_ray(&ray).expect("hit");
        assert_relative_eq!(t0, 8.0, epsilon = 1e-5);
        assert_relative_eq!(t1, 12.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_misses() {
        let sphere = BoundingSphere::new(Vec3::new(5.0, 0.0, -10.0), 2.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect_ray(&ray).is_none());

        let stalled = Ray::new(Vec3::zeros(), Vec3::zeros());
        assert!(BoundingSphere::new(Vec3::zeros(), 1.0).intersect_ray(&stalled).is_none());
    }

    #[test]
    fn test_ray_origin_inside_has_negative_entry() {
        let sphere = BoundingSphere::new(Vec3::zeros(), 3.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
        let (t0, t1) = sphere.intersect_ray(&ray).expect("hit");
        assert!(t0 < 0.0);
        assert_relative_eq!(t1, 3.0, epsilon = 1e-5);
    }
}

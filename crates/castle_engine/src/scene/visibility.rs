//! Visibility culling and front-to-back ordering
//!
//! Culls every scene object against the camera frustum and orders the
//! survivors by squared distance from the eye so the backend can exploit
//! early depth rejection. Objects without bounds (the ground plane) are
//! always visible and are ordered by their position.

use crate::foundation::math::{Mat4, Vec3};
use super::frustum::Frustum;
use super::{ObjectId, Scene, SceneObject};

/// An object that survived culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleObject {
    /// Handle of the visible object
    pub id: ObjectId,
    /// Squared distance from the eye to the object's sort point
    pub distance_squared: f32,
}

/// Per-frame culling statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityStats {
    /// Objects tested
    pub tested: usize,
    /// Objects rejected by the frustum
    pub culled: usize,
}

/// Frustum culling and distance sorting
#[derive(Debug, Default)]
pub struct VisibilitySystem {
    visible: Vec<VisibleObject>,
    stats: VisibilityStats,
}

impl VisibilitySystem {
    /// Create a new visibility system
    pub fn new() -> Self {
        Self::default()
    }

    /// Cull and sort `scene` for a camera at `eye` with the given
    /// view-projection matrix.
    ///
    /// The returned slice is ordered nearest first; equal distances come out
    /// in no particular order.
    pub fn update(&mut self, scene: &Scene, view_projection: &Mat4, eye: &Vec3) -> &[VisibleObject] {
        let frustum = Frustum::from_view_projection(view_projection);
        self.visible.clear();
        self.stats = VisibilityStats::default();

        for (id, object) in scene.iter() {
            self.stats.tested += 1;
            match classify(object, &frustum, eye) {
                Some(distance_squared) => self.visible.push(VisibleObject { id, distance_squared }),
                None => self.stats.culled += 1,
            }
        }

        self.visible
            .sort_unstable_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared));

        log::trace!(
            "Visibility: {} of {} objects visible",
            self.visible.len(),
            self.stats.tested
        );
        &self.visible
    }

    /// Result of the last update
    pub fn visible(&self) -> &[VisibleObject] {
        &self.visible
    }

    /// Statistics of the last update
    pub fn stats(&self) -> VisibilityStats {
        self.stats
    }
}

/// Sort distance of a visible object, `None` when culled
fn classify(object: &SceneObject, frustum: &Frustum, eye: &Vec3) -> Option<f32> {
    match object.world_bounds() {
        Some(bounds) => frustum
            .contains_sphere(&bounds)
            .then(|| (bounds.center - eye).magnitude_squared()),
        None => Some((object.transform().position() - eye).magnitude_squared()),
    }
}

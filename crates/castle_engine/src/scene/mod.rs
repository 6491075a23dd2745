//! Scene management
//!
//! Owns every object of the courtyard: castle pieces, ground, pickups and the
//! player's visual. Objects are addressed by stable [`ObjectId`] handles so
//! visibility results and draw items can refer back to them.
//!
//! ## Layout
//!
//! ```text
//! Scene (slotmap of SceneObject)
//!   ├─ collidables()  → controller, orbit camera
//!   └─ iter()         → visibility → render hand-off
//! ```
//!
//! The scene is rebuilt wholesale when the layout changes; per frame only the
//! player's visual transform is written.

pub mod transform;
pub mod bounds;
pub mod frustum;
pub mod visibility;
pub mod castle;

pub use transform::Transform;
pub use bounds::BoundingSphere;
pub use frustum::{Frustum, Plane};
pub use visibility::{VisibilitySystem, VisibleObject};
pub use castle::{CastleBuilder, CastleLayout, add_pickup};

use slotmap::{SlotMap, new_key_type};

use crate::foundation::math::Vec3;
use crate::physics::Collidable;

new_key_type! {
    /// Stable handle to a [`SceneObject`]
    pub struct ObjectId;
}

/// Unit primitive an object instantiates
///
/// All primitives fit `[-0.5, 0.5]³` before scaling, except the plane which
/// is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Unit cube
    Cube,
    /// Cylinder of diameter 1 and height 1
    Cylinder,
    /// Cone of base diameter 1 and height 1
    Cone,
    /// Sphere of diameter 1
    Sphere,
    /// Infinite ground plane at local `y = 0`
    Plane,
}

impl PrimitiveKind {
    /// Local bounding sphere, `None` for unbounded primitives
    pub fn local_bounds(self) -> Option<BoundingSphere> {
        match self {
            Self::Cube | Self::Cylinder | Self::Cone => Some(BoundingSphere::unit_box()),
            Self::Sphere => Some(BoundingSphere::new(Vec3::zeros(), bounds::UNIT_HALF_EXTENT)),
            Self::Plane => None,
        }
    }
}

/// Surface parameters handed through to the rendering backend untouched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGB tint
    pub base_color: [f32; 3],
    /// Specular strength
    pub specular_intensity: f32,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            specular_intensity: 0.5,
            shininess: 32.0,
        }
    }
}

impl Material {
    /// Dull sand used for the castle body
    pub fn sand() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            specular_intensity: 0.1,
            shininess: 10.0,
        }
    }

    /// Wood tint for the drawbridge
    pub fn wood() -> Self {
        Self {
            base_color: [0.6, 0.5, 0.4],
            ..Self::sand()
        }
    }

    /// Polished surface of the player sphere
    pub fn marble() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            specular_intensity: 0.8,
            shininess: 32.0,
        }
    }
}

/// An object in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Debug name
    pub name: String,
    /// Primitive shape
    pub kind: PrimitiveKind,
    /// Surface parameters
    pub material: Material,
    transform: Transform,
    local_bounds: Option<BoundingSphere>,
    collidable: bool,
}

impl SceneObject {
    /// Create a collidable object with the primitive's default bounds
    pub fn new(name: impl Into<String>, kind: PrimitiveKind, transform: Transform) -> Self {
        Self {
            name: name.into(),
            kind,
            material: Material::default(),
            transform,
            local_bounds: kind.local_bounds(),
            collidable: true,
        }
    }

    /// Builder pattern: Set collidable flag
    pub fn with_collidable(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }

    /// Builder pattern: Set material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Builder pattern: Override local bounds (`None` = never culled)
    pub fn with_local_bounds(mut self, bounds: Option<BoundingSphere>) -> Self {
        self.local_bounds = bounds;
        self
    }

    /// Current placement
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access for setters; matrices stay in sync through them
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Local bounding sphere
    pub fn local_bounds(&self) -> Option<&BoundingSphere> {
        self.local_bounds.as_ref()
    }

    /// World bounding sphere, derived from the current transform
    pub fn world_bounds(&self) -> Option<BoundingSphere> {
        self.local_bounds.map(|bounds| bounds.to_world(&self.transform))
    }

    /// Change whether the object blocks movement
    pub fn set_collidable(&mut self, collidable: bool) {
        self.collidable = collidable;
    }
}

impl Collidable for SceneObject {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn is_collidable(&self) -> bool {
        self.collidable
    }
}

/// Container of all scene objects
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneObject>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its handle
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        log::trace!("Adding scene object '{}' ({:?})", object.name, object.kind);
        self.objects.insert(object)
    }

    /// Remove an object
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(id)
    }

    /// Look up an object
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Look up an object mutably
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// All objects with their handles
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }

    /// Read-only view of the objects that block movement
    pub fn collidables(&self) -> Vec<&SceneObject> {
        self.objects
            .values()
            .filter(|object| object.is_collidable())
            .collect()
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_and_lookup() {
        let mut scene = Scene::new();
        let id = scene.add(SceneObject::new("crate", PrimitiveKind::Cube, Transform::identity()));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(id).map(|o| o.name.as_str()), Some("crate"));

        assert!(scene.remove(id).is_some());
        assert!(scene.get(id).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_collidables_skip_flagged_objects() {
        let mut scene = Scene::new();
        scene.add(SceneObject::new("wall", PrimitiveKind::Cube, Transform::identity()));
        scene.add(
            SceneObject::new("coin", PrimitiveKind::Sphere, Transform::identity())
                .with_collidable(false),
        );
        let collidables = scene.collidables();
        assert_eq!(collidables.len(), 1);
        assert_eq!(collidables[0].name, "wall");
    }

    #[test]
    fn test_plane_is_unbounded() {
        let ground = SceneObject::new("ground", PrimitiveKind::Plane, Transform::identity());
        assert!(ground.world_bounds().is_none());
    }

    #[test]
    fn test_world_bounds_follow_transform() {
        let mut object = SceneObject::new("ball", PrimitiveKind::Sphere, Transform::identity());
        object.transform_mut().set_position(Vec3::new(1.0, 2.0, 3.0));
        object.transform_mut().set_scale(Vec3::new(2.0, 2.0, 2.0));

        let bounds = object.world_bounds().expect("sphere is bounded");
        assert_relative_eq!(bounds.center, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(bounds.radius, 1.0);
    }

    #[test]
    fn test_non_collidable_never_resolves() {
        let object = SceneObject::new("ghost", PrimitiveKind::Cube, Transform::identity())
            .with_collidable(false);
        assert!(object.resolve_sphere(&Vec3::zeros(), 1.0).is_none());
    }
}

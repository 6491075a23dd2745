//! Procedural castle layout
//!
//! Assembles the courtyard from unit primitives: a walled perimeter with
//! corner towers, a tiered keep crowned by turrets and a spire, and a
//! gatehouse with lintel and drawbridge on the south side (+Z).
//!
//! Every piece is collidable and collides as a unit box under its transform,
//! so round towers and conical roofs block like their bounding boxes. The
//! ground plane and pickups only render.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;
use super::{Material, ObjectId, PrimitiveKind, Scene, SceneObject, Transform};

/// Dimensions of the castle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastleLayout {
    /// Perimeter extent along X
    pub width: f32,
    /// Perimeter extent along Z
    pub depth: f32,
    /// Height of the curtain walls
    pub wall_height: f32,
    /// Thickness of the curtain walls
    pub wall_thickness: f32,
    /// Radius of the corner towers
    pub tower_radius: f32,
    /// Height of the corner towers
    pub tower_height: f32,
    /// Footprint of the keep's base tier
    pub keep_base_size: f32,
    /// Height of the keep's base tier
    pub keep_base_height: f32,
    /// Footprint of the keep's second tier
    pub keep_mid_size: f32,
    /// Height of the keep's second tier
    pub keep_mid_height: f32,
    /// Radius of the keep's corner turrets
    pub turret_radius: f32,
    /// Height of the keep's corner turrets
    pub turret_height: f32,
    /// Radius of the central spire
    pub spire_radius: f32,
    /// Height of the central spire
    pub spire_height: f32,
    /// Gap between the gatehouse towers
    pub gate_gap: f32,
    /// Radius of the gatehouse towers
    pub gate_tower_radius: f32,
    /// Height of the gatehouse towers
    pub gate_tower_height: f32,
    /// Length of the drawbridge beyond the wall
    pub bridge_length: f32,
    /// Depth of one drawbridge plank along the bridge
    pub bridge_plank_depth: f32,
    /// Side length of the ground plane
    pub ground_size: f32,
}

impl Default for CastleLayout {
    fn default() -> Self {
        Self {
            width: 40.0,
            depth: 40.0,
            wall_height: 3.0,
            wall_thickness: 1.0,
            tower_radius: 1.5,
            tower_height: 6.0,
            keep_base_size: 12.0,
            keep_base_height: 8.0,
            keep_mid_size: 8.0,
            keep_mid_height: 5.0,
            turret_radius: 1.0,
            turret_height: 4.0,
            spire_radius: 2.0,
            spire_height: 8.0,
            gate_gap: 6.0,
            gate_tower_radius: 2.5,
            gate_tower_height: 8.0,
            bridge_length: 10.0,
            bridge_plank_depth: 0.5,
            ground_size: 50.0,
        }
    }
}

/// Builds the castle into a [`Scene`]
#[derive(Debug, Clone, Default)]
pub struct CastleBuilder {
    layout: CastleLayout,
    pieces: Vec<ObjectId>,
}

impl CastleBuilder {
    /// Create a builder for `layout`
    pub fn new(layout: CastleLayout) -> Self {
        Self { layout, pieces: Vec::new() }
    }

    /// Layout in use
    pub fn layout(&self) -> &CastleLayout {
        &self.layout
    }

    /// Add the ground and every castle piece, returning their handles
    pub fn build(mut self, scene: &mut Scene) -> Vec<ObjectId> {
        self.build_ground(scene);
        self.build_perimeter(scene);
        self.build_keep(scene);
        self.build_gatehouse(scene);

        log::info!("Castle built: {} pieces", self.pieces.len());
        self.pieces
    }

    fn build_ground(&mut self, scene: &mut Scene) {
        let size = self.layout.ground_size;
        let ground = SceneObject::new(
            "ground",
            PrimitiveKind::Plane,
            Transform::identity().with_scale(Vec3::new(size, 1.0, size)),
        )
        .with_collidable(false)
        .with_material(Material::sand());
        self.pieces.push(scene.add(ground));
    }

    fn build_perimeter(&mut self, scene: &mut Scene) {
        let layout = self.layout.clone();
        let half_w = layout.width / 2.0;
        let half_d = layout.depth / 2.0;

        for (x, z) in [(half_w, half_d), (-half_w, half_d), (half_w, -half_d), (-half_w, -half_d)] {
            self.add_tower(scene, "corner_tower", x, z, layout.tower_radius, layout.tower_height, 0.0);
        }

        let span_x = layout.width - layout.tower_radius * 2.0;
        let span_z = layout.depth - layout.tower_radius * 2.0;
        self.add_wall(scene, "north_wall", 0.0, -half_d, 0.0, span_x);
        self.add_wall(scene, "south_wall", 0.0, half_d, 0.0, span_x);
        self.add_wall(scene, "east_wall", half_w, 0.0, 90.0, span_z);
        self.add_wall(scene, "west_wall", -half_w, 0.0, 90.0, span_z);
    }

    fn build_keep(&mut self, scene: &mut Scene) {
        let layout = self.layout.clone();
        let base_h = layout.keep_base_height;
        let mid_h = layout.keep_mid_height;

        self.add_block(
            scene,
            "keep_base",
            Vec3::new(0.0, base_h / 2.0, 0.0),
            Vec3::new(layout.keep_base_size, base_h, layout.keep_base_size),
            Material::sand(),
        );
        self.add_block(
            scene,
            "keep_tier",
            Vec3::new(0.0, base_h + mid_h / 2.0, 0.0),
            Vec3::new(layout.keep_mid_size, mid_h, layout.keep_mid_size),
            Material::sand(),
        );

        let roof_line = base_h + mid_h;
        let offset = layout.keep_mid_size / 2.0 - layout.turret_radius;
        for (x, z) in [(offset, offset), (-offset, offset), (offset, -offset), (-offset, -offset)] {
            self.add_tower(scene, "turret", x, z, layout.turret_radius, layout.turret_height, roof_line);
        }
        self.add_tower(scene, "spire", 0.0, 0.0, layout.spire_radius, layout.spire_height, roof_line);
    }

    fn build_gatehouse(&mut self, scene: &mut Scene) {
        let layout = self.layout.clone();
        let z = layout.depth / 2.0;
        let r = layout.gate_tower_radius;
        let flank = layout.gate_gap / 2.0 + r;

        self.add_tower(scene, "gate_tower", flank, z, r, layout.gate_tower_height, 0.0);
        self.add_tower(scene, "gate_tower", -flank, z, r, layout.gate_tower_height, 0.0);

        self.add_block(
            scene,
            "lintel",
            Vec3::new(0.0, 5.0, z),
            Vec3::new(layout.gate_gap + r * 2.0, 2.0, 2.0),
            Material::sand(),
        );
        self.build_drawbridge(scene, z + layout.wall_thickness / 2.0);
    }

    /// Lay the drawbridge as planks outward from `z_start`.
    ///
    /// A box's contact zone grows with its largest-to-smallest scale ratio,
    /// so planks stay about as deep as they are thick.
    fn build_drawbridge(&mut self, scene: &mut Scene, z_start: f32) {
        let layout = self.layout.clone();
        let depth = layout.bridge_plank_depth.clamp(0.1, layout.bridge_length.max(0.1));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let planks = (layout.bridge_length / depth).round().max(1.0) as usize;

        for i in 0..planks {
            #[allow(clippy::cast_precision_loss)]
            let z = z_start + depth * (i as f32 + 0.5);
            self.add_block(
                scene,
                "drawbridge",
                Vec3::new(0.0, 0.5, z),
                Vec3::new(4.0, 0.5, depth),
                Material::wood(),
            );
        }
    }

    fn add_block(&mut self, scene: &mut Scene, name: &str, position: Vec3, scale: Vec3, material: Material) {
        let object = SceneObject::new(
            name,
            PrimitiveKind::Cube,
            Transform::from_position(position).with_scale(scale),
        )
        .with_material(material);
        self.pieces.push(scene.add(object));
    }

    fn add_wall(&mut self, scene: &mut Scene, name: &str, x: f32, z: f32, yaw: f32, length: f32) {
        let height = self.layout.wall_height;
        let transform = Transform::from_position(Vec3::new(x, height / 2.0, z))
            .with_rotation(Vec3::new(0.0, yaw, 0.0))
            .with_scale(Vec3::new(length, height, self.layout.wall_thickness));
        let wall = SceneObject::new(name, PrimitiveKind::Cube, transform).with_material(Material::sand());
        self.pieces.push(scene.add(wall));
    }

    /// Cylinder body with a conical roof, standing on `y_base`
    fn add_tower(&mut self, scene: &mut Scene, name: &str, x: f32, z: f32, radius: f32, height: f32, y_base: f32) {
        let body = SceneObject::new(
            name,
            PrimitiveKind::Cylinder,
            Transform::from_position(Vec3::new(x, y_base + height / 2.0, z))
                .with_scale(Vec3::new(radius * 2.0, height, radius * 2.0)),
        )
        .with_material(Material::sand());
        self.pieces.push(scene.add(body));

        // Roof sits a hair above the body to avoid z-fighting
        let roof_radius = radius + 0.2;
        let roof_height = radius * 1.5;
        let roof = SceneObject::new(
            format!("{name}_roof"),
            PrimitiveKind::Cone,
            Transform::from_position(Vec3::new(x, y_base + height + 0.01 + roof_height / 2.0, z))
                .with_scale(Vec3::new(roof_radius * 2.0, roof_height, roof_radius * 2.0)),
        )
        .with_material(Material::sand());
        self.pieces.push(scene.add(roof));
    }
}

/// Add a decorative pickup that renders but never blocks movement
pub fn add_pickup(scene: &mut Scene, position: Vec3, size: f32) -> ObjectId {
    scene.add(
        SceneObject::new(
            "pickup",
            PrimitiveKind::Sphere,
            Transform::from_position(position).with_uniform_scale(size),
        )
        .with_collidable(false)
        .with_material(Material {
            base_color: [1.0, 0.85, 0.2],
            specular_intensity: 1.0,
            shininess: 64.0,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Collidable;
    use approx::assert_relative_eq;

    fn build_default() -> (Scene, Vec<ObjectId>) {
        let mut scene = Scene::new();
        let pieces = CastleBuilder::new(CastleLayout::default()).build(&mut scene);
        (scene, pieces)
    }

    #[test]
    fn test_piece_count() {
        let (scene, pieces) = build_default();
        // ground + 4 corner towers (body + roof) + 4 walls
        // + 2 keep tiers + 5 keep towers (body + roof)
        // + 2 gate towers (body + roof) + lintel + 20 drawbridge planks
        assert_eq!(pieces.len(), 1 + 8 + 4 + 2 + 10 + 4 + 1 + 20);
        assert_eq!(scene.len(), pieces.len());
    }

    #[test]
    fn test_only_ground_is_non_collidable() {
        let (scene, pieces) = build_default();
        assert_eq!(scene.collidables().len(), pieces.len() - 1);

        let ground = scene
            .iter()
            .find(|(_, object)| object.kind == PrimitiveKind::Plane)
            .map(|(_, object)| object)
            .expect("ground plane");
        assert!(!ground.is_collidable());
        assert!(ground.world_bounds().is_none());
    }

    #[test]
    fn test_east_wall_is_rotated() {
        let (scene, _) = build_default();
        let wall = scene
            .iter()
            .find(|(_, object)| object.name == "east_wall")
            .map(|(_, object)| object)
            .expect("east wall");
        assert_relative_eq!(wall.transform().rotation().y, 90.0);
        assert_relative_eq!(wall.transform().position(), Vec3::new(20.0, 1.5, 0.0));
    }

    #[test]
    fn test_turrets_stand_on_keep_roof() {
        let (scene, _) = build_default();
        let turret = scene
            .iter()
            .find(|(_, object)| object.name == "turret")
            .map(|(_, object)| object)
            .expect("turret");
        // Base 8 + tier 5 + half of the 4 unit body
        assert_relative_eq!(turret.transform().position().y, 15.0);
    }

    #[test]
    fn test_pickups_do_not_collide() {
        let mut scene = Scene::new();
        let id = add_pickup(&mut scene, Vec3::new(1.0, 1.0, 1.0), 0.4);
        assert!(scene.collidables().is_empty());
        assert!(scene.get(id).and_then(SceneObject::world_bounds).is_some());
    }

    #[test]
    fn test_drawbridge_planks_start_outside_wall() {
        let (scene, _) = build_default();
        let planks: Vec<_> = scene
            .iter()
            .filter(|(_, object)| object.name == "drawbridge")
            .map(|(_, object)| object)
            .collect();
        assert_eq!(planks.len(), 20);

        let nearest = planks
            .iter()
            .map(|plank| plank.transform().position().z)
            .fold(f32::MAX, f32::min);
        assert_relative_eq!(nearest, 20.75);
    }

    #[test]
    fn test_walk_from_spawn_to_wall_is_clear() {
        let (scene, _) = build_default();
        let spawn = crate::core::config::ControllerConfig::default().spawn_position;

        // Spawn up to a unit short of the south wall's inner face
        for step in 0..=17 {
            #[allow(clippy::cast_precision_loss)]
            let point = spawn + Vec3::new(0.0, 0.0, step as f32 * 0.5);
            for collidable in scene.collidables() {
                assert!(
                    collidable.resolve_sphere(&point, 0.5).is_none(),
                    "{} blocks the walk at {:?}",
                    collidable.name,
                    point
                );
            }
        }
    }
}

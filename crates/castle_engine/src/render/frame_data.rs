//! Per-frame data handed to the rendering backend
//!
//! Everything here is plain data: the simulation fills a [`FrameData`] once
//! per frame and the backend consumes it without calling back into the
//! scene. Uniform blocks are `#[repr(C)]` and [`bytemuck::Pod`] so they can
//! be uploaded as raw bytes; matrices are stored column-major.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Mat4, Vec3};
use crate::scene::{Material, ObjectId, PrimitiveKind, SceneObject};

/// Camera uniform data, uploaded once per frame
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    /// View matrix (world to camera space)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (camera to clip space)
    pub projection: [[f32; 4]; 4],
    /// Pre-computed view-projection matrix
    pub view_projection: [[f32; 4]; 4],
    /// Eye position (xyz, w = 1)
    pub eye_position: [f32; 4],
}

/// Per-object uniform data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model matrix
    pub model: [[f32; 4]; 4],
    /// Normal matrix (rotation with inverse scale)
    pub normal: [[f32; 4]; 4],
    /// Base color (rgb, a = 1)
    pub base_color: [f32; 4],
    /// Specular intensity, shininess, unused, unused
    pub material_params: [f32; 4],
}

impl ObjectUniforms {
    /// Build from matrices and material
    pub fn new(model: &Mat4, normal: &Mat4, material: &Material) -> Self {
        let [r, g, b] = material.base_color;
        Self {
            model: (*model).into(),
            normal: (*normal).into(),
            base_color: [r, g, b, 1.0],
            material_params: [material.specular_intensity, material.shininess, 0.0, 0.0],
        }
    }
}

/// One visible object, in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Scene handle of the object
    pub id: ObjectId,
    /// Primitive to draw
    pub kind: PrimitiveKind,
    /// Model matrix
    pub model: Mat4,
    /// Normal matrix
    pub normal: Mat4,
    /// Opaque surface parameters
    pub material: Material,
    /// Squared distance from the eye used for ordering
    pub distance_squared: f32,
}

impl DrawItem {
    /// Snapshot `object` for drawing
    pub fn from_object(id: ObjectId, object: &SceneObject, distance_squared: f32) -> Self {
        Self {
            id,
            kind: object.kind,
            model: *object.transform().model_matrix(),
            normal: *object.transform().normal_matrix(),
            material: object.material,
            distance_squared,
        }
    }

    /// Uniform block for this item
    pub fn uniforms(&self) -> ObjectUniforms {
        ObjectUniforms::new(&self.model, &self.normal, &self.material)
    }
}

/// Everything the backend needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// Frame number, starting at 1
    pub frame_index: u64,
    /// View matrix
    pub view: Mat4,
    /// Projection matrix
    pub projection: Mat4,
    /// `projection · view`
    pub view_projection: Mat4,
    /// Eye position
    pub eye: Vec3,
    /// Visible objects, nearest first
    pub draw_items: Vec<DrawItem>,
}

impl FrameData {
    /// Camera uniform block
    pub fn camera_uniforms(&self) -> CameraUniforms {
        CameraUniforms {
            view: self.view.into(),
            projection: self.projection.into(),
            view_projection: self.view_projection.into(),
            eye_position: [self.eye.x, self.eye.y, self.eye.z, 1.0],
        }
    }

    /// Object uniform blocks in draw order
    pub fn object_uniforms(&self) -> Vec<ObjectUniforms> {
        self.draw_items.iter().map(DrawItem::uniforms).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transform;

    #[test]
    fn test_uniform_sizes_match_std140_layout() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 3 * 64 + 16);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 2 * 64 + 32);
    }

    #[test]
    fn test_model_matrix_is_column_major() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let uniforms = ObjectUniforms::new(
            transform.model_matrix(),
            transform.normal_matrix(),
            &Material::default(),
        );
        // Translation lives in the last column
        assert_eq!(uniforms.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniforms.base_color[3], 1.0);
    }

    #[test]
    fn test_uniforms_cast_to_bytes() {
        let uniforms = ObjectUniforms::zeroed();
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), std::mem::size_of::<ObjectUniforms>());
    }
}

//! The fixed draw list: which shape goes where.

use glam::{Mat4, Vec3};

use crate::mesh::MeshDescriptor;
use crate::shapes;

/// Rotation shared by every object, about +Y. The value is in radians.
pub const SCENE_ROTATION: f32 = 40.0;

/// One draw: a shape and its object-to-world transform.
#[derive(Debug, Clone, Copy)]
pub struct SceneObject {
    /// Geometry to draw.
    pub shape: MeshDescriptor,
    /// Model matrix uploaded to the `model` uniform.
    pub model: Mat4,
}

/// Translate, then rotate, then scale (applied to vertices right to left).
fn trs(translation: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(translation)
        * Mat4::from_axis_angle(Vec3::Y, SCENE_ROTATION)
        * Mat4::from_scale(scale)
}

/// Ground plane model matrix. The negative Y scale mirrors the quad from
/// `y = 0.5` down to `y = -1`.
#[must_use]
pub fn plane_model() -> Mat4 {
    trs(Vec3::new(4.0, 0.0, 0.0), Vec3::new(15.0, -2.0, 15.0))
}

/// Tree trunk model matrix.
#[must_use]
pub fn trunk_model() -> Mat4 {
    trs(Vec3::new(23.0, 0.0, 1.0), Vec3::new(1.0, 2.0, 1.0))
}

/// Tree top model matrix.
#[must_use]
pub fn tree_top_model() -> Mat4 {
    trs(Vec3::new(23.0, 0.0, 1.0), Vec3::new(5.0, 2.0, 5.0))
}

/// Objects in draw order: plane, trunk, tree top.
#[must_use]
pub fn scene_objects() -> [SceneObject; 3] {
    [
        SceneObject {
            shape: shapes::PLANE,
            model: plane_model(),
        },
        SceneObject {
            shape: shapes::TREE_TRUNK,
            model: trunk_model(),
        },
        SceneObject {
            shape: shapes::TREE_TOP,
            model: tree_top_model(),
        },
    ]
}

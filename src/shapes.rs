//! Hand-authored vertex and index tables for the three scene shapes.
//!
//! Colors cycle red, green, blue, magenta around each ring so the
//! triangle structure stays visible without lighting.

use crate::mesh::{MeshDescriptor, Vertex};

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Unit ground quad at `y = 0.5`, two triangles.
pub const PLANE: MeshDescriptor = MeshDescriptor {
    name: "plane",
    vertices: &[
        Vertex::new([-1.0, 0.5, 1.0], RED),
        Vertex::new([-1.0, 0.5, -1.0], GREEN),
        Vertex::new([1.0, 0.5, 1.0], BLUE),
        Vertex::new([1.0, 0.5, -1.0], YELLOW),
    ],
    indices: &[
        0, 1, 2, //
        2, 3, 1,
    ],
};

/// Open cylinder between `y = -0.5` and `y = 0.5`.
///
/// Each ring is two 7-vertex half circles (front `z > 0`, back `z < 0`)
/// joined at `x = ±0.3`. Vertices 0..14 are the bottom ring, 14..28 the
/// top ring in the same order, so vertex `i + 14` sits above vertex `i`.
pub const TREE_TRUNK: MeshDescriptor = MeshDescriptor {
    name: "tree trunk",
    vertices: &[
        // bottom, front half
        Vertex::new([-0.3, -0.5, 0.1], RED),
        Vertex::new([-0.2, -0.5, 0.2], GREEN),
        Vertex::new([-0.1, -0.5, 0.3], BLUE),
        Vertex::new([0.0, -0.5, 0.4], MAGENTA),
        Vertex::new([0.1, -0.5, 0.3], RED),
        Vertex::new([0.2, -0.5, 0.2], GREEN),
        Vertex::new([0.3, -0.5, 0.1], BLUE),
        // bottom, back half
        Vertex::new([-0.3, -0.5, -0.1], RED),
        Vertex::new([-0.2, -0.5, -0.2], GREEN),
        Vertex::new([-0.1, -0.5, -0.3], BLUE),
        Vertex::new([0.0, -0.5, -0.4], MAGENTA),
        Vertex::new([0.1, -0.5, -0.3], RED),
        Vertex::new([0.2, -0.5, -0.2], GREEN),
        Vertex::new([0.3, -0.5, -0.1], BLUE),
        // top, front half
        Vertex::new([-0.3, 0.5, 0.1], RED),
        Vertex::new([-0.2, 0.5, 0.2], GREEN),
        Vertex::new([-0.1, 0.5, 0.3], BLUE),
        Vertex::new([0.0, 0.5, 0.4], MAGENTA),
        Vertex::new([0.1, 0.5, 0.3], RED),
        Vertex::new([0.2, 0.5, 0.2], GREEN),
        Vertex::new([0.3, 0.5, 0.1], BLUE),
        // top, back half
        Vertex::new([-0.3, 0.5, -0.1], RED),
        Vertex::new([-0.2, 0.5, -0.2], GREEN),
        Vertex::new([-0.1, 0.5, -0.3], BLUE),
        Vertex::new([0.0, 0.5, -0.4], MAGENTA),
        Vertex::new([0.1, 0.5, -0.3], RED),
        Vertex::new([0.2, 0.5, -0.2], GREEN),
        Vertex::new([0.3, 0.5, -0.1], BLUE),
    ],
    indices: &[
        // front side
        0, 1, 15, 15, 14, 0, //
        1, 2, 16, 15, 16, 1, //
        2, 3, 17, 16, 17, 2, //
        3, 4, 18, 17, 18, 3, //
        4, 5, 19, 18, 19, 4, //
        5, 6, 20, 19, 20, 5, //
        // left seam
        0, 7, 21, 14, 21, 0, //
        // back side
        7, 8, 22, 22, 21, 7, //
        8, 9, 23, 22, 23, 8, //
        9, 10, 24, 23, 24, 9, //
        10, 11, 25, 24, 25, 10, //
        11, 12, 26, 25, 26, 11, //
        12, 13, 27, 26, 27, 12, //
        // right seam
        6, 13, 20, 27, 20, 6,
    ],
};

/// Cone from a 14-vertex base ring at `y = 0.5` up to an apex at `y = 3`.
///
/// The ring runs front half left to right, then back half right to left,
/// so consecutive vertices are neighbors and the fan closes from vertex 13
/// back to vertex 0.
pub const TREE_TOP: MeshDescriptor = MeshDescriptor {
    name: "tree top",
    vertices: &[
        // base, front half
        Vertex::new([-0.3, 0.5, 0.1], RED),
        Vertex::new([-0.2, 0.5, 0.2], GREEN),
        Vertex::new([-0.1, 0.5, 0.3], BLUE),
        Vertex::new([0.0, 0.5, 0.4], MAGENTA),
        Vertex::new([0.1, 0.5, 0.3], RED),
        Vertex::new([0.2, 0.5, 0.2], GREEN),
        Vertex::new([0.3, 0.5, 0.1], BLUE),
        // base, back half
        Vertex::new([0.3, 0.5, -0.1], BLUE),
        Vertex::new([0.2, 0.5, -0.2], GREEN),
        Vertex::new([0.1, 0.5, -0.3], RED),
        Vertex::new([0.0, 0.5, -0.4], MAGENTA),
        Vertex::new([-0.1, 0.5, -0.3], BLUE),
        Vertex::new([-0.2, 0.5, -0.2], GREEN),
        Vertex::new([-0.3, 0.5, -0.1], RED),
        // apex
        Vertex::new([0.0, 3.0, 0.0], BLUE),
    ],
    indices: &[
        0, 1, 14, //
        1, 2, 14, //
        2, 3, 14, //
        3, 4, 14, //
        4, 5, 14, //
        5, 6, 14, //
        6, 7, 14, //
        7, 8, 14, //
        8, 9, 14, //
        9, 10, 14, //
        10, 11, 14, //
        11, 12, 14, //
        12, 13, 14, //
        13, 0, 14,
    ],
};

/// Index of the cone apex in [`TREE_TOP`].
pub const TREE_TOP_APEX: u16 = 14;

//! Colored triangle meshes: vertex layout, upload, draw, release.

use bytemuck::{Pod, Zeroable};

use crate::error::MeshError;
use crate::gl::{gl_size, GlBackend};

/// A mesh vertex: position followed by RGBA color, tightly interleaved.
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Linear RGBA color.
    pub color: [f32; 4],
}

impl Vertex {
    /// Shorthand used by the static shape tables.
    #[must_use]
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Floats per position (attribute 0).
pub const FLOATS_PER_POSITION: i32 = 3;
/// Floats per color (attribute 1).
pub const FLOATS_PER_COLOR: i32 = 4;

/// Byte distance between consecutive vertices (7 floats).
///
/// `Vertex` is 28 bytes, well within `i32` range.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

/// Byte offset of the color attribute inside a [`Vertex`].
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const COLOR_OFFSET: i32 = std::mem::offset_of!(Vertex, color) as i32;

/// Fixed vertex and index data for one shape.
#[derive(Debug, Clone, Copy)]
pub struct MeshDescriptor {
    /// Used in logs and errors.
    pub name: &'static str,
    /// Interleaved vertex data.
    pub vertices: &'static [Vertex],
    /// Triangle list indices into `vertices`.
    pub indices: &'static [u16],
}

impl MeshDescriptor {
    /// Whether every index addresses a vertex and the list is made of whole
    /// triangles.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&i| usize::from(i) < self.vertices.len())
    }
}

/// A mesh resident on the GPU.
///
/// Buffers are written once at upload. [`destroy`](Self::destroy) consumes
/// the mesh, so its GL objects cannot be released twice.
pub struct Mesh<G: GlBackend> {
    name: &'static str,
    vao: G::VertexArray,
    vbo: G::Buffer,
    ebo: G::Buffer,
    index_count: i32,
}

impl<G: GlBackend> Mesh<G> {
    /// Upload a descriptor into a fresh VAO/VBO/EBO triple.
    ///
    /// Attribute 0 is the 3-float position at offset 0, attribute 1 the
    /// 4-float color at offset 12, both with a stride of 28 bytes.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Create`] if the driver cannot create one of the
    /// objects. Objects created before the failure are deleted.
    pub unsafe fn upload(gl: &G, descriptor: &MeshDescriptor) -> Result<Self, MeshError> {
        debug_assert!(descriptor.is_well_formed(), "{} is malformed", descriptor.name);
        let create_err = |reason| MeshError::Create {
            mesh: descriptor.name,
            reason,
        };

        let (vao, vbo, ebo) = unsafe {
            let vao = gl.create_vertex_array().map_err(create_err)?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(reason) => {
                    gl.delete_vertex_array(vao);
                    return Err(create_err(reason));
                }
            };
            let ebo = match gl.create_buffer() {
                Ok(ebo) => ebo,
                Err(reason) => {
                    gl.delete_buffer(vbo);
                    gl.delete_vertex_array(vao);
                    return Err(create_err(reason));
                }
            };
            (vao, vbo, ebo)
        };

        unsafe {
            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(descriptor.vertices),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(descriptor.indices),
                glow::STATIC_DRAW,
            );

            gl.vertex_attrib_pointer_f32(
                0,
                FLOATS_PER_POSITION,
                glow::FLOAT,
                false,
                VERTEX_STRIDE,
                0,
            );
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                1,
                FLOATS_PER_COLOR,
                glow::FLOAT,
                false,
                VERTEX_STRIDE,
                COLOR_OFFSET,
            );
            gl.enable_vertex_attrib_array(1);

            gl.bind_vertex_array(None);
        }

        let index_count = u32::try_from(descriptor.indices.len())
            .map(gl_size)
            .expect("index count exceeds u32::MAX");
        log::debug!(
            "uploaded mesh `{}`: {} vertices, {} indices",
            descriptor.name,
            descriptor.vertices.len(),
            index_count
        );

        Ok(Self {
            name: descriptor.name,
            vao,
            vbo,
            ebo,
            index_count,
        })
    }

    /// Name of the descriptor this mesh was built from.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of indices drawn per call.
    #[must_use]
    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    /// Bind the mesh and issue an indexed triangle draw.
    ///
    /// # Safety
    ///
    /// Requires the context the mesh was uploaded with to be current.
    pub unsafe fn draw(&self, gl: &G) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(
                glow::TRIANGLES,
                self.index_count,
                glow::UNSIGNED_SHORT,
                0,
            );
            gl.bind_vertex_array(None);
        }
    }

    /// Release the VAO and both buffers.
    ///
    /// # Safety
    ///
    /// Requires the context the mesh was uploaded with to be current.
    pub unsafe fn destroy(self, gl: &G) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }
}

//! The scene renderer: owns every GPU resource and draws one frame at a
//! time.

use glam::Mat4;

use crate::camera::Camera;
use crate::error::{DemoError, ShaderError};
use crate::gl::{gl_size, GlBackend};
use crate::mesh::Mesh;
use crate::scene;
use crate::shaders;
use crate::texture::{Texture, TextureImage};

/// Texture unit the scene texture is bound to.
const TEXTURE_UNIT: i32 = 0;

/// Cached uniform locations for the scene program.
struct SceneUniforms<G: GlBackend> {
    /// `model`, object to world.
    model: G::UniformLocation,
    /// `view`, world to eye.
    view: G::UniformLocation,
    /// `projection`, eye to clip.
    projection: G::UniformLocation,
}

impl<G: GlBackend> SceneUniforms<G> {
    unsafe fn locate(gl: &G, program: G::Program) -> Result<Self, ShaderError> {
        let find = |name: &'static str| {
            let location = unsafe { gl.get_uniform_location(program, name) };
            location.ok_or(ShaderError::MissingUniform(name))
        };
        Ok(Self {
            model: find("model")?,
            view: find("view")?,
            projection: find("projection")?,
        })
    }
}

/// Renders the fixed scene: a ground plane and a tree, seen through a
/// [`Camera`].
///
/// All resources are created in [`new`](Self::new) and released in
/// [`destroy`](Self::destroy), meshes first, then the shader program, then
/// the texture.
///
/// # Example
///
/// ```no_run
/// # use plane_scene::{Camera, SceneRenderer, TextureImage};
/// # fn example(gl: &glow::Context, image: &TextureImage, camera: &Camera) {
/// // During setup (with a current GL context):
/// let renderer = unsafe { SceneRenderer::new(gl, image, [0.0, 0.0, 0.0, 1.0]) }.unwrap();
///
/// // Each frame:
/// unsafe { renderer.render(gl, camera, [800, 600]) };
///
/// // On shutdown:
/// unsafe { renderer.destroy(gl) };
/// # }
/// ```
pub struct SceneRenderer<G: GlBackend> {
    /// The linked scene program.
    program: G::Program,
    /// Cached uniform locations for [`program`](Self::program).
    uniforms: SceneUniforms<G>,
    /// Uploaded meshes in draw order, each with its model matrix.
    objects: Vec<(Mesh<G>, Mat4)>,
    /// The scene texture, bound on texture unit 0.
    texture: Texture<G>,
    /// RGBA color the frame is cleared to.
    clear_color: [f32; 4],
}

impl<G: GlBackend> SceneRenderer<G> {
    /// Build the shader program, upload the scene meshes and the texture.
    ///
    /// The program is built first, so a broken shader fails before any
    /// geometry reaches the GPU. On any failure every object created so far
    /// is released.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current and valid. The caller must call
    /// [`destroy`](Self::destroy) before the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Shader`] if the program does not compile, link,
    /// or expose the `model`/`view`/`projection` uniforms,
    /// [`DemoError::Mesh`] if a mesh cannot be uploaded and
    /// [`DemoError::Texture`] if the texture object cannot be created.
    pub unsafe fn new(
        gl: &G,
        texture_image: &TextureImage,
        clear_color: [f32; 4],
    ) -> Result<Self, DemoError> {
        let program = unsafe {
            shaders::compile_program(gl, shaders::SCENE_VERTEX_SRC, shaders::SCENE_FRAGMENT_SRC)?
        };

        let uniforms = match unsafe { SceneUniforms::locate(gl, program) } {
            Ok(uniforms) => uniforms,
            Err(err) => {
                log::error!("{err}");
                unsafe { gl.delete_program(program) };
                return Err(err.into());
            }
        };

        let shapes = scene::scene_objects();
        let mut objects = Vec::with_capacity(shapes.len());
        for object in &shapes {
            match unsafe { Mesh::upload(gl, &object.shape) } {
                Ok(mesh) => objects.push((mesh, object.model)),
                Err(err) => {
                    unsafe { release(gl, objects, program, None) };
                    return Err(err.into());
                }
            }
        }

        let texture = match unsafe { Texture::upload(gl, texture_image) } {
            Ok(texture) => texture,
            Err(err) => {
                unsafe { release(gl, objects, program, None) };
                return Err(err.into());
            }
        };

        unsafe {
            // The colored shaders declare no sampler; a textured variant
            // picks up unit 0 here.
            if let Some(sampler) = gl.get_uniform_location(program, "uTexture") {
                gl.use_program(Some(program));
                gl.uniform_1_i32(Some(&sampler), TEXTURE_UNIT);
                gl.use_program(None);
            }
            gl.enable(glow::DEPTH_TEST);
        }

        log::info!("scene ready: {} meshes", objects.len());

        Ok(Self {
            program,
            uniforms,
            objects,
            texture,
            clear_color,
        })
    }

    /// Draw one frame into the currently bound framebuffer.
    ///
    /// `viewport` is the framebuffer size in physical pixels. A zero height
    /// (minimized window) is treated as 1 for the aspect ratio.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    #[expect(clippy::cast_precision_loss)]
    pub unsafe fn render(&self, gl: &G, camera: &Camera, viewport: [u32; 2]) {
        let [width, height] = viewport;
        let aspect_ratio = width as f32 / height.max(1) as f32;
        let view = camera.view_matrix();
        let projection = camera.projection_matrix(aspect_ratio);
        let [r, g, b, a] = self.clear_color;

        unsafe {
            gl.viewport(0, 0, gl_size(width), gl_size(height));
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.use_program(Some(self.program));
            self.texture.bind(gl);
            gl.uniform_matrix_4_f32_slice(
                Some(&self.uniforms.view),
                false,
                &view.to_cols_array(),
            );
            gl.uniform_matrix_4_f32_slice(
                Some(&self.uniforms.projection),
                false,
                &projection.to_cols_array(),
            );

            for (mesh, model) in &self.objects {
                gl.uniform_matrix_4_f32_slice(
                    Some(&self.uniforms.model),
                    false,
                    &model.to_cols_array(),
                );
                gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                mesh.draw(gl);
            }

            gl.use_program(None);
        }
    }

    /// Release all GPU resources: meshes, then the program, then the
    /// texture.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn destroy(self, gl: &G) {
        unsafe { release(gl, self.objects, self.program, Some(self.texture)) };
        log::info!("scene resources released");
    }
}

/// Teardown in fixed order.
unsafe fn release<G: GlBackend>(
    gl: &G,
    objects: Vec<(Mesh<G>, Mat4)>,
    program: G::Program,
    texture: Option<Texture<G>>,
) {
    unsafe {
        for (mesh, _) in objects {
            mesh.destroy(gl);
        }
        gl.delete_program(program);
        if let Some(texture) = texture {
            texture.destroy(gl);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, RecordingGl};
    use crate::mesh::MeshDescriptor;
    use crate::texture::PixelFormat;
    use glam::Vec3;

    const CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    fn image() -> TextureImage {
        TextureImage {
            width: 2,
            height: 1,
            format: PixelFormat::Rgba8,
            pixels: vec![255; 8],
        }
    }

    fn draws(calls: &[Call]) -> Vec<i32> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::DrawElements { count, .. } => Some(*count),
                _ => None,
            })
            .collect()
    }

    fn uploaded(calls: &[Call], uniform: &str) -> Vec<Vec<f32>> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::UniformMatrix4(name, values) if name == uniform => Some(values.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn frame_draws_plane_trunk_and_top() {
        let gl = RecordingGl::new();
        let renderer = unsafe { SceneRenderer::new(&gl, &image(), CLEAR) }.unwrap();
        gl.clear_calls();

        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        unsafe { renderer.render(&gl, &camera, [800, 600]) };
        let calls = gl.calls();

        let expected: Vec<i32> = scene::scene_objects()
            .iter()
            .map(|o: &scene::SceneObject| i32::try_from(o.shape.indices.len()).unwrap())
            .collect();
        assert_eq!(draws(&calls), expected);
        assert_eq!(draws(&calls), vec![6, 84, 42]);

        assert_eq!(calls[0], Call::Viewport(0, 0, 800, 600));
        assert!(calls.contains(&Call::ClearColor(CLEAR)));
        assert!(calls.contains(&Call::Clear(
            glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT
        )));
        let fills = calls
            .iter()
            .filter(|c| **c == Call::PolygonMode(glow::FRONT_AND_BACK, glow::FILL))
            .count();
        assert_eq!(fills, 3);

        unsafe { renderer.destroy(&gl) };
    }

    #[test]
    fn camera_matrices_reach_the_shader() {
        let gl = RecordingGl::new();
        let renderer = unsafe { SceneRenderer::new(&gl, &image(), CLEAR) }.unwrap();
        gl.clear_calls();

        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        unsafe { renderer.render(&gl, &camera, [800, 600]) };
        let calls = gl.calls();

        assert_eq!(
            uploaded(&calls, "view"),
            vec![camera.view_matrix().to_cols_array().to_vec()]
        );
        assert_eq!(
            uploaded(&calls, "projection"),
            vec![camera.projection_matrix(800.0 / 600.0).to_cols_array().to_vec()]
        );
        let models: Vec<_> = scene::scene_objects()
            .iter()
            .map(|o| o.model.to_cols_array().to_vec())
            .collect();
        assert_eq!(uploaded(&calls, "model"), models);

        unsafe { renderer.destroy(&gl) };
    }

    #[test]
    fn minimized_window_keeps_a_finite_projection() {
        let gl = RecordingGl::new();
        let renderer = unsafe { SceneRenderer::new(&gl, &image(), CLEAR) }.unwrap();
        gl.clear_calls();

        unsafe { renderer.render(&gl, &Camera::default(), [800, 0]) };
        let projection = uploaded(&gl.calls(), "projection");
        assert!(projection[0].iter().all(|v| v.is_finite()));

        unsafe { renderer.destroy(&gl) };
    }

    #[test]
    fn broken_shader_fails_before_any_geometry() {
        let gl = RecordingGl::failing_compile(glow::FRAGMENT_SHADER);
        let result = unsafe { SceneRenderer::new(&gl, &image(), CLEAR) };

        assert!(matches!(
            result,
            Err(DemoError::Shader(ShaderError::FragmentCompile(_)))
        ));
        let calls = gl.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::CreateVertexArray(_))));
        assert!(draws(&calls).is_empty());
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn missing_uniform_releases_the_program() {
        let gl = RecordingGl::hiding_uniform("projection");
        let result = unsafe { SceneRenderer::new(&gl, &image(), CLEAR) };
        assert!(matches!(
            result,
            Err(DemoError::Shader(ShaderError::MissingUniform("projection")))
        ));
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn failed_mesh_upload_releases_earlier_meshes() {
        // Buffers 0 and 1 belong to the plane; the trunk's first fails.
        let gl = RecordingGl::failing_buffer_at(2);
        let result = unsafe { SceneRenderer::new(&gl, &image(), CLEAR) };
        assert!(matches!(result, Err(DemoError::Mesh(_))));
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn sampler_is_bound_to_unit_zero() {
        let gl = RecordingGl::new();
        let renderer = unsafe { SceneRenderer::new(&gl, &image(), CLEAR) }.unwrap();
        assert!(gl
            .calls()
            .contains(&Call::Uniform1i("uTexture".to_owned(), TEXTURE_UNIT)));
        assert!(gl.calls().contains(&Call::Enable(glow::DEPTH_TEST)));
        unsafe { renderer.destroy(&gl) };
    }

    #[test]
    fn teardown_releases_meshes_then_program_then_texture() {
        let gl = RecordingGl::new();
        let renderer = unsafe { SceneRenderer::new(&gl, &image(), CLEAR) }.unwrap();
        assert!(gl.live_objects() > 0);
        gl.clear_calls();

        unsafe { renderer.destroy(&gl) };
        let calls = gl.calls();

        let last_mesh = calls
            .iter()
            .rposition(|c| matches!(c, Call::DeleteVertexArray(_) | Call::DeleteBuffer(_)))
            .unwrap();
        let program = calls
            .iter()
            .position(|c| matches!(c, Call::DeleteProgram(_)))
            .unwrap();
        let texture = calls
            .iter()
            .position(|c| matches!(c, Call::DeleteTexture(_)))
            .unwrap();
        assert!(last_mesh < program);
        assert!(program < texture);

        let vaos = calls
            .iter()
            .filter(|c| matches!(c, Call::DeleteVertexArray(_)))
            .count();
        assert_eq!(vaos, 3);
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn every_scene_shape_is_well_formed() {
        assert!(scene::scene_objects()
            .iter()
            .all(|o| MeshDescriptor::is_well_formed(&o.shape)));
    }
}

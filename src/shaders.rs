//! GLSL shader sources and compilation helpers.
//!
//! Both shaders target GLSL 3.30 core (OpenGL 3.3).

use crate::error::ShaderError;
use crate::gl::GlBackend;

/// Vertex shader for the colored scene meshes.
///
/// # Attributes
///
/// | Location | Name       | Type   |
/// |----------|------------|--------|
/// | 0        | `position` | `vec3` |
/// | 1        | `color`    | `vec4` |
///
/// # Uniforms
///
/// | Name         | Type   | Description                  |
/// |--------------|--------|------------------------------|
/// | `model`      | `mat4` | Object to world              |
/// | `view`       | `mat4` | World to camera              |
/// | `projection` | `mat4` | Camera to clip space         |
pub const SCENE_VERTEX_SRC: &str = r"#version 330 core

layout(location = 0) in vec3 position;
layout(location = 1) in vec4 color;

out vec4 vertexColor;

uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

void main() {
    gl_Position = projection * view * model * vec4(position, 1.0);
    vertexColor = color;
}
";

/// Fragment shader for the colored scene meshes: writes the interpolated
/// vertex color unchanged.
pub const SCENE_FRAGMENT_SRC: &str = r"#version 330 core

in vec4 vertexColor;

out vec4 fragmentColor;

void main() {
    fragmentColor = vertexColor;
}
";

/// Compile a shader program from vertex and fragment source strings.
///
/// Stages are checked in order (vertex compile, fragment compile, link) and
/// the first failure is logged and returned. Every object created up to
/// that point is deleted first, so a failed build leaves nothing behind.
/// After a successful link the shader objects are detached and deleted, so
/// only the program handle needs to be cleaned up by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns [`ShaderError`] with the driver's info log if shader compilation
/// or program linking fails.
pub unsafe fn compile_program<G: GlBackend>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<G::Program, ShaderError> {
    let result = unsafe { build_program(gl, vertex_src, fragment_src) };
    if let Err(err) = &result {
        log::error!("{err}");
    }
    result
}

unsafe fn build_program<G: GlBackend>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<G::Program, ShaderError> {
    let program = unsafe { gl.create_program() }.map_err(ShaderError::Create)?;

    let vs = match unsafe { compile_shader(gl, glow::VERTEX_SHADER, vertex_src) } {
        Ok(vs) => vs,
        Err(err) => {
            unsafe { gl.delete_program(program) };
            return Err(err);
        }
    };
    let fs = match unsafe { compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) } {
        Ok(fs) => fs,
        Err(err) => {
            unsafe {
                gl.delete_shader(vs);
                gl.delete_program(program);
            }
            return Err(err);
        }
    };

    unsafe {
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(ShaderError::Link(log));
        }

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
    }

    Ok(program)
}

/// Compile a single shader stage (vertex or fragment) from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader<G: GlBackend>(
    gl: &G,
    shader_type: u32,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(ShaderError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(if shader_type == glow::VERTEX_SHADER {
                ShaderError::VertexCompile(log)
            } else {
                ShaderError::FragmentCompile(log)
            });
        }

        Ok(shader)
    }
}

//! A [`GlBackend`] that records calls instead of talking to a driver.
//!
//! Handles are plain `u32` counters starting at 1. Compile and link results
//! can be forced to fail so the error paths of the shader builder are
//! reachable without a GPU.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use super::GlBackend;

/// One recorded GL call. Only the calls the tests assert on carry data.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    Uniform1i(String, i32),
    UniformMatrix4(String, Vec<f32>),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        stride: i32,
        offset: i32,
    },
    CreateBuffer(u32),
    BindBuffer(u32, Option<u32>),
    BufferData {
        target: u32,
        len: usize,
        usage: u32,
    },
    DeleteBuffer(u32),
    CreateTexture(u32),
    BindTexture(Option<u32>),
    TexParameter(u32, i32),
    TexImage2d {
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        len: usize,
    },
    GenerateMipmap,
    PixelStore(u32, i32),
    DeleteTexture(u32),
    Enable(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(u32),
    PolygonMode(u32, u32),
    DrawElements {
        mode: u32,
        count: i32,
        element_type: u32,
    },
}

/// Recording backend. Interior mutability keeps the `&self` receivers of
/// [`GlBackend`].
#[derive(Default)]
pub(crate) struct RecordingGl {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<u32>,
    shader_types: RefCell<Vec<(u32, u32)>>,
    live: RefCell<HashSet<u32>>,
    /// Shader stages (`glow::VERTEX_SHADER` / `glow::FRAGMENT_SHADER`)
    /// whose compilation reports failure.
    pub fail_compile: HashSet<u32>,
    /// Whether program linking reports failure.
    pub fail_link: bool,
    /// Fail the n-th (0-based) `create_buffer` call.
    pub fail_buffer_at: Option<u32>,
    /// Uniform names the linked program pretends not to have.
    pub hidden_uniforms: HashSet<&'static str>,
    buffers_created: Cell<u32>,
}

impl RecordingGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_compile(stage: u32) -> Self {
        let mut gl = Self::new();
        gl.fail_compile.insert(stage);
        gl
    }

    pub(crate) fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_buffer_at(n: u32) -> Self {
        Self {
            fail_buffer_at: Some(n),
            ..Self::default()
        }
    }

    pub(crate) fn hiding_uniform(name: &'static str) -> Self {
        let mut gl = Self::new();
        gl.hidden_uniforms.insert(name);
        gl
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Number of GL objects created and not yet deleted.
    pub(crate) fn live_objects(&self) -> usize {
        self.live.borrow().len()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self) -> u32 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        self.live.borrow_mut().insert(handle);
        handle
    }

    fn release(&self, handle: u32) {
        assert!(
            self.live.borrow_mut().remove(&handle),
            "GL object {handle} deleted twice or never created"
        );
    }

    fn shader_type(&self, shader: u32) -> u32 {
        self.shader_types
            .borrow()
            .iter()
            .find(|(s, _)| *s == shader)
            .map_or(0, |(_, t)| *t)
    }
}

impl GlBackend for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;
    type UniformLocation = String;

    unsafe fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let shader = self.alloc();
        self.shader_types.borrow_mut().push((shader, shader_type));
        self.record(Call::CreateShader(shader_type));
        Ok(shader)
    }

    unsafe fn shader_source(&self, _shader: u32, _source: &str) {}

    unsafe fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(self.shader_type(shader)));
    }

    unsafe fn get_shader_compile_status(&self, shader: u32) -> bool {
        !self.fail_compile.contains(&self.shader_type(shader))
    }

    unsafe fn get_shader_info_log(&self, shader: u32) -> String {
        format!("0:1(1): error: syntax error in stage {:#x}", self.shader_type(shader))
    }

    unsafe fn delete_shader(&self, shader: u32) {
        self.release(shader);
        self.record(Call::DeleteShader(shader));
    }

    unsafe fn create_program(&self) -> Result<u32, String> {
        let program = self.alloc();
        self.record(Call::CreateProgram(program));
        Ok(program)
    }

    unsafe fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    unsafe fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    unsafe fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    unsafe fn get_program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    unsafe fn get_program_info_log(&self, _program: u32) -> String {
        "error: vertex output `vertexColor` not consumed".to_owned()
    }

    unsafe fn delete_program(&self, program: u32) {
        self.release(program);
        self.record(Call::DeleteProgram(program));
    }

    unsafe fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    unsafe fn get_uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        (!self.hidden_uniforms.contains(name)).then(|| name.to_owned())
    }

    unsafe fn uniform_1_i32(&self, location: Option<&String>, x: i32) {
        if let Some(name) = location {
            self.record(Call::Uniform1i(name.clone(), x));
        }
    }

    unsafe fn uniform_matrix_4_f32_slice(
        &self,
        location: Option<&String>,
        transpose: bool,
        v: &[f32],
    ) {
        assert!(!transpose, "matrices are uploaded column-major");
        if let Some(name) = location {
            self.record(Call::UniformMatrix4(name.clone(), v.to_vec()));
        }
    }

    unsafe fn create_vertex_array(&self) -> Result<u32, String> {
        let vao = self.alloc();
        self.record(Call::CreateVertexArray(vao));
        Ok(vao)
    }

    unsafe fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    unsafe fn delete_vertex_array(&self, vertex_array: u32) {
        self.release(vertex_array);
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    unsafe fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    unsafe fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        _data_type: u32,
        _normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            stride,
            offset,
        });
    }

    unsafe fn create_buffer(&self) -> Result<u32, String> {
        let n = self.buffers_created.get();
        self.buffers_created.set(n + 1);
        if self.fail_buffer_at == Some(n) {
            return Err("out of memory".to_owned());
        }
        let buffer = self.alloc();
        self.record(Call::CreateBuffer(buffer));
        Ok(buffer)
    }

    unsafe fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    unsafe fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            len: data.len(),
            usage,
        });
    }

    unsafe fn delete_buffer(&self, buffer: u32) {
        self.release(buffer);
        self.record(Call::DeleteBuffer(buffer));
    }

    unsafe fn create_texture(&self) -> Result<u32, String> {
        let texture = self.alloc();
        self.record(Call::CreateTexture(texture));
        Ok(texture)
    }

    unsafe fn bind_texture(&self, _target: u32, texture: Option<u32>) {
        self.record(Call::BindTexture(texture));
    }

    unsafe fn tex_parameter_i32(&self, _target: u32, parameter: u32, value: i32) {
        self.record(Call::TexParameter(parameter, value));
    }

    unsafe fn tex_image_2d(
        &self,
        _target: u32,
        _level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        _border: i32,
        format: u32,
        _ty: u32,
        pixels: Option<&[u8]>,
    ) {
        self.record(Call::TexImage2d {
            internal_format,
            width,
            height,
            format,
            len: pixels.map_or(0, <[u8]>::len),
        });
    }

    unsafe fn generate_mipmap(&self, _target: u32) {
        self.record(Call::GenerateMipmap);
    }

    unsafe fn pixel_store_i32(&self, parameter: u32, value: i32) {
        self.record(Call::PixelStore(parameter, value));
    }

    unsafe fn delete_texture(&self, texture: u32) {
        self.release(texture);
        self.record(Call::DeleteTexture(texture));
    }

    unsafe fn enable(&self, parameter: u32) {
        self.record(Call::Enable(parameter));
    }

    unsafe fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    unsafe fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    unsafe fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    unsafe fn polygon_mode(&self, face: u32, mode: u32) {
        self.record(Call::PolygonMode(face, mode));
    }

    unsafe fn draw_elements(&self, mode: u32, count: i32, element_type: u32, _offset: i32) {
        self.record(Call::DrawElements {
            mode,
            count,
            element_type,
        });
    }

    unsafe fn get_parameter_string(&self, _parameter: u32) -> String {
        "3.3.0 recording".to_owned()
    }
}

use super::geometry::VertexAttribute;
use super::math::Vec4;
use gl::types::*;
use std::ffi::CStr;

/// Bytes fetched from a shader or program info log.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_gl(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// Tag used when reporting compile diagnostics.
    pub fn tag(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    fn to_gl(self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Rasterization mode applied to front and back faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    Line,
    #[default]
    Fill,
    Point,
}

impl PolygonMode {
    fn to_gl(self) -> GLenum {
        match self {
            PolygonMode::Line => gl::LINE,
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Point => gl::POINT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlString {
    Version,
    ShadingLanguageVersion,
    Renderer,
    Vendor,
}

impl GlString {
    fn to_gl(self) -> GLenum {
        match self {
            GlString::Version => gl::VERSION,
            GlString::ShadingLanguageVersion => gl::SHADING_LANGUAGE_VERSION,
            GlString::Renderer => gl::RENDERER,
            GlString::Vendor => gl::VENDOR,
        }
    }
}

/// The OpenGL entry points this program calls.
///
/// Object names are plain `u32`s, as in GL; ownership lives in the
/// wrappers built on top (`ShaderProgram`, `GeometryBuffers`).
pub trait GlApi {
    fn get_string(&self, name: GlString) -> Option<String>;
    fn max_vertex_attribs(&self) -> i32;
    fn get_error(&self) -> GLenum;

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn polygon_mode(&self, mode: PolygonMode);
    fn clear_color(&self, color: Vec4);
    fn clear(&self);

    fn create_shader(&self, stage: ShaderStage) -> u32;
    fn shader_source(&self, shader: u32, source: &CStr);
    fn compile_shader(&self, shader: u32);
    fn compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> u32;
    fn attach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&self, program: u32);
    fn delete_program(&self, program: u32);

    fn gen_vertex_array(&self) -> u32;
    fn bind_vertex_array(&self, vao: u32);
    fn delete_vertex_array(&self, vao: u32);

    fn gen_buffer(&self) -> u32;
    fn bind_buffer(&self, target: BufferTarget, buffer: u32);
    /// Uploads `data` to the buffer bound at `target` with `STATIC_DRAW`.
    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: u32);

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute);
    fn enable_vertex_attrib_array(&self, index: u32);

    /// Draws `index_count` `u32` indices from offset 0 of the bound element buffer.
    fn draw_triangles(&self, index_count: i32);
}

/// `GlApi` backed by the loaded `gl` function pointers.
///
/// Only `system::load_gl` hands these out, so holding one means every
/// entry point was resolved against a current context.
#[derive(Debug, Clone, Copy)]
pub struct NativeGl {
    _loaded: (),
}

impl NativeGl {
    pub(crate) fn loaded() -> NativeGl {
        NativeGl { _loaded: () }
    }
}

impl GlApi for NativeGl {
    fn get_string(&self, name: GlString) -> Option<String> {
        let ptr = unsafe { gl::GetString(name.to_gl()) };
        if ptr.is_null() {
            return None;
        }
        let s = unsafe { CStr::from_ptr(ptr.cast()) };
        Some(s.to_string_lossy().into_owned())
    }

    fn max_vertex_attribs(&self) -> i32 {
        let mut n: i32 = 0;
        unsafe { gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut n) };
        n
    }

    fn get_error(&self) -> GLenum {
        unsafe { gl::GetError() }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn polygon_mode(&self, mode: PolygonMode) {
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode.to_gl()) };
    }

    fn clear_color(&self, color: Vec4) {
        unsafe { gl::ClearColor(color.x, color.y, color.z, color.w) };
    }

    fn clear(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn create_shader(&self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.to_gl()) }
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        // null lengths: the driver reads up to the terminating NUL
        let ptr: *const GLchar = source.as_ptr();
        unsafe { gl::ShaderSource(shader, 1, &ptr, std::ptr::null()) };
    }

    fn compile_shader(&self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_CAPACITY);
        let mut log_len = 0_i32;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                INFO_LOG_CAPACITY as i32,
                &mut log_len,
                v.as_mut_ptr().cast(),
            );
            v.set_len(log_len.clamp(0, INFO_LOG_CAPACITY as i32) as usize);
        }
        String::from_utf8_lossy(&v).into_owned()
    }

    fn delete_shader(&self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_CAPACITY);
        let mut log_len = 0_i32;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                INFO_LOG_CAPACITY as i32,
                &mut log_len,
                v.as_mut_ptr().cast(),
            );
            v.set_len(log_len.clamp(0, INFO_LOG_CAPACITY as i32) as usize);
        }
        String::from_utf8_lossy(&v).into_owned()
    }

    fn use_program(&self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }

    fn delete_program(&self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn gen_vertex_array(&self) -> u32 {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }

    fn bind_vertex_array(&self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) };
    }

    fn delete_vertex_array(&self, vao: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vao) };
    }

    fn gen_buffer(&self) -> u32 {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        unsafe { gl::BindBuffer(target.to_gl(), buffer) };
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            gl::BufferData(
                target.to_gl(),
                data.len() as GLsizeiptr,
                data.as_ptr().cast(),
                gl::STATIC_DRAW,
            )
        };
    }

    fn delete_buffer(&self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) };
    }

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute) {
        unsafe {
            gl::VertexAttribPointer(
                attribute.index,
                attribute.components,
                gl::FLOAT,
                if attribute.normalized { gl::TRUE } else { gl::FALSE },
                attribute.stride,
                attribute.offset as *const _,
            )
        };
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn draw_triangles(&self, index_count: i32) {
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                index_count,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            )
        };
    }
}

/// Logs and returns `false` if GL has a pending error.
pub fn check_gl_err<G: GlApi>(gl: &G, what: &str) -> bool {
    let err = gl.get_error();
    if err == gl::NO_ERROR {
        return true;
    }
    log::warn!("GL error 0x{err:04X} after {what}");
    false
}

pub fn print_opengl_info<G: GlApi>(gl: &G) {
    let unknown = || "<unavailable>".to_string();
    log::info!(
        "GL_VERSION = {}",
        gl.get_string(GlString::Version).unwrap_or_else(unknown)
    );
    log::info!(
        "GL_SHADING_LANGUAGE_VERSION = {}",
        gl.get_string(GlString::ShadingLanguageVersion)
            .unwrap_or_else(unknown)
    );
    log::info!(
        "GL_RENDERER = {}",
        gl.get_string(GlString::Renderer).unwrap_or_else(unknown)
    );
    log::info!(
        "GL_VENDOR = {}",
        gl.get_string(GlString::Vendor).unwrap_or_else(unknown)
    );
    log::info!("MAX_VERTEX_ATTRIBS = {}", gl.max_vertex_attribs());
}

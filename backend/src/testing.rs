//! In-memory stand-ins for the GL driver and the window, used by unit tests.

use crate::geometry::VertexAttribute;
use crate::glutils::{BufferTarget, GlApi, GlString, PolygonMode, ShaderStage};
use crate::input::{Key, PlatformEvent};
use crate::math::Vec4;
use crate::system::Platform;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;
use std::rc::Rc;

/// State-changing GL calls, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    Viewport(i32, i32, i32, i32),
    PolygonMode(PolygonMode),
    ClearColor(Vec4),
    Clear,
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(u32),
    DeleteProgram(u32),
    GenVertexArray(u32),
    BindVertexArray(u32),
    DeleteVertexArray(u32),
    GenBuffer(u32),
    BindBuffer(BufferTarget, u32),
    /// Uploaded byte count.
    BufferData(BufferTarget, usize),
    DeleteBuffer(u32),
    VertexAttribPointer(VertexAttribute),
    EnableVertexAttribArray(u32),
    DrawTriangles(i32),
}

#[derive(Default)]
struct GlState {
    calls: Vec<GlCall>,
    last_name: u32,
    sources: HashMap<u32, String>,
    compiled: HashSet<u32>,
    attached: HashMap<u32, Vec<u32>>,
    linked: HashSet<u32>,
}

/// Records calls and fakes just enough GLSL handling to pass or fail a build.
///
/// A source compiles when it starts with `#version` and contains no `@`.
/// Clones share one call log.
#[derive(Clone, Default)]
pub struct RecordingGl {
    state: Rc<RefCell<GlState>>,
}

impl RecordingGl {
    pub fn new() -> RecordingGl {
        RecordingGl::default()
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn count(&self, call: &GlCall) -> usize {
        self.state.borrow().calls.iter().filter(|c| *c == call).count()
    }

    /// Rasterization mode in effect at each draw call.
    pub fn polygon_modes_at_draws(&self) -> Vec<PolygonMode> {
        let mut mode = PolygonMode::Fill;
        let mut modes = Vec::new();
        for call in self.state.borrow().calls.iter() {
            match call {
                GlCall::PolygonMode(m) => mode = *m,
                GlCall::DrawTriangles(_) => modes.push(mode),
                _ => {}
            }
        }
        modes
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn new_name(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        state.last_name += 1;
        state.last_name
    }
}

impl GlApi for RecordingGl {
    fn get_string(&self, name: GlString) -> Option<String> {
        let s = match name {
            GlString::Version => "3.3.0 recording",
            GlString::ShadingLanguageVersion => "3.30",
            GlString::Renderer => "recording",
            GlString::Vendor => "tests",
        };
        Some(s.to_string())
    }

    fn max_vertex_attribs(&self) -> i32 {
        16
    }

    fn get_error(&self) -> u32 {
        gl::NO_ERROR
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn polygon_mode(&self, mode: PolygonMode) {
        self.record(GlCall::PolygonMode(mode));
    }

    fn clear_color(&self, color: Vec4) {
        self.record(GlCall::ClearColor(color));
    }

    fn clear(&self) {
        self.record(GlCall::Clear);
    }

    fn create_shader(&self, stage: ShaderStage) -> u32 {
        let id = self.new_name();
        self.record(GlCall::CreateShader(stage, id));
        id
    }

    fn shader_source(&self, shader: u32, source: &CStr) {
        let source = source.to_string_lossy().into_owned();
        self.state.borrow_mut().sources.insert(shader, source);
    }

    fn compile_shader(&self, shader: u32) {
        self.record(GlCall::CompileShader(shader));
        let mut state = self.state.borrow_mut();
        let ok = state
            .sources
            .get(&shader)
            .is_some_and(|s| s.starts_with("#version") && !s.contains('@'));
        if ok {
            state.compiled.insert(shader);
        }
    }

    fn compile_status(&self, shader: u32) -> bool {
        self.state.borrow().compiled.contains(&shader)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.compile_status(shader) {
            return String::new();
        }
        "0:5(53): error: syntax error, unexpected '@'".to_string()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> u32 {
        let id = self.new_name();
        self.record(GlCall::CreateProgram(id));
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(GlCall::AttachShader(program, shader));
        self.state
            .borrow_mut()
            .attached
            .entry(program)
            .or_default()
            .push(shader);
    }

    fn link_program(&self, program: u32) {
        self.record(GlCall::LinkProgram(program));
        let mut state = self.state.borrow_mut();
        let ok = state
            .attached
            .get(&program)
            .is_some_and(|shaders| shaders.iter().all(|s| state.compiled.contains(s)));
        if ok {
            state.linked.insert(program);
        }
    }

    fn link_status(&self, program: u32) -> bool {
        self.state.borrow().linked.contains(&program)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.link_status(program) {
            return String::new();
        }
        "error: linking with uncompiled/unspecialized shader".to_string()
    }

    fn use_program(&self, program: u32) {
        self.record(GlCall::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(GlCall::DeleteProgram(program));
    }

    fn gen_vertex_array(&self) -> u32 {
        let id = self.new_name();
        self.record(GlCall::GenVertexArray(id));
        id
    }

    fn bind_vertex_array(&self, vao: u32) {
        self.record(GlCall::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.record(GlCall::DeleteVertexArray(vao));
    }

    fn gen_buffer(&self) -> u32 {
        let id = self.new_name();
        self.record(GlCall::GenBuffer(id));
        id
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: u32) {
        self.record(GlCall::BindBuffer(target, buffer));
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        self.record(GlCall::BufferData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute) {
        self.record(GlCall::VertexAttribPointer(*attribute));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn draw_triangles(&self, index_count: i32) {
        self.record(GlCall::DrawTriangles(index_count));
    }
}

/// Input for one frame of a `ScriptedPlatform`.
#[derive(Debug, Clone, Default)]
pub struct ScriptFrame {
    /// Keys reported as held during this frame's input poll.
    pub keys_down: Vec<Key>,
    /// Events returned by this frame's `poll_events`.
    pub events: Vec<PlatformEvent>,
}

impl ScriptFrame {
    pub fn idle() -> ScriptFrame {
        ScriptFrame::default()
    }

    pub fn keys_down(keys: &[Key]) -> ScriptFrame {
        ScriptFrame {
            keys_down: keys.to_vec(),
            events: Vec::new(),
        }
    }

    pub fn events(events: Vec<PlatformEvent>) -> ScriptFrame {
        ScriptFrame {
            keys_down: Vec::new(),
            events,
        }
    }
}

/// Frames a script may run past its end before the loop counts as stuck.
const OVERRUN_LIMIT: usize = 16;

/// Platform that replays one `ScriptFrame` per frame.
pub struct ScriptedPlatform {
    script: Vec<ScriptFrame>,
    cursor: usize,
    should_close: bool,
    swaps: usize,
    framebuffer: (i32, i32),
    drops: Option<Rc<Cell<u32>>>,
}

impl ScriptedPlatform {
    pub fn new(script: Vec<ScriptFrame>) -> ScriptedPlatform {
        ScriptedPlatform {
            script,
            cursor: 0,
            should_close: false,
            swaps: 0,
            framebuffer: (800, 600),
            drops: None,
        }
    }

    /// Counts drops into `counter`, to check shutdown happens exactly once.
    pub fn with_drop_counter(mut self, counter: Rc<Cell<u32>>) -> ScriptedPlatform {
        self.drops = Some(counter);
        self
    }

    pub fn swaps(&self) -> usize {
        self.swaps
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let events = self
            .script
            .get(self.cursor)
            .map(|f| f.events.clone())
            .unwrap_or_default();
        self.cursor += 1;
        assert!(
            self.cursor <= self.script.len() + OVERRUN_LIMIT,
            "frame loop kept running {OVERRUN_LIMIT} frames past the script"
        );
        events
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.script
            .get(self.cursor)
            .is_some_and(|f| f.keys_down.contains(&key))
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.framebuffer
    }
}

impl Drop for ScriptedPlatform {
    fn drop(&mut self) {
        if let Some(drops) = &self.drops {
            drops.set(drops.get() + 1);
        }
    }
}

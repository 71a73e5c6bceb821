use super::config::WindowConfig;
use super::error::BootstrapError;
use super::glutils::NativeGl;
use super::input::{Key, KeyState, PlatformEvent};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::video::{GLProfile, SwapInterval};

/// SDL reports failures as -1 and keeps the details in its error string.
const SDL_ERROR_CODE: i32 = -1;

/// The windowing side of the frame loop.
pub trait Platform {
    /// Drains everything that happened since the last call.
    fn poll_events(&mut self) -> Vec<PlatformEvent>;
    /// Current (level) state of `key`.
    fn is_key_down(&self, key: Key) -> bool;
    fn should_close(&self) -> bool;
    fn set_should_close(&mut self, value: bool);
    fn swap_buffers(&mut self);
    /// Drawable size in pixels, which may differ from the window size on high-DPI displays.
    fn framebuffer_size(&self) -> (i32, i32);
}

/// SDL window with a current OpenGL core context.
///
/// Dropping it destroys the context and window and shuts SDL down.
pub struct System {
    pub w: u32,
    pub h: u32,
    // field order is drop order: context before window before SDL
    gl_ctx: sdl2::video::GLContext,
    window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    video_subsystem: sdl2::VideoSubsystem,
    _sdl_context: sdl2::Sdl,
    should_close: bool,
    pending: Vec<PlatformEvent>,
}

impl System {
    pub fn new(config: &WindowConfig) -> Result<System, BootstrapError> {
        let sdl_context = sdl2::init().map_err(BootstrapError::Init)?;
        let video_subsystem = sdl_context.video().map_err(BootstrapError::Init)?;

        let (major, minor) = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);
        gl_attr.set_double_buffer(true);

        let (w, h) = if config.fullscreen {
            let mode = video_subsystem
                .desktop_display_mode(0)
                .map_err(BootstrapError::DisplayMode)?;
            (mode.w as u32, mode.h as u32)
        } else {
            (config.width, config.height)
        };

        let mut builder = video_subsystem.window(&config.title, w, h);
        builder.opengl().allow_highdpi();
        if config.fullscreen {
            builder.fullscreen();
        } else {
            builder.position_centered().resizable();
        }
        let window = builder
            .build()
            .map_err(|e| BootstrapError::Window(e.to_string()))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(BootstrapError::Context)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(BootstrapError::Context)?;

        let event_pump = sdl_context.event_pump().map_err(BootstrapError::Init)?;

        let mut pending = Vec::new();
        let interval = if config.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            pending.push(PlatformEvent::Error {
                code: SDL_ERROR_CODE,
                description: format!("setting swap interval: {e}"),
            });
        }

        log::info!(
            "requested OpenGL {major}.{minor} core, got {:?} {:?}",
            gl_attr.context_version(),
            gl_attr.context_profile()
        );
        log::info!("window {w}x{h} (fullscreen: {})", config.fullscreen);

        // bootstrap noise is already covered by the results above
        sdl2::clear_error();

        Ok(System {
            w,
            h,
            gl_ctx,
            window,
            event_pump,
            video_subsystem,
            _sdl_context: sdl_context,
            should_close: false,
            pending,
        })
    }

    /// Resolves GL entry points against the current context.
    pub fn load_gl(&self) -> Result<NativeGl, BootstrapError> {
        debug_assert!(self.gl_ctx.is_current());
        gl::load_with(|name| self.video_subsystem.gl_get_proc_address(name) as *const _);

        if let Some(&(name, _)) = REQUIRED_GL_FUNCTIONS
            .iter()
            .find(|(_, is_loaded)| !is_loaded())
        {
            return Err(BootstrapError::Loader(name));
        }
        log::debug!("{} GL entry points resolved", REQUIRED_GL_FUNCTIONS.len());
        Ok(NativeGl::loaded())
    }
}

const REQUIRED_GL_FUNCTIONS: &[(&str, fn() -> bool)] = &[
    ("glGetString", gl::GetString::is_loaded),
    ("glGetIntegerv", gl::GetIntegerv::is_loaded),
    ("glGetError", gl::GetError::is_loaded),
    ("glViewport", gl::Viewport::is_loaded),
    ("glPolygonMode", gl::PolygonMode::is_loaded),
    ("glClearColor", gl::ClearColor::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glGetShaderiv", gl::GetShaderiv::is_loaded),
    ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
    ("glDeleteShader", gl::DeleteShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glAttachShader", gl::AttachShader::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glGetProgramiv", gl::GetProgramiv::is_loaded),
    ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
    ("glDeleteProgram", gl::DeleteProgram::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glBindVertexArray", gl::BindVertexArray::is_loaded),
    ("glDeleteVertexArrays", gl::DeleteVertexArrays::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glBindBuffer", gl::BindBuffer::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glDeleteBuffers", gl::DeleteBuffers::is_loaded),
    ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
    ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded),
    ("glDrawElements", gl::DrawElements::is_loaded),
];

fn to_scancode(key: Key) -> Option<Scancode> {
    match key {
        Key::Escape => Some(Scancode::Escape),
        Key::Num1 => Some(Scancode::Num1),
        Key::Num2 => Some(Scancode::Num2),
        Key::Num3 => Some(Scancode::Num3),
        Key::Other => None,
    }
}

fn from_scancode(scancode: Option<Scancode>) -> Key {
    match scancode {
        Some(Scancode::Escape) => Key::Escape,
        Some(Scancode::Num1) => Key::Num1,
        Some(Scancode::Num2) => Key::Num2,
        Some(Scancode::Num3) => Key::Num3,
        _ => Key::Other,
    }
}

impl Platform for System {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        let mut events = std::mem::take(&mut self.pending);

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(PlatformEvent::CloseRequested),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = self.window.drawable_size();
                    events.push(PlatformEvent::Resized {
                        width: width as i32,
                        height: height as i32,
                    });
                }
                Event::KeyDown {
                    scancode, repeat, ..
                } => events.push(PlatformEvent::Key {
                    key: from_scancode(scancode),
                    state: KeyState::Pressed,
                    repeat,
                }),
                Event::KeyUp {
                    scancode, repeat, ..
                } => events.push(PlatformEvent::Key {
                    key: from_scancode(scancode),
                    state: KeyState::Released,
                    repeat,
                }),
                _ => {}
            }
        }

        let error = sdl2::get_error();
        if !error.is_empty() {
            events.push(PlatformEvent::Error {
                code: SDL_ERROR_CODE,
                description: error,
            });
            sdl2::clear_error();
        }

        events
    }

    fn is_key_down(&self, key: Key) -> bool {
        match to_scancode(key) {
            Some(sc) => self.event_pump.keyboard_state().is_scancode_pressed(sc),
            None => false,
        }
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        let (w, h) = self.window.drawable_size();
        (w as i32, h as i32)
    }
}

use super::config::{AppConfig, RenderConfig, WindowConfig};
use super::error::BootstrapError;
use super::geometry::{GeometryBuffers, Mesh, QUAD_INDICES, QUAD_VERTICES};
use super::glutils::{check_gl_err, print_opengl_info, GlApi, PolygonMode};
use super::input::{key_action, Action, Key, PlatformEvent};
use super::math::Vec4;
use super::shaders::{BuildReport, ShaderProgram};
use super::system::Platform;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FATAL: i32 = -1;

/// Program lifecycle. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uninitialized,
    Bootstrapped,
    Loaded,
    ProgramLinked,
    BuffersReady,
    Running,
    Terminated,
}

#[derive(Debug)]
struct Lifecycle {
    history: Vec<Stage>,
}

impl Lifecycle {
    fn new() -> Lifecycle {
        Lifecycle {
            history: vec![Stage::Uninitialized],
        }
    }

    fn current(&self) -> Stage {
        self.history[self.history.len() - 1]
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.current(), "{:?} -> {next:?}", self.current());
        log::debug!("{:?} -> {next:?}", self.current());
        self.history.push(next);
    }

    /// Fatal exit: straight to `Terminated`.
    fn abort(&mut self, err: BootstrapError) -> BootstrapError {
        log::error!("{:?}: {err}", self.current());
        self.advance(Stage::Terminated);
        err
    }
}

/// What a finished run looked like.
#[derive(Debug)]
pub struct RunSummary {
    pub frames: u64,
    pub build: BuildReport,
    pub stages: Vec<Stage>,
}

/// GL state for the quad, plus the per-frame logic.
pub struct Renderer<G: GlApi> {
    gl: G,
    geometry: GeometryBuffers<G>,
    program: ShaderProgram<G>,
    clear_color: Vec4,
    polygon_mode: PolygonMode,
    frames: u64,
}

impl<G: GlApi + Clone> Renderer<G> {
    /// Builds the shader program, then uploads `mesh`.
    pub fn new(gl: &G, config: &RenderConfig, mesh: &Mesh) -> (Renderer<G>, BuildReport) {
        let (program, report) = ShaderProgram::build(gl, &config.shaders);
        let geometry = GeometryBuffers::upload(gl, mesh);
        let renderer = Renderer {
            gl: gl.clone(),
            geometry,
            program,
            clear_color: config.clear_color,
            polygon_mode: PolygonMode::default(),
            frames: 0,
        };
        (renderer, report)
    }
}

impl<G: GlApi> Renderer<G> {
    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }

    /// Runs frames until the platform's close flag is up at the top of an iteration.
    pub fn run<P: Platform>(&mut self, platform: &mut P) -> u64 {
        let (width, height) = platform.framebuffer_size();
        self.gl.viewport(0, 0, width, height);

        while !platform.should_close() {
            self.frame(platform);
        }
        self.frames
    }

    /// One input / clear / draw / present / dispatch pass.
    pub fn frame<P: Platform>(&mut self, platform: &mut P) {
        if platform.is_key_down(Key::Escape) {
            platform.set_should_close(true);
        }

        self.gl.clear_color(self.clear_color);
        self.gl.clear();

        self.program.use_program();
        self.geometry.draw();

        platform.swap_buffers();
        for event in platform.poll_events() {
            self.handle_event(platform, event);
        }
        self.frames += 1;
    }

    fn handle_event<P: Platform>(&mut self, platform: &mut P, event: PlatformEvent) {
        match event {
            PlatformEvent::Resized { width, height } => {
                log::debug!("framebuffer resized to {width}x{height}");
                self.gl.viewport(0, 0, width, height);
            }
            PlatformEvent::Key { key, state, repeat } => match key_action(key, state, repeat) {
                Some(Action::Close) => platform.set_should_close(true),
                Some(Action::SetPolygonMode(mode)) => {
                    log::debug!("polygon mode {mode:?}");
                    self.polygon_mode = mode;
                    self.gl.polygon_mode(mode);
                }
                None => {}
            },
            PlatformEvent::Error { code, description } => {
                log::error!("platform error {code}: {description}");
            }
            PlatformEvent::CloseRequested => platform.set_should_close(true),
        }
    }
}

/// Runs the whole program: bootstrap, load, build, upload, loop, teardown.
///
/// `bootstrap` creates the window with a current context and `load`
/// resolves GL against it. Either failing ends the run before any GL call.
/// Every GL object is released before the platform is dropped.
pub fn launch<P, G, B, L>(
    config: &AppConfig,
    bootstrap: B,
    load: L,
) -> Result<RunSummary, BootstrapError>
where
    P: Platform,
    G: GlApi + Clone,
    B: FnOnce(&WindowConfig) -> Result<P, BootstrapError>,
    L: FnOnce(&P) -> Result<G, BootstrapError>,
{
    let mut lifecycle = Lifecycle::new();

    let mut platform = bootstrap(&config.window).map_err(|e| lifecycle.abort(e))?;
    lifecycle.advance(Stage::Bootstrapped);

    let gl = load(&platform).map_err(|e| lifecycle.abort(e))?;
    lifecycle.advance(Stage::Loaded);
    print_opengl_info(&gl);

    let mesh =
        Mesh::new(&QUAD_VERTICES, &QUAD_INDICES).map_err(|e| lifecycle.abort(e.into()))?;

    let (mut renderer, build) = Renderer::new(&gl, &config.render, &mesh);
    lifecycle.advance(Stage::ProgramLinked);
    lifecycle.advance(Stage::BuffersReady);
    check_gl_err(&gl, "setup");

    lifecycle.advance(Stage::Running);
    let frames = renderer.run(&mut platform);

    drop(renderer);
    drop(platform);
    lifecycle.advance(Stage::Terminated);
    log::info!("rendered {frames} frames");

    Ok(RunSummary {
        frames,
        build,
        stages: lifecycle.history,
    })
}

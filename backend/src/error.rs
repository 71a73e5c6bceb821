use thiserror::Error;

/// Failures that stop the program before the first frame.
///
/// Everything later in the pipeline (shader diagnostics, platform runtime
/// errors) is advisory and only logged.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to initialize SDL: {0}")]
    Init(String),

    #[error("failed to query the desktop display mode: {0}")]
    DisplayMode(String),

    #[error("failed to create window: {0}")]
    Window(String),

    #[error("failed to create OpenGL context: {0}")]
    Context(String),

    #[error("failed to load OpenGL function `{0}`")]
    Loader(&'static str),

    #[error("invalid built-in geometry: {0}")]
    Geometry(#[from] MeshError),
}

/// A mesh whose index list cannot be drawn safely.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("index count {0} is not a whole number of triangles")]
    PartialTriangle(usize),
}

use super::config::ShaderSources;
use super::glutils::{GlApi, ShaderStage};
use std::ffi::CStr;

/// Outcome of one compile or link step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub success: bool,
    /// Driver info log; empty on success.
    pub log: String,
}

impl StepReport {
    fn ok() -> StepReport {
        StepReport {
            success: true,
            log: String::new(),
        }
    }

    fn failed(log: String) -> StepReport {
        StepReport {
            success: false,
            log,
        }
    }
}

/// Diagnostics gathered while building a program.
///
/// Failures here are advisory: the program object still exists and can be
/// used, it just renders nothing useful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub vertex: StepReport,
    pub fragment: StepReport,
    pub link: StepReport,
}

impl BuildReport {
    pub fn is_ok(&self) -> bool {
        self.vertex.success && self.fragment.success && self.link.success
    }
}

/// A linked shader program, deleted on drop.
pub struct ShaderProgram<G: GlApi> {
    gl: G,
    program_id: u32,
}

impl<G: GlApi + Clone> ShaderProgram<G> {
    /// Compiles both stages, links them and releases the stage objects.
    ///
    /// Never fails: compile and link errors are logged with their stage tag
    /// and returned in the report.
    pub fn build(gl: &G, sources: &ShaderSources) -> (ShaderProgram<G>, BuildReport) {
        let (vertex_shader, vertex) = Self::compile(gl, ShaderStage::Vertex, sources.vertex);
        let (fragment_shader, fragment) =
            Self::compile(gl, ShaderStage::Fragment, sources.fragment);

        let program_id = gl.create_program();
        gl.attach_shader(program_id, vertex_shader);
        gl.attach_shader(program_id, fragment_shader);
        gl.link_program(program_id);

        let link = if gl.link_status(program_id) {
            StepReport::ok()
        } else {
            let log = gl.program_info_log(program_id);
            log::error!("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{log}");
            StepReport::failed(log)
        };

        // the program keeps its own copy of the stages
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        let program = ShaderProgram {
            gl: gl.clone(),
            program_id,
        };
        let report = BuildReport {
            vertex,
            fragment,
            link,
        };
        (program, report)
    }

    fn compile(gl: &G, stage: ShaderStage, source: &CStr) -> (u32, StepReport) {
        let shader_id = gl.create_shader(stage);
        gl.shader_source(shader_id, source);
        gl.compile_shader(shader_id);

        if gl.compile_status(shader_id) {
            return (shader_id, StepReport::ok());
        }

        let log = gl.shader_info_log(shader_id);
        log::error!(
            "ERROR::SHADER::{}::COMPILATION_FAILED\n{log}",
            stage.tag()
        );
        (shader_id, StepReport::failed(log))
    }
}

impl<G: GlApi> ShaderProgram<G> {
    pub fn id(&self) -> u32 {
        self.program_id
    }

    pub fn use_program(&self) {
        self.gl.use_program(self.program_id);
    }
}

impl<G: GlApi> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.program_id);
    }
}

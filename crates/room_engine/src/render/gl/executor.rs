//! Replays frame plans against the current GL context

use super::resources::GpuResources;
use super::shader::ShaderResult;
use crate::render::commands::{FramePlan, ProgramId, RenderOp};

/// Stateless apart from the program made current by the last `UseProgram`
#[derive(Debug, Default)]
pub struct GlExecutor {
    current_program: Option<ProgramId>,
}

impl GlExecutor {
    /// Create an executor with no current program
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed pipeline state used by every frame
    pub fn init_state(&self, wireframe: bool) {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(gl::LESS);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::PolygonMode(gl::FRONT_AND_BACK, if wireframe { gl::LINE } else { gl::FILL });
        }
        log::debug!("GL state initialized (wireframe: {wireframe})");
    }

    /// Execute every op of `plan` in order
    ///
    /// Missing resources are logged and skipped so one bad asset does not
    /// stop the frame. Program errors are returned.
    pub fn submit(&mut self, plan: &FramePlan, resources: &mut GpuResources) -> ShaderResult<()> {
        for op in plan.ops() {
            match op {
                RenderOp::Clear => unsafe {
                    gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT);
                },
                RenderOp::Viewport(viewport) => unsafe {
                    gl::Viewport(viewport.x, viewport.y, viewport.width, viewport.height);
                },
                RenderOp::UseProgram(id) => match resources.program(*id) {
                    Some(program) => {
                        program.use_program()?;
                        self.current_program = Some(*id);
                    }
                    None => {
                        log::warn!("Program {id:?} not loaded");
                        self.current_program = None;
                    }
                },
                RenderOp::SetUniform { name, value } => {
                    match self.current_program.and_then(|id| resources.program_mut(id)) {
                        Some(program) => program.set_uniform(name, value)?,
                        None => log::warn!("Uniform {name} set with no program in use"),
                    }
                }
                RenderOp::BindTexture { unit, texture } => match resources.texture(texture) {
                    Some(found) => found.bind(*unit),
                    None => log::warn!("Unknown texture {texture}"),
                },
                RenderOp::Draw(mesh) => {
                    if !resources.draw(*mesh) {
                        log::warn!("Mesh {mesh:?} not loaded");
                    }
                }
                RenderOp::Flush => unsafe {
                    gl::BindVertexArray(0);
                    gl::Flush();
                },
            }
        }
        log::trace!("Submitted {} render ops", plan.len());
        Ok(())
    }

    /// Program made current by the last executed `UseProgram`
    pub fn current_program(&self) -> Option<ProgramId> {
        self.current_program
    }
}

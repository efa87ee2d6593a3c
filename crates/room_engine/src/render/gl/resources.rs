//! GPU objects addressed by frame plan ids

use std::collections::HashMap;

use super::buffer::Geometry;
use super::model::Model;
use super::shader::ShaderProgram;
use super::texture::Texture;
use crate::render::commands::{MeshId, ProgramId};

/// Everything a [`FramePlan`](crate::render::commands::FramePlan) can refer to
///
/// Filled once at scene init. Dropping it releases every GL object, so it
/// must go before the window that owns the context.
#[derive(Default)]
pub struct GpuResources {
    programs: HashMap<ProgramId, ShaderProgram>,
    textures: HashMap<String, Texture>,
    geometry: HashMap<MeshId, Geometry>,
    models: HashMap<MeshId, Model>,
}

impl GpuResources {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a linked program
    pub fn insert_program(&mut self, id: ProgramId, program: ShaderProgram) {
        self.programs.insert(id, program);
    }

    /// Program by id
    pub fn program(&self, id: ProgramId) -> Option<&ShaderProgram> {
        self.programs.get(&id)
    }

    /// Program by id, for uniform upload
    pub fn program_mut(&mut self, id: ProgramId) -> Option<&mut ShaderProgram> {
        self.programs.get_mut(&id)
    }

    /// Register a texture under `name`
    pub fn insert_texture(&mut self, name: impl Into<String>, texture: Texture) {
        self.textures.insert(name.into(), texture);
    }

    /// Texture by name
    pub fn texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    /// Register vertex-array geometry
    pub fn insert_geometry(&mut self, id: MeshId, geometry: Geometry) {
        self.geometry.insert(id, geometry);
    }

    /// Register a loaded model
    pub fn insert_model(&mut self, id: MeshId, model: Model) {
        self.models.insert(id, model);
    }

    /// Draw the mesh behind `id`; false if nothing is registered for it
    pub fn draw(&self, id: MeshId) -> bool {
        if let Some(geometry) = self.geometry.get(&id) {
            geometry.draw();
            true
        } else if let Some(model) = self.models.get(&id) {
            model.draw_model();
            true
        } else {
            false
        }
    }

    /// Number of registered textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

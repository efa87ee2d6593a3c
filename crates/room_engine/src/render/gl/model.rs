//! Models loaded from OBJ files

use std::path::Path;

use super::buffer::Geometry;
use crate::assets::{AssetError, ObjLoader};

/// Indexed triangle mesh on the GPU
pub struct Model {
    geometry: Geometry,
    triangles: usize,
}

impl Model {
    /// Load an OBJ file and upload it; `flip_uv` maps `v` to `1 - v`
    pub fn load_model(path: &Path, flip_uv: bool) -> Result<Self, AssetError> {
        let mesh = ObjLoader::load_obj(path, flip_uv)?;
        Ok(Self {
            geometry: Geometry::indexed(&mesh.vertices, &mesh.indices),
            triangles: mesh.triangle_count(),
        })
    }

    /// Draw with the current program
    pub fn draw_model(&self) {
        self.geometry.draw();
    }

    /// Triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles
    }
}

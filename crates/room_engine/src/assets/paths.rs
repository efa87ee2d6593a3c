//! Fixed asset locations
//!
//! Shader, image and model paths are conventions relative to an asset root
//! (the working directory by default).

use std::path::{Path, PathBuf};

/// Vertex + fragment source files of one program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderPair {
    /// Vertex stage source, relative to the asset root
    pub vertex: &'static str,
    /// Fragment stage source, relative to the asset root
    pub fragment: &'static str,
}

/// Demo triangle program
pub const BASIC_UNIFORM_SHADER: ShaderPair = ShaderPair {
    vertex: "shader/basic_uniform.vert",
    fragment: "shader/basic_uniform.frag",
};

/// Normal-mapped lighting for walls and floor
pub const NORMAL_MAP_SHADER: ShaderPair = ShaderPair {
    vertex: "shader/normalMap.vert",
    fragment: "shader/normalMap.frag",
};

/// Basic Phong lighting for the crate
pub const BASIC_LIGHTING_SHADER: ShaderPair = ShaderPair {
    vertex: "shader/basicLighting.vert",
    fragment: "shader/basicLighting.frag",
};

/// Environment-mapped lighting for the torus
pub const CUBEMAP_SHADER: ShaderPair = ShaderPair {
    vertex: "shader/lighting.vert",
    fragment: "shader/lighting_cubemap.frag",
};

/// Flat colour through an MVP matrix
pub const COLOR_SHADER: ShaderPair = ShaderPair {
    vertex: "shader/modelViewProj.vert",
    fragment: "shader/color.frag",
};

/// Directory holding `*.bmp` textures, relative to the asset root
pub const IMAGE_DIR: &str = "media/images";

/// Directory holding `*.obj` models, relative to the asset root
pub const MODEL_DIR: &str = "media/models";

/// Resolves conventional asset paths against a root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    /// Resolve against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file relative to the root
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Path of an image under the image directory
    pub fn image(&self, file_name: &str) -> PathBuf {
        self.root.join(IMAGE_DIR).join(file_name)
    }

    /// Path of a model under the model directory
    pub fn model(&self, file_name: &str) -> PathBuf {
        self.root.join(MODEL_DIR).join(file_name)
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_resolve_under_root() {
        let paths = AssetPaths::new("/opt/room");
        assert_eq!(paths.image("White.bmp"), PathBuf::from("/opt/room/media/images/White.bmp"));
        assert_eq!(paths.model("torus.obj"), PathBuf::from("/opt/room/media/models/torus.obj"));
        assert_eq!(
            paths.resolve(CUBEMAP_SHADER.fragment),
            PathBuf::from("/opt/room/shader/lighting_cubemap.frag")
        );
    }
}

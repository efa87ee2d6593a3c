//! Asset loading
//!
//! File paths, image decoding and OBJ mesh loading. Everything here is CPU
//! side; GPU upload lives in [`crate::render::gl`].

pub mod image_loader;
pub mod obj_loader;
pub mod paths;

pub use image_loader::ImageData;
pub use obj_loader::{MeshData, ObjLoader};
pub use paths::{AssetPaths, ShaderPair};

use std::path::PathBuf;
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Image could not be opened or decoded
    #[error("Failed to load image {}: {source}", .path.display())]
    Image {
        /// File that failed
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// OBJ file could not be read or parsed
    #[error("Failed to load model {}: {source}", .path.display())]
    Obj {
        /// File that failed
        path: PathBuf,
        /// Parser error
        source: tobj::LoadError,
    },

    /// OBJ file parsed but contained no triangles
    #[error("Model {} contains no geometry", .0.display())]
    EmptyModel(PathBuf),

    /// Image dimensions the GPU upload cannot represent
    #[error("Image {} has unsupported size {width}x{height}", .path.display())]
    Dimensions {
        /// File that failed
        path: PathBuf,
        /// Decoded width
        width: u32,
        /// Decoded height
        height: u32,
    },
}

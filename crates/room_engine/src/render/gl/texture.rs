//! 2D and cubemap textures

use std::path::{Path, PathBuf};

use gl::types::{GLenum, GLint, GLsizei, GLuint};
use thiserror::Error;

use crate::assets::{AssetError, ImageData};

/// Texture errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// Image decoding failed
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Cubemap faces differ in size or are not square
    #[error("Cubemap face {} is {width}x{height}, expected {expected}x{expected}", .path.display())]
    FaceSize {
        /// Offending face
        path: PathBuf,
        /// Face width
        width: u32,
        /// Face height
        height: u32,
        /// Size of the first face
        expected: u32,
    },
}

/// Result alias for texture operations
pub type TextureResult<T> = Result<T, TextureError>;

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// `GL_TEXTURE_2D`
    Texture2D,
    /// `GL_TEXTURE_CUBE_MAP`
    CubeMap,
}

impl TextureKind {
    fn target(self) -> GLenum {
        match self {
            Self::Texture2D => gl::TEXTURE_2D,
            Self::CubeMap => gl::TEXTURE_CUBE_MAP,
        }
    }
}

/// The six images of a cubemap, named by the direction they face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubemapFaces {
    /// +X
    pub right: PathBuf,
    /// -X
    pub left: PathBuf,
    /// +Y
    pub top: PathBuf,
    /// -Y
    pub bottom: PathBuf,
    /// +Z
    pub front: PathBuf,
    /// -Z
    pub back: PathBuf,
}

impl CubemapFaces {
    /// Faces named `<prefix>_<face>.<extension>` inside `dir`
    pub fn from_prefix(dir: &Path, prefix: &str, extension: &str) -> Self {
        let face = |name: &str| dir.join(format!("{prefix}_{name}.{extension}"));
        Self {
            right: face("right"),
            left: face("left"),
            top: face("top"),
            bottom: face("bottom"),
            front: face("front"),
            back: face("back"),
        }
    }

    /// Faces paired with their upload target, in GL enum order
    pub fn gl_order(&self) -> [(GLenum, &Path); 6] {
        [
            (gl::TEXTURE_CUBE_MAP_POSITIVE_X, self.right.as_path()),
            (gl::TEXTURE_CUBE_MAP_NEGATIVE_X, self.left.as_path()),
            (gl::TEXTURE_CUBE_MAP_POSITIVE_Y, self.top.as_path()),
            (gl::TEXTURE_CUBE_MAP_NEGATIVE_Y, self.bottom.as_path()),
            (gl::TEXTURE_CUBE_MAP_POSITIVE_Z, self.front.as_path()),
            (gl::TEXTURE_CUBE_MAP_NEGATIVE_Z, self.back.as_path()),
        ]
    }
}

/// GL texture object, deleted on drop
pub struct Texture {
    handle: GLuint,
    kind: TextureKind,
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a 2D texture from an image file
    ///
    /// Rows are flipped so texture coordinate (0, 0) is the bottom-left of
    /// the picture. Mipmapped, repeating.
    pub fn generate(path: &Path) -> TextureResult<Self> {
        let image = ImageData::from_file(path, true)?;
        Ok(Self::from_image(&image))
    }

    /// Upload decoded RGBA8 pixels as a 2D texture
    pub fn from_image(image: &ImageData) -> Self {
        let mut handle: GLuint = 0;
        unsafe {
            gl::GenTextures(1, &mut handle);
            gl::BindTexture(gl::TEXTURE_2D, handle);
            upload_rgba(gl::TEXTURE_2D, image);
            gl::GenerateMipmap(gl::TEXTURE_2D);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Self {
            handle,
            kind: TextureKind::Texture2D,
            width: image.width,
            height: image.height,
        }
    }

    /// Load a cubemap from six square images of equal size
    ///
    /// Faces are uploaded unflipped; cubemap lookups use a top-left origin
    /// per face.
    pub fn generate_cubemap(faces: &CubemapFaces) -> TextureResult<Self> {
        let mut images = Vec::with_capacity(6);
        for (target, path) in faces.gl_order() {
            images.push((target, path, ImageData::from_file(path, false)?));
        }

        let expected = images[0].2.width;
        for (_, path, image) in &images {
            if image.width != expected || image.height != expected {
                return Err(TextureError::FaceSize {
                    path: path.to_path_buf(),
                    width: image.width,
                    height: image.height,
                    expected,
                });
            }
        }

        let mut handle: GLuint = 0;
        unsafe {
            gl::GenTextures(1, &mut handle);
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, handle);
            for (target, _, image) in &images {
                upload_rgba(*target, image);
            }
            for (parameter, value) in [
                (gl::TEXTURE_MIN_FILTER, gl::LINEAR),
                (gl::TEXTURE_MAG_FILTER, gl::LINEAR),
                (gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE),
                (gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE),
                (gl::TEXTURE_WRAP_R, gl::CLAMP_TO_EDGE),
            ] {
                gl::TexParameteri(gl::TEXTURE_CUBE_MAP, parameter, value as GLint);
            }
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, 0);
        }

        log::info!("Created {expected}x{expected} cubemap from {:?}", faces.front.parent());
        Ok(Self {
            handle,
            kind: TextureKind::CubeMap,
            width: expected,
            height: expected,
        })
    }

    /// Bind to texture unit `unit` (0 = `GL_TEXTURE0`)
    pub fn bind(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(self.kind.target(), self.handle);
        }
    }

    /// 2D or cubemap
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    /// Size in pixels (per face for cubemaps)
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.handle) };
    }
}

/// # Safety
/// A texture of matching kind must be bound; dimensions were checked to fit
/// in `GLsizei` when the image was decoded.
unsafe fn upload_rgba(target: GLenum, image: &ImageData) {
    gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
    gl::TexImage2D(
        target,
        0,
        gl::RGBA8 as GLint,
        image.width as GLsizei,
        image.height as GLsizei,
        0,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        image.data.as_ptr().cast(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubemap_faces_follow_gl_order() {
        let faces = CubemapFaces::from_prefix(Path::new("media/images"), "cm", "bmp");
        let order = faces.gl_order();

        let targets: Vec<_> = order.iter().map(|(target, _)| *target).collect();
        let expected: Vec<_> = (0..6).map(|i| gl::TEXTURE_CUBE_MAP_POSITIVE_X + i).collect();
        assert_eq!(targets, expected);

        let names: Vec<_> = order
            .iter()
            .map(|(_, path)| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["cm_right.bmp", "cm_left.bmp", "cm_top.bmp", "cm_bottom.bmp", "cm_front.bmp", "cm_back.bmp"]
        );
    }

    #[test]
    fn test_missing_face_is_an_asset_error() {
        let faces = CubemapFaces::from_prefix(Path::new("no/such/dir"), "cm", "bmp");
        assert!(matches!(
            Texture::generate_cubemap(&faces),
            Err(TextureError::Asset(AssetError::Image { .. }))
        ));
    }
}

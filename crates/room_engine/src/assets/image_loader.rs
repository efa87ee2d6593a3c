//! Image loading utilities for texture data

use std::path::Path;

use crate::assets::AssetError;

/// Decoded RGBA8 image ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data, rows bottom to top when loaded with `flip`
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// With `flip_vertically` the first row of `data` is the bottom of the
    /// picture, which is what `glTexImage2D` expects for 2D textures. Cubemap
    /// faces are uploaded unflipped.
    pub fn from_file<P: AsRef<Path>>(path: P, flip_vertically: bool) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|source| AssetError::Image {
            path: path_ref.to_path_buf(),
            source,
        })?;
        let img = if flip_vertically { img.flipv() } else { img };

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        if width == 0 || height == 0 || i32::try_from(width.max(height)).is_err() {
            return Err(AssetError::Dimensions {
                path: path_ref.to_path_buf(),
                width,
                height,
            });
        }

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }
}

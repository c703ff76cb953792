//! Texture atlas layout.
//!
//! The atlas is a single image split into a grid of square cells. Each block
//! type owns one row (its ordinal) and each block side owns one column. Only
//! the image dimensions matter to the engine; binding the pixels is the
//! renderer's job.

use std::path::Path;

use crate::engine_state::error::AssetError;

/// Default edge length of an atlas cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 16;

/// Dimensions of the texture atlas, used to compute texture coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Atlas width in pixels.
    pub width: u32,
    /// Atlas height in pixels.
    pub height: u32,
    /// Edge length of one cell in pixels.
    pub cell_size: u32,
}

impl AtlasLayout {
    /// Creates a layout from known dimensions.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        AtlasLayout {
            width,
            height,
            cell_size,
        }
    }

    /// Reads the atlas dimensions from the image at `path`.
    ///
    /// # Errors
    /// [`AssetError::Missing`] if the file is absent, which callers treat as
    /// fatal, or an image/dimension error if it is unusable.
    pub fn load(path: &Path, cell_size: u32) -> Result<Self, AssetError> {
        if !path.is_file() {
            return Err(AssetError::Missing(path.to_path_buf()));
        }

        let (width, height) = image::image_dimensions(path)?;
        if width == 0 || height == 0 || cell_size == 0 {
            return Err(AssetError::InvalidDimensions {
                width,
                height,
                cell_size,
            });
        }

        log::info!("Loaded texture atlas {} ({}x{})", path.display(), width, height);
        Ok(AtlasLayout::new(width, height, cell_size))
    }

    /// The size of one cell in texture coordinates, as `(u, v)`.
    pub fn tile_size(&self) -> (f32, f32) {
        (
            self.cell_size as f32 / self.width as f32,
            self.cell_size as f32 / self.height as f32,
        )
    }

    /// The texture coordinate of the top-left corner of cell `(row, column)`.
    pub fn tile_origin(&self, row: usize, column: usize) -> (f32, f32) {
        let (tile_u, tile_v) = self.tile_size();
        (column as f32 * tile_u, row as f32 * tile_v)
    }
}

impl Default for AtlasLayout {
    /// Six side columns by thirteen block type rows of 16px cells.
    fn default() -> Self {
        AtlasLayout::new(6 * DEFAULT_CELL_SIZE, 13 * DEFAULT_CELL_SIZE, DEFAULT_CELL_SIZE)
    }
}

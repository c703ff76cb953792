use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::texture::AtlasLayout,
    voxels::block::{block_side::BlockSide, block_type::BlockType},
};

/// Half the edge length of a block. Blocks are unit cubes centered on integer
/// world coordinates.
pub const HALF_EXTENT: f32 = 0.5;

/// Represents a single quad face of a voxel in the mesh.
///
/// Corners are stored in emission order; each face direction has its own
/// winding so that every quad is wound consistently when seen from outside
/// the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The four corners of the quad in world space.
    pub corners: [Point3<f32>; 4],
    /// The atlas texture coordinate of each corner.
    pub tex_coords: [[f32; 2]; 4],
}

impl Face {
    /// Creates the face on `block_side` of the block centered at `center`.
    pub fn new(
        center: Point3<f32>,
        block_type: BlockType,
        block_side: BlockSide,
        atlas: &AtlasLayout,
    ) -> Self {
        let h = HALF_EXTENT;
        let offsets: [Vector3<f32>; 4] = match block_side {
            BlockSide::FRONT => [
                Vector3::new(-h, -h, h),
                Vector3::new(h, -h, h),
                Vector3::new(h, h, h),
                Vector3::new(-h, h, h),
            ],
            BlockSide::BACK => [
                Vector3::new(h, -h, -h),
                Vector3::new(-h, -h, -h),
                Vector3::new(-h, h, -h),
                Vector3::new(h, h, -h),
            ],
            BlockSide::LEFT => [
                Vector3::new(-h, -h, -h),
                Vector3::new(-h, -h, h),
                Vector3::new(-h, h, h),
                Vector3::new(-h, h, -h),
            ],
            BlockSide::RIGHT => [
                Vector3::new(h, -h, h),
                Vector3::new(h, -h, -h),
                Vector3::new(h, h, -h),
                Vector3::new(h, h, h),
            ],
            BlockSide::TOP => [
                Vector3::new(-h, h, h),
                Vector3::new(h, h, h),
                Vector3::new(h, h, -h),
                Vector3::new(-h, h, -h),
            ],
            BlockSide::BOTTOM => [
                Vector3::new(-h, -h, -h),
                Vector3::new(h, -h, -h),
                Vector3::new(h, -h, h),
                Vector3::new(-h, -h, h),
            ],
        };

        Face {
            corners: offsets.map(|offset| center + offset),
            tex_coords: Self::tex_coords(block_type, block_side, atlas),
        }
    }

    /// Texture coordinates of the atlas cell at (block type row, side column).
    ///
    /// Side faces map the top of the texture to the top of the quad; top and
    /// bottom faces use the cell unflipped.
    fn tex_coords(block_type: BlockType, block_side: BlockSide, atlas: &AtlasLayout) -> [[f32; 2]; 4] {
        let (tile_u, tile_v) = atlas.tile_size();
        let (u, v) = atlas.tile_origin(block_type.ordinal() as usize, block_side.atlas_column());

        match block_side {
            BlockSide::TOP | BlockSide::BOTTOM => [
                [u, v],
                [u + tile_u, v],
                [u + tile_u, v + tile_v],
                [u, v + tile_v],
            ],
            _ => [
                [u, v + tile_v],
                [u + tile_u, v + tile_v],
                [u + tile_u, v],
                [u, v],
            ],
        }
    }
}

//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x256x16 columns of voxel data, together with the `ChunkCoord` key that
//! identifies them in the world.
//!
//! ## Storage
//!
//! Chunks are dense: every one of the `CHUNK_SIZE * CHUNK_SIZE * CHUNK_HEIGHT`
//! cells always holds a `Block`. Cells are laid out in nested (x, z, y) order
//! with y varying fastest, which is also the order used by generation and by
//! the on-disk chunk record, so saving and loading are straight linear scans.

use cgmath::{Point3, Vector3};

use crate::engine_state::rendering::meshing::ChunkMesh;

use super::block::{block_type::BlockType, Block, BlockTypeSize};

mod chunk_generation;

pub use chunk_generation::*;

/// The lateral dimension (x and z) of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// The vertical dimension of a chunk in blocks.
pub const CHUNK_HEIGHT: i32 = 256;
/// The number of blocks in a single vertical column plane (x fixed).
pub const CHUNK_PLANE_SIZE: usize = (CHUNK_SIZE * CHUNK_HEIGHT) as usize;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_HEIGHT) as usize;

/// Integer coordinate of a chunk on the horizontal chunk grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// X coordinate in chunks.
    pub x: i32,
    /// Z coordinate in chunks.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The chunk owning the integer block position `(x, _, z)`.
    pub fn from_block(x: i32, z: i32) -> Self {
        ChunkCoord {
            x: x.div_euclid(CHUNK_SIZE),
            z: z.div_euclid(CHUNK_SIZE),
        }
    }

    /// The chunk containing a continuous world position.
    pub fn from_world(position: Point3<f32>) -> Self {
        ChunkCoord {
            x: (position.x / CHUNK_SIZE as f32).floor() as i32,
            z: (position.z / CHUNK_SIZE as f32).floor() as i32,
        }
    }

    /// World position of the block at local `(0, 0, 0)`.
    pub fn origin(self) -> Point3<i32> {
        Point3::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }

    /// Converts an integer world position into a local offset within this chunk.
    ///
    /// The result is not bounds-checked; see [`Chunk::in_bounds`].
    pub fn to_local(self, world: Point3<i32>) -> Vector3<i32> {
        world - self.origin()
    }

    /// The neighboring chunk coordinate offset by `(dx, dz)`.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        ChunkCoord::new(self.x + dx, self.z + dz)
    }
}

/// Represents a 16x256x16 column of voxel blocks in the world.
///
/// A chunk owns both its voxel grid and the mesh built from it. The mesh is
/// always rebuilt as a whole; see
/// [`Chunk::generate_mesh`](crate::engine_state::voxels::chunk::Chunk::generate_mesh).
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub coord: ChunkCoord,

    /// Dense block storage in (x, z, y) order.
    blocks: Vec<Block>,

    /// The most recently built mesh for this chunk.
    pub mesh: ChunkMesh,
}

impl Chunk {
    /// Creates a new chunk filled with air.
    pub fn new(coord: ChunkCoord) -> Self {
        Self::filled(coord, BlockType::AIR)
    }

    /// Creates a new chunk with every block set to `block_type`.
    pub fn filled(coord: ChunkCoord, block_type: BlockType) -> Self {
        let origin = coord.origin();
        let mut blocks = Vec::with_capacity(CHUNK_VOLUME);
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for y in 0..CHUNK_HEIGHT {
                    blocks.push(Block::new(
                        block_type,
                        Point3::new(origin.x + x, y, origin.z + z),
                    ));
                }
            }
        }

        Chunk {
            coord,
            blocks,
            mesh: ChunkMesh::default(),
        }
    }

    /// Whether a local offset lies inside the chunk.
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_SIZE).contains(&z)
    }

    /// The storage index of a local offset. Callers must check bounds first.
    #[inline]
    pub fn index(x: i32, y: i32, z: i32) -> usize {
        x as usize * CHUNK_PLANE_SIZE + z as usize * CHUNK_HEIGHT as usize + y as usize
    }

    /// Gets the block at chunk-relative coordinates.
    ///
    /// # Returns
    /// `None` if the coordinates are outside the chunk.
    pub fn get_block_at(&self, x: i32, y: i32, z: i32) -> Option<&Block> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        Some(&self.blocks[Self::index(x, y, z)])
    }

    /// Gets the block type at chunk-relative coordinates, or `None` out of bounds.
    pub fn get_type_at(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        self.get_block_at(x, y, z).map(Block::get_type)
    }

    /// Sets the block type at chunk-relative coordinates.
    ///
    /// The block's cached world position is recomputed from the chunk origin.
    ///
    /// # Returns
    /// `false` without touching the chunk if the coordinates are outside it.
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        if !Self::in_bounds(x, y, z) {
            return false;
        }
        let origin = self.coord.origin();
        self.blocks[Self::index(x, y, z)] =
            Block::new(block_type, Point3::new(origin.x + x, y, origin.z + z));
        true
    }

    /// All blocks in storage order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Overwrites block types in storage order. Cached positions already
    /// follow the chunk origin and are left as they are.
    ///
    /// Used when decoding a persisted chunk record. Entries beyond
    /// `CHUNK_VOLUME` are ignored; cells past the end of `types` keep their
    /// current value.
    pub fn fill_from_types<I>(&mut self, types: I)
    where
        I: IntoIterator<Item = BlockType>,
    {
        for (index, block_type) in types.into_iter().take(CHUNK_VOLUME).enumerate() {
            self.blocks[index].block_type = block_type as BlockTypeSize;
        }
    }

    /// Number of non-air blocks in the chunk.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_coord_from_block() {
        assert_eq!(ChunkCoord::from_block(0, 0), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_block(15, 15), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_block(16, -1), ChunkCoord::new(1, -1));
        assert_eq!(ChunkCoord::from_block(-16, -17), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn chunk_coord_from_world_floors() {
        assert_eq!(ChunkCoord::from_world(Point3::new(0.5, 100.0, 15.9)), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::from_world(Point3::new(-0.1, 0.0, 16.0)), ChunkCoord::new(-1, 1));
    }

    #[test]
    fn new_chunk_is_dense_air() {
        let chunk = Chunk::new(ChunkCoord::new(2, -3));
        assert_eq!(chunk.blocks().len(), CHUNK_VOLUME);
        assert!(chunk.blocks().iter().all(Block::is_empty));
        assert_eq!(chunk.solid_count(), 0);
    }

    #[test]
    fn positions_follow_chunk_origin() {
        let mut chunk = Chunk::new(ChunkCoord::new(-1, 2));
        assert_eq!(chunk.get_block_at(0, 0, 0).unwrap().position, Point3::new(-16, 0, 32));
        assert_eq!(chunk.get_block_at(15, 255, 15).unwrap().position, Point3::new(-1, 255, 47));

        assert!(chunk.set_block_at(3, 70, 4, BlockType::STONE));
        let block = chunk.get_block_at(3, 70, 4).unwrap();
        assert_eq!(block.get_type(), BlockType::STONE);
        assert_eq!(block.position, Point3::new(-13, 70, 36));
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        assert!(chunk.get_block_at(-1, 0, 0).is_none());
        assert!(chunk.get_block_at(0, CHUNK_HEIGHT, 0).is_none());
        assert!(!chunk.set_block_at(0, 0, CHUNK_SIZE, BlockType::DIRT));
        assert_eq!(chunk.solid_count(), 0);
    }

    #[test]
    fn storage_order_is_x_z_y() {
        assert_eq!(Chunk::index(0, 1, 0), 1);
        assert_eq!(Chunk::index(0, 0, 1), CHUNK_HEIGHT as usize);
        assert_eq!(Chunk::index(1, 0, 0), CHUNK_PLANE_SIZE);
        assert_eq!(Chunk::index(15, 255, 15), CHUNK_VOLUME - 1);
    }

    #[test]
    fn local_offset_round_trip() {
        let coord = ChunkCoord::new(-2, 5);
        let local = coord.to_local(Point3::new(-20, 9, 81));
        assert_eq!(local, Vector3::new(12, 9, 1));
    }
}

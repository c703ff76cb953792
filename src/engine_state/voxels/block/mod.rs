//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and the voxel cell itself.

use block_type::BlockType;
use cgmath::Point3;

pub mod block_side;
pub mod block_type;

/// The compact integer type used to hold a block type in memory.
pub type BlockTypeSize = u8;

/// Represents a single voxel block in the world.
///
/// Besides its type, a block caches its integer world position. The position is
/// written only by the owning chunk and always equals the chunk origin plus the
/// block's local index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
    /// World position of the block's center.
    pub position: Point3<i32>,
}

impl Block {
    /// Creates a new block of the specified type at a world position.
    pub fn new(block_type: BlockType, position: Point3<i32>) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
            position,
        }
    }

    /// Returns the rich `BlockType` of this block.
    pub fn get_type(&self) -> BlockType {
        BlockType::get_block_type_from_int(self.block_type)
    }

    /// Whether this block is empty space.
    pub fn is_empty(&self) -> bool {
        self.get_type().is_empty()
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::new(BlockType::AIR, Point3::new(0, 0, 0))
    }
}

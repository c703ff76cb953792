//! # Block Type Module
//!
//! This module defines the closed set of materials a voxel can carry.
//! The discriminant of each variant is its ordinal, which doubles as the
//! on-disk encoding and as the texture atlas row for the material.

use std::fmt;

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The order is significant: it is persisted to disk and selects the atlas row,
/// so variants must never be reordered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// A debug material occupying the first atlas row.
    TEST = 0,

    /// Empty space. The only material that does not occlude faces.
    #[default]
    AIR = 1,

    /// Grass-topped soil, placed on dry surface columns.
    GRASS = 2,

    /// Plain soil found just below the surface.
    DIRT = 3,

    /// The bulk material of the terrain.
    STONE = 4,

    /// Beach and sea-floor material.
    SAND = 5,

    /// Fills every empty cell at or below the water level.
    WATER = 6,

    /// The indestructible floor of the world.
    BEDROCK = 7,

    /// Tree trunk.
    WOOD = 8,

    /// Tree canopy.
    LEAVES = 9,

    /// Processed wood.
    PLANKS = 10,

    /// Rough building stone.
    COBBLESTONE = 11,

    /// Fired clay bricks.
    BRICKS = 12,
}

impl BlockType {
    /// Number of distinct block types, and therefore of atlas rows.
    pub const COUNT: usize = 13;

    /// Decodes an ordinal back into a `BlockType`.
    ///
    /// # Returns
    /// `None` if the value does not name a block type.
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        num::FromPrimitive::from_i32(ordinal)
    }

    /// Converts a compact `BlockTypeSize` into a `BlockType`.
    ///
    /// Values outside the known range decode to `AIR`.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        Self::from_ordinal(btype as i32).unwrap_or(BlockType::AIR)
    }

    /// The ordinal of this block type as stored on disk.
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Whether this block type is empty space.
    pub fn is_empty(self) -> bool {
        self == BlockType::AIR
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

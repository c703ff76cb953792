//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the lookups keyed on
//! them: the neighbor offset used for face culling and the atlas column used
//! for texturing.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The discriminant of each variant is the column of the texture atlas that
/// holds the face's texture.
///
/// The order is: [FRONT, BACK, LEFT, RIGHT, TOP, BOTTOM]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The left face (facing negative X)
    LEFT = 2,

    /// The right face (facing positive X)
    RIGHT = 3,

    /// The top face (facing positive Y)
    TOP = 4,

    /// The bottom face (facing negative Y)
    BOTTOM = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in atlas column order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// The unit offset from a block to the neighbor this face looks at.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
        }
    }

    /// The texture atlas column holding this face's texture.
    pub fn atlas_column(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_are_unit_and_distinct() {
        let normals: Vec<Vector3<i32>> = BlockSide::all().iter().map(|s| s.normal()).collect();
        for (i, n) in normals.iter().enumerate() {
            assert_eq!(n.x.abs() + n.y.abs() + n.z.abs(), 1);
            for other in &normals[i + 1..] {
                assert_ne!(n, other);
            }
        }
    }

    #[test]
    fn atlas_columns_follow_declaration_order() {
        for (i, side) in BlockSide::all().iter().enumerate() {
            assert_eq!(side.atlas_column(), i);
        }
    }
}

//! Mesh generation for voxel chunks.
//!
//! This module turns a chunk's voxel grid into the buffers handed to the
//! renderer: a flat list of vertex positions and a parallel list of texture
//! coordinates, four vertices per visible face, drawn as independent quads.
//!
//! # Face culling
//! A face of a non-air block is emitted when the neighbor in that direction
//! is air or lies outside the chunk. Faces on the chunk boundary are always
//! emitted, whatever the adjacent chunk holds, so a chunk's mesh depends on
//! nothing but its own blocks.
//!
//! # Rebuilds
//! A mesh is never patched. Every rebuild produces a fresh `ChunkMesh` that
//! replaces the previous one wholesale.

use cgmath::Point3;

use crate::engine_state::{
    rendering::{texture::AtlasLayout, vertex::Vertex},
    voxels::{
        block::block_side::BlockSide,
        chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE},
    },
};

mod face;

pub use face::{Face, HALF_EXTENT};

/// Number of vertices emitted per face.
pub const VERTICES_PER_FACE: usize = 4;

/// Renderer-ready geometry for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions, 3 components per vertex.
    pub positions: Vec<f32>,
    /// Texture coordinates, 2 components per vertex, parallel to `positions`.
    pub tex_coords: Vec<f32>,
}

impl ChunkMesh {
    /// Builds the mesh for `chunk`.
    ///
    /// Cost is proportional to the chunk's block count.
    pub fn build(chunk: &Chunk, atlas: &AtlasLayout) -> Self {
        let mut mesh = ChunkMesh::default();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for y in 0..CHUNK_HEIGHT {
                    let block = &chunk.blocks()[Chunk::index(x, y, z)];
                    if block.is_empty() {
                        continue;
                    }

                    let p = block.position;
                    let center = Point3::new(p.x as f32, p.y as f32, p.z as f32);
                    for side in BlockSide::all() {
                        if Self::is_face_visible(chunk, x, y, z, side) {
                            mesh.push_face(&Face::new(center, block.get_type(), side, atlas));
                        }
                    }
                }
            }
        }

        mesh
    }

    /// Whether the face on `side` of the block at local `(x, y, z)` is exposed.
    pub fn is_face_visible(chunk: &Chunk, x: i32, y: i32, z: i32, side: BlockSide) -> bool {
        let n = side.normal();
        match chunk.get_block_at(x + n.x, y + n.y, z + n.z) {
            Some(neighbor) => neighbor.is_empty(),
            None => true,
        }
    }

    /// Appends one quad to the buffers.
    fn push_face(&mut self, face: &Face) {
        for (corner, uv) in face.corners.iter().zip(face.tex_coords.iter()) {
            self.positions.extend_from_slice(&[corner.x, corner.y, corner.z]);
            self.tex_coords.extend_from_slice(uv);
        }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertex_count() / VERTICES_PER_FACE
    }

    /// Whether the mesh holds no geometry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The mesh as interleaved `(x, y, z, u, v)` vertices.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .chunks_exact(3)
            .zip(self.tex_coords.chunks_exact(2))
            .map(|(p, t)| Vertex::new([p[0], p[1], p[2]], [t[0], t[1]]))
            .collect()
    }

    /// The interleaved vertices as raw bytes, ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }
}

impl Chunk {
    /// Rebuilds this chunk's mesh from its current blocks, replacing the old one.
    pub fn generate_mesh(&mut self, atlas: &AtlasLayout) {
        self.mesh = ChunkMesh::build(self, atlas);
    }
}

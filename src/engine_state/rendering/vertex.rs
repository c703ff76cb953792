//! Vertex data structures for uploading chunk meshes.
//!
//! The mesh keeps positions and texture coordinates in two parallel buffers;
//! renderers that prefer a single interleaved buffer can use `Vertex`.

/// An interleaved mesh vertex.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 20 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Atlas texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Vertex {
            position,
            tex_coords,
        }
    }

    /// Byte stride between consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

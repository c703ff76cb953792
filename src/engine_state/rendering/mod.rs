//! Rendering-side data for the voxel engine.
//!
//! The engine does not draw anything itself. This module produces what a
//! renderer consumes: per-chunk quad meshes, texture atlas coordinates and an
//! interleaved vertex format for buffer uploads.

pub mod meshing;
pub mod texture;
pub mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;

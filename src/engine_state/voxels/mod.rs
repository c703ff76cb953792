//! # Voxel World
//!
//! This module contains the voxel data model and everything that produces or
//! stores it.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Defines block types, faces and the per-voxel record
//! * **Chunk**: Dense 16x256x16 columns of blocks and their terrain generation
//! * **Noise**: The seeded gradient noise field terrain is sampled from
//! * **Persistence**: The on-disk world directory and chunk records
//! * **World**: Owns resident chunks and applies streaming and edits
//!
//! ## Data Flow
//!
//! 1. The world computes which chunks must be resident around the focus
//! 2. Missing chunks are loaded from disk, or generated and saved
//! 3. Each new or edited chunk rebuilds its mesh
//! 4. Edits are saved immediately and remesh any bordering chunks

pub mod block;
pub mod chunk;
pub mod noise;
pub mod persistence;
pub mod world;

//! # World Module
//!
//! This module provides the `WorldManager`, which owns every resident chunk
//! and is the only place the chunk map is mutated.
//!
//! ## Residency
//!
//! A chunk becomes resident when it enters the square of radius
//! `render_distance` around the focus chunk, or when it is part of the
//! initial spawn grid. It is read from disk if a record exists and generated
//! from the world seed otherwise; freshly generated chunks are written out
//! immediately. Chunks that leave the square are dropped without saving, since
//! every edit is persisted as it happens.
//!
//! ## Failure handling
//!
//! Only [`WorldManager::create`] and [`WorldManager::open`] return errors.
//! Everything else logs the failure and carries on: an unreadable chunk is
//! regenerated, a failed save leaves the in-memory chunk authoritative, and an
//! edit outside resident chunks does nothing.

use std::collections::{hash_map, HashMap, HashSet};

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::{error::PersistenceError, rendering::texture::AtlasLayout};

use super::{
    block::{block_side::BlockSide, block_type::BlockType},
    chunk::{Chunk, ChunkCoord},
    noise::NoiseField,
    persistence::WorldStorage,
};

/// Distance between successive samples of a block targeting ray.
pub const RAY_STEP: f32 = 0.1;
/// Default reach of a block targeting ray.
pub const REACH: f32 = 5.0;

/// Result of [`WorldManager::raycast`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaycastHit {
    /// The first non-air voxel along the ray.
    pub block: Point3<i32>,
    /// Material of `block`.
    pub block_type: BlockType,
    /// The last sample that fell in an empty voxel before the hit, or the ray
    /// origin if there was none.
    pub previous: Point3<f32>,
}

impl RaycastHit {
    /// The voxel a new block would be placed into.
    pub fn placement(&self) -> Point3<i32> {
        voxel_position(self.previous)
    }
}

/// Rounds a continuous world position to the voxel containing it.
pub fn voxel_position(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.round() as i32,
        position.y.round() as i32,
        position.z.round() as i32,
    )
}

/// The chunks, other than the owner, that hold a cardinal neighbor of `block`.
pub fn neighbor_chunks(block: Point3<i32>) -> Vec<ChunkCoord> {
    let owner = ChunkCoord::from_block(block.x, block.z);
    let mut neighbors = Vec::new();
    for side in BlockSide::all() {
        let n = block + side.normal();
        let coord = ChunkCoord::from_block(n.x, n.z);
        if coord != owner && !neighbors.contains(&coord) {
            neighbors.push(coord);
        }
    }
    neighbors
}

/// Every chunk coordinate in the square of `radius` around `center`.
fn square_around(center: ChunkCoord, radius: i32) -> impl Iterator<Item = ChunkCoord> {
    let radius = radius.max(0);
    (-radius..=radius).flat_map(move |dx| (-radius..=radius).map(move |dz| center.offset(dx, dz)))
}

/// Owns the resident chunks of one world together with its seed and storage.
pub struct WorldManager {
    chunks: HashMap<ChunkCoord, Chunk>,
    noise: NoiseField,
    storage: WorldStorage,
    atlas: AtlasLayout,
}

impl WorldManager {
    /// Creates a new world on disk and returns a manager for it.
    ///
    /// An existing `world.info` in the same directory is overwritten; saved
    /// chunks are left in place.
    pub fn create(
        storage: WorldStorage,
        seed: i64,
        atlas: AtlasLayout,
    ) -> Result<Self, PersistenceError> {
        storage.create(seed)?;
        log::info!(
            "Created world '{}' with seed {} at {}",
            storage.name(),
            seed,
            storage.world_dir().display()
        );
        Ok(Self::with_seed(storage, seed, atlas))
    }

    /// Opens an existing world, reading its seed from `world.info`.
    ///
    /// # Errors
    /// [`PersistenceError::WorldNotFound`] if the world directory is missing.
    pub fn open(storage: WorldStorage, atlas: AtlasLayout) -> Result<Self, PersistenceError> {
        let seed = storage.read_world_info()?;
        log::info!("Opened world '{}' with seed {}", storage.name(), seed);
        Ok(Self::with_seed(storage, seed, atlas))
    }

    fn with_seed(storage: WorldStorage, seed: i64, atlas: AtlasLayout) -> Self {
        WorldManager {
            chunks: HashMap::new(),
            noise: NoiseField::new(seed),
            storage,
            atlas,
        }
    }

    /// The generation seed.
    pub fn seed(&self) -> i64 {
        self.noise.seed()
    }

    /// The world's name.
    pub fn name(&self) -> &str {
        self.storage.name()
    }

    /// The storage backing this world.
    pub fn storage(&self) -> &WorldStorage {
        &self.storage
    }

    /// The resident chunk at `coord`, if any.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// All resident chunks, in no particular order.
    pub fn chunks(&self) -> hash_map::Values<'_, ChunkCoord, Chunk> {
        self.chunks.values()
    }

    /// Number of resident chunks.
    pub fn resident_count(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the chunk at `coord` is resident.
    pub fn is_resident(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Makes the square of chunks around `focus` resident and evicts the rest.
    ///
    /// Missing chunks are loaded from disk or generated. All insertions happen
    /// before any eviction.
    pub fn update_visible_chunks(&mut self, focus: Point3<f32>, radius: i32) {
        let center = ChunkCoord::from_world(focus);
        let required: HashSet<ChunkCoord> = square_around(center, radius).collect();

        for &coord in &required {
            self.ensure_chunk(coord);
        }

        let before = self.chunks.len();
        self.chunks.retain(|coord, _| required.contains(coord));
        let evicted = before - self.chunks.len();
        if evicted > 0 {
            log::debug!("Evicted {} chunks outside radius {} of {:?}", evicted, radius, center);
        }
    }

    /// Makes every chunk in the square of `radius` around the world origin resident.
    pub fn generate_chunk_grid(&mut self, radius: i32) {
        for coord in square_around(ChunkCoord::new(0, 0), radius) {
            self.ensure_chunk(coord);
        }
        log::info!("Spawn grid ready, {} chunks resident", self.chunks.len());
    }

    /// Loads and meshes every chunk saved in the world directory.
    ///
    /// # Returns
    /// The number of chunks that became resident.
    pub fn preload_saved_chunks(&mut self) -> usize {
        let coords = match self.storage.saved_chunk_coords() {
            Ok(coords) => coords,
            Err(e) => {
                log::error!("Could not list saved chunks of '{}': {}", self.name(), e);
                return 0;
            }
        };

        let mut loaded = 0;
        for coord in coords {
            if self.chunks.contains_key(&coord) {
                continue;
            }
            match self.storage.load_chunk(coord) {
                Ok(Some(mut chunk)) => {
                    chunk.generate_mesh(&self.atlas);
                    self.chunks.insert(coord, chunk);
                    loaded += 1;
                }
                Ok(None) => {}
                Err(e) => log::warn!("Skipping saved chunk {:?}: {}", coord, e),
            }
        }
        log::info!("Preloaded {} saved chunks", loaded);
        loaded
    }

    /// Makes the chunk at `coord` resident if it is not already.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) {
        if self.chunks.contains_key(&coord) {
            return;
        }
        let chunk = self.load_or_generate(coord);
        self.chunks.insert(coord, chunk);
    }

    fn load_or_generate(&self, coord: ChunkCoord) -> Chunk {
        match self.storage.load_chunk(coord) {
            Ok(Some(mut chunk)) => {
                log::debug!("Loaded chunk {:?}", coord);
                chunk.generate_mesh(&self.atlas);
                return chunk;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Could not load chunk {:?}, regenerating: {}", coord, e),
        }

        let mut chunk = Chunk::generated(coord, &self.noise);
        chunk.generate_mesh(&self.atlas);
        log::debug!("Generated chunk {:?}", coord);
        if let Err(e) = self.storage.save_chunk(&chunk) {
            log::error!("Could not save chunk {:?}: {}", coord, e);
        }
        chunk
    }

    /// Sets the voxel nearest to `position` to `block_type`.
    ///
    /// The owning chunk is remeshed and saved, and every resident chunk holding
    /// a cardinal neighbor of the voxel is remeshed too.
    ///
    /// # Returns
    /// `false`, leaving the world untouched, if the owning chunk is not
    /// resident or the voxel lies outside the chunk's height range.
    pub fn place_block(&mut self, position: Point3<f32>, block_type: BlockType) -> bool {
        let block = voxel_position(position);
        let coord = ChunkCoord::from_block(block.x, block.z);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return false;
        };

        let local = coord.to_local(block);
        if !chunk.set_block_at(local.x, local.y, local.z, block_type) {
            return false;
        }
        chunk.generate_mesh(&self.atlas);
        if let Err(e) = self.storage.save_chunk(chunk) {
            log::error!("Could not save chunk {:?} after edit: {}", coord, e);
        }

        for neighbor in neighbor_chunks(block) {
            self.remesh_chunk(neighbor);
        }
        true
    }

    /// Clears the voxel nearest to `position`. Same rules as [`Self::place_block`].
    pub fn break_block(&mut self, position: Point3<f32>) -> bool {
        self.place_block(position, BlockType::AIR)
    }

    /// Rebuilds the mesh of the resident chunk at `coord`.
    ///
    /// # Returns
    /// `false` if the chunk is not resident.
    pub fn remesh_chunk(&mut self, coord: ChunkCoord) -> bool {
        match self.chunks.get_mut(&coord) {
            Some(chunk) => {
                chunk.generate_mesh(&self.atlas);
                true
            }
            None => false,
        }
    }

    /// The material of the voxel nearest to `position`.
    ///
    /// # Returns
    /// `None` if the owning chunk is not resident or the voxel is out of bounds.
    pub fn get_block(&self, position: Point3<f32>) -> Option<BlockType> {
        self.block_at(voxel_position(position))
    }

    /// The material of the voxel at integer world position `block`.
    pub fn block_at(&self, block: Point3<i32>) -> Option<BlockType> {
        let coord = ChunkCoord::from_block(block.x, block.z);
        let local = coord.to_local(block);
        self.chunks.get(&coord)?.get_type_at(local.x, local.y, local.z)
    }

    /// Marches from `origin` along `direction` in steps of [`RAY_STEP`] and
    /// reports the first non-air voxel within `max_distance`.
    ///
    /// Samples outside resident chunks are skipped. A zero direction never hits.
    pub fn raycast(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RaycastHit> {
        if direction.magnitude2() == 0.0 {
            return None;
        }
        let direction = direction.normalize();
        let steps = (max_distance / RAY_STEP + 1e-3).floor() as i32;

        let mut previous = origin;
        for i in 1..=steps {
            let sample = origin + direction * (RAY_STEP * i as f32);
            let block = voxel_position(sample);
            match self.block_at(block) {
                None => continue,
                Some(block_type) if block_type.is_empty() => previous = sample,
                Some(block_type) => {
                    return Some(RaycastHit {
                        block,
                        block_type,
                        previous,
                    });
                }
            }
        }
        None
    }
}

//! # Chunk Generation Module
//!
//! Turns noise samples into layered terrain.
//!
//! Every column of a chunk is generated independently from its global (x, z):
//! a low-frequency biome sample scales the column's base height and relief, a
//! fractal sum of octaves picks the surface height, and a higher-frequency sand
//! sample decides whether a beach column gets sand. Each block of the column is
//! then classified into a material band.

use crate::engine_state::voxels::{block::block_type::BlockType, noise::NoiseField};

use super::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};

/// Frequency of the first terrain octave.
pub const BASE_FREQUENCY: f32 = 0.01;
/// Nominal surface height before biome scaling.
pub const BASE_HEIGHT: i32 = 128;
/// Nominal relief before biome scaling.
pub const AMPLITUDE: i32 = 200;
/// Number of octaves in the terrain fractal sum.
pub const OCTAVES: u32 = 5;
/// Amplitude multiplier between successive octaves.
pub const PERSISTENCE: f32 = 0.5;
/// Frequency of the biome noise.
pub const BIOME_FREQUENCY: f32 = 0.001;
/// Highest y filled with water above the terrain.
pub const WATER_LEVEL: i32 = 110;
/// Half-height of the beach band around the water level.
pub const BEACH_RANGE: i32 = 2;
/// Frequency of the per-column sand noise.
pub const SAND_FREQUENCY: f32 = 0.05;
/// Sand noise above this value turns a beach column into sand.
pub const SAND_THRESHOLD: f32 = 0.4;
/// Every y below this value is bedrock. Also the lowest allowed surface height.
pub const BEDROCK_LEVEL: i32 = 5;
/// Depth of the soil layer below the surface block.
pub const SUBSURFACE_DEPTH: i32 = 3;

/// The per-column terrain parameters derived from noise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TerrainColumn {
    /// Height of the topmost terrain block, in `[BEDROCK_LEVEL, CHUNK_HEIGHT - 1]`.
    pub surface_height: i32,
    /// Sand noise normalized to `[0, 1]`.
    pub sand_noise: f32,
}

impl TerrainColumn {
    /// Samples the column at global block coordinates `(gx, gz)`.
    pub fn sample(noise: &NoiseField, gx: i32, gz: i32) -> Self {
        let (x, z) = (gx as f32, gz as f32);

        let biome = normalize(noise.get_noise(x * BIOME_FREQUENCY, 0.0, z * BIOME_FREQUENCY));
        let local_base_height = (BASE_HEIGHT as f32 * (0.7 + 0.3 * biome)) as i32;
        let local_amplitude = (AMPLITUDE as f32 * (0.1 + 0.9 * biome)) as i32;

        let mut total = 0.0;
        let mut max_amplitude = 0.0;
        let mut frequency = BASE_FREQUENCY;
        let mut amplitude = 1.0;
        for _ in 0..OCTAVES {
            total += noise.get_noise(x * frequency, 0.0, z * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= PERSISTENCE;
            frequency *= 2.0;
        }
        total /= max_amplitude;

        let surface_height = (local_base_height + (total * local_amplitude as f32) as i32)
            .clamp(BEDROCK_LEVEL, CHUNK_HEIGHT - 1);

        let sand_noise = normalize(noise.get_noise(x * SAND_FREQUENCY, 0.0, z * SAND_FREQUENCY));

        TerrainColumn {
            surface_height,
            sand_noise,
        }
    }

    fn is_sandy(&self) -> bool {
        self.sand_noise > SAND_THRESHOLD
    }

    /// Classifies the block at height `y` of this column.
    ///
    /// Bands are checked top-down and the first match wins. The bedrock floor
    /// is checked before the soil layer so that `y < BEDROCK_LEVEL` is always
    /// bedrock, even for columns clamped to the lowest surface height.
    pub fn block_at(&self, y: i32) -> BlockType {
        let surface = self.surface_height;
        let beach = (WATER_LEVEL - BEACH_RANGE)..=(WATER_LEVEL + BEACH_RANGE);

        if y > surface {
            if y <= WATER_LEVEL {
                BlockType::WATER
            } else {
                BlockType::AIR
            }
        } else if y == surface {
            if beach.contains(&y) {
                if self.is_sandy() {
                    BlockType::SAND
                } else if y < WATER_LEVEL {
                    BlockType::DIRT
                } else {
                    BlockType::GRASS
                }
            } else if y < WATER_LEVEL {
                BlockType::SAND
            } else {
                BlockType::GRASS
            }
        } else if y < BEDROCK_LEVEL {
            BlockType::BEDROCK
        } else if y >= surface - SUBSURFACE_DEPTH {
            if surface <= WATER_LEVEL + BEACH_RANGE && self.is_sandy() {
                BlockType::SAND
            } else {
                BlockType::DIRT
            }
        } else {
            BlockType::STONE
        }
    }
}

/// Maps a noise value from `[-1, 1]` to `[0, 1]`.
fn normalize(value: f32) -> f32 {
    (value + 1.0) / 2.0
}

impl Chunk {
    /// Fills the whole chunk with terrain sampled from `noise`.
    ///
    /// Every block is overwritten; the mesh is left untouched and must be
    /// rebuilt by the caller.
    pub fn generate(&mut self, noise: &NoiseField) {
        let origin = self.coord.origin();
        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let column = TerrainColumn::sample(noise, origin.x + x, origin.z + z);
                for y in 0..CHUNK_HEIGHT {
                    self.set_block_at(x, y, z, column.block_at(y));
                }
            }
        }
    }

    /// Creates and generates the chunk at `coord`.
    pub fn generated(coord: super::ChunkCoord, noise: &NoiseField) -> Self {
        let mut chunk = Chunk::new(coord);
        chunk.generate(noise);
        chunk
    }
}

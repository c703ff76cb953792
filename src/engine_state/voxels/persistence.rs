//! # Persistence Module
//!
//! Reads and writes a world directory:
//!
//! ```text
//! <root>/<world name>/world.info               "seed <integer>"
//! <root>/<world name>/chunks/chunk_<x>_<z>.dat raw chunk record
//! ```
//!
//! A chunk record is exactly `CHUNK_VOLUME` little-endian `i32` block type
//! ordinals in the chunk's (x, z, y) storage order, with no header, version or
//! compression.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::engine_state::error::PersistenceError;

use super::{
    block::block_type::BlockType,
    chunk::{Chunk, ChunkCoord, CHUNK_VOLUME},
};

/// Name of the world metadata file.
pub const WORLD_INFO_FILE: &str = "world.info";
/// Name of the directory holding chunk records.
pub const CHUNKS_DIR: &str = "chunks";
/// Width in bytes of one block entry in a chunk record.
pub const BLOCK_RECORD_WIDTH: usize = std::mem::size_of::<i32>();
/// Size in bytes of a complete chunk record.
pub const CHUNK_RECORD_SIZE: usize = CHUNK_VOLUME * BLOCK_RECORD_WIDTH;

/// Handle on one world's directory.
#[derive(Clone, Debug)]
pub struct WorldStorage {
    name: String,
    world_dir: PathBuf,
    strict: bool,
}

impl WorldStorage {
    /// Creates a handle for world `name` under `root`. Nothing is touched on disk.
    ///
    /// With `strict` set, truncated records and unknown ordinals are errors
    /// instead of being filled with air.
    pub fn new(root: &Path, name: &str, strict: bool) -> Self {
        WorldStorage {
            name: name.to_owned(),
            world_dir: root.join(name),
            strict,
        }
    }

    /// The world's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The world's directory.
    pub fn world_dir(&self) -> &Path {
        &self.world_dir
    }

    /// Whether the world directory exists.
    pub fn exists(&self) -> bool {
        self.world_dir.is_dir()
    }

    /// Creates the directory layout and writes `world.info`.
    pub fn create(&self, seed: i64) -> Result<(), PersistenceError> {
        fs::create_dir_all(self.world_dir.join(CHUNKS_DIR))?;
        self.write_world_info(seed)
    }

    /// Writes `world.info` for `seed`.
    pub fn write_world_info(&self, seed: i64) -> Result<(), PersistenceError> {
        fs::write(self.world_dir.join(WORLD_INFO_FILE), format!("seed {}\n", seed))?;
        Ok(())
    }

    /// Reads the seed from `world.info`.
    pub fn read_world_info(&self) -> Result<i64, PersistenceError> {
        if !self.exists() {
            return Err(PersistenceError::WorldNotFound(self.name.clone()));
        }

        let path = self.world_dir.join(WORLD_INFO_FILE);
        let contents = fs::read_to_string(&path)?;
        let malformed = |reason: &str| PersistenceError::MalformedWorldInfo {
            path: path.clone(),
            reason: reason.to_owned(),
        };

        let mut tokens = contents.split_whitespace();
        match tokens.next() {
            Some("seed") => {}
            _ => return Err(malformed("missing 'seed' token")),
        }
        tokens
            .next()
            .ok_or_else(|| malformed("missing seed value"))?
            .parse::<i64>()
            .map_err(|e| malformed(&e.to_string()))
    }

    /// Path of the record for the chunk at `coord`.
    pub fn chunk_path(&self, coord: ChunkCoord) -> PathBuf {
        self.world_dir
            .join(CHUNKS_DIR)
            .join(format!("chunk_{}_{}.dat", coord.x, coord.z))
    }

    /// Writes the chunk record, replacing any previous one.
    pub fn save_chunk(&self, chunk: &Chunk) -> Result<(), PersistenceError> {
        let mut bytes = Vec::with_capacity(CHUNK_RECORD_SIZE);
        for block in chunk.blocks() {
            bytes.extend_from_slice(&block.get_type().ordinal().to_le_bytes());
        }

        fs::create_dir_all(self.world_dir.join(CHUNKS_DIR))?;
        fs::write(self.chunk_path(chunk.coord), bytes)?;
        Ok(())
    }

    /// Reads the chunk at `coord` from disk.
    ///
    /// The returned chunk has its blocks filled but no mesh.
    ///
    /// # Returns
    /// `Ok(None)` if no record exists for `coord`.
    pub fn load_chunk(&self, coord: ChunkCoord) -> Result<Option<Chunk>, PersistenceError> {
        let path = self.chunk_path(coord);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if bytes.len() < CHUNK_RECORD_SIZE {
            if self.strict {
                return Err(PersistenceError::TruncatedChunk {
                    path,
                    expected: CHUNK_RECORD_SIZE,
                    found: bytes.len(),
                });
            }
            log::warn!(
                "Chunk record {} is truncated ({} of {} bytes), filling the rest with air",
                path.display(),
                bytes.len(),
                CHUNK_RECORD_SIZE
            );
        }

        let mut types = Vec::with_capacity(CHUNK_VOLUME);
        let mut unknown = 0;
        for entry in bytes.chunks_exact(BLOCK_RECORD_WIDTH).take(CHUNK_VOLUME) {
            let ordinal = i32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]);
            match BlockType::from_ordinal(ordinal) {
                Some(block_type) => types.push(block_type),
                None if self.strict => {
                    return Err(PersistenceError::UnknownBlockType { path, ordinal });
                }
                None => {
                    unknown += 1;
                    types.push(BlockType::AIR);
                }
            }
        }
        if unknown > 0 {
            log::warn!(
                "Chunk record {} holds {} unknown block ordinals, replaced with air",
                path.display(),
                unknown
            );
        }

        let mut chunk = Chunk::new(coord);
        chunk.fill_from_types(types);
        Ok(Some(chunk))
    }

    /// Coordinates of every chunk record in the world directory.
    ///
    /// Files whose names do not follow `chunk_<x>_<z>.dat` are skipped.
    pub fn saved_chunk_coords(&self) -> Result<Vec<ChunkCoord>, PersistenceError> {
        let dir = self.world_dir.join(CHUNKS_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut coords = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            match entry.file_name().to_str().and_then(parse_chunk_file_name) {
                Some(coord) => coords.push(coord),
                None => log::debug!("Skipping unrecognized file {:?}", entry.path()),
            }
        }
        coords.sort();
        Ok(coords)
    }
}

/// Parses `chunk_<x>_<z>.dat` into a coordinate.
pub fn parse_chunk_file_name(name: &str) -> Option<ChunkCoord> {
    let stem = name.strip_prefix("chunk_")?.strip_suffix(".dat")?;
    // The x coordinate may be negative, so split at the separator before z.
    let split = stem.char_indices().skip(1).find(|(_, c)| *c == '_')?.0;
    let x = stem[..split].parse().ok()?;
    let z = stem[split + 1..].parse().ok()?;
    Some(ChunkCoord::new(x, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::noise::NoiseField;

    struct TempWorld {
        root: PathBuf,
    }

    impl TempWorld {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("voxel_world_persistence_{}", fastrand::u64(..)));
            TempWorld { root }
        }

        fn storage(&self, strict: bool) -> WorldStorage {
            WorldStorage::new(&self.root, "test_world", strict)
        }
    }

    impl Drop for TempWorld {
        fn drop(&mut self) {
            fs::remove_dir_all(&self.root).ok();
        }
    }

    #[test]
    fn world_info_round_trip() {
        let tmp = TempWorld::new();
        let storage = tmp.storage(false);
        storage.create(-12345).unwrap();

        let text = fs::read_to_string(storage.world_dir().join(WORLD_INFO_FILE)).unwrap();
        assert_eq!(text, "seed -12345\n");
        assert_eq!(storage.read_world_info().unwrap(), -12345);
        assert!(storage.world_dir().join(CHUNKS_DIR).is_dir());
    }

    #[test]
    fn missing_world_is_reported() {
        let tmp = TempWorld::new();
        assert!(matches!(
            tmp.storage(false).read_world_info(),
            Err(PersistenceError::WorldNotFound(_))
        ));
    }

    #[test]
    fn malformed_world_info_is_rejected() {
        let tmp = TempWorld::new();
        let storage = tmp.storage(false);
        storage.create(1).unwrap();
        fs::write(storage.world_dir().join(WORLD_INFO_FILE), "sead 4").unwrap();
        assert!(matches!(
            storage.read_world_info(),
            Err(PersistenceError::MalformedWorldInfo { .. })
        ));
    }

    #[test]
    fn chunk_round_trip() {
        let tmp = TempWorld::new();
        let storage = tmp.storage(false);
        storage.create(1).unwrap();

        let coord = ChunkCoord::new(-3, 4);
        let mut chunk = Chunk::generated(coord, &NoiseField::new(1));
        chunk.set_block_at(7, 200, 7, BlockType::BRICKS);
        storage.save_chunk(&chunk).unwrap();

        let path = storage.chunk_path(coord);
        assert_eq!(path.file_name().unwrap(), "chunk_-3_4.dat");
        assert_eq!(fs::metadata(&path).unwrap().len() as usize, CHUNK_RECORD_SIZE);

        let loaded = storage.load_chunk(coord).unwrap().unwrap();
        assert_eq!(loaded.coord, coord);
        assert!(chunk.blocks().iter().zip(loaded.blocks()).all(|(a, b)| a == b));
    }

    #[test]
    fn record_layout_is_x_z_y_little_endian() {
        let tmp = TempWorld::new();
        let storage = tmp.storage(false);
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set_block_at(0, 1, 0, BlockType::STONE);
        chunk.set_block_at(0, 0, 1, BlockType::WATER);
        storage.save_chunk(&chunk).unwrap();

        let bytes = fs::read(storage.chunk_path(chunk.coord)).unwrap();
        let at = |i: usize| i32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
        assert_eq!(at(0), BlockType::AIR.ordinal());
        assert_eq!(at(1), BlockType::STONE.ordinal());
        assert_eq!(at(256), BlockType::WATER.ordinal());
    }

    #[test]
    fn missing_chunk_is_a_miss() {
        let tmp = TempWorld::new();
        let storage = tmp.storage(false);
        storage.create(1).unwrap();
        assert!(storage.load_chunk(ChunkCoord::new(9, 9)).unwrap().is_none());
    }

    #[test]
    fn truncated_chunk_is_filled_with_air_when_lenient() {
        let tmp = TempWorld::new();
        let storage = tmp.storage(false);
        storage.create(1).unwrap();

        let coord = ChunkCoord::new(0, 0);
        let mut bytes = Vec::new();
        for _ in 0..10 {
            bytes.extend_from_slice(&BlockType::STONE.ordinal().to_le_bytes());
        }
        fs::write(storage.chunk_path(coord), bytes).unwrap();

        let chunk = storage.load_chunk(coord).unwrap().unwrap();
        assert_eq!(chunk.solid_count(), 10);
        assert_eq!(chunk.get_type_at(0, 9, 0), Some(BlockType::STONE));
        assert_eq!(chunk.get_type_at(0, 10, 0), Some(BlockType::AIR));
    }

    #[test]
    fn truncated_chunk_is_an_error_when_strict() {
        let tmp = TempWorld::new();
        let storage = tmp.storage(true);
        storage.create(1).unwrap();

        let coord = ChunkCoord::new(2, 2);
        fs::write(storage.chunk_path(coord), [0u8; 12]).unwrap();
        assert!(matches!(
            storage.load_chunk(coord),
            Err(PersistenceError::TruncatedChunk { found: 12, .. })
        ));
    }

    #[test]
    fn unknown_ordinals_follow_validation_mode() {
        let tmp = TempWorld::new();
        let coord = ChunkCoord::new(1, 1);
        let lenient = tmp.storage(false);
        lenient.create(1).unwrap();

        lenient.save_chunk(&Chunk::filled(coord, BlockType::DIRT)).unwrap();
        let path = lenient.chunk_path(coord);
        let mut bytes = fs::read(&path).unwrap();
        bytes[..4].copy_from_slice(&99i32.to_le_bytes());
        fs::write(&path, bytes).unwrap();

        let loaded = lenient.load_chunk(coord).unwrap().unwrap();
        assert_eq!(loaded.get_type_at(0, 0, 0), Some(BlockType::AIR));
        assert_eq!(loaded.get_type_at(0, 1, 0), Some(BlockType::DIRT));

        assert!(matches!(
            tmp.storage(true).load_chunk(coord),
            Err(PersistenceError::UnknownBlockType { ordinal: 99, .. })
        ));
    }

    #[test]
    fn saved_chunks_are_listed() {
        let tmp = TempWorld::new();
        let storage = tmp.storage(false);
        storage.create(1).unwrap();
        for coord in [ChunkCoord::new(-1, -2), ChunkCoord::new(3, 0)] {
            storage.save_chunk(&Chunk::new(coord)).unwrap();
        }
        fs::write(storage.world_dir().join(CHUNKS_DIR).join("notes.txt"), "hi").unwrap();

        assert_eq!(
            storage.saved_chunk_coords().unwrap(),
            vec![ChunkCoord::new(-1, -2), ChunkCoord::new(3, 0)]
        );
    }

    #[test]
    fn chunk_file_names_parse() {
        assert_eq!(parse_chunk_file_name("chunk_0_0.dat"), Some(ChunkCoord::new(0, 0)));
        assert_eq!(parse_chunk_file_name("chunk_-12_7.dat"), Some(ChunkCoord::new(-12, 7)));
        assert_eq!(parse_chunk_file_name("chunk_5_-1.dat"), Some(ChunkCoord::new(5, -1)));
        assert_eq!(parse_chunk_file_name("chunk_-5_-1.dat"), Some(ChunkCoord::new(-5, -1)));
        assert_eq!(parse_chunk_file_name("chunk_a_1.dat"), None);
        assert_eq!(parse_chunk_file_name("chunk_1_1.bin"), None);
    }
}

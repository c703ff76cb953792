//! Engine configuration, read from a JSON file at startup.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::engine_state::{error::ConfigError, rendering::texture::DEFAULT_CELL_SIZE};

/// Default location of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Runtime settings for [`EngineState`](crate::engine_state::EngineState).
///
/// Every field is optional in the file; missing fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding all worlds.
    pub world_root: PathBuf,
    /// Name of the world directory under `world_root`.
    pub world_name: String,
    /// Generation seed for a newly created world.
    pub seed: i64,
    /// Open `world_name` instead of creating it.
    pub open_existing: bool,
    /// Radius, in chunks, of the square kept resident around the focus.
    pub render_distance: i32,
    /// Radius, in chunks, of the spawn grid generated at startup.
    pub initial_grid_radius: i32,
    /// Path of the texture atlas image.
    pub atlas_path: PathBuf,
    /// Edge length of one atlas cell in pixels.
    pub atlas_cell_size: u32,
    /// Reject truncated chunk records and unknown block ordinals instead of
    /// filling them with air.
    pub strict_chunk_validation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            world_root: PathBuf::from("worlds"),
            world_name: "default_world".to_owned(),
            seed: 1,
            open_existing: false,
            render_distance: 8,
            initial_grid_radius: 12,
            atlas_path: PathBuf::from("textures/textures.png"),
            atlas_cell_size: DEFAULT_CELL_SIZE,
            strict_chunk_validation: false,
        }
    }
}

impl EngineConfig {
    /// Reads the configuration at `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => Ok(serde_json::from_reader(BufReader::new(file))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the configuration to `path` as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }
}

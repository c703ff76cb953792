#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A block-based world engine: seeded procedural terrain, chunk streaming
//! around a moving focus point, face-culled chunk meshes for an external
//! renderer, and a simple binary on-disk world format.
//!
//! ## Key Modules
//!
//! * `engine_state` - The engine context plus its voxel, rendering and configuration layers
//!
//! ## Architecture
//!
//! The engine is a library with no window or GPU of its own:
//! * Voxel data management, terrain generation and persistence
//! * Mesh generation into plain position and texture coordinate buffers
//! * A single `EngineState` context owning the world, driven by the host
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_world::{EngineConfig, EngineState};
//!
//! let mut engine = EngineState::new(EngineConfig::default()).unwrap();
//! engine.update_focus(cgmath::Point3::new(0.0, 140.0, 0.0));
//! for (coord, mesh) in engine.chunk_meshes() {
//!     println!("{:?}: {} quads", coord, mesh.face_count());
//! }
//! ```

use log::{error, info};

pub mod engine_state;

pub use engine_state::{
    config::{EngineConfig, CONFIG_FILE_NAME},
    error::EngineError,
    BlockRequest, EngineState,
};

/// Initializes logging, loads `config.json` and builds the engine.
///
/// Exits the process with a non-zero status if the engine cannot start.
pub fn run() -> EngineState {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    match EngineConfig::load(CONFIG_FILE_NAME)
        .map_err(EngineError::from)
        .and_then(EngineState::new)
    {
        Ok(state) => {
            info!(
                "Engine initialized: world '{}', {} chunks resident",
                state.world.name(),
                state.world.resident_count()
            );
            state
        }
        Err(e) => {
            error!("Engine failed to start: {}", e);
            std::process::exit(1);
        }
    }
}

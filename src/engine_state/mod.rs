//! # Engine State Module
//!
//! The core engine module that owns the world and everything needed to keep
//! it up to date around a moving focus point.
//!
//! ## Key Components
//!
//! * `EngineState` - The context object owning config, atlas layout and world
//! * `config` - Runtime settings loaded from JSON
//! * `error` - Error types returned by engine construction
//! * `rendering` - Mesh generation and the renderer-facing buffer formats
//! * `voxels` - Voxel data, chunks, terrain generation and persistence
//!
//! ## Architecture
//!
//! Everything runs synchronously on the caller's thread. The host feeds the
//! engine a focus position every frame and discrete block requests from its
//! input layer, then hands the meshes returned by
//! [`EngineState::chunk_meshes`] to its renderer.

use cgmath::{Point3, Vector3};

use config::EngineConfig;
use error::EngineError;
use rendering::{meshing::ChunkMesh, texture::AtlasLayout};
use voxels::{
    block::block_type::BlockType,
    chunk::ChunkCoord,
    persistence::WorldStorage,
    world::{RaycastHit, WorldManager, REACH},
};

pub mod config;
pub mod error;
pub mod rendering;
pub mod voxels;

/// A discrete world edit coming from the input layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BlockRequest {
    /// Put `block_type` into the voxel nearest to `position`.
    Place {
        /// Target world position.
        position: Point3<f32>,
        /// Material to place.
        block_type: BlockType,
    },
    /// Clear the voxel nearest to `position`.
    Break {
        /// Target world position.
        position: Point3<f32>,
    },
}

/// The main state container for the voxel engine
///
/// Owns the world explicitly; there is no global state.
pub struct EngineState {
    /// Settings the engine was built with
    pub config: EngineConfig,
    /// Layout of the texture atlas used for all meshes
    pub atlas: AtlasLayout,
    /// The voxel world containing all resident chunks
    pub world: WorldManager,
    /// Current chunk of the focus point
    current_focus_chunk: Option<ChunkCoord>,
}

impl EngineState {
    /// Creates a new engine state
    ///
    /// Reads the texture atlas, creates or opens the configured world and
    /// makes the initial spawn grid resident.
    ///
    /// # Errors
    /// Fails if the atlas is missing or unreadable, or if the world cannot be
    /// created or opened.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let atlas = AtlasLayout::load(&config.atlas_path, config.atlas_cell_size)?;
        let storage = WorldStorage::new(
            &config.world_root,
            &config.world_name,
            config.strict_chunk_validation,
        );

        let mut world = if config.open_existing {
            let mut world = WorldManager::open(storage, atlas)?;
            world.preload_saved_chunks();
            world
        } else {
            WorldManager::create(storage, config.seed, atlas)?
        };
        world.generate_chunk_grid(config.initial_grid_radius);

        Ok(Self {
            config,
            atlas,
            world,
            current_focus_chunk: None,
        })
    }

    /// Moves the focus point, streaming chunks in and out as needed
    ///
    /// The resident set is only recomputed when the focus enters a new chunk.
    ///
    /// # Returns
    /// `true` if the resident set was updated.
    pub fn update_focus(&mut self, focus: Point3<f32>) -> bool {
        let chunk = ChunkCoord::from_world(focus);
        if self.current_focus_chunk == Some(chunk) {
            return false;
        }

        log::debug!("Focus entered chunk {:?}", chunk);
        self.world
            .update_visible_chunks(focus, self.config.render_distance);
        self.current_focus_chunk = Some(chunk);
        true
    }

    /// Applies a block request to the world.
    ///
    /// # Returns
    /// `true` if a voxel was changed.
    pub fn handle_block_request(&mut self, request: BlockRequest) -> bool {
        match request {
            BlockRequest::Place {
                position,
                block_type,
            } => self.world.place_block(position, block_type),
            BlockRequest::Break { position } => self.world.break_block(position),
        }
    }

    /// The block an observer at `origin` looking along `direction` is pointing at
    pub fn target_block(&self, origin: Point3<f32>, direction: Vector3<f32>) -> Option<RaycastHit> {
        self.world.raycast(origin, direction, REACH)
    }

    /// The mesh of every resident chunk, for the renderer
    pub fn chunk_meshes(&self) -> impl Iterator<Item = (ChunkCoord, &ChunkMesh)> {
        self.world.chunks().map(|chunk| (chunk.coord, &chunk.mesh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};

    use error::AssetError;

    struct TempRoot(PathBuf);

    impl TempRoot {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("voxel_engine_state_{}", fastrand::u64(..)));
            fs::create_dir_all(&root).unwrap();
            TempRoot(root)
        }

        fn config(&self) -> EngineConfig {
            let atlas_path = self.0.join("atlas.png");
            image::RgbaImage::new(96, 208).save(&atlas_path).unwrap();
            EngineConfig {
                world_root: self.0.join("worlds"),
                world_name: "engine_test".to_owned(),
                render_distance: 1,
                initial_grid_radius: 0,
                atlas_path,
                ..EngineConfig::default()
            }
        }
    }

    impl Drop for TempRoot {
        fn drop(&mut self) {
            fs::remove_dir_all(&self.0).ok();
        }
    }

    #[test]
    fn missing_atlas_is_fatal() {
        let root = TempRoot::new();
        let config = EngineConfig {
            atlas_path: root.0.join("nope.png"),
            ..root.config()
        };
        assert!(matches!(
            EngineState::new(config),
            Err(EngineError::Asset(AssetError::Missing(_)))
        ));
    }

    #[test]
    fn opening_missing_world_is_fatal() {
        let root = TempRoot::new();
        let config = EngineConfig {
            open_existing: true,
            ..root.config()
        };
        assert!(matches!(EngineState::new(config), Err(EngineError::Persistence(_))));
    }

    #[test]
    fn startup_generates_spawn_grid() {
        let root = TempRoot::new();
        let engine = EngineState::new(root.config()).unwrap();
        assert_eq!(engine.world.resident_count(), 1);
        assert_eq!(engine.world.seed(), 1);
        assert_eq!(engine.atlas, AtlasLayout::new(96, 208, 16));
    }

    #[test]
    fn focus_updates_only_on_chunk_change() {
        let root = TempRoot::new();
        let mut engine = EngineState::new(root.config()).unwrap();

        assert!(engine.update_focus(Point3::new(1.0, 100.0, 1.0)));
        assert_eq!(engine.chunk_meshes().count(), 9);
        assert!(!engine.update_focus(Point3::new(9.0, 120.0, 14.0)));
        assert!(engine.update_focus(Point3::new(17.0, 100.0, 1.0)));
        assert_eq!(engine.chunk_meshes().count(), 9);
        assert!(engine.chunk_meshes().all(|(coord, _)| coord.x >= 0));
    }

    #[test]
    fn block_requests_edit_the_world() {
        let root = TempRoot::new();
        let mut engine = EngineState::new(root.config()).unwrap();
        let position = Point3::new(4.0, 240.0, 4.0);

        assert!(engine.handle_block_request(BlockRequest::Place {
            position,
            block_type: BlockType::COBBLESTONE,
        }));
        assert_eq!(engine.world.get_block(position), Some(BlockType::COBBLESTONE));

        let hit = engine
            .target_block(Point3::new(4.0, 243.0, 4.0), Vector3::new(0.0, -1.0, 0.0))
            .unwrap();
        assert_eq!(hit.block, Point3::new(4, 240, 4));
        assert_eq!(hit.placement(), Point3::new(4, 241, 4));

        assert!(engine.handle_block_request(BlockRequest::Break { position }));
        assert_eq!(engine.world.get_block(position), Some(BlockType::AIR));
        assert!(!engine.handle_block_request(BlockRequest::Break {
            position: Point3::new(500.0, 10.0, 500.0),
        }));
    }

    #[test]
    fn reopened_world_keeps_edits() {
        let root = TempRoot::new();
        let position = Point3::new(2.0, 200.0, 3.0);
        {
            let mut engine = EngineState::new(root.config()).unwrap();
            engine.handle_block_request(BlockRequest::Place {
                position,
                block_type: BlockType::LEAVES,
            });
        }

        let config = EngineConfig {
            open_existing: true,
            seed: 99,
            ..root.config()
        };
        let engine = EngineState::new(config).unwrap();
        assert_eq!(engine.world.seed(), 1);
        assert_eq!(engine.world.get_block(position), Some(BlockType::LEAVES));
    }
}

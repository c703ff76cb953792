//! # Voxel World Entry Point
//!
//! Builds the engine from `config.json` in the working directory, streams in
//! the chunks around the spawn point and reports what is resident.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

use cgmath::Point3;

fn main() {
    let mut engine = voxel_world::run();
    engine.update_focus(Point3::new(0.0, 140.0, 0.0));

    let quads: usize = engine.chunk_meshes().map(|(_, mesh)| mesh.face_count()).sum();
    log::info!(
        "{} chunks resident, {} quads ready for the renderer",
        engine.chunk_meshes().count(),
        quads
    );
}

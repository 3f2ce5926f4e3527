//! # Chunk Mesher
//!
//! A Rust library for turning voxel chunks into compact, face-culled
//! triangle meshes.
//!
//! ## Overview
//!
//! A [`Chunk`] is a dense 16x256x16 grid of [`BlockType`]s. The mesher sweeps
//! each of the six face directions slice by slice, hides faces that touch an
//! opaque neighbor (looking across chunk borders through a [`VoxelSource`]),
//! and merges what is left into maximal same-block rectangles. The result is
//! a [`ChunkGeometry`] with flat position, normal, UV, color and index
//! buffers ready for GPU upload.
//!
//! ## Quick Start
//!
//! ```
//! use chunk_mesher::{BlockType, Chunk, ChunkFill, ChunkMesher, ChunkPos, NoNeighbors};
//!
//! let mut chunk = Chunk::new(ChunkPos::new(0, 0));
//! chunk.fill(&ChunkFill::new([0, 0, 0], [15, 0, 15], BlockType::Stone))?;
//!
//! let mesher = ChunkMesher::default();
//! let geometry = mesher.mesh_chunk(&chunk, &NoNeighbors);
//! assert_eq!(geometry.quad_count(), 6);
//! # Ok::<(), chunk_mesher::MesherError>(())
//! ```
//!
//! ## Frame-budgeted meshing
//!
//! [`ChunkMesher::task`] returns a [`MeshTask`] that does a bounded amount of
//! work per [`MeshTask::step`], so a render loop can spread one chunk over
//! several frames. The task is also a [`Future`](std::future::Future) and can
//! be awaited on any executor.

pub mod atlas;
pub mod chunk;
pub mod error;
pub mod export;
pub mod mesh_output;
pub mod mesher;
pub mod types;
pub mod world;

// Re-export main types for convenience
pub use atlas::{AtlasRegion, BlockTiles, TextureAtlas, TileAtlas};
pub use chunk::{Chunk, ChunkDescription, ChunkFill};
pub use error::{MesherError, Result};
pub use export::gltf::export_glb;
pub use export::obj::{export_obj, ObjExport};
pub use mesh_output::ChunkGeometry;
pub use mesher::{ChunkMesher, MeshTask, MesherConfig, TaskProgress, TaskStep};
pub use types::{
    BlockPosition, BlockType, BoundingBox, BoundingSphere, ChunkPos, Direction, CHUNK_HEIGHT,
    CHUNK_SIZE,
};
pub use world::{neighbor_block, ChunkMap, NeighborBlock, NoNeighbors, VoxelSource};

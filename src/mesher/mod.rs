//! Greedy mesh generation for chunks.
//!
//! This module converts a chunk's voxels into merged, face-culled quads:
//! per direction and per slice it builds a visibility mask, merges the mask
//! into rectangles and appends them to the output buffers.

pub mod emitter;
pub mod greedy;
pub mod mask;
pub mod task;
pub mod visibility;

pub use emitter::MeshBuffers;
pub use greedy::{merge_slice, merge_slice_into, MergedQuad};
pub use mask::{MaskEntry, SliceMask};
pub use task::{MeshTask, TaskProgress, TaskStep};
pub use visibility::{face_visible, should_render_face};

use crate::atlas::{TextureAtlas, TileAtlas};
use crate::chunk::Chunk;
use crate::error::{MesherError, Result};
use crate::mesh_output::ChunkGeometry;
use crate::world::VoxelSource;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main mesher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    /// Mask cells processed between cooperative yields.
    pub yield_budget: usize,
    /// Initial vertex capacity of the output buffers.
    pub vertex_capacity: usize,
    /// Emit faces whose neighbor is above or below the world limits.
    ///
    /// On by default, so a filled chunk surrounded by filled chunks still
    /// keeps its top and bottom faces. Turn it off to mesh such a chunk to
    /// nothing.
    pub world_limit_faces: bool,
    /// Translate positions by the chunk's world origin.
    pub world_space: bool,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            yield_budget: 16_384,
            vertex_capacity: 4096,
            world_limit_faces: true,
            world_space: false,
        }
    }
}

impl MesherConfig {
    pub fn with_yield_budget(mut self, cells: usize) -> Self {
        self.yield_budget = cells;
        self
    }

    pub fn with_vertex_capacity(mut self, vertices: usize) -> Self {
        self.vertex_capacity = vertices;
        self
    }

    /// Cull floors and ceilings at the vertical world limits.
    pub fn with_world_limit_faces(mut self, emit: bool) -> Self {
        self.world_limit_faces = emit;
        self
    }

    pub fn with_world_space(mut self, world_space: bool) -> Self {
        self.world_space = world_space;
        self
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MesherConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.yield_budget == 0 {
            return Err(MesherError::InvalidConfig(
                "yield_budget must be at least 1 cell".to_string(),
            ));
        }
        Ok(())
    }
}

/// The main mesher struct.
///
/// Owns the texture atlas and configuration; chunks and their neighbors are
/// borrowed per call, so one mesher can serve many worker threads.
pub struct ChunkMesher<A: TextureAtlas = TileAtlas> {
    atlas: A,
    config: MesherConfig,
}

impl Default for ChunkMesher {
    /// A mesher over the built-in [`TileAtlas`] with default configuration.
    fn default() -> Self {
        Self::new(TileAtlas::default())
    }
}

impl<A: TextureAtlas> ChunkMesher<A> {
    /// Create a new mesher with default configuration.
    pub fn new(atlas: A) -> Self {
        Self {
            atlas,
            config: MesherConfig::default(),
        }
    }

    /// Create a new mesher with custom configuration.
    pub fn with_config(atlas: A, config: MesherConfig) -> Self {
        Self { atlas, config }
    }

    pub fn atlas(&self) -> &A {
        &self.atlas
    }

    pub fn config(&self) -> &MesherConfig {
        &self.config
    }

    /// Start a cooperative meshing task for `chunk`.
    pub fn task<'a, S: VoxelSource + ?Sized>(
        &'a self,
        chunk: &'a Chunk,
        source: &'a S,
    ) -> MeshTask<'a, S, A> {
        MeshTask::new(chunk, source, &self.atlas, self.config)
    }

    /// Mesh `chunk` to completion on the calling thread.
    pub fn mesh_chunk<S: VoxelSource + ?Sized>(&self, chunk: &Chunk, source: &S) -> ChunkGeometry {
        self.task(chunk, source).run()
    }

    /// Mesh independent chunks in parallel.
    ///
    /// Results are returned in input order. Every chunk reads its neighbors
    /// from the same `source`, which is never written during meshing.
    pub fn mesh_chunks<S>(&self, chunks: &[&Chunk], source: &S) -> Vec<ChunkGeometry>
    where
        A: Sync,
        S: VoxelSource + Sync + ?Sized,
    {
        log::debug!("meshing {} chunks in parallel", chunks.len());
        chunks
            .par_iter()
            .map(|chunk| self.mesh_chunk(chunk, source))
            .collect()
    }
}

//! Read-only voxel access across chunk boundaries.

use crate::chunk::Chunk;
use crate::types::{BlockPosition, BlockType, ChunkPos};
use std::collections::HashMap;

/// Result of looking up a block that may live outside the chunk being meshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborBlock {
    /// The owning chunk is loaded.
    Loaded(BlockType),
    /// Above or below the world's vertical limits. Always air.
    OutOfWorld,
    /// The owning chunk is not loaded; contents are unknown.
    Unloaded,
}

impl NeighborBlock {
    /// The concrete block, or `None` when it is unknown.
    pub fn resolve(self) -> Option<BlockType> {
        match self {
            NeighborBlock::Loaded(block) => Some(block),
            NeighborBlock::OutOfWorld => Some(BlockType::Air),
            NeighborBlock::Unloaded => None,
        }
    }
}

/// Trait for world voxel access used by boundary queries.
///
/// Implementations only see positions inside the vertical world limits:
/// [`neighbor_block`] applies the clamp before calling them.
pub trait VoxelSource {
    /// Get the block at a world position, or [`NeighborBlock::Unloaded`].
    fn block_at(&self, pos: BlockPosition) -> NeighborBlock;
}

/// Look up a world position, resolving the vertical limits first.
///
/// `y < 0` and `y > 255` are [`NeighborBlock::OutOfWorld`] for every source,
/// loaded or not.
pub fn neighbor_block<S: VoxelSource + ?Sized>(source: &S, pos: BlockPosition) -> NeighborBlock {
    if !pos.in_world_height() {
        return NeighborBlock::OutOfWorld;
    }
    source.block_at(pos)
}

/// A world with no loaded chunks besides the one being meshed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNeighbors;

impl VoxelSource for NoNeighbors {
    fn block_at(&self, _pos: BlockPosition) -> NeighborBlock {
        NeighborBlock::Unloaded
    }
}

/// Loaded chunks keyed by position.
#[derive(Debug, Clone, Default)]
pub struct ChunkMap {
    chunks: HashMap<ChunkPos, Chunk>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chunk, returning the one it replaced.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        self.chunks.insert(chunk.pos(), chunk)
    }

    pub fn remove(&mut self, pos: ChunkPos) -> Option<Chunk> {
        self.chunks.remove(&pos)
    }

    pub fn get(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate over loaded chunks in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }
}

impl VoxelSource for ChunkMap {
    fn block_at(&self, pos: BlockPosition) -> NeighborBlock {
        let chunk_pos = ChunkPos::of_block(pos);
        match self.chunks.get(&chunk_pos) {
            Some(chunk) => {
                let [x, y, z] = chunk_pos.to_local(pos);
                NeighborBlock::Loaded(chunk.get_block(x, y, z))
            }
            None => NeighborBlock::Unloaded,
        }
    }
}

impl<S: VoxelSource + ?Sized> VoxelSource for &S {
    fn block_at(&self, pos: BlockPosition) -> NeighborBlock {
        (**self).block_at(pos)
    }
}

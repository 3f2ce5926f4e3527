//! Dense voxel storage for one 16x256x16 chunk.

use crate::error::{MesherError, Result};
use crate::types::{BlockPosition, BlockType, ChunkPos, CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME};
use serde::{Deserialize, Serialize};

/// A dense grid of blocks addressed by local `(x, y, z)` in
/// `[0, 15] x [0, 255] x [0, 15]`.
///
/// The grid length is checked at construction, so every `Chunk` handed to
/// the mesher is well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pos: ChunkPos,
    blocks: Box<[BlockType]>,
}

/// An inclusive box of blocks to write into a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkFill {
    /// Inclusive minimum corner, chunk-local.
    pub from: [i32; 3],
    /// Inclusive maximum corner, chunk-local.
    pub to: [i32; 3],
    /// Block written to every cell of the box.
    pub block: BlockType,
}

impl ChunkFill {
    pub fn new(from: [i32; 3], to: [i32; 3], block: BlockType) -> Self {
        Self { from, to, block }
    }
}

/// JSON description of a chunk: its position and the fills that build it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkDescription {
    #[serde(default)]
    pub position: ChunkPos,
    #[serde(default)]
    pub fills: Vec<ChunkFill>,
}

impl ChunkDescription {
    /// Parse a description from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the described chunk.
    pub fn build(&self) -> Result<Chunk> {
        check_position(self.position)?;
        let mut chunk = Chunk::new(self.position);
        for fill in &self.fills {
            chunk.fill(fill)?;
        }
        Ok(chunk)
    }
}

fn check_position(pos: ChunkPos) -> Result<()> {
    if pos.in_world_range() {
        Ok(())
    } else {
        Err(MesherError::InvalidPosition(format!(
            "chunk ({}, {}) is beyond +/-{} chunks",
            pos.x,
            pos.z,
            ChunkPos::MAX_COORD
        )))
    }
}

#[inline]
fn index(x: usize, y: usize, z: usize) -> usize {
    (y * CHUNK_SIZE + z) * CHUNK_SIZE + x
}

#[inline]
fn in_bounds(x: i32, y: i32, z: i32) -> bool {
    (0..CHUNK_SIZE as i32).contains(&x)
        && (0..CHUNK_HEIGHT as i32).contains(&y)
        && (0..CHUNK_SIZE as i32).contains(&z)
}

impl Chunk {
    /// Create an all-air chunk.
    pub fn new(pos: ChunkPos) -> Self {
        Self::filled(pos, BlockType::Air)
    }

    /// Create a chunk with every voxel set to `block`.
    pub fn filled(pos: ChunkPos, block: BlockType) -> Self {
        Self {
            pos,
            blocks: vec![block; CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    /// Wrap an existing grid laid out as `y`-major, then `z`, then `x`.
    pub fn from_blocks(pos: ChunkPos, blocks: Vec<BlockType>) -> Result<Self> {
        check_position(pos)?;
        if blocks.len() != CHUNK_VOLUME {
            return Err(MesherError::ChunkDimensions {
                expected: CHUNK_VOLUME,
                actual: blocks.len(),
            });
        }
        Ok(Self {
            pos,
            blocks: blocks.into_boxed_slice(),
        })
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Raw voxel grid.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Get the block at a local position, or air outside the chunk.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if in_bounds(x, y, z) {
            self.blocks[index(x as usize, y as usize, z as usize)]
        } else {
            BlockType::Air
        }
    }

    /// Set a block. Returns `false` if the position is outside the chunk.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> bool {
        if !in_bounds(x, y, z) {
            return false;
        }
        self.blocks[index(x as usize, y as usize, z as usize)] = block;
        true
    }

    /// Write a box of blocks. Corners may be given in any order.
    pub fn fill(&mut self, fill: &ChunkFill) -> Result<()> {
        let min = [0, 1, 2].map(|i| fill.from[i].min(fill.to[i]));
        let max = [0, 1, 2].map(|i| fill.from[i].max(fill.to[i]));
        if !in_bounds(min[0], min[1], min[2]) || !in_bounds(max[0], max[1], max[2]) {
            return Err(MesherError::InvalidFill(format!(
                "box {:?}..={:?} leaves the chunk",
                fill.from, fill.to
            )));
        }

        for y in min[1]..=max[1] {
            for z in min[2]..=max[2] {
                for x in min[0]..=max[0] {
                    self.blocks[index(x as usize, y as usize, z as usize)] = fill.block;
                }
            }
        }
        Ok(())
    }

    /// Check if every voxel is air.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.is_air())
    }

    pub fn non_air_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_air()).count()
    }

    /// World position of a local position.
    ///
    /// Wraps like [`ChunkPos::world_origin`] when the chunk lies outside
    /// [`ChunkPos::in_world_range`].
    pub fn local_to_world(&self, x: i32, y: i32, z: i32) -> BlockPosition {
        let origin = self.pos.world_origin();
        BlockPosition::new(origin.x.wrapping_add(x), y, origin.z.wrapping_add(z))
    }

    /// Whether a local position lies inside the chunk.
    pub fn contains_local(x: i32, y: i32, z: i32) -> bool {
        in_bounds(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_empty() {
        let chunk = Chunk::new(ChunkPos::new(0, 0));
        assert!(chunk.is_empty());
        assert_eq!(chunk.blocks().len(), CHUNK_VOLUME);
    }

    #[test]
    fn test_from_blocks_rejects_wrong_size() {
        let err = Chunk::from_blocks(ChunkPos::default(), vec![BlockType::Stone; 16 * 16 * 16])
            .unwrap_err();
        assert!(matches!(
            err,
            MesherError::ChunkDimensions { expected: CHUNK_VOLUME, actual: 4096 }
        ));
    }

    #[test]
    fn test_get_set_block() {
        let mut chunk = Chunk::new(ChunkPos::default());
        assert!(chunk.set_block(15, 255, 15, BlockType::Glass));
        assert_eq!(chunk.get_block(15, 255, 15), BlockType::Glass);
        assert!(!chunk.set_block(16, 0, 0, BlockType::Stone));
        assert_eq!(chunk.get_block(0, -1, 0), BlockType::Air);
        assert_eq!(chunk.get_block(0, 256, 0), BlockType::Air);
        assert_eq!(chunk.non_air_count(), 1);
    }

    #[test]
    fn test_fill_box() {
        let mut chunk = Chunk::new(ChunkPos::default());
        chunk
            .fill(&ChunkFill::new([3, 4, 2], [0, 0, 0], BlockType::Dirt))
            .unwrap();
        assert_eq!(chunk.non_air_count(), 4 * 5 * 3);
        assert_eq!(chunk.get_block(3, 4, 2), BlockType::Dirt);
        assert_eq!(chunk.get_block(4, 4, 2), BlockType::Air);
    }

    #[test]
    fn test_fill_out_of_bounds() {
        let mut chunk = Chunk::new(ChunkPos::default());
        let result = chunk.fill(&ChunkFill::new([0, 0, 0], [16, 0, 0], BlockType::Dirt));
        assert!(matches!(result, Err(MesherError::InvalidFill(_))));
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        let far = ChunkPos::new(ChunkPos::MAX_COORD + 1, 0);
        let result = Chunk::from_blocks(far, vec![BlockType::Air; CHUNK_VOLUME]);
        assert!(matches!(result, Err(MesherError::InvalidPosition(_))));

        let desc = ChunkDescription::from_json(
            r#"{ "position": { "x": 0, "z": -2147483648 }, "fills": [] }"#,
        )
        .unwrap();
        assert!(matches!(desc.build(), Err(MesherError::InvalidPosition(_))));

        let edge = ChunkPos::new(ChunkPos::MAX_COORD, -ChunkPos::MAX_COORD);
        assert!(Chunk::from_blocks(edge, vec![BlockType::Air; CHUNK_VOLUME]).is_ok());
    }

    #[test]
    fn test_description_from_json() {
        let desc = ChunkDescription::from_json(
            r#"{
                "position": { "x": 1, "z": -1 },
                "fills": [ { "from": [0, 0, 0], "to": [15, 0, 15], "block": "stone" } ]
            }"#,
        )
        .unwrap();
        let chunk = desc.build().unwrap();
        assert_eq!(chunk.pos(), ChunkPos::new(1, -1));
        assert_eq!(chunk.non_air_count(), 256);
        assert_eq!(chunk.local_to_world(0, 0, 0), BlockPosition::new(16, 0, -16));
    }
}

//! Grid atlas of equally sized square tiles.

use super::{AtlasRegion, TextureAtlas};
use crate::error::{MesherError, Result};
use crate::types::{BlockType, Direction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Tiles and tints for one block type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockTiles {
    /// Tile index for the up face.
    pub top: u32,
    /// Tile index for the down face.
    pub bottom: u32,
    /// Tile index for the four side faces.
    pub side: u32,
    /// Base color for every face without an override.
    #[serde(default = "default_color")]
    pub color: [f32; 3],
    /// Base color override for the up face (grass, leaves).
    #[serde(default)]
    pub top_color: Option<[f32; 3]>,
}

fn default_color() -> [f32; 3] {
    WHITE
}

impl BlockTiles {
    /// One tile on every face.
    pub fn uniform(tile: u32, color: [f32; 3]) -> Self {
        Self {
            top: tile,
            bottom: tile,
            side: tile,
            color,
            top_color: None,
        }
    }

    fn tile(&self, direction: Direction) -> u32 {
        match direction {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::North | Direction::South | Direction::East | Direction::West => self.side,
        }
    }
}

/// A `columns x rows` grid atlas with a per-block tile table.
///
/// Tiles are numbered row by row from the top-left corner. Blocks missing
/// from the table sample tile 0 untinted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileAtlas {
    pub columns: u32,
    pub rows: u32,
    pub blocks: HashMap<BlockType, BlockTiles>,
}

impl Default for TileAtlas {
    fn default() -> Self {
        let grass = [0.56, 0.74, 0.35];
        let foliage = [0.47, 0.66, 0.23];
        let water = [0.247, 0.463, 0.894];

        let mut blocks = HashMap::new();
        blocks.insert(BlockType::Stone, BlockTiles::uniform(1, WHITE));
        blocks.insert(BlockType::Dirt, BlockTiles::uniform(2, WHITE));
        blocks.insert(
            BlockType::Grass,
            BlockTiles {
                top: 0,
                bottom: 2,
                side: 3,
                color: WHITE,
                top_color: Some(grass),
            },
        );
        blocks.insert(BlockType::Sand, BlockTiles::uniform(18, WHITE));
        blocks.insert(BlockType::Gravel, BlockTiles::uniform(19, WHITE));
        blocks.insert(
            BlockType::Wood,
            BlockTiles {
                top: 21,
                bottom: 21,
                side: 20,
                color: WHITE,
                top_color: None,
            },
        );
        blocks.insert(BlockType::Leaves, BlockTiles::uniform(52, foliage));
        blocks.insert(BlockType::Glass, BlockTiles::uniform(49, WHITE));
        blocks.insert(BlockType::Water, BlockTiles::uniform(205, water));
        blocks.insert(
            BlockType::Snow,
            BlockTiles {
                top: 66,
                bottom: 2,
                side: 68,
                color: WHITE,
                top_color: None,
            },
        );
        blocks.insert(BlockType::Bedrock, BlockTiles::uniform(17, WHITE));

        Self {
            columns: 16,
            rows: 16,
            blocks,
        }
    }
}

impl TileAtlas {
    /// Create an atlas with an empty tile table.
    pub fn new(columns: u32, rows: u32) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(MesherError::InvalidAtlas(format!(
                "grid must be at least 1x1, got {columns}x{rows}"
            )));
        }
        Ok(Self {
            columns,
            rows,
            blocks: HashMap::new(),
        })
    }

    /// Add or replace a block's tiles.
    pub fn with_block(mut self, block: BlockType, tiles: BlockTiles) -> Result<Self> {
        self.check_tiles(block, &tiles)?;
        self.blocks.insert(block, tiles);
        Ok(self)
    }

    /// Parse an atlas from JSON and validate every tile index.
    pub fn from_json(json: &str) -> Result<Self> {
        let atlas: TileAtlas = serde_json::from_str(json)?;
        atlas.validate()?;
        Ok(atlas)
    }

    /// Load an atlas description from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check grid size and tile indices. Warns about unmapped block types.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(MesherError::InvalidAtlas(format!(
                "grid must be at least 1x1, got {}x{}",
                self.columns, self.rows
            )));
        }
        self.tile_count()?;
        for (block, tiles) in &self.blocks {
            self.check_tiles(*block, tiles)?;
        }
        for block in BlockType::ALL.into_iter().filter(|b| !b.is_air()) {
            if !self.blocks.contains_key(&block) {
                log::warn!("atlas has no tiles for {block}, falling back to tile 0");
            }
        }
        Ok(())
    }

    fn tile_count(&self) -> Result<u32> {
        self.columns.checked_mul(self.rows).ok_or_else(|| {
            MesherError::InvalidAtlas(format!(
                "{}x{} grid has more than {} tiles",
                self.columns,
                self.rows,
                u32::MAX
            ))
        })
    }

    fn check_tiles(&self, block: BlockType, tiles: &BlockTiles) -> Result<()> {
        let count = self.tile_count()?;
        for tile in [tiles.top, tiles.bottom, tiles.side] {
            if tile >= count {
                return Err(MesherError::InvalidAtlas(format!(
                    "{block} uses tile {tile}, atlas only has {count}"
                )));
            }
        }
        Ok(())
    }

    /// UV rectangle of a tile index.
    ///
    /// A grid with no columns or rows maps every tile to the full texture.
    pub fn tile_region(&self, tile: u32) -> AtlasRegion {
        if self.columns == 0 || self.rows == 0 {
            return AtlasRegion::FULL;
        }
        let col = tile % self.columns;
        let row = tile / self.columns;
        let tile_w = 1.0 / self.columns as f32;
        let tile_h = 1.0 / self.rows as f32;
        AtlasRegion {
            u_min: col as f32 * tile_w,
            v_min: row as f32 * tile_h,
            u_max: (col + 1) as f32 * tile_w,
            v_max: (row + 1) as f32 * tile_h,
        }
    }
}

impl TextureAtlas for TileAtlas {
    fn uv_for(&self, block: BlockType, direction: Direction) -> AtlasRegion {
        let tile = self
            .blocks
            .get(&block)
            .map(|tiles| tiles.tile(direction))
            .unwrap_or(0);
        self.tile_region(tile)
    }

    fn color_for(&self, block: BlockType, direction: Direction) -> [f32; 3] {
        match self.blocks.get(&block) {
            Some(tiles) if direction == Direction::Up => tiles.top_color.unwrap_or(tiles.color),
            Some(tiles) => tiles.color,
            None => WHITE,
        }
    }
}

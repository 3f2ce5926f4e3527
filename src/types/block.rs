//! Block types stored in chunk voxel grids.

use serde::{Deserialize, Serialize};

/// A voxel's block type.
///
/// `Air` is the empty sentinel. Every other variant is either opaque or
/// transparent; transparent blocks never hide the faces of their neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    #[default]
    Air,
    Stone,
    Dirt,
    Grass,
    Sand,
    Gravel,
    Wood,
    Leaves,
    Glass,
    Water,
    Snow,
    Bedrock,
}

impl BlockType {
    /// Every block type, `Air` first.
    pub const ALL: [BlockType; 12] = [
        BlockType::Air,
        BlockType::Stone,
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Sand,
        BlockType::Gravel,
        BlockType::Wood,
        BlockType::Leaves,
        BlockType::Glass,
        BlockType::Water,
        BlockType::Snow,
        BlockType::Bedrock,
    ];

    /// Check if this is an air block.
    pub fn is_air(self) -> bool {
        self == BlockType::Air
    }

    /// Whether light and sight pass through this block.
    pub fn is_transparent(self) -> bool {
        matches!(self, BlockType::Leaves | BlockType::Glass | BlockType::Water)
    }

    /// Solid, non-transparent block that hides adjacent faces.
    pub fn is_opaque(self) -> bool {
        !self.is_air() && !self.is_transparent()
    }

    /// Snake-case name, as used in JSON descriptions.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Stone => "stone",
            BlockType::Dirt => "dirt",
            BlockType::Grass => "grass",
            BlockType::Sand => "sand",
            BlockType::Gravel => "gravel",
            BlockType::Wood => "wood",
            BlockType::Leaves => "leaves",
            BlockType::Glass => "glass",
            BlockType::Water => "water",
            BlockType::Snow => "snow",
            BlockType::Bedrock => "bedrock",
        }
    }

    /// Parse from a snake-case name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|block| block.name() == name)
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_neither_opaque_nor_transparent() {
        assert!(BlockType::Air.is_air());
        assert!(!BlockType::Air.is_transparent());
        assert!(!BlockType::Air.is_opaque());
    }

    #[test]
    fn test_transparency_classes() {
        for block in [BlockType::Glass, BlockType::Leaves, BlockType::Water] {
            assert!(block.is_transparent(), "{block}");
            assert!(!block.is_opaque(), "{block}");
        }
        for block in [BlockType::Stone, BlockType::Dirt, BlockType::Grass, BlockType::Bedrock] {
            assert!(block.is_opaque(), "{block}");
        }
    }

    #[test]
    fn test_names_match_serde() {
        for block in BlockType::ALL {
            let json = serde_json::to_string(&block).unwrap();
            assert_eq!(json, format!("\"{}\"", block.name()));
            assert_eq!(BlockType::from_name(block.name()), Some(block));
        }
        assert_eq!(BlockType::from_name("STONE"), Some(BlockType::Stone));
        assert_eq!(BlockType::from_name("lava"), None);
    }
}

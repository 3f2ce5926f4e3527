//! Texture atlas lookups.
//!
//! The mesher only needs two things from an atlas: which UV rectangle a
//! block face samples, and the base color it is tinted with.

mod tiles;

pub use tiles::{BlockTiles, TileAtlas};

use crate::types::{BlockType, Direction};

/// A region within the texture atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    /// U coordinate of the left edge (0-1).
    pub u_min: f32,
    /// V coordinate of the top edge (0-1).
    pub v_min: f32,
    /// U coordinate of the right edge (0-1).
    pub u_max: f32,
    /// V coordinate of the bottom edge (0-1).
    pub v_max: f32,
}

impl AtlasRegion {
    /// The whole texture.
    pub const FULL: AtlasRegion = AtlasRegion {
        u_min: 0.0,
        v_min: 0.0,
        u_max: 1.0,
        v_max: 1.0,
    };

    /// Get the width of this region in UV space.
    pub fn width(&self) -> f32 {
        self.u_max - self.u_min
    }

    /// Get the height of this region in UV space.
    pub fn height(&self) -> f32 {
        self.v_max - self.v_min
    }

    /// Transform a local UV coordinate (0-1) to atlas coordinate.
    pub fn transform_uv(&self, u: f32, v: f32) -> [f32; 2] {
        [
            self.u_min + u * self.width(),
            self.v_min + v * self.height(),
        ]
    }
}

/// Source of per-face texturing for block types.
pub trait TextureAtlas {
    /// UV rectangle sampled by `block`'s face pointing `direction`.
    fn uv_for(&self, block: BlockType, direction: Direction) -> AtlasRegion;

    /// Base RGB color of `block`'s face pointing `direction`, before shading.
    fn color_for(&self, block: BlockType, direction: Direction) -> [f32; 3];
}

impl<A: TextureAtlas + ?Sized> TextureAtlas for &A {
    fn uv_for(&self, block: BlockType, direction: Direction) -> AtlasRegion {
        (**self).uv_for(block, direction)
    }

    fn color_for(&self, block: BlockType, direction: Direction) -> [f32; 3] {
        (**self).color_for(block, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_uv() {
        let region = AtlasRegion {
            u_min: 0.25,
            v_min: 0.5,
            u_max: 0.5,
            v_max: 0.75,
        };
        assert_eq!(region.transform_uv(0.0, 0.0), [0.25, 0.5]);
        assert_eq!(region.transform_uv(1.0, 1.0), [0.5, 0.75]);
        assert_eq!(region.transform_uv(0.5, 0.5), [0.375, 0.625]);
    }
}

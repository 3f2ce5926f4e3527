//! Shared types used throughout the library.

mod block;
mod direction;

pub use block::BlockType;
pub use direction::{Axis, Direction, FaceSpec, FACES};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Chunk footprint along x and z.
pub const CHUNK_SIZE: usize = 16;
/// Chunk (and world) height along y.
pub const CHUNK_HEIGHT: usize = 256;
/// Number of voxels in one chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE;

/// A block position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Get the neighboring position in the given direction.
    pub fn neighbor(&self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Whether `y` lies inside the vertical world limits.
    pub fn in_world_height(&self) -> bool {
        (0..CHUNK_HEIGHT as i32).contains(&self.y)
    }
}

/// A chunk column position, in chunk units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    /// Largest `|x|` or `|z|` whose blocks and horizontal neighbors all have
    /// `i32` world coordinates.
    pub const MAX_COORD: i32 = i32::MAX / CHUNK_SIZE as i32 - 1;

    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Whether every block of this chunk, and of the chunks around it, is
    /// addressable in world space.
    pub fn in_world_range(&self) -> bool {
        (-Self::MAX_COORD..=Self::MAX_COORD).contains(&self.x)
            && (-Self::MAX_COORD..=Self::MAX_COORD).contains(&self.z)
    }

    /// The chunk that owns a world position.
    pub fn of_block(pos: BlockPosition) -> Self {
        Self {
            x: pos.x.div_euclid(CHUNK_SIZE as i32),
            z: pos.z.div_euclid(CHUNK_SIZE as i32),
        }
    }

    /// World position of this chunk's local `(0, 0, 0)` voxel.
    ///
    /// Wraps for chunks outside [`ChunkPos::in_world_range`].
    pub fn world_origin(&self) -> BlockPosition {
        BlockPosition::new(
            self.x.wrapping_mul(CHUNK_SIZE as i32),
            0,
            self.z.wrapping_mul(CHUNK_SIZE as i32),
        )
    }

    /// Local `(x, y, z)` of a world position inside this chunk.
    pub fn to_local(&self, pos: BlockPosition) -> [i32; 3] {
        let origin = self.world_origin();
        [pos.x.wrapping_sub(origin.x), pos.y, pos.z.wrapping_sub(origin.z)]
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl Iterator<Item = [f32; 3]>) -> Option<Self> {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        let mut has_points = false;

        for p in points {
            has_points = true;
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        if has_points {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn dimensions(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        ((Vec3::from(self.min) + Vec3::from(self.max)) * 0.5).to_array()
    }

    /// Check if a point lies inside or on the box.
    pub fn contains(&self, p: [f32; 3]) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

/// A bounding sphere for frustum culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: [f32; 3],
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere centered on the points' bounding box, just large enough to hold
    /// every point.
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        let bounds = BoundingBox::from_points(points.iter().copied())?;
        let center = Vec3::from(bounds.center());
        let radius_sq = points
            .iter()
            .map(|p| center.distance_squared(Vec3::from(*p)))
            .fold(0.0f32, f32::max);

        Some(Self {
            center: center.to_array(),
            radius: radius_sq.sqrt(),
        })
    }
}

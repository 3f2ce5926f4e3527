//! Immutable mesh output handed to the renderer.
//!
//! [`ChunkGeometry`] stores vertex attributes as flat structure-of-arrays
//! buffers (positions and normals stride 3, UVs stride 2, colors stride 3)
//! plus `u32` triangle indices, with zero-copy byte accessors for GPU upload
//! and precomputed bounds for frustum culling.

use crate::types::{BoundingBox, BoundingSphere, ChunkPos, Direction};
use std::mem;

/// Finished mesh for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkGeometry {
    chunk: ChunkPos,
    positions: Box<[f32]>,
    normals: Box<[f32]>,
    uvs: Box<[f32]>,
    colors: Box<[f32]>,
    indices: Box<[u32]>,
    quad_counts: [usize; 6],
    bounds: Option<BoundingBox>,
    sphere: Option<BoundingSphere>,
}

impl ChunkGeometry {
    pub(crate) fn new(
        chunk: ChunkPos,
        positions: Vec<f32>,
        normals: Vec<f32>,
        uvs: Vec<f32>,
        colors: Vec<f32>,
        indices: Vec<u32>,
        quad_counts: [usize; 6],
    ) -> Self {
        let points: Vec<[f32; 3]> = positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect();
        let bounds = BoundingBox::from_points(points.iter().copied());
        let sphere = BoundingSphere::from_points(&points);

        Self {
            chunk,
            positions: positions.into_boxed_slice(),
            normals: normals.into_boxed_slice(),
            uvs: uvs.into_boxed_slice(),
            colors: colors.into_boxed_slice(),
            indices: indices.into_boxed_slice(),
            quad_counts,
            bounds,
            sphere,
        }
    }

    /// Chunk this geometry was generated for.
    pub fn chunk(&self) -> ChunkPos {
        self.chunk
    }

    /// Vertex positions, 3 floats per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Vertex normals, 3 floats per vertex.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Texture coordinates into the atlas, 2 floats per vertex.
    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    /// Shaded RGB vertex colors, 3 floats per vertex.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Triangle indices, 6 per quad.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns `true` if this geometry contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Emitted quads per direction, indexed by [`Direction::index`].
    pub fn quad_counts(&self) -> [usize; 6] {
        self.quad_counts
    }

    /// Emitted quads facing `direction`.
    pub fn quads_facing(&self, direction: Direction) -> usize {
        self.quad_counts[direction.index()]
    }

    /// Total emitted quads.
    pub fn quad_count(&self) -> usize {
        self.quad_counts.iter().sum()
    }

    /// Axis-aligned bounds of every vertex, `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Bounding sphere of every vertex, `None` when empty.
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.sphere
    }

    /// Position of vertex `i`.
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.positions[i * 3], self.positions[i * 3 + 1], self.positions[i * 3 + 2]]
    }

    /// Normal of vertex `i`.
    pub fn normal(&self, i: usize) -> [f32; 3] {
        [self.normals[i * 3], self.normals[i * 3 + 1], self.normals[i * 3 + 2]]
    }

    /// Raw bytes of the positions array. Zero-allocation view.
    pub fn positions_bytes(&self) -> &[u8] {
        cast_slice(&self.positions)
    }

    /// Raw bytes of the normals array. Zero-allocation view.
    pub fn normals_bytes(&self) -> &[u8] {
        cast_slice(&self.normals)
    }

    /// Raw bytes of the UVs array. Zero-allocation view.
    pub fn uvs_bytes(&self) -> &[u8] {
        cast_slice(&self.uvs)
    }

    /// Raw bytes of the colors array. Zero-allocation view.
    pub fn colors_bytes(&self) -> &[u8] {
        cast_slice(&self.colors)
    }

    /// Raw bytes of the indices array. Zero-allocation view.
    pub fn indices_bytes(&self) -> &[u8] {
        cast_slice(&self.indices)
    }
}

/// Cast a slice of `T` to a byte slice without allocation.
fn cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    let ptr = slice.as_ptr() as *const u8;
    let len = mem::size_of_val(slice);
    // SAFETY: f32 and u32 have no padding and every byte pattern is a valid u8.
    unsafe { std::slice::from_raw_parts(ptr, len) }
}

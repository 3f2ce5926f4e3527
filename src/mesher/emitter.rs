//! Quad emission into the shared output buffers.

use crate::atlas::TextureAtlas;
use crate::mesh_output::ChunkGeometry;
use crate::mesher::greedy::MergedQuad;
use crate::types::ChunkPos;

/// Index pattern of one quad: triangles `(0, 1, 2)` and `(0, 2, 3)`.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Growable structure-of-arrays buffers for one chunk's mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    positions: Vec<f32>,
    normals: Vec<f32>,
    uvs: Vec<f32>,
    colors: Vec<f32>,
    indices: Vec<u32>,
    quad_counts: [usize; 6],
}

impl MeshBuffers {
    /// Create buffers sized for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            uvs: Vec::with_capacity(vertices * 2),
            colors: Vec::with_capacity(vertices * 3),
            indices: Vec::with_capacity(vertices / 4 * 6),
            quad_counts: [0; 6],
        }
    }

    /// Vertices written so far; the base index of the next quad.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Quads written so far, per direction.
    pub fn quad_counts(&self) -> [usize; 6] {
        self.quad_counts
    }

    /// Append one merged rectangle as 4 vertices and 6 indices.
    ///
    /// `origin` is added to every position. The atlas tile is stretched over
    /// the whole rectangle, and the vertex color is the atlas color scaled by
    /// the direction's brightness.
    pub fn emit_quad<A: TextureAtlas + ?Sized>(
        &mut self,
        quad: &MergedQuad,
        atlas: &A,
        origin: [f32; 3],
    ) {
        let direction = quad.direction;
        let spec = direction.spec();
        let base = self.vertex_count() as u32;

        let region = atlas.uv_for(quad.block, direction);
        let base_color = atlas.color_for(quad.block, direction);
        let color = base_color.map(|c| c * spec.brightness);

        for (corner, &(du, dv)) in quad.corners().iter().zip(spec.corners.iter()) {
            self.positions.extend_from_slice(&[
                corner[0] + origin[0],
                corner[1] + origin[1],
                corner[2] + origin[2],
            ]);
            self.normals.extend_from_slice(&spec.normal);
            // Texture v runs top-down while slice v runs bottom-up.
            self.uvs
                .extend_from_slice(&region.transform_uv(f32::from(du), 1.0 - f32::from(dv)));
            self.colors.extend_from_slice(&color);
        }

        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
        self.quad_counts[direction.index()] += 1;
    }

    /// Freeze the buffers into immutable geometry.
    pub fn finish(self, chunk: ChunkPos) -> ChunkGeometry {
        ChunkGeometry::new(
            chunk,
            self.positions,
            self.normals,
            self.uvs,
            self.colors,
            self.indices,
            self.quad_counts,
        )
    }
}

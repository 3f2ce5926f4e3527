//! Per-slice visibility masks.

use crate::chunk::Chunk;
use crate::mesher::visibility::face_visible;
use crate::types::{BlockType, Direction};
use crate::world::{neighbor_block, NeighborBlock, VoxelSource};

/// One cell of a slice mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskEntry {
    /// Block occupying the cell.
    pub block: BlockType,
    /// Whether the cell's face is visible and not yet merged.
    pub render: bool,
}

/// A `u_len x v_len` grid of faces for one sweep position.
///
/// Cells are stored row-major with `u` as the outer index, the order the
/// greedy merger scans them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceMask {
    u_len: usize,
    v_len: usize,
    cells: Vec<MaskEntry>,
}

impl SliceMask {
    /// Create an all-hidden mask.
    pub fn new(u_len: usize, v_len: usize) -> Self {
        Self {
            u_len,
            v_len,
            cells: vec![MaskEntry::default(); u_len * v_len],
        }
    }

    /// Create a mask sized for `direction`'s slice plane.
    pub fn for_direction(direction: Direction) -> Self {
        let (_, u_max, v_max) = direction.sweep_range();
        Self::new(u_max + 1, v_max + 1)
    }

    pub fn u_len(&self) -> usize {
        self.u_len
    }

    pub fn v_len(&self) -> usize {
        self.v_len
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, u: usize, v: usize) -> usize {
        debug_assert!(u < self.u_len && v < self.v_len, "mask cell ({u}, {v}) out of range");
        u * self.v_len + v
    }

    #[inline]
    pub fn get(&self, u: usize, v: usize) -> MaskEntry {
        self.cells[self.index(u, v)]
    }

    #[inline]
    pub fn set(&mut self, u: usize, v: usize, entry: MaskEntry) {
        let i = self.index(u, v);
        self.cells[i] = entry;
    }

    /// Mark a cell as consumed.
    #[inline]
    pub fn clear(&mut self, u: usize, v: usize) {
        let i = self.index(u, v);
        self.cells[i].render = false;
    }

    /// Whether `(u, v)` is visible and holds `block`.
    #[inline]
    pub fn matches(&self, u: usize, v: usize, block: BlockType) -> bool {
        let entry = self.get(u, v);
        entry.render && entry.block == block
    }

    /// Number of cells still marked visible.
    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.render).count()
    }

    /// Fill the mask for slice `w` of `direction`.
    ///
    /// Neighbors inside the chunk are read directly; neighbors across a
    /// chunk boundary or the world limits go through `source`.
    pub fn build<S: VoxelSource + ?Sized>(
        &mut self,
        chunk: &Chunk,
        source: &S,
        direction: Direction,
        w: usize,
        world_limit_faces: bool,
    ) {
        let (dx, dy, dz) = direction.offset();
        for u in 0..self.u_len {
            for v in 0..self.v_len {
                let [x, y, z] = direction.local_position(u as i32, v as i32, w as i32);
                let block = chunk.get_block(x, y, z);
                if block.is_air() {
                    self.set(u, v, MaskEntry { block, render: false });
                    continue;
                }

                let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                let neighbor = if Chunk::contains_local(nx, ny, nz) {
                    NeighborBlock::Loaded(chunk.get_block(nx, ny, nz))
                } else {
                    neighbor_block(source, chunk.local_to_world(nx, ny, nz))
                };

                let render = face_visible(block, neighbor, world_limit_faces);
                self.set(u, v, MaskEntry { block, render });
            }
        }
    }
}

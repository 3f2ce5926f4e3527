//! Greedy rectangle merging over one slice mask.
//!
//! Visible cells that share a block type are merged into maximal rectangles,
//! so a flat 16x16 floor becomes one quad instead of 256.

use crate::mesher::mask::SliceMask;
use crate::types::{BlockType, Direction};

/// A merged rectangle produced by the greedy algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedQuad {
    /// Face direction.
    pub direction: Direction,
    /// Start of the U range (inclusive).
    pub u: usize,
    /// Start of the V range (inclusive).
    pub v: usize,
    /// Sweep coordinate of the slice.
    pub w: usize,
    /// Width along U axis.
    pub width: usize,
    /// Height along V axis.
    pub height: usize,
    /// Block type shared by every covered cell.
    pub block: BlockType,
}

impl MergedQuad {
    /// Chunk-local corner positions, in the direction's winding order.
    pub fn corners(&self) -> [[f32; 3]; 4] {
        self.direction.quad_corners(
            self.u as i32,
            self.v as i32,
            self.w as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether `(u, v)` lies inside the rectangle.
    pub fn covers(&self, u: usize, v: usize) -> bool {
        (self.u..self.u + self.width).contains(&u) && (self.v..self.v + self.height).contains(&v)
    }
}

/// Merge one slice mask, appending rectangles to `out`.
///
/// Scans `u` outer, `v` inner. From each unconsumed visible cell the
/// rectangle first grows along `u` at the same `v`, then along `v` while the
/// whole `[u, u + width)` row matches. Covered cells are cleared, so the mask
/// is fully consumed on return. The scan order is a fixed tie-break: the
/// same mask always yields the same rectangles.
pub fn merge_slice_into(
    mask: &mut SliceMask,
    direction: Direction,
    w: usize,
    out: &mut Vec<MergedQuad>,
) {
    let u_len = mask.u_len();
    let v_len = mask.v_len();

    for u in 0..u_len {
        for v in 0..v_len {
            let entry = mask.get(u, v);
            if !entry.render {
                continue;
            }
            let block = entry.block;

            // Expand along u
            let mut width = 1;
            while u + width < u_len && mask.matches(u + width, v, block) {
                width += 1;
            }

            // Expand along v, one full row at a time
            let mut height = 1;
            while v + height < v_len
                && (u..u + width).all(|du| mask.matches(du, v + height, block))
            {
                height += 1;
            }

            for cu in u..u + width {
                for cv in v..v + height {
                    mask.clear(cu, cv);
                }
            }

            out.push(MergedQuad {
                direction,
                u,
                v,
                w,
                width,
                height,
                block,
            });
        }
    }
}

/// Merge one slice mask into a fresh list of rectangles.
pub fn merge_slice(mask: &mut SliceMask, direction: Direction, w: usize) -> Vec<MergedQuad> {
    let mut out = Vec::new();
    merge_slice_into(mask, direction, w, &mut out);
    out
}

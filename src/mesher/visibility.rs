//! Face visibility between a block and its neighbor.

use crate::types::BlockType;
use crate::world::NeighborBlock;

/// Whether the face between `block` and `neighbor` must be drawn.
///
/// `neighbor` is `None` when its chunk is not loaded. Such faces are drawn:
/// a seam that is later hidden costs less than a hole in the terrain.
pub fn should_render_face(block: BlockType, neighbor: Option<BlockType>) -> bool {
    if block.is_air() {
        return false;
    }
    match neighbor {
        None => true,
        Some(neighbor) => neighbor.is_air() || neighbor.is_transparent(),
    }
}

/// [`should_render_face`] over a tri-state neighbor lookup.
///
/// With `world_limit_faces` off, faces looking past the top or bottom of the
/// world are dropped even though the space there resolves to air.
pub fn face_visible(block: BlockType, neighbor: NeighborBlock, world_limit_faces: bool) -> bool {
    if neighbor == NeighborBlock::OutOfWorld && !world_limit_faces {
        return false;
    }
    should_render_face(block, neighbor.resolve())
}

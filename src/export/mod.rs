//! Mesh export formats.
//!
//! Debug handoff only: renderers consume [`ChunkGeometry`](crate::ChunkGeometry)
//! directly.

pub mod gltf;
pub mod obj;

pub use gltf::export_glb;
pub use obj::{export_obj, ObjExport};

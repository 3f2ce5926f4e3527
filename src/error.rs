//! Error types for the chunk mesher.

use thiserror::Error;

/// Result type alias using MesherError.
pub type Result<T> = std::result::Result<T, MesherError>;

/// Main error type for chunk meshing operations.
///
/// Mesh generation itself never fails: every error here is raised while
/// constructing inputs (chunks, atlases, configuration) or exporting output.
#[derive(Error, Debug)]
pub enum MesherError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A voxel grid did not have the fixed chunk dimensions.
    #[error("Malformed chunk: expected {expected} voxels, got {actual}")]
    ChunkDimensions { expected: usize, actual: usize },

    /// A chunk position too far out for world coordinates to fit in `i32`.
    #[error("Invalid chunk position: {0}")]
    InvalidPosition(String),

    /// A box fill reached outside the chunk.
    #[error("Invalid fill: {0}")]
    InvalidFill(String),

    /// Invalid mesher configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid texture atlas description.
    #[error("Invalid atlas: {0}")]
    InvalidAtlas(String),

    /// Failed to format text output.
    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Failed to export mesh.
    #[error("Export error: {0}")]
    Export(String),
}

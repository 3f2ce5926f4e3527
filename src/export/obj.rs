//! Wavefront OBJ export.
//!
//! OBJ is a simple, widely-supported text-based 3D format.
//! Vertex colors are written as the common `v x y z r g b` extension.

use crate::error::Result;
use crate::mesh_output::ChunkGeometry;
use std::fmt::Write;

/// OBJ and MTL text for one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjExport {
    pub obj: String,
    pub mtl: String,
}

/// Export chunk geometry to OBJ format.
///
/// Every vertex gets its own `v`, `vt` and `vn` entry, so face corners use
/// the same index for all three pools. The MTL file defines a single white
/// material named `{name}_material`; shading comes from the vertex colors.
pub fn export_obj(geometry: &ChunkGeometry, name: &str) -> Result<ObjExport> {
    let vertex_count = geometry.vertex_count();
    let triangle_count = geometry.triangle_count();

    // ~60 bytes per vertex line (v/vt/vn) x 3 + ~40 per face
    let mut obj = String::with_capacity(256 + vertex_count * 180 + triangle_count * 40);
    let mut mtl = String::with_capacity(256);

    let chunk = geometry.chunk();
    writeln!(obj, "# Chunk Mesher OBJ Export")?;
    writeln!(obj, "# Chunk: {} {}", chunk.x, chunk.z)?;
    writeln!(obj, "# Vertices: {}", vertex_count)?;
    writeln!(obj, "# Triangles: {}", triangle_count)?;
    writeln!(obj)?;
    writeln!(obj, "mtllib {}.mtl", name)?;
    writeln!(obj, "o {}", name)?;
    writeln!(obj)?;

    for (p, c) in geometry
        .positions()
        .chunks_exact(3)
        .zip(geometry.colors().chunks_exact(3))
    {
        writeln!(obj, "v {} {} {} {} {} {}", p[0], p[1], p[2], c[0], c[1], c[2])?;
    }
    writeln!(obj)?;

    for uv in geometry.uvs().chunks_exact(2) {
        // OBJ texture v runs bottom-up.
        writeln!(obj, "vt {} {}", uv[0], 1.0 - uv[1])?;
    }
    writeln!(obj)?;

    for n in geometry.normals().chunks_exact(3) {
        writeln!(obj, "vn {} {} {}", n[0], n[1], n[2])?;
    }
    writeln!(obj)?;

    writeln!(obj, "usemtl {}_material", name)?;
    for tri in geometry.indices().chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
        writeln!(obj, "f {i0}/{i0}/{i0} {i1}/{i1}/{i1} {i2}/{i2}/{i2}")?;
    }

    writeln!(mtl, "# Chunk Mesher Material")?;
    writeln!(mtl)?;
    writeln!(mtl, "newmtl {}_material", name)?;
    writeln!(mtl, "Ka 1.0 1.0 1.0")?;
    writeln!(mtl, "Kd 1.0 1.0 1.0")?;
    writeln!(mtl, "Ks 0.0 0.0 0.0")?;
    writeln!(mtl, "Ns 10.0")?;
    writeln!(mtl, "d 1.0")?;
    writeln!(mtl, "illum 1")?;

    Ok(ObjExport { obj, mtl })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::mesher::ChunkMesher;
    use crate::types::{BlockType, ChunkPos};
    use crate::world::NoNeighbors;

    #[test]
    fn test_export_single_block_obj() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_block(0, 0, 0, BlockType::Stone);
        let geometry = ChunkMesher::default().mesh_chunk(&chunk, &NoNeighbors);

        let export = export_obj(&geometry, "test").unwrap();

        assert_eq!(export.obj.lines().filter(|l| l.starts_with("v ")).count(), 24);
        assert_eq!(export.obj.lines().filter(|l| l.starts_with("vt ")).count(), 24);
        assert_eq!(export.obj.lines().filter(|l| l.starts_with("f ")).count(), 12);
        assert!(export.obj.contains("vn 0 1 0"));
        assert!(export.obj.contains("f 1/1/1 2/2/2 3/3/3"));
        assert!(export.obj.contains("mtllib test.mtl"));
        assert!(export.mtl.contains("newmtl test_material"));
    }
}

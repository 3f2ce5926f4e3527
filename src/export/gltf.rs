//! glTF/GLB export.

use crate::error::{MesherError, Result};
use crate::mesh_output::ChunkGeometry;
use gltf_json as json;
use json::validation::Checked::Valid;
use json::validation::USize64;

/// Export chunk geometry to GLB format (binary glTF).
///
/// The mesh is written as one primitive carrying positions, normals, atlas
/// UVs and shaded vertex colors. The material is untextured: viewers show
/// the vertex colors, and the UVs are kept for tools that bind the atlas
/// themselves.
pub fn export_glb(geometry: &ChunkGeometry) -> Result<Vec<u8>> {
    if geometry.is_empty() {
        return Err(MesherError::Export("Cannot export empty mesh".to_string()));
    }

    // Build the binary buffer: every attribute is 4-byte aligned already.
    let mut buffer_data: Vec<u8> = Vec::with_capacity(
        geometry.positions_bytes().len() * 3
            + geometry.uvs_bytes().len()
            + geometry.indices_bytes().len(),
    );
    let mut views = Vec::with_capacity(5);
    for (bytes, target) in [
        (geometry.positions_bytes(), json::buffer::Target::ArrayBuffer),
        (geometry.normals_bytes(), json::buffer::Target::ArrayBuffer),
        (geometry.uvs_bytes(), json::buffer::Target::ArrayBuffer),
        (geometry.colors_bytes(), json::buffer::Target::ArrayBuffer),
        (geometry.indices_bytes(), json::buffer::Target::ElementArrayBuffer),
    ] {
        views.push(create_buffer_view(buffer_data.len(), bytes.len(), Some(target)));
        buffer_data.extend_from_slice(bytes);
    }
    let total_buffer_size = buffer_data.len();

    let (min, max) = match geometry.bounds() {
        Some(bounds) => (bounds.min, bounds.max),
        None => ([0.0; 3], [0.0; 3]),
    };

    use json::accessor::{ComponentType, Type};
    let vertex_count = geometry.vertex_count();
    let index_count = geometry.indices().len();
    let accessors = vec![
        create_accessor(0, vertex_count, Type::Vec3, ComponentType::F32, Some(min), Some(max)),
        create_accessor(1, vertex_count, Type::Vec3, ComponentType::F32, None, None),
        create_accessor(2, vertex_count, Type::Vec2, ComponentType::F32, None, None),
        create_accessor(3, vertex_count, Type::Vec3, ComponentType::F32, None, None),
        create_accessor(4, index_count, Type::Scalar, ComponentType::U32, None, None),
    ];

    let chunk = geometry.chunk();
    let root = json::Root {
        accessors,
        buffers: vec![json::Buffer {
            byte_length: USize64(total_buffer_size as u64),
            extensions: Default::default(),
            extras: Default::default(),
            uri: None,
        }],
        buffer_views: views,
        materials: vec![create_vertex_color_material()],
        meshes: vec![json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            primitives: vec![create_primitive(0, 4, 0)],
            weights: None,
        }],
        nodes: vec![json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: Some(json::Index::new(0)),
            rotation: None,
            scale: None,
            translation: None,
            skin: None,
            weights: None,
        }],
        scenes: vec![json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            nodes: vec![json::Index::new(0)],
        }],
        scene: Some(json::Index::new(0)),
        ..Default::default()
    };

    // Serialize JSON
    let json_string = json::serialize::to_string(&root)
        .map_err(|e| MesherError::Export(format!("Failed to serialize glTF JSON: {}", e)))?;
    let json_bytes = json_string.as_bytes();

    // Pad JSON to 4-byte alignment
    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let padded_json_len = json_bytes.len() + json_padding;

    // Pad buffer to 4-byte alignment
    let buffer_padding = (4 - (buffer_data.len() % 4)) % 4;
    let padded_buffer_len = buffer_data.len() + buffer_padding;

    let total_size = 12 + // GLB header
        8 + padded_json_len + // JSON chunk
        8 + padded_buffer_len; // BIN chunk

    let mut glb = Vec::with_capacity(total_size);

    // GLB Header
    glb.extend_from_slice(b"glTF"); // magic
    glb.extend_from_slice(&2u32.to_le_bytes()); // version
    glb.extend_from_slice(&(total_size as u32).to_le_bytes()); // length

    // JSON Chunk
    glb.extend_from_slice(&(padded_json_len as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes()); // chunk type: JSON
    glb.extend_from_slice(json_bytes);
    glb.extend(std::iter::repeat(0x20u8).take(json_padding)); // padding (spaces)

    // BIN Chunk
    glb.extend_from_slice(&(padded_buffer_len as u32).to_le_bytes());
    glb.extend_from_slice(&0x004E4942u32.to_le_bytes()); // chunk type: BIN
    glb.extend_from_slice(&buffer_data);
    glb.extend(std::iter::repeat(0u8).take(buffer_padding));

    log::debug!(
        "exported chunk ({}, {}) as GLB: {} vertices, {} bytes",
        chunk.x,
        chunk.z,
        vertex_count,
        glb.len()
    );
    Ok(glb)
}

fn create_buffer_view(
    offset: usize,
    size: usize,
    target: Option<json::buffer::Target>,
) -> json::buffer::View {
    json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: USize64(size as u64),
        byte_offset: Some(USize64(offset as u64)),
        byte_stride: None,
        extensions: Default::default(),
        extras: Default::default(),
        target: target.map(Valid),
    }
}

fn create_accessor(
    buffer_view: u32,
    count: usize,
    type_: json::accessor::Type,
    component_type: json::accessor::ComponentType,
    min: Option<[f32; 3]>,
    max: Option<[f32; 3]>,
) -> json::Accessor {
    json::Accessor {
        buffer_view: Some(json::Index::new(buffer_view)),
        byte_offset: Some(USize64(0)),
        count: USize64(count as u64),
        component_type: Valid(json::accessor::GenericComponentType(component_type)),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(type_),
        min: min.map(|m| json::Value::from(m.to_vec())),
        max: max.map(|m| json::Value::from(m.to_vec())),
        normalized: false,
        sparse: None,
    }
}

/// One triangle-list primitive; attribute accessors follow `positions_accessor`
/// in the order positions, normals, UVs, colors.
fn create_primitive(
    positions_accessor: u32,
    indices_accessor: u32,
    material: u32,
) -> json::mesh::Primitive {
    let mut attributes = std::collections::BTreeMap::new();
    attributes.insert(
        Valid(json::mesh::Semantic::Positions),
        json::Index::new(positions_accessor),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::Normals),
        json::Index::new(positions_accessor + 1),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::TexCoords(0)),
        json::Index::new(positions_accessor + 2),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::Colors(0)),
        json::Index::new(positions_accessor + 3),
    );

    json::mesh::Primitive {
        attributes,
        extensions: Default::default(),
        extras: Default::default(),
        indices: Some(json::Index::new(indices_accessor)),
        material: Some(json::Index::new(material)),
        mode: Valid(json::mesh::Mode::Triangles),
        targets: None,
    }
}

/// Opaque, single-sided material shaded purely by vertex colors.
fn create_vertex_color_material() -> json::Material {
    json::Material {
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_texture: None,
            base_color_factor: json::material::PbrBaseColorFactor([1.0, 1.0, 1.0, 1.0]),
            metallic_factor: json::material::StrengthFactor(0.0),
            roughness_factor: json::material::StrengthFactor(1.0),
            metallic_roughness_texture: None,
            extensions: Default::default(),
            extras: Default::default(),
        },
        alpha_mode: Valid(json::material::AlphaMode::Opaque),
        alpha_cutoff: None,
        double_sided: false,
        normal_texture: None,
        occlusion_texture: None,
        emissive_texture: None,
        emissive_factor: json::material::EmissiveFactor([0.0, 0.0, 0.0]),
        extensions: Default::default(),
        extras: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::mesher::ChunkMesher;
    use crate::types::{BlockType, ChunkPos};
    use crate::world::NoNeighbors;

    fn read_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    #[test]
    fn test_export_single_block() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.set_block(1, 1, 1, BlockType::Stone);
        let geometry = ChunkMesher::default().mesh_chunk(&chunk, &NoNeighbors);

        let glb = export_glb(&geometry).unwrap();

        // Check GLB header
        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(read_u32(&glb, 4), 2); // version
        assert_eq!(read_u32(&glb, 8) as usize, glb.len());

        let json_len = read_u32(&glb, 12) as usize;
        let root: json::Root = serde_json::from_slice(&glb[20..20 + json_len]).unwrap();
        assert_eq!(root.meshes[0].primitives.len(), 1);
        assert_eq!(root.accessors[0].count, USize64(24));
        assert_eq!(root.accessors[4].count, USize64(36));

        let bin_len = read_u32(&glb, 20 + json_len) as usize;
        assert_eq!(bin_len, 24 * (12 + 12 + 8 + 12) + 36 * 4);
    }

    #[test]
    fn test_export_empty_mesh_fails() {
        let chunk = Chunk::new(ChunkPos::default());
        let geometry = ChunkMesher::default().mesh_chunk(&chunk, &NoNeighbors);
        let result = export_glb(&geometry);
        assert!(matches!(result, Err(MesherError::Export(_))));
    }
}

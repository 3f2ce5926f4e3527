use chunk_mesher::{
    neighbor_block, BlockPosition, BlockType, Chunk, ChunkFill, ChunkMap, ChunkMesher, ChunkPos,
    Direction, MeshTask, MesherConfig, NeighborBlock, NoNeighbors, TaskStep, TileAtlas,
};
use std::io::Write;

fn floor_chunk(pos: ChunkPos, block: BlockType) -> Chunk {
    let mut chunk = Chunk::new(pos);
    chunk
        .fill(&ChunkFill::new([0, 0, 0], [15, 0, 15], block))
        .unwrap();
    chunk
}

fn enclosed_world() -> ChunkMap {
    let mut world = ChunkMap::new();
    for (x, z) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
        world.insert(Chunk::filled(ChunkPos::new(x, z), BlockType::Stone));
    }
    world
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[test]
fn fully_enclosed_chunk_is_empty() {
    let world = enclosed_world();
    let chunk = world.get(ChunkPos::new(0, 0)).unwrap();

    let config = MesherConfig::default().with_world_limit_faces(false);
    let mesher = ChunkMesher::with_config(TileAtlas::default(), config);
    let geometry = mesher.mesh_chunk(chunk, &world);

    assert!(geometry.is_empty());
    assert_eq!(geometry.vertex_count(), 0);
    assert!(geometry.indices().is_empty());
    assert!(geometry.bounds().is_none());
}

#[test]
fn enclosed_chunk_keeps_world_limit_faces_by_default() {
    let world = enclosed_world();
    let chunk = world.get(ChunkPos::new(0, 0)).unwrap();
    let geometry = ChunkMesher::default().mesh_chunk(chunk, &world);

    assert_eq!(geometry.quad_counts(), [1, 1, 0, 0, 0, 0]);
}

#[test]
fn single_floor_slab_without_neighbors() {
    let chunk = floor_chunk(ChunkPos::new(0, 0), BlockType::Stone);
    let geometry = ChunkMesher::default().mesh_chunk(&chunk, &NoNeighbors);

    assert_eq!(geometry.quad_counts(), [1; 6]);
    assert_eq!(geometry.vertex_count(), 24);
    assert_eq!(geometry.indices().len(), 36);

    let bounds = geometry.bounds().unwrap();
    assert_eq!(bounds.min, [0.0, 0.0, 0.0]);
    assert_eq!(bounds.max, [16.0, 1.0, 16.0]);
}

#[test]
fn loaded_neighbor_hides_shared_boundary() {
    let chunk = floor_chunk(ChunkPos::new(0, 0), BlockType::Stone);
    let mut world = ChunkMap::new();
    world.insert(chunk.clone());
    world.insert(floor_chunk(ChunkPos::new(1, 0), BlockType::Stone));

    let geometry = ChunkMesher::default().mesh_chunk(&chunk, &world);
    assert_eq!(geometry.quads_facing(Direction::East), 0);
    assert_eq!(geometry.quads_facing(Direction::West), 1);
    assert_eq!(geometry.quad_count(), 5);
}

#[test]
fn loaded_air_neighbor_still_renders() {
    let chunk = floor_chunk(ChunkPos::new(0, 0), BlockType::Stone);
    let mut world = ChunkMap::new();
    world.insert(Chunk::new(ChunkPos::new(0, -1)));

    let geometry = ChunkMesher::default().mesh_chunk(&chunk, &world);
    assert_eq!(geometry.quads_facing(Direction::North), 1);
}

#[test]
fn transparent_neighbor_does_not_occlude() {
    let mut chunk = Chunk::new(ChunkPos::new(0, 0));
    chunk.set_block(4, 4, 4, BlockType::Stone);
    chunk.set_block(5, 4, 4, BlockType::Glass);

    let geometry = ChunkMesher::default().mesh_chunk(&chunk, &NoNeighbors);
    // Stone shows its east face through the glass; the glass west face
    // against stone is hidden.
    assert_eq!(geometry.quads_facing(Direction::East), 2);
    assert_eq!(geometry.quads_facing(Direction::West), 1);
    // Different block types never merge.
    assert_eq!(geometry.quads_facing(Direction::Up), 2);
}

#[test]
fn regeneration_is_byte_identical() {
    let mut chunk = Chunk::new(ChunkPos::new(3, -2));
    chunk
        .fill(&ChunkFill::new([0, 0, 0], [15, 10, 15], BlockType::Stone))
        .unwrap();
    chunk
        .fill(&ChunkFill::new([3, 11, 2], [9, 14, 12], BlockType::Dirt))
        .unwrap();
    chunk.set_block(7, 15, 7, BlockType::Leaves);

    let mesher = ChunkMesher::default();
    let first = mesher.mesh_chunk(&chunk, &NoNeighbors);
    let second = mesher.mesh_chunk(&chunk, &NoNeighbors);

    assert_eq!(first.positions_bytes(), second.positions_bytes());
    assert_eq!(first.normals_bytes(), second.normals_bytes());
    assert_eq!(first.uvs_bytes(), second.uvs_bytes());
    assert_eq!(first.colors_bytes(), second.colors_bytes());
    assert_eq!(first.indices_bytes(), second.indices_bytes());
}

#[test]
fn normals_match_emitting_direction_and_winding_faces_out() {
    let mut chunk = Chunk::new(ChunkPos::new(0, 0));
    chunk
        .fill(&ChunkFill::new([2, 2, 2], [6, 8, 11], BlockType::Sand))
        .unwrap();
    chunk.set_block(10, 0, 10, BlockType::Wood);

    let geometry = ChunkMesher::default().mesh_chunk(&chunk, &NoNeighbors);

    // Quads are emitted direction by direction in Direction::ALL order.
    let mut quad = 0;
    for direction in Direction::ALL {
        for _ in 0..geometry.quads_facing(direction) {
            let base = quad * 4;
            for i in base..base + 4 {
                assert_eq!(geometry.normal(i), direction.normal(), "{direction}");
            }
            let p0 = geometry.position(base);
            let p1 = geometry.position(base + 1);
            let p2 = geometry.position(base + 2);
            let face = cross(sub(p1, p0), sub(p2, p0));
            assert!(dot(face, direction.normal()) > 0.0, "{direction} winds inward");
            quad += 1;
        }
    }
    assert_eq!(quad * 4, geometry.vertex_count());
}

#[test]
fn vertical_limits_resolve_to_air_when_unloaded() {
    let mut world = ChunkMap::new();
    world.insert(Chunk::filled(ChunkPos::new(0, 0), BlockType::Stone));

    for source_has_chunk in [true, false] {
        let x = if source_has_chunk { 0 } else { 100 };
        for y in [-1, 256] {
            let pos = BlockPosition::new(x, y, 0);
            let block = neighbor_block(&world, pos);
            assert_eq!(block, NeighborBlock::OutOfWorld);
            assert_eq!(block.resolve(), Some(BlockType::Air));
        }
    }
    assert_eq!(
        neighbor_block(&world, BlockPosition::new(100, 10, 0)),
        NeighborBlock::Unloaded
    );
}

#[test]
fn cooperative_task_matches_synchronous_mesh() {
    let chunk = floor_chunk(ChunkPos::new(0, 0), BlockType::Grass);
    let mesher = ChunkMesher::with_config(
        TileAtlas::default(),
        MesherConfig::default().with_yield_budget(1000),
    );

    let awaited = pollster::block_on(mesher.task(&chunk, &NoNeighbors));
    assert_eq!(awaited, mesher.mesh_chunk(&chunk, &NoNeighbors));

    let mut task: MeshTask<'_, _, _> = mesher.task(&chunk, &NoNeighbors);
    let mut yields = 0;
    while let TaskStep::Yielded = task.step() {
        yields += 1;
    }
    assert!(yields > 0);
    assert_eq!(task.progress().direction, None);
}

#[test]
fn config_and_atlas_load_from_files() {
    let mut config_file = tempfile::NamedTempFile::new().unwrap();
    write!(config_file, r#"{{ "yield_budget": 2048, "world_space": true }}"#).unwrap();
    let config = MesherConfig::from_path(config_file.path()).unwrap();
    assert_eq!(config.yield_budget, 2048);
    assert!(config.world_space);
    assert!(config.world_limit_faces);

    let mut atlas_file = tempfile::NamedTempFile::new().unwrap();
    atlas_file
        .write_all(
            br#"{
                "columns": 4,
                "rows": 4,
                "blocks": { "stone": { "top": 3, "bottom": 3, "side": 5 } }
            }"#,
        )
        .unwrap();
    let atlas = TileAtlas::from_path(atlas_file.path()).unwrap();

    let chunk = floor_chunk(ChunkPos::new(1, 1), BlockType::Stone);
    let geometry = ChunkMesher::with_config(atlas, config).mesh_chunk(&chunk, &NoNeighbors);
    let bounds = geometry.bounds().unwrap();
    assert_eq!(bounds.min, [16.0, 0.0, 16.0]);
    // The up face samples tile 3: the last column of the first row.
    assert!(geometry.uvs()[..8].chunks(2).all(|uv| uv[0] >= 0.75 && uv[1] <= 0.25));
}

#[test]
fn chunks_at_the_coordinate_limit_mesh_without_overflow() {
    let mesher = ChunkMesher::with_config(
        TileAtlas::default(),
        MesherConfig::default().with_world_space(true),
    );

    for x in [ChunkPos::MAX_COORD, -ChunkPos::MAX_COORD] {
        let mut chunk = Chunk::new(ChunkPos::new(x, x));
        chunk.set_block(15, 64, 15, BlockType::Stone);
        let geometry = mesher.mesh_chunk(&chunk, &NoNeighbors);
        assert_eq!(geometry.quad_counts(), [1; 6]);
    }

    // Hand-built positions past the limit wrap instead of overflowing.
    for x in [ChunkPos::MAX_COORD + 1, i32::MAX / 16 + 1, i32::MIN] {
        let mut chunk = Chunk::new(ChunkPos::new(x, 0));
        chunk.set_block(0, 0, 0, BlockType::Stone);
        assert_eq!(mesher.mesh_chunk(&chunk, &NoNeighbors).quad_count(), 6);
    }
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = MesherConfig::from_path(dir.path().join("missing.json"));
    assert!(matches!(result, Err(chunk_mesher::MesherError::Io(_))));
}

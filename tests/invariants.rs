use chunk_mesher::mesher::{merge_slice, MaskEntry, SliceMask};
use chunk_mesher::{
    BlockType, Chunk, ChunkFill, ChunkMap, ChunkMesher, ChunkPos, Direction, NoNeighbors,
};
use proptest::prelude::*;

const PALETTE: [BlockType; 4] = [
    BlockType::Stone,
    BlockType::Dirt,
    BlockType::Glass,
    BlockType::Grass,
];

fn mask_strategy() -> impl Strategy<Value = SliceMask> {
    (1usize..=16, 1usize..=16).prop_flat_map(|(u_len, v_len)| {
        prop::collection::vec((0usize..PALETTE.len(), any::<bool>()), u_len * v_len).prop_map(
            move |cells| {
                let mut mask = SliceMask::new(u_len, v_len);
                for (i, (block, render)) in cells.into_iter().enumerate() {
                    let entry = MaskEntry {
                        block: PALETTE[block],
                        render,
                    };
                    mask.set(i / v_len, i % v_len, entry);
                }
                mask
            },
        )
    })
}

fn fill_strategy() -> impl Strategy<Value = ChunkFill> {
    (
        (0i32..16, 0i32..24, 0i32..16),
        (0i32..16, 0i32..24, 0i32..16),
        0usize..PALETTE.len(),
    )
        .prop_map(|(from, to, block)| {
            ChunkFill::new([from.0, from.1, from.2], [to.0, to.1, to.2], PALETTE[block])
        })
}

fn chunk_strategy() -> impl Strategy<Value = Chunk> {
    prop::collection::vec(fill_strategy(), 0..6).prop_map(|fills| {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        for fill in &fills {
            chunk.fill(fill).unwrap();
        }
        chunk
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rectangles_cover_visible_cells_exactly(mask in mask_strategy()) {
        let original = mask.clone();
        let mut working = mask;
        let quads = merge_slice(&mut working, Direction::Up, 0);

        prop_assert_eq!(working.visible_count(), 0);

        let mut covered = vec![0u32; original.len()];
        for quad in &quads {
            prop_assert!(quad.width >= 1 && quad.height >= 1);
            for u in quad.u..quad.u + quad.width {
                for v in quad.v..quad.v + quad.height {
                    let cell = original.get(u, v);
                    prop_assert!(cell.render);
                    prop_assert_eq!(cell.block, quad.block);
                    covered[u * original.v_len() + v] += 1;
                }
            }
        }
        for u in 0..original.u_len() {
            for v in 0..original.v_len() {
                let expected = u32::from(original.get(u, v).render);
                prop_assert_eq!(covered[u * original.v_len() + v], expected);
            }
        }
    }

    #[test]
    fn merging_is_deterministic(mask in mask_strategy()) {
        let mut a = mask.clone();
        let mut b = mask;
        prop_assert_eq!(
            merge_slice(&mut a, Direction::East, 3),
            merge_slice(&mut b, Direction::East, 3)
        );
    }

    #[test]
    fn indices_reference_distinct_existing_vertices(chunk in chunk_strategy()) {
        let geometry = ChunkMesher::default().mesh_chunk(&chunk, &NoNeighbors);
        let vertex_count = geometry.vertex_count() as u32;

        prop_assert_eq!(geometry.indices().len() % 6, 0);
        prop_assert_eq!(geometry.indices().len() / 6 * 4, geometry.vertex_count());
        prop_assert_eq!(geometry.normals().len(), geometry.positions().len());
        prop_assert_eq!(geometry.colors().len(), geometry.positions().len());
        prop_assert_eq!(geometry.uvs().len(), geometry.vertex_count() * 2);

        for tri in geometry.indices().chunks_exact(3) {
            prop_assert!(tri.iter().all(|&i| i < vertex_count));
            prop_assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
        }
    }

    #[test]
    fn surrounding_chunks_only_remove_faces(chunk in chunk_strategy()) {
        let mut world = ChunkMap::new();
        for (x, z) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            world.insert(Chunk::filled(ChunkPos::new(x, z), BlockType::Stone));
        }

        let mesher = ChunkMesher::default();
        let open = mesher.mesh_chunk(&chunk, &NoNeighbors);
        let closed = mesher.mesh_chunk(&chunk, &world);
        prop_assert!(closed.vertex_count() <= open.vertex_count());
        prop_assert_eq!(open.quads_facing(Direction::Up), closed.quads_facing(Direction::Up));
        prop_assert_eq!(open.quads_facing(Direction::Down), closed.quads_facing(Direction::Down));
    }
}

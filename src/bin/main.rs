//! Chunk Mesher CLI
//!
//! Generate greedy, face-culled meshes from voxel chunk descriptions.

use chunk_mesher::{
    export_glb, export_obj, BlockType, Chunk, ChunkDescription, ChunkFill, ChunkGeometry,
    ChunkMap, ChunkMesher, ChunkPos, Direction, MesherConfig, TileAtlas,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chunk-mesher")]
#[command(author, version, about = "Generate greedy meshes from voxel chunks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mesh a chunk from a JSON description
    Mesh {
        /// Chunk description (position plus box fills)
        #[arg(short, long)]
        input: PathBuf,

        /// Descriptions of loaded neighbor chunks
        #[arg(short, long)]
        neighbor: Vec<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "glb")]
        format: OutputFormat,

        /// Mesher configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Texture atlas JSON
        #[arg(short, long)]
        atlas: Option<PathBuf>,
    },

    /// Mesh a built-in test scene
    Demo {
        #[arg(short, long, value_enum, default_value = "terrain")]
        scene: Scene,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "glb")]
        format: OutputFormat,
    },

    /// Print per-direction quad counts for a chunk
    Info {
        /// Chunk description (position plus box fills)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Binary glTF format
    Glb,
    /// Wavefront OBJ format
    Obj,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Scene {
    /// One layer of stone at y = 0
    Floor,
    /// Every voxel stone
    Filled,
    /// Rolling grass hills over stone, with water in the valleys
    Terrain,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Mesh {
            input,
            neighbor,
            output,
            format,
            config,
            atlas,
        } => {
            mesh_from_json(
                &input,
                &neighbor,
                &output,
                format,
                config.as_deref(),
                atlas.as_deref(),
            )?;
        }
        Commands::Demo {
            scene,
            output,
            format,
        } => {
            let chunk = demo_chunk(scene)?;
            let mesher = ChunkMesher::default();
            let geometry = mesher.mesh_chunk(&chunk, &ChunkMap::new());
            print_summary(&geometry);
            export_geometry(&geometry, &output, format, "demo")?;
        }
        Commands::Info { input } => {
            let chunk = load_chunk(&input)?;
            println!(
                "Chunk ({}, {}): {} non-air blocks",
                chunk.pos().x,
                chunk.pos().z,
                chunk.non_air_count()
            );
            let geometry = ChunkMesher::default().mesh_chunk(&chunk, &ChunkMap::new());
            print_summary(&geometry);
        }
    }

    Ok(())
}

fn load_chunk(path: &Path) -> Result<Chunk, Box<dyn std::error::Error>> {
    println!("Loading chunk from {:?}...", path);
    let json = fs::read_to_string(path)?;
    Ok(ChunkDescription::from_json(&json)?.build()?)
}

fn mesh_from_json(
    input_path: &Path,
    neighbor_paths: &[PathBuf],
    output_path: &Path,
    format: OutputFormat,
    config_path: Option<&Path>,
    atlas_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunk = load_chunk(input_path)?;

    let mut world = ChunkMap::new();
    for path in neighbor_paths {
        world.insert(load_chunk(path)?);
    }
    println!("  {} neighbor chunks loaded", world.len());

    let config = match config_path {
        Some(path) => MesherConfig::from_path(path)?,
        None => MesherConfig::default(),
    };
    let atlas = match atlas_path {
        Some(path) => TileAtlas::from_path(path)?,
        None => TileAtlas::default(),
    };

    println!("Meshing with config:");
    println!("  - Yield budget: {} cells", config.yield_budget);
    println!("  - World limit faces: {}", config.world_limit_faces);
    println!("  - World space: {}", config.world_space);
    println!("  - Atlas: {}x{} tiles", atlas.columns, atlas.rows);

    let mesher = ChunkMesher::with_config(atlas, config);
    let geometry = mesher.mesh_chunk(&chunk, &world);
    print_summary(&geometry);

    export_geometry(&geometry, output_path, format, "chunk")
}

fn print_summary(geometry: &ChunkGeometry) {
    println!(
        "  Generated {} quads, {} vertices, {} triangles",
        geometry.quad_count(),
        geometry.vertex_count(),
        geometry.triangle_count()
    );
    for direction in Direction::ALL {
        println!("    {:<5} {}", direction, geometry.quads_facing(direction));
    }
}

fn export_geometry(
    geometry: &ChunkGeometry,
    path: &Path,
    format: OutputFormat,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Glb => {
            let glb_path = if path.extension().is_some() {
                path.to_path_buf()
            } else {
                path.with_extension("glb")
            };
            let glb_data = export_glb(geometry)?;
            fs::write(&glb_path, &glb_data)?;
            println!("Exported GLB ({} bytes) to {:?}", glb_data.len(), glb_path);
        }
        OutputFormat::Obj => {
            let obj_path = if path.extension().is_some() {
                path.to_path_buf()
            } else {
                path.with_extension("obj")
            };
            let stem = obj_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(name)
                .to_string();
            let export = export_obj(geometry, &stem)?;
            let mtl_path = obj_path.with_extension("mtl");

            fs::write(&obj_path, &export.obj)?;
            fs::write(&mtl_path, &export.mtl)?;

            println!("Exported OBJ to {:?}", obj_path);
            println!("  Material: {:?}", mtl_path);
        }
    }

    Ok(())
}

fn demo_chunk(scene: Scene) -> chunk_mesher::Result<Chunk> {
    let pos = ChunkPos::new(0, 0);
    match scene {
        Scene::Floor => {
            let mut chunk = Chunk::new(pos);
            chunk.fill(&ChunkFill::new([0, 0, 0], [15, 0, 15], BlockType::Stone))?;
            Ok(chunk)
        }
        Scene::Filled => Ok(Chunk::filled(pos, BlockType::Stone)),
        Scene::Terrain => {
            const SEA_LEVEL: i32 = 62;
            let mut chunk = Chunk::new(pos);
            chunk.fill(&ChunkFill::new([0, 0, 0], [15, 0, 15], BlockType::Bedrock))?;
            for x in 0..16 {
                for z in 0..16 {
                    let (fx, fz) = (x as f32, z as f32);
                    let height = 60 + ((fx * 0.4).sin() * 4.0 + (fz * 0.3).cos() * 3.0) as i32;
                    let column = |from: i32, to: i32, block: BlockType| {
                        ChunkFill::new([x, from, z], [x, to, z], block)
                    };
                    chunk.fill(&column(1, height - 4, BlockType::Stone))?;
                    chunk.fill(&column(height - 3, height - 1, BlockType::Dirt))?;
                    let top = if height <= SEA_LEVEL { BlockType::Sand } else { BlockType::Grass };
                    chunk.set_block(x, height, z, top);
                    if height < SEA_LEVEL {
                        chunk.fill(&column(height + 1, SEA_LEVEL, BlockType::Water))?;
                    }
                }
            }
            Ok(chunk)
        }
    }
}

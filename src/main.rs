//! Demo driver: generates a small voxel world, meshes every chunk through the
//! background pipeline and reports what came out.

mod config;
mod terrain;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use hashbrown::HashSet;

use stein_cells::MaterialCatalog;
use stein_chunk::GridStore;
use stein_runtime::{MeshPipeline, MeshResult};
use stein_world::{ChunkCoord, RegionLattice, VoxelSource};

use crate::config::DemoConfig;
use crate::terrain::TerrainGen;

const DEFAULT_CONFIG_PATH: &str = "assets/demo.toml";
const SURFACES_PATH: &str = "assets/surfaces.toml";
const BUILT_IN_SURFACES: &str = include_str!("../assets/surfaces.toml");

const RESULT_POLL: Duration = Duration::from_millis(10);
const MESH_DEADLINE: Duration = Duration::from_secs(120);

#[derive(Parser, Debug)]
#[command(name = "stein", about = "Voxel chunk meshing demo")]
struct Args {
    /// Path to a demo config TOML; defaults to assets/demo.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the meshed area side length, in chunks.
    #[arg(long)]
    chunks: Option<u32>,
    /// Override the terrain seed.
    #[arg(long)]
    seed: Option<u32>,
    /// Print per-chunk mesh statistics to stdout.
    #[arg(long)]
    stats: bool,
}

fn load_config(args: &Args) -> DemoConfig {
    let mut cfg = match &args.config {
        Some(path) => match DemoConfig::from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("failed to load config {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                match DemoConfig::from_path(path) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        log::error!("failed to load config {}: {}", path.display(), e);
                        process::exit(1);
                    }
                }
            } else {
                log::warn!(
                    "no config at {}; using built-in defaults",
                    DEFAULT_CONFIG_PATH
                );
                DemoConfig::default()
            }
        }
    };
    if let Some(chunks) = args.chunks {
        cfg.world.chunks = chunks;
    }
    if let Some(seed) = args.seed {
        cfg.terrain.seed = seed;
    }
    cfg
}

fn load_surfaces() -> MaterialCatalog {
    let path = Path::new(SURFACES_PATH);
    if path.exists() {
        match MaterialCatalog::from_path(path) {
            Ok(catalog) => {
                log::info!(
                    "loaded {} surface materials from {}",
                    catalog.default_count(),
                    SURFACES_PATH
                );
                return catalog;
            }
            Err(e) => log::warn!(
                "failed to load {}: {}; falling back to the built-in table",
                SURFACES_PATH,
                e
            ),
        }
    }
    match MaterialCatalog::from_toml_str(BUILT_IN_SURFACES) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("built-in surface table failed to parse: {}", e);
            process::exit(1);
        }
    }
}

fn report_result(res: &MeshResult, to_stdout: bool) {
    let mesh = &res.mesh;
    if to_stdout {
        println!(
            "chunk ({:>3},{:>3}) surfaces={} verts={} tris={} collision={} ms={} attempts={} {:?}",
            res.coord.cx,
            res.coord.cz,
            mesh.surfaces.len(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.collision_triangle_count(),
            res.t_mesh_ms,
            res.attempts,
            res.occupancy,
        );
    } else {
        log::info!(
            "meshed chunk ({}, {}): {} surfaces, {} verts, {} tris in {} ms",
            res.coord.cx,
            res.coord.cz,
            mesh.surfaces.len(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            res.t_mesh_ms,
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let cfg = load_config(&args);
    let n = cfg.world.chunks.max(1) as i32;
    log::info!(
        "meshing a {}x{} chunk area (chunk_size={} height={} seed={})",
        n,
        n,
        cfg.world.chunk_size,
        cfg.world.height,
        cfg.terrain.seed
    );

    let catalog = load_surfaces();
    let generator = TerrainGen::new(&cfg);
    let store = Arc::new(GridStore::new(cfg.world.chunk_size, cfg.world.height));
    let source: Arc<dyn VoxelSource> = store.clone();
    let regions = Arc::new(RegionLattice::new(
        cfg.regions.tile_span,
        cfg.regions.classes,
        cfg.terrain.seed,
    ));
    let pipeline = MeshPipeline::new(source, regions, Arc::new(catalog), cfg.depth_budget());

    // A one-chunk apron around the meshed area keeps the neighbor gate open at
    // the rim. Interior chunks are queued as soon as they exist, so the worker
    // races generation and the earliest chunks spin on the gate until their
    // neighborhood fills in.
    let t_gen = Instant::now();
    let mut expected = 0usize;
    for cz in -1..=n {
        for cx in -1..=n {
            let coord = ChunkCoord::new(cx, cz);
            let grid = Arc::new(generator.generate_chunk(coord));
            store.insert(grid.clone());
            if cx >= 0 && cx < n && cz >= 0 && cz < n {
                pipeline.enqueue(grid);
                expected += 1;
            }
        }
    }
    let gen_ms = t_gen.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::info!(
        "generated {} chunks ({} queued for meshing) in {} ms",
        (n + 2) * (n + 2),
        expected,
        gen_ms
    );

    let t_mesh = Instant::now();
    let mut completed: HashSet<ChunkCoord> = HashSet::new();
    let mut total_surfaces = 0usize;
    let mut total_verts = 0usize;
    let mut total_tris = 0usize;
    let mut total_collision = 0usize;
    while completed.len() < expected {
        if t_mesh.elapsed() > MESH_DEADLINE {
            log::error!(
                "meshing stalled: {} of {} chunks after {:?}",
                completed.len(),
                expected,
                MESH_DEADLINE
            );
            process::exit(1);
        }
        let results = pipeline.drain_results();
        if results.is_empty() {
            thread::sleep(RESULT_POLL);
            continue;
        }
        for res in results {
            report_result(&res, args.stats);
            total_surfaces += res.mesh.surfaces.len();
            total_verts += res.mesh.vertex_count();
            total_tris += res.mesh.triangle_count();
            total_collision += res.mesh.collision_triangle_count();
            completed.insert(res.coord);
        }
    }
    let mesh_ms = t_mesh.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::info!(
        "meshed {} chunks in {} ms: {} surfaces, {} verts, {} tris, {} collision tris",
        completed.len(),
        mesh_ms,
        total_surfaces,
        total_verts,
        total_tris,
        total_collision
    );
}

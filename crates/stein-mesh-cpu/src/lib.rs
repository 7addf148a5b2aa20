//! CPU chunk meshing: turns voxel grids into grouped render surfaces and a
//! flat collision list, with cross-chunk face culling and vertex occlusion.
#![forbid(unsafe_code)]

mod assemble;
mod chunk;
mod config;
mod constants;
mod extract;
mod face;
mod mesh_data;
mod occlusion;
mod parity;
mod util;

pub use assemble::{assemble_chunk_mesh, chunk_bounds};
pub use chunk::{ChunkMesh, ChunkSurface, SurfaceKey};
pub use config::DepthBudget;
pub use extract::extract_chunk_surfaces;
pub use face::Face;
pub use mesh_data::MeshData;
pub use occlusion::{BRIGHTNESS_BY_LEVEL, brightness_for, occlusion_level};
pub use parity::seam_parity;

use std::time::Instant;

use stein_chunk::ChunkGrid;
use stein_world::{MaterialBank, RegionMap, VoxelSource};

/// Extracts and assembles one chunk in a single call.
pub fn build_chunk_mesh(
    grid: &ChunkGrid,
    source: &dyn VoxelSource,
    regions: &dyn RegionMap,
    materials: &dyn MaterialBank,
    depths: DepthBudget,
) -> ChunkMesh {
    let t_start = Instant::now();
    let builds = extract_chunk_surfaces(grid, source, regions, depths);
    let t_extract = t_start.elapsed().as_millis() as u32;
    let mesh = assemble_chunk_mesh(grid, builds, materials);
    let t_total = t_start.elapsed().as_millis() as u32;
    log_mesher_perf(grid, &mesh, t_extract, t_total);
    mesh
}

fn log_mesher_perf(grid: &ChunkGrid, mesh: &ChunkMesh, extract_ms: u32, total_ms: u32) {
    log::info!(
        target: "perf",
        "ms extract={} assemble={} total={} mesher surfaces={} verts={} tris={} s={} cx={} cz={}",
        extract_ms,
        total_ms.saturating_sub(extract_ms),
        total_ms,
        mesh.surfaces.len(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        grid.size,
        grid.coord.cx,
        grid.coord.cz,
    );
}

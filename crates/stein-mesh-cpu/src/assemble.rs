use std::collections::HashMap;

use stein_chunk::ChunkGrid;
use stein_geom::{Aabb, Vec3};
use stein_world::MaterialBank;

use crate::chunk::{ChunkMesh, ChunkSurface, SurfaceKey};
use crate::mesh_data::MeshData;

/// Folds extracted geometry groups into a finished [`ChunkMesh`].
///
/// Groups come out in key order so the surface list is deterministic across
/// runs. Groups that emitted nothing are dropped rather than published as
/// empty surfaces.
pub fn assemble_chunk_mesh(
    grid: &ChunkGrid,
    builds: HashMap<SurfaceKey, MeshData>,
    materials: &dyn MaterialBank,
) -> ChunkMesh {
    let mut builds = builds;
    let mut keys: Vec<SurfaceKey> = builds.keys().copied().collect();
    keys.sort();
    let mut surfaces = Vec::with_capacity(keys.len());
    let mut collision = Vec::new();
    for key in keys {
        let Some(data) = builds.remove(&key) else {
            continue;
        };
        if data.is_empty() {
            continue;
        }
        append_collision_triangles(&mut collision, &data, key);
        surfaces.push(ChunkSurface {
            name: surface_name(key),
            material: materials.material_for(key.region, key.cell),
            data,
        });
    }
    ChunkMesh {
        coord: grid.coord,
        bbox: chunk_bounds(grid),
        surfaces,
        collision,
    }
}

/// Stable per-group surface name, e.g. `grass_2`.
fn surface_name(key: SurfaceKey) -> String {
    format!("{}_{}", key.cell.name(), key.region.0)
}

/// World-space bounds of the whole chunk volume. Every emitted vertex lies
/// inside its cell's box, so the chunk extent covers all surfaces.
pub fn chunk_bounds(grid: &ChunkGrid) -> Aabb {
    let s = grid.scale;
    let min = Vec3::new(grid.base_wx() as f32, 0.0, grid.base_wz() as f32) * s;
    let max = Vec3::new(
        (grid.base_wx() + grid.size as i32) as f32,
        grid.height as f32,
        (grid.base_wz() + grid.size as i32) as f32,
    ) * s;
    Aabb::new(min, max)
}

// Dereferences a group's triangles into the flat collision soup. A triangle
// pointing past the group's vertex range means the builder miscounted
// somewhere upstream; drop it and leave a trace instead of faulting.
fn append_collision_triangles(out: &mut Vec<Vec3>, data: &MeshData, key: SurfaceKey) {
    let vcount = data.vertex_count();
    for tri in data.idx.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if a >= vcount || b >= vcount || c >= vcount {
            log::warn!(
                "dropping collision triangle with out-of-range index in group {} ({} verts)",
                surface_name(key),
                vcount
            );
            continue;
        }
        out.push(position_at(data, a));
        out.push(position_at(data, b));
        out.push(position_at(data, c));
    }
}

#[inline]
fn position_at(data: &MeshData, i: usize) -> Vec3 {
    Vec3::new(data.pos[i * 3], data.pos[i * 3 + 1], data.pos[i * 3 + 2])
}

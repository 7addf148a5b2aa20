use crate::mesh_data::MeshData;
use stein_cells::{CellType, MaterialHandle, RegionClass};
use stein_geom::{Aabb, Vec3};
use stein_world::ChunkCoord;

/// What a run of geometry is made of and where. One key per render batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceKey {
    pub region: RegionClass,
    pub cell: CellType,
}

impl SurfaceKey {
    #[inline]
    pub fn new(region: RegionClass, cell: CellType) -> Self {
        Self { region, cell }
    }
}

/// One renderable batch: a stable name for debugging, the material to bind,
/// and the vertex data itself.
#[derive(Clone, Debug)]
pub struct ChunkSurface {
    pub name: String,
    pub material: MaterialHandle,
    pub data: MeshData,
}

/// Finished mesh for one chunk: grouped render surfaces plus a flat
/// triangle-soup position list for collision.
#[derive(Clone, Debug)]
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    pub surfaces: Vec<ChunkSurface>,
    pub collision: Vec<Vec3>,
}

impl ChunkMesh {
    pub fn empty(coord: ChunkCoord, bbox: Aabb) -> Self {
        Self {
            coord,
            bbox,
            surfaces: Vec::new(),
            collision: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.data.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.data.triangle_count()).sum()
    }

    #[inline]
    pub fn collision_triangle_count(&self) -> usize {
        self.collision.len() / 3
    }
}

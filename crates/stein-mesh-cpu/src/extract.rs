use std::collections::HashMap;

use stein_cells::CellType;
use stein_chunk::ChunkGrid;
use stein_geom::Vec3;
use stein_world::{RegionMap, VoxelSource};

use crate::chunk::SurfaceKey;
use crate::config::DepthBudget;
use crate::constants::GROUP_QUAD_RESERVE;
use crate::face::Face;
use crate::mesh_data::MeshData;
use crate::occlusion::{brightness_for, occlusion_level};
use crate::parity::seam_parity;
use crate::util::Bitset;

/// Extracts the visible faces of one chunk into per-key geometry groups.
///
/// Runs two passes over the grid. The terrain pass walks each column top-down
/// from its surface cell to a class-dependent depth, covering the open-sky
/// geometry that dominates typical chunks. The remainder pass then sweeps the
/// whole volume for anything the first pass did not claim, so overhangs,
/// caves and floating cells still mesh no matter how shallow the budgets are.
pub fn extract_chunk_surfaces(
    grid: &ChunkGrid,
    source: &dyn VoxelSource,
    regions: &dyn RegionMap,
    depths: DepthBudget,
) -> HashMap<SurfaceKey, MeshData> {
    let ctx = MeshCtx {
        grid,
        source,
        regions,
        depths,
    };
    let mut processed = Bitset::new(grid.size * grid.height * grid.size);
    let mut builds = HashMap::new();
    ctx.terrain_pass(&mut processed, &mut builds);
    ctx.remainder_pass(&processed, &mut builds);
    builds
}

// Read-only sampling context shared by both passes.
struct MeshCtx<'a> {
    grid: &'a ChunkGrid,
    source: &'a dyn VoxelSource,
    regions: &'a dyn RegionMap,
    depths: DepthBudget,
}

impl MeshCtx<'_> {
    #[inline]
    fn world_of(&self, x: usize, y: usize, z: usize) -> (i32, i32, i32) {
        (
            self.grid.base_wx() + x as i32,
            y as i32,
            self.grid.base_wz() + z as i32,
        )
    }

    /// Solidity at an absolute world position. Below the floor counts as
    /// solid bedrock, above the ceiling as open air. Inside this chunk the
    /// local grid answers directly; everything else goes to the source.
    fn solid_at(&self, wx: i32, wy: i32, wz: i32) -> bool {
        if wy < 0 {
            return true;
        }
        if wy >= self.grid.height as i32 {
            return false;
        }
        if let Some(cell) = self.grid.get_world(wx, wy, wz) {
            return cell.is_solid();
        }
        self.source.is_solid(wx, wy, wz)
    }

    fn fully_occluded(&self, wx: i32, wy: i32, wz: i32) -> bool {
        Face::ALL.iter().all(|f| {
            let (dx, dy, dz) = f.delta();
            self.solid_at(wx + dx, wy + dy, wz + dz)
        })
    }

    fn at_grid_boundary(&self, x: usize, y: usize, z: usize, face: Face) -> bool {
        let last = self.grid.size - 1;
        match face {
            Face::PosY => y == self.grid.height - 1,
            Face::NegY => y == 0,
            Face::PosX => x == last,
            Face::NegX => x == 0,
            Face::PosZ => z == last,
            Face::NegZ => z == 0,
        }
    }

    /// A face renders when it sits on the chunk boundary or its neighbor cell
    /// is not solid. Boundary faces always emit; the overdraw under a loaded
    /// neighbor is bounded and keeps chunk meshes valid on their own when the
    /// neighbor unloads.
    fn face_visible(&self, x: usize, y: usize, z: usize, face: Face) -> bool {
        if self.at_grid_boundary(x, y, z, face) {
            return true;
        }
        let (dx, dy, dz) = face.delta();
        let (wx, wy, wz) = self.world_of(x, y, z);
        !self.solid_at(wx + dx, wy + dy, wz + dz)
    }

    /// Brightness of one face vertex from the three cells that touch it in
    /// the sample layer one step out along the face normal.
    fn vertex_brightness(&self, wx: i32, wy: i32, wz: i32, face: Face, corner: [i32; 3]) -> f32 {
        let (dx, dy, dz) = face.delta();
        let bx = wx + dx;
        let by = wy + dy;
        let bz = wz + dz;
        // Tangent steps point toward this corner on the two non-normal axes.
        let sx = corner[0] * 2 - 1;
        let sy = corner[1] * 2 - 1;
        let sz = corner[2] * 2 - 1;
        let (t1, t2) = if dx != 0 {
            ((0, sy, 0), (0, 0, sz))
        } else if dy != 0 {
            ((sx, 0, 0), (0, 0, sz))
        } else {
            ((sx, 0, 0), (0, sy, 0))
        };
        let side1 = self.solid_at(bx + t1.0, by + t1.1, bz + t1.2);
        let side2 = self.solid_at(bx + t2.0, by + t2.1, bz + t2.2);
        let across = self.solid_at(bx + t1.0 + t2.0, by + t1.1 + t2.1, bz + t1.2 + t2.2);
        brightness_for(occlusion_level(side1, side2, across))
    }

    fn emit_cell(
        &self,
        builds: &mut HashMap<SurfaceKey, MeshData>,
        x: usize,
        y: usize,
        z: usize,
        cell: CellType,
    ) {
        let (wx, wy, wz) = self.world_of(x, y, z);
        let region = self.regions.region_at(wx, wz);
        let key = SurfaceKey::new(region, cell);
        let flip = seam_parity(wx, wz);
        let scale = self.grid.scale;
        let build = builds.entry(key).or_insert_with(|| {
            let mut m = MeshData::default();
            m.reserve_quads(GROUP_QUAD_RESERVE);
            m
        });
        for face in Face::ALL {
            if !self.face_visible(x, y, z, face) {
                continue;
            }
            let mut pos = [Vec3::ZERO; 4];
            let mut uvs = [(0.0f32, 0.0f32); 4];
            let mut occ = [0.0f32; 4];
            for (i, c) in face.corners().iter().enumerate() {
                let p = Vec3::new(
                    (wx + c[0]) as f32,
                    (wy + c[1]) as f32,
                    (wz + c[2]) as f32,
                ) * scale;
                pos[i] = p;
                uvs[i] = face.uv_project(p);
                occ[i] = self.vertex_brightness(wx, wy, wz, face, *c);
            }
            build.add_quad(pos, face.normal(), uvs, occ, flip);
        }
    }

    /// First pass: per-column scan from the surface cell down to the budget
    /// for its class. Water does not count as a surface, so submerged floors
    /// still anchor their column here.
    fn terrain_pass(&self, processed: &mut Bitset, builds: &mut HashMap<SurfaceKey, MeshData>) {
        let s = self.grid.size;
        let h = self.grid.height;
        for z in 0..s {
            for x in 0..s {
                let mut surface = None;
                for y in (0..h).rev() {
                    let cell = self.grid.get_local(x, y, z);
                    if !cell.is_empty() && !cell.is_water() {
                        surface = Some((y, cell));
                        break;
                    }
                }
                let Some((sy, surface_cell)) = surface else {
                    continue;
                };
                let depth = self.depths.depth_for(surface_cell.surface_class());
                let floor = if depth == 0 {
                    0
                } else {
                    sy.saturating_sub(depth as usize)
                };
                for y in (floor..=sy).rev() {
                    let cell = self.grid.get_local(x, y, z);
                    if cell.is_empty() {
                        continue;
                    }
                    processed.set(self.grid.idx(x, y, z));
                    let (wx, wy, wz) = self.world_of(x, y, z);
                    if self.fully_occluded(wx, wy, wz) {
                        continue;
                    }
                    self.emit_cell(builds, x, y, z, cell);
                }
            }
        }
    }

    /// Second pass: exhaustive sweep over everything the terrain pass left
    /// unclaimed. Visits cells in linear storage order.
    fn remainder_pass(&self, processed: &Bitset, builds: &mut HashMap<SurfaceKey, MeshData>) {
        let s = self.grid.size;
        let h = self.grid.height;
        for y in 0..h {
            for z in 0..s {
                for x in 0..s {
                    if processed.get(self.grid.idx(x, y, z)) {
                        continue;
                    }
                    let cell = self.grid.get_local(x, y, z);
                    if cell.is_empty() {
                        continue;
                    }
                    let (wx, wy, wz) = self.world_of(x, y, z);
                    if self.fully_occluded(wx, wy, wz) {
                        continue;
                    }
                    self.emit_cell(builds, x, y, z, cell);
                }
            }
        }
    }
}

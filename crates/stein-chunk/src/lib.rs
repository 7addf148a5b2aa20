//! Per-chunk voxel grid and the in-memory chunk registry.
#![forbid(unsafe_code)]

mod store;

pub use store::GridStore;

use stein_cells::CellType;
use stein_world::ChunkCoord;

/// Dense cell grid for one chunk: `size × height × size` cells, full world
/// height, laid out as `(y * size + z) * size + x`.
///
/// Grids are filled by the terrain generator, then handed to the meshing
/// pipeline behind `Arc` and treated as read-only from that point on.
#[derive(Clone, Debug)]
pub struct ChunkGrid {
    pub coord: ChunkCoord,
    pub size: usize,
    pub height: usize,
    pub scale: f32,
    pub cells: Vec<CellType>,
}

impl ChunkGrid {
    /// Air-filled grid.
    pub fn new(coord: ChunkCoord, size: usize, height: usize, scale: f32) -> Self {
        Self {
            coord,
            size,
            height,
            scale,
            cells: vec![CellType::Air; size * height * size],
        }
    }

    /// Builds a grid from pre-filled local cells; a wrong-length vector is
    /// resized with air rather than rejected.
    pub fn from_cells_local(
        coord: ChunkCoord,
        size: usize,
        height: usize,
        scale: f32,
        cells: Vec<CellType>,
    ) -> Self {
        let mut cells = cells;
        let expect = size * height * size;
        if cells.len() != expect {
            cells.resize(expect, CellType::Air);
        }
        Self {
            coord,
            size,
            height,
            scale,
            cells,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.size + z) * self.size + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> CellType {
        self.cells[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, cell: CellType) {
        let i = self.idx(x, y, z);
        self.cells[i] = cell;
    }

    /// World x of local x = 0.
    #[inline]
    pub fn base_wx(&self) -> i32 {
        self.coord.cx * self.size as i32
    }

    /// World z of local z = 0.
    #[inline]
    pub fn base_wz(&self) -> i32 {
        self.coord.cz * self.size as i32
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        if wy < 0 || wy >= self.height as i32 {
            return false;
        }
        let bx = self.base_wx();
        let bz = self.base_wz();
        wx >= bx && wx < bx + self.size as i32 && wz >= bz && wz < bz + self.size as i32
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<CellType> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let lx = (wx - self.base_wx()) as usize;
        let ly = wy as usize;
        let lz = (wz - self.base_wz()) as usize;
        Some(self.get_local(lx, ly, lz))
    }

    #[inline]
    pub fn has_any_cells(&self) -> bool {
        self.cells.iter().any(|c| !c.is_empty())
    }

    #[inline]
    pub fn occupancy(&self) -> ChunkOccupancy {
        if self.has_any_cells() {
            ChunkOccupancy::Populated
        } else {
            ChunkOccupancy::Empty
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkOccupancy {
    Empty,
    Populated,
}

impl ChunkOccupancy {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, ChunkOccupancy::Empty)
    }

    #[inline]
    pub fn has_cells(self) -> bool {
        matches!(self, ChunkOccupancy::Populated)
    }
}

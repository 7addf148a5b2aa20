use std::sync::{Arc, RwLock};

use hashbrown::HashMap;
use stein_cells::CellType;
use stein_world::{ChunkCoord, VoxelSource};

use crate::ChunkGrid;

/// Thread-safe in-memory chunk registry keyed by chunk coordinate.
///
/// Serves as the voxel source for meshing: the generator inserts finished
/// grids, the worker samples across chunk boundaries through it. Space with no
/// registered chunk reads as air.
pub struct GridStore {
    size: usize,
    height: usize,
    chunks: RwLock<HashMap<ChunkCoord, Arc<ChunkGrid>>>,
}

impl GridStore {
    /// `size`/`height` fix the chunk dimensions this store indexes by; every
    /// inserted grid is expected to share them.
    pub fn new(size: usize, height: usize) -> Self {
        Self {
            size,
            height,
            chunks: RwLock::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn world_height(&self) -> usize {
        self.height
    }

    pub fn insert(&self, grid: Arc<ChunkGrid>) {
        if let Ok(mut chunks) = self.chunks.write() {
            chunks.insert(grid.coord, grid);
        }
    }

    pub fn remove(&self, coord: ChunkCoord) -> Option<Arc<ChunkGrid>> {
        if let Ok(mut chunks) = self.chunks.write() {
            chunks.remove(&coord)
        } else {
            None
        }
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<Arc<ChunkGrid>> {
        if let Ok(chunks) = self.chunks.read() {
            chunks.get(&coord).cloned()
        } else {
            None
        }
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        if let Ok(chunks) = self.chunks.read() {
            chunks.contains_key(&coord)
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn coord_of(&self, wx: i32, wz: i32) -> ChunkCoord {
        let s = self.size as i32;
        ChunkCoord::new(wx.div_euclid(s), wz.div_euclid(s))
    }
}

impl VoxelSource for GridStore {
    #[inline]
    fn has_chunk_data(&self, coord: ChunkCoord) -> bool {
        self.contains(coord)
    }

    fn cell_at(&self, wx: i32, wy: i32, wz: i32) -> CellType {
        if wy < 0 || wy >= self.height as i32 {
            return CellType::Air;
        }
        match self.get(self.coord_of(wx, wz)) {
            Some(grid) => grid.get_world(wx, wy, wz).unwrap_or(CellType::Air),
            None => CellType::Air,
        }
    }
}

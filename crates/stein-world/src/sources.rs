use stein_cells::{CellType, MaterialCatalog, MaterialHandle, RegionClass};

use crate::coord::ChunkCoord;

/// Read access to voxel data by absolute world coordinate, spanning chunk
/// boundaries. Implementations must answer for any coordinate; space with no
/// registered data reads as air.
pub trait VoxelSource: Send + Sync {
    /// Whether voxel data exists for the chunk at `coord`. Used only by the
    /// 8-neighbor readiness gate.
    fn has_chunk_data(&self, coord: ChunkCoord) -> bool;

    /// Cell type at an absolute world coordinate.
    fn cell_at(&self, wx: i32, wy: i32, wz: i32) -> CellType;

    /// Solidity at an absolute world coordinate. The default follows the cell
    /// type; implementations only override this when solidity is cheaper to
    /// answer than the full cell lookup.
    #[inline]
    fn is_solid(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.cell_at(wx, wy, wz).is_solid()
    }
}

/// Classifies world columns into opaque region keys used to partition output
/// surfaces. Must be a pure function of the coordinates so adjacent chunks
/// agree about columns on their shared boundary.
pub trait RegionMap: Send + Sync {
    fn region_at(&self, wx: i32, wz: i32) -> RegionClass;
}

/// Resolves the opaque material handle attached to each assembled surface.
pub trait MaterialBank: Send + Sync {
    fn material_for(&self, region: RegionClass, cell: CellType) -> MaterialHandle;
}

impl MaterialBank for MaterialCatalog {
    #[inline]
    fn material_for(&self, region: RegionClass, cell: CellType) -> MaterialHandle {
        self.lookup(region, cell)
    }
}

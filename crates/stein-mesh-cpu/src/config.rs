use stein_cells::SurfaceClass;

/// How far below a column's surface cell the terrain pass scans, per surface
/// class. A budget of 0 means the whole column.
///
/// The remainder pass picks up anything a shallow budget misses, so these
/// only trade first-pass coverage against scan cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthBudget {
    pub structural: u32,
    pub ground_cover: u32,
    pub terrain: u32,
}

impl Default for DepthBudget {
    fn default() -> Self {
        Self {
            structural: 0,
            ground_cover: 3,
            terrain: 1,
        }
    }
}

impl DepthBudget {
    #[inline]
    pub fn depth_for(&self, class: SurfaceClass) -> u32 {
        match class {
            SurfaceClass::Structural => self.structural,
            SurfaceClass::GroundCover => self.ground_cover,
            SurfaceClass::Terrain => self.terrain,
        }
    }
}

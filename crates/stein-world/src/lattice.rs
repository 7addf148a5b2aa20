use stein_cells::RegionClass;

use crate::sources::RegionMap;

/// Seeded region classifier over a coarse square lattice.
///
/// The world is cut into `tile_span`-wide tiles and each tile hashes to one of
/// `classes` region keys. Purely a function of world coordinates and seed, so
/// both chunks adjacent to a boundary column classify it identically.
#[derive(Clone, Copy, Debug)]
pub struct RegionLattice {
    tile_span: i32,
    classes: u16,
    seed: u32,
}

impl RegionLattice {
    pub fn new(tile_span: i32, classes: u16, seed: u32) -> Self {
        Self {
            tile_span: tile_span.max(1),
            classes: classes.max(1),
            seed,
        }
    }
}

impl RegionMap for RegionLattice {
    #[inline]
    fn region_at(&self, wx: i32, wz: i32) -> RegionClass {
        let qx = wx.div_euclid(self.tile_span);
        let qz = wz.div_euclid(self.tile_span);
        let h = hash2(qx, qz, self.seed);
        RegionClass((h % u32::from(self.classes)) as u16)
    }
}

fn hash2(ix: i32, iz: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

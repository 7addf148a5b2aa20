use serde::{Deserialize, Serialize};

/// 2-D chunk coordinate. Chunks span the full world height, so there is no
/// vertical component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dz * dz
    }

    /// The 4 orthogonal + 4 diagonal neighbors, the set the meshing gate
    /// requires to be present.
    #[inline]
    pub fn neighbors8(self) -> [ChunkCoord; 8] {
        [
            self.offset(-1, -1),
            self.offset(0, -1),
            self.offset(1, -1),
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(-1, 1),
            self.offset(0, 1),
            self.offset(1, 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors8_excludes_self_and_has_no_duplicates() {
        let c = ChunkCoord::new(-3, 7);
        let n = c.neighbors8();
        assert_eq!(n.len(), 8);
        for (i, a) in n.iter().enumerate() {
            assert_ne!(*a, c);
            assert_eq!(a.distance_sq(c), if a.cx != c.cx && a.cz != c.cz { 2 } else { 1 });
            for b in &n[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

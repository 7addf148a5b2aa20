use stein_geom::Vec3;

/// Flat vertex and index buffers for one surface group.
///
/// Layout matches what a GPU upload wants: `pos`/`norm` hold three floats per
/// vertex, `uv` two, `occlusion` one brightness multiplier per vertex, and
/// `idx` indexes triangles into those shared vertices.
#[derive(Default, Clone, Debug)]
pub struct MeshData {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub occlusion: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.occlusion.clear();
        self.idx.clear();
    }

    pub fn reserve_quads(&mut self, quads: usize) {
        self.pos.reserve(quads * 12);
        self.norm.reserve(quads * 12);
        self.uv.reserve(quads * 8);
        self.occlusion.reserve(quads * 4);
        self.idx.reserve(quads * 6);
    }

    /// Appends one quad as four vertices and two triangles.
    ///
    /// Corners must be coplanar and convex in cyclic order; if they wind away
    /// from `n` the order is repaired by swapping the second and fourth
    /// corner (and their attributes) so the emitted triangles always face the
    /// normal. `flip_diagonal` selects the 1-3 split instead of 0-2.
    pub fn add_quad(
        &mut self,
        corners: [Vec3; 4],
        n: Vec3,
        uvs_in: [(f32, f32); 4],
        occ_in: [f32; 4],
        flip_diagonal: bool,
    ) {
        let base = self.pos.len() as u32 / 3;
        let mut vs = corners;
        let mut uvs = uvs_in;
        let mut occ = occ_in;
        let e1 = vs[1] - vs[0];
        let e2 = vs[2] - vs[0];
        if e1.cross(e2).dot(n) < 0.0 {
            vs.swap(1, 3);
            uvs.swap(1, 3);
            occ.swap(1, 3);
        }
        // Flip V axis so textures aren't upside-down.
        for uv in uvs.iter_mut() {
            uv.1 = -uv.1;
        }
        for i in 0..4 {
            self.pos.extend_from_slice(&[vs[i].x, vs[i].y, vs[i].z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv.extend_from_slice(&[uvs[i].0, uvs[i].1]);
            self.occlusion.push(occ[i]);
        }
        if flip_diagonal {
            self.idx
                .extend_from_slice(&[base + 1, base + 2, base + 3, base + 1, base + 3, base]);
        } else {
            self.idx
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_top_quad() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]
    }

    fn tri_normal(m: &MeshData, tri: usize) -> Vec3 {
        let v = |i: usize| {
            let i = m.idx[tri * 3 + i] as usize;
            Vec3::new(m.pos[i * 3], m.pos[i * 3 + 1], m.pos[i * 3 + 2])
        };
        let (a, b, c) = (v(0), v(1), v(2));
        (b - a).cross(c - a)
    }

    #[test]
    fn quad_buffers_grow_in_lockstep() {
        let mut m = MeshData::default();
        assert!(m.is_empty());
        m.add_quad(
            unit_top_quad(),
            Vec3::UP,
            [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
            [1.0; 4],
            false,
        );
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.triangle_count(), 2);
        assert_eq!(m.norm.len(), m.pos.len());
        assert_eq!(m.uv.len(), 8);
        assert_eq!(m.occlusion.len(), 4);
        assert_eq!(m.idx, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn reversed_corners_get_rewound_toward_normal() {
        let mut m = MeshData::default();
        let mut rev = unit_top_quad();
        rev.reverse();
        m.add_quad(
            rev,
            Vec3::UP,
            [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
            [0.85, 0.70, 0.85, 1.0],
            false,
        );
        for tri in 0..2 {
            assert!(tri_normal(&m, tri).dot(Vec3::UP) > 0.0);
        }
        // Attribute swap follows the vertex swap: corner 1 and 3 trade places.
        assert_eq!(m.occlusion, vec![0.85, 1.0, 0.85, 0.70]);
    }

    #[test]
    fn flipped_diagonal_splits_one_three_and_keeps_winding() {
        let mut m = MeshData::default();
        m.add_quad(
            unit_top_quad(),
            Vec3::UP,
            [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
            [1.0; 4],
            true,
        );
        assert_eq!(m.idx, vec![1, 2, 3, 1, 3, 0]);
        for tri in 0..2 {
            assert!(tri_normal(&m, tri).dot(Vec3::UP) > 0.0);
        }
    }

    #[test]
    fn second_quad_indices_are_rebased() {
        let mut m = MeshData::default();
        let uvs = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
        m.add_quad(unit_top_quad(), Vec3::UP, uvs, [1.0; 4], false);
        m.add_quad(unit_top_quad(), Vec3::UP, uvs, [1.0; 4], true);
        assert_eq!(&m.idx[6..], &[5, 6, 7, 5, 7, 4]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut m = MeshData::default();
        m.reserve_quads(8);
        let cap = m.pos.capacity();
        m.add_quad(
            unit_top_quad(),
            Vec3::UP,
            [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
            [1.0; 4],
            false,
        );
        m.clear_keep_capacity();
        assert!(m.is_empty());
        assert_eq!(m.vertex_count(), 0);
        assert!(m.pos.capacity() >= cap);
    }
}

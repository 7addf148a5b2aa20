//! Checkerboard triangulation keyed off absolute world coordinates.

/// Picks the quad diagonal for the cell column at world `(wx, wz)`.
///
/// `false` splits along corners 0-2, `true` along 1-3. Keying the choice to
/// world-space parity means the two chunks sharing a seam cell column agree
/// on its diagonal without ever seeing each other's geometry.
#[inline]
pub fn seam_parity(wx: i32, wz: i32) -> bool {
    wx.wrapping_add(wz).rem_euclid(2) == 1
}

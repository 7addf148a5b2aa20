//! Corner darkening from the four cells that touch a face vertex.

/// Brightness multiplier per occlusion level. Level 0 is fully open.
pub const BRIGHTNESS_BY_LEVEL: [f32; 4] = [1.00, 0.85, 0.70, 0.55];

/// Occlusion level of a face vertex from its three neighbor samples, taken
/// one step out along the face normal: the two cells sharing an edge with
/// the vertex and the cell diagonally across the corner.
///
/// Both side cells solid pins the vertex to the darkest level no matter what
/// the corner holds. The corner cell only counts when it is the lone solid
/// sample, so a single diagonal block darkens a vertex as much as a single
/// adjacent one.
#[inline]
pub fn occlusion_level(side1: bool, side2: bool, corner: bool) -> u8 {
    if side1 && side2 {
        return 3;
    }
    let mut level = 0;
    if side1 {
        level += 1;
    }
    if side2 {
        level += 1;
    }
    if corner && !side1 && !side2 {
        level += 1;
    }
    level
}

#[inline]
pub fn brightness_for(level: u8) -> f32 {
    BRIGHTNESS_BY_LEVEL[usize::from(level.min(3))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_truth_table() {
        // (side1, side2, corner) -> level
        assert_eq!(occlusion_level(false, false, false), 0);
        assert_eq!(occlusion_level(false, false, true), 1);
        assert_eq!(occlusion_level(true, false, false), 1);
        assert_eq!(occlusion_level(false, true, false), 1);
        assert_eq!(occlusion_level(true, false, true), 1);
        assert_eq!(occlusion_level(false, true, true), 1);
        assert_eq!(occlusion_level(true, true, false), 3);
        assert_eq!(occlusion_level(true, true, true), 3);
    }

    #[test]
    fn brightness_descends_with_level() {
        for lv in 0..3u8 {
            assert!(brightness_for(lv) > brightness_for(lv + 1));
        }
        // Out-of-range levels clamp to the darkest entry.
        assert_eq!(brightness_for(9), BRIGHTNESS_BY_LEVEL[3]);
    }
}

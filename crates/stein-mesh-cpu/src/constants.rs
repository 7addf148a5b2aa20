//! Shared constants for stein-mesh-cpu. Centralizes common magic numbers.

// Bitset configuration (u64-based)
pub(crate) const BITS_PER_WORD: usize = 64;
pub(crate) const WORD_INDEX_SHIFT: usize = 6; // log2(64)
pub(crate) const WORD_INDEX_MASK: usize = 63; // (1<<6) - 1

// Initial quad reservation for a fresh surface group. Typical terrain chunks
// land in the low hundreds of quads per group.
pub(crate) const GROUP_QUAD_RESERVE: usize = 64;

//! Chunk coordinates and the collaborator seams the mesher samples through.
#![forbid(unsafe_code)]

mod coord;
mod lattice;
mod sources;

pub use coord::ChunkCoord;
pub use lattice::RegionLattice;
pub use sources::{MaterialBank, RegionMap, VoxelSource};

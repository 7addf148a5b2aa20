//! Cell vocabulary and material lookup tables shared by the meshing crates.
#![forbid(unsafe_code)]

mod catalog;
mod types;

pub use catalog::MaterialCatalog;
pub use types::{CellType, MaterialHandle, RegionClass, SurfaceClass};

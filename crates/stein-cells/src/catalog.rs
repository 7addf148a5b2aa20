use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::{CellType, MaterialHandle, RegionClass};

/// Maps `(RegionClass, CellType)` to a material handle.
///
/// Defined in TOML as a `[materials]` table of per-cell default handles plus
/// optional `[regions.N]` override tables:
///
/// ```toml
/// [materials]
/// grass = 3
/// stone = 1
///
/// [regions.2]
/// grass = 7
/// ```
///
/// Lookups fall back default → `UNKNOWN` when nothing matches.
#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    defaults: HashMap<CellType, MaterialHandle>,
    overrides: HashMap<(RegionClass, CellType), MaterialHandle>,
}

impl MaterialCatalog {
    /// Handle returned for cells no table entry covers.
    pub const UNKNOWN: MaterialHandle = MaterialHandle(0);

    pub fn new() -> Self {
        Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        }
    }

    pub fn set_default(&mut self, cell: CellType, handle: MaterialHandle) {
        self.defaults.insert(cell, handle);
    }

    pub fn set_override(&mut self, region: RegionClass, cell: CellType, handle: MaterialHandle) {
        self.overrides.insert((region, cell), handle);
    }

    /// Most specific match wins: region override, then per-cell default, then
    /// `UNKNOWN`.
    #[inline]
    pub fn lookup(&self, region: RegionClass, cell: CellType) -> MaterialHandle {
        if let Some(h) = self.overrides.get(&(region, cell)) {
            return *h;
        }
        self.defaults
            .get(&cell)
            .copied()
            .unwrap_or(Self::UNKNOWN)
    }

    #[inline]
    pub fn default_count(&self) -> usize {
        self.defaults.len()
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: CatalogConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        for (cell, raw) in cfg.materials {
            catalog.set_default(cell, MaterialHandle(raw));
        }
        for (region_key, table) in cfg.regions {
            // TOML table keys arrive as strings even when written numerically.
            let region = RegionClass(region_key.parse::<u16>()?);
            for (cell, raw) in table {
                catalog.set_override(region, cell, MaterialHandle(raw));
            }
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Deserialize)]
struct CatalogConfig {
    #[serde(default)]
    materials: HashMap<CellType, u16>,
    #[serde(default)]
    regions: HashMap<String, HashMap<CellType, u16>>,
}

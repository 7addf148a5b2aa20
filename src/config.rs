use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use stein_mesh_cpu::DepthBudget;

/// Demo settings, loaded from a TOML file with per-field fallbacks so a
/// partial file works.
#[derive(Clone, Debug, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub world: World,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub regions: Regions,
    #[serde(default)]
    pub mesher: Mesher,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            world: World::default(),
            terrain: Terrain::default(),
            regions: Regions::default(),
            mesher: Mesher::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        let cfg: DemoConfig = toml::from_str(&s)?;
        Ok(cfg)
    }

    pub fn depth_budget(&self) -> DepthBudget {
        DepthBudget {
            structural: self.mesher.structural,
            ground_cover: self.mesher.ground_cover,
            terrain: self.mesher.terrain,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct World {
    /// Chunks per side of the meshed square region.
    #[serde(default = "default_chunks")]
    pub chunks: u32,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_world_height")]
    pub height: usize,
    #[serde(default = "default_world_scale")]
    pub scale: f32,
}
fn default_chunks() -> u32 {
    4
}
fn default_chunk_size() -> usize {
    16
}
fn default_world_height() -> usize {
    64
}
fn default_world_scale() -> f32 {
    1.0
}
impl Default for World {
    fn default() -> Self {
        Self {
            chunks: 4,
            chunk_size: 16,
            height: 64,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Terrain {
    #[serde(default = "default_seed")]
    pub seed: u32,
    #[serde(default = "default_height_frequency")]
    pub height_frequency: f32,
    /// Terrain height span as ratios of world height.
    #[serde(default = "default_min_y_ratio")]
    pub min_y_ratio: f32,
    #[serde(default = "default_max_y_ratio")]
    pub max_y_ratio: f32,
    #[serde(default = "default_water_level_ratio")]
    pub water_level_ratio: f32,
    /// Columns at or above this ratio of world height get snow tops.
    #[serde(default = "default_snow_threshold")]
    pub snow_threshold: f32,
    /// Columns at or below this ratio get sand tops.
    #[serde(default = "default_sand_threshold")]
    pub sand_threshold: f32,
    #[serde(default = "default_topsoil_thickness")]
    pub topsoil_thickness: usize,
    /// Per-column chance of rooting a tree.
    #[serde(default = "default_tree_rate")]
    pub tree_rate: f32,
    /// Per-column chance of ground decoration on grass.
    #[serde(default = "default_decoration_rate")]
    pub decoration_rate: f32,
}
fn default_seed() -> u32 {
    1337
}
fn default_height_frequency() -> f32 {
    0.012
}
fn default_min_y_ratio() -> f32 {
    0.25
}
fn default_max_y_ratio() -> f32 {
    0.72
}
fn default_water_level_ratio() -> f32 {
    0.30
}
fn default_snow_threshold() -> f32 {
    0.62
}
fn default_sand_threshold() -> f32 {
    0.34
}
fn default_topsoil_thickness() -> usize {
    3
}
fn default_tree_rate() -> f32 {
    0.006
}
fn default_decoration_rate() -> f32 {
    0.05
}
impl Default for Terrain {
    fn default() -> Self {
        Self {
            seed: 1337,
            height_frequency: 0.012,
            min_y_ratio: 0.25,
            max_y_ratio: 0.72,
            water_level_ratio: 0.30,
            snow_threshold: 0.62,
            sand_threshold: 0.34,
            topsoil_thickness: 3,
            tree_rate: 0.006,
            decoration_rate: 0.05,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Regions {
    /// Side length, in world cells, of one region tile.
    #[serde(default = "default_tile_span")]
    pub tile_span: i32,
    #[serde(default = "default_region_classes")]
    pub classes: u16,
}
fn default_tile_span() -> i32 {
    48
}
fn default_region_classes() -> u16 {
    4
}
impl Default for Regions {
    fn default() -> Self {
        Self {
            tile_span: 48,
            classes: 4,
        }
    }
}

/// Scan depths for the surface pass; 0 means the whole column.
#[derive(Clone, Debug, Deserialize)]
pub struct Mesher {
    #[serde(default = "default_structural_depth")]
    pub structural: u32,
    #[serde(default = "default_ground_cover_depth")]
    pub ground_cover: u32,
    #[serde(default = "default_terrain_depth")]
    pub terrain: u32,
}
fn default_structural_depth() -> u32 {
    0
}
fn default_ground_cover_depth() -> u32 {
    3
}
fn default_terrain_depth() -> u32 {
    1
}
impl Default for Mesher {
    fn default() -> Self {
        Self {
            structural: 0,
            ground_cover: 3,
            terrain: 1,
        }
    }
}

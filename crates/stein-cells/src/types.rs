use serde::{Deserialize, Serialize};

/// Closed set of voxel cell types.
///
/// The mesher only ever branches on the predicates below, never on individual
/// variants, so adding a kind means deciding its solidity and surface class
/// here and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    Air,
    Water,
    Stone,
    Dirt,
    Gravel,
    Grass,
    Sand,
    Snow,
    Wood,
    Leaves,
    TallGrass,
    Flower,
    Mushroom,
}

impl CellType {
    /// Every variant, in declaration order.
    pub const ALL: [CellType; 13] = [
        CellType::Air,
        CellType::Water,
        CellType::Stone,
        CellType::Dirt,
        CellType::Gravel,
        CellType::Grass,
        CellType::Sand,
        CellType::Snow,
        CellType::Wood,
        CellType::Leaves,
        CellType::TallGrass,
        CellType::Flower,
        CellType::Mushroom,
    ];

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, CellType::Air)
    }

    #[inline]
    pub fn is_water(self) -> bool {
        matches!(self, CellType::Water)
    }

    /// Whether this cell occludes its neighbors' faces and contributes to
    /// ambient-occlusion sampling. Water and decorations do not occlude.
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(
            self,
            CellType::Air
                | CellType::Water
                | CellType::TallGrass
                | CellType::Flower
                | CellType::Mushroom
        )
    }

    #[inline]
    pub fn is_decorative(self) -> bool {
        matches!(
            self,
            CellType::TallGrass | CellType::Flower | CellType::Mushroom
        )
    }

    /// Classifies a column-surface cell for the depth-limited terrain scan.
    #[inline]
    pub fn surface_class(self) -> SurfaceClass {
        match self {
            CellType::Wood | CellType::Leaves => SurfaceClass::Structural,
            CellType::Grass | CellType::Sand | CellType::Snow => SurfaceClass::GroundCover,
            _ => SurfaceClass::Terrain,
        }
    }

    /// Stable lowercase name, matching the TOML key spelling.
    pub fn name(self) -> &'static str {
        match self {
            CellType::Air => "air",
            CellType::Water => "water",
            CellType::Stone => "stone",
            CellType::Dirt => "dirt",
            CellType::Gravel => "gravel",
            CellType::Grass => "grass",
            CellType::Sand => "sand",
            CellType::Snow => "snow",
            CellType::Wood => "wood",
            CellType::Leaves => "leaves",
            CellType::TallGrass => "tall_grass",
            CellType::Flower => "flower",
            CellType::Mushroom => "mushroom",
        }
    }
}

/// Scan-depth classification of a column's surface cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceClass {
    /// Wood/leaves-like; the whole column below must be scanned.
    Structural,
    /// Grass/sand/snow-like ground cover.
    GroundCover,
    /// Any other terrain.
    Terrain,
}

/// Opaque material key attached to an assembled surface. Resolved by a
/// `MaterialBank`; never interpreted by the mesher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(pub u16);

/// Opaque biome-like grouping key produced by a `RegionMap`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionClass(pub u16);

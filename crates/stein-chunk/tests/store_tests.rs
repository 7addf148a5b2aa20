use std::sync::Arc;

use stein_cells::CellType;
use stein_chunk::{ChunkGrid, GridStore};
use stein_world::{ChunkCoord, VoxelSource};

fn filled(coord: ChunkCoord, size: usize, height: usize, cell: CellType) -> Arc<ChunkGrid> {
    let cells = vec![cell; size * height * size];
    Arc::new(ChunkGrid::from_cells_local(coord, size, height, 1.0, cells))
}

#[test]
fn insert_get_remove_roundtrip() {
    let store = GridStore::new(8, 16);
    let coord = ChunkCoord::new(2, -3);
    assert!(!store.has_chunk_data(coord));

    store.insert(filled(coord, 8, 16, CellType::Stone));
    assert!(store.has_chunk_data(coord));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(coord).unwrap().coord, coord);

    assert!(store.remove(coord).is_some());
    assert!(!store.has_chunk_data(coord));
    assert!(store.is_empty());
}

#[test]
fn cell_lookup_crosses_chunk_boundaries() {
    let store = GridStore::new(4, 8);
    store.insert(filled(ChunkCoord::new(0, 0), 4, 8, CellType::Stone));
    store.insert(filled(ChunkCoord::new(1, 0), 4, 8, CellType::Sand));

    assert_eq!(store.cell_at(3, 0, 0), CellType::Stone);
    assert_eq!(store.cell_at(4, 0, 0), CellType::Sand);
    // Unregistered space reads as air.
    assert_eq!(store.cell_at(-1, 0, 0), CellType::Air);
    assert_eq!(store.cell_at(0, 0, 4), CellType::Air);
}

#[test]
fn negative_world_coordinates_map_to_negative_chunks() {
    let store = GridStore::new(4, 8);
    store.insert(filled(ChunkCoord::new(-1, -1), 4, 8, CellType::Dirt));

    // wx in [-4, -1) belongs to chunk -1, not chunk 0.
    assert_eq!(store.cell_at(-1, 0, -1), CellType::Dirt);
    assert_eq!(store.cell_at(-4, 7, -4), CellType::Dirt);
    assert_eq!(store.cell_at(-5, 0, -1), CellType::Air);
}

#[test]
fn vertical_range_is_clamped_to_air() {
    let store = GridStore::new(4, 8);
    store.insert(filled(ChunkCoord::new(0, 0), 4, 8, CellType::Stone));
    assert_eq!(store.cell_at(0, -1, 0), CellType::Air);
    assert_eq!(store.cell_at(0, 8, 0), CellType::Air);
    assert_eq!(store.cell_at(0, 7, 0), CellType::Stone);
}

#[test]
fn solidity_follows_cell_type_by_default() {
    let store = GridStore::new(4, 8);
    store.insert(filled(ChunkCoord::new(0, 0), 4, 8, CellType::Water));
    assert!(!store.is_solid(1, 1, 1));
    store.insert(filled(ChunkCoord::new(0, 0), 4, 8, CellType::Gravel));
    assert!(store.is_solid(1, 1, 1));
}

#[test]
fn reinsert_replaces_chunk_data() {
    let store = GridStore::new(4, 8);
    let coord = ChunkCoord::new(5, 5);
    store.insert(filled(coord, 4, 8, CellType::Snow));
    store.insert(filled(coord, 4, 8, CellType::Leaves));
    assert_eq!(store.len(), 1);
    assert_eq!(store.cell_at(20, 0, 20), CellType::Leaves);
}

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use stein_cells::{CellType, MaterialCatalog, MaterialHandle};
use stein_chunk::{ChunkGrid, ChunkOccupancy, GridStore};
use stein_mesh_cpu::DepthBudget;
use stein_runtime::MeshPipeline;
use stein_world::{ChunkCoord, RegionLattice, VoxelSource};

const SIZE: usize = 8;
const HEIGHT: usize = 8;

fn catalog() -> MaterialCatalog {
    let mut cat = MaterialCatalog::new();
    cat.set_default(CellType::Stone, MaterialHandle(1));
    cat.set_default(CellType::Grass, MaterialHandle(2));
    cat
}

fn pipeline_over(store: &Arc<GridStore>) -> MeshPipeline {
    let source: Arc<dyn VoxelSource> = store.clone();
    MeshPipeline::new(
        source,
        Arc::new(RegionLattice::new(4, 3, 42)),
        Arc::new(catalog()),
        DepthBudget::default(),
    )
}

/// Flat grass-topped floor whose height varies a little per chunk.
fn floor_grid(coord: ChunkCoord, top: usize) -> Arc<ChunkGrid> {
    let mut grid = ChunkGrid::new(coord, SIZE, HEIGHT, 1.0);
    for z in 0..SIZE {
        for x in 0..SIZE {
            for y in 0..top {
                let cell = if y + 1 == top {
                    CellType::Grass
                } else {
                    CellType::Stone
                };
                grid.set_local(x, y, z, cell);
            }
        }
    }
    Arc::new(grid)
}

fn fill_pad(store: &GridStore, radius: i32) {
    for cz in -radius..=radius {
        for cx in -radius..=radius {
            let top = 3 + ((cx + cz).rem_euclid(3)) as usize;
            store.insert(floor_grid(ChunkCoord::new(cx, cz), top));
        }
    }
}

#[test]
fn meshes_every_enqueued_chunk() {
    let store = Arc::new(GridStore::new(SIZE, HEIGHT));
    fill_pad(&store, 2);
    let pipeline = pipeline_over(&store);

    let mut expected = HashSet::new();
    for cz in -1..=1 {
        for cx in -1..=1 {
            let coord = ChunkCoord::new(cx, cz);
            let grid = store.get(coord).unwrap();
            pipeline.enqueue(grid);
            expected.insert(coord);
        }
    }

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut got = Vec::new();
    while got.len() < expected.len() && Instant::now() < deadline {
        match pipeline.try_dequeue_result() {
            Some(res) => got.push(res),
            None => thread::sleep(Duration::from_millis(5)),
        }
    }

    assert_eq!(got.len(), expected.len(), "timed out waiting for results");
    let mut seen = HashSet::new();
    for res in &got {
        assert!(seen.insert(res.coord), "duplicate result for {:?}", res.coord);
        assert_eq!(res.mesh.coord, res.coord);
        assert_eq!(res.occupancy, ChunkOccupancy::Populated);
        assert!(!res.mesh.is_empty());
        assert!(res.mesh.collision_triangle_count() > 0);
    }
    assert_eq!(seen, expected);
    assert_eq!(pipeline.pending_count(), 0);
}

#[test]
fn gate_requeues_until_neighbors_arrive() {
    let store = Arc::new(GridStore::new(SIZE, HEIGHT));
    let center = floor_grid(ChunkCoord::new(0, 0), 4);
    store.insert(center.clone());
    let pipeline = pipeline_over(&store);

    pipeline.enqueue(center);
    thread::sleep(Duration::from_millis(150));
    // With every neighbor missing the chunk can only cycle through the queue.
    assert!(pipeline.try_dequeue_result().is_none());

    for coord in ChunkCoord::new(0, 0).neighbors8() {
        store.insert(floor_grid(coord, 3));
    }

    let deadline = Instant::now() + Duration::from_secs(5);
    let res = loop {
        if let Some(res) = pipeline.try_dequeue_result() {
            break res;
        }
        assert!(Instant::now() < deadline, "chunk never cleared the gate");
        thread::sleep(Duration::from_millis(5));
    };
    assert_eq!(res.coord, ChunkCoord::new(0, 0));
    assert!(res.attempts >= 1, "expected at least one requeue");
    assert_eq!(pipeline.pending_count(), 0);
}

#[test]
fn empty_grid_publishes_empty_result() {
    let store = Arc::new(GridStore::new(SIZE, HEIGHT));
    fill_pad(&store, 1);
    let empty = Arc::new(ChunkGrid::new(ChunkCoord::new(0, 0), SIZE, HEIGHT, 1.0));
    store.insert(empty.clone());
    let pipeline = pipeline_over(&store);

    pipeline.enqueue(empty);
    let deadline = Instant::now() + Duration::from_secs(5);
    let res = loop {
        if let Some(res) = pipeline.try_dequeue_result() {
            break res;
        }
        assert!(Instant::now() < deadline, "no result for empty chunk");
        thread::sleep(Duration::from_millis(5));
    };
    assert_eq!(res.occupancy, ChunkOccupancy::Empty);
    assert!(res.mesh.is_empty());
    assert!(res.mesh.collision.is_empty());
}

#[test]
fn shutdown_joins_and_keeps_buffered_results() {
    let store = Arc::new(GridStore::new(SIZE, HEIGHT));
    fill_pad(&store, 1);
    let mut pipeline = pipeline_over(&store);

    let grid = store.get(ChunkCoord::new(0, 0)).unwrap();
    pipeline.enqueue(grid);
    let deadline = Instant::now() + Duration::from_secs(5);
    while pipeline.pending_count() > 0 {
        assert!(Instant::now() < deadline, "worker never picked up the job");
        thread::sleep(Duration::from_millis(5));
    }
    // Give the publish a beat to land, then stop the worker.
    thread::sleep(Duration::from_millis(50));
    pipeline.shutdown();

    let results = pipeline.drain_results();
    assert_eq!(results.len(), 1);

    // A stopped pipeline rejects new work without panicking or miscounting.
    pipeline.enqueue(store.get(ChunkCoord::new(1, 0)).unwrap());
    assert_eq!(pipeline.pending_count(), 0);
    assert!(pipeline.try_dequeue_result().is_none());
}

//! Meshing pipeline: one background worker turning queued voxel grids into
//! finished chunk meshes, gated on neighbor availability.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};

use stein_chunk::{ChunkGrid, ChunkOccupancy};
use stein_mesh_cpu::{ChunkMesh, DepthBudget, build_chunk_mesh, chunk_bounds};
use stein_world::{ChunkCoord, MaterialBank, RegionMap, VoxelSource};

// Idle wait on the job queue; arrivals wake the worker early.
const IDLE_POLL: Duration = Duration::from_millis(10);
// Slightly longer pause after a neighbor-gate miss so a lone waiting chunk
// does not spin the queue.
const GATE_BACKOFF: Duration = Duration::from_millis(15);
// Gate misses per chunk between diagnostic traces.
const GATE_LOG_EVERY: u32 = 64;

#[derive(Clone, Debug)]
pub struct MeshJob {
    pub grid: Arc<ChunkGrid>,
    pub attempts: u32,
}

/// Everything the caller gets back for one meshed chunk.
pub struct MeshResult {
    pub coord: ChunkCoord,
    pub mesh: ChunkMesh,
    pub grid: Arc<ChunkGrid>,
    pub occupancy: ChunkOccupancy,
    pub t_mesh_ms: u32,
    pub attempts: u32,
}

/// Single-worker meshing pipeline.
///
/// The caller enqueues read-only grids and polls for results; extraction
/// itself always happens on the background thread. A grid whose eight
/// horizontal neighbors are not all registered with the source yet goes back
/// to the end of the queue and is retried until they are, so results arrive
/// in no particular order. Grids must not be mutated once enqueued.
pub struct MeshPipeline {
    job_tx: Sender<MeshJob>,
    res_rx: Receiver<MeshResult>,
    queued: Arc<AtomicUsize>,
    stop: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
}

impl MeshPipeline {
    pub fn new(
        source: Arc<dyn VoxelSource>,
        regions: Arc<dyn RegionMap>,
        materials: Arc<dyn MaterialBank>,
        depths: DepthBudget,
    ) -> Self {
        let (job_tx, job_rx) = unbounded::<MeshJob>();
        let (res_tx, res_rx) = unbounded::<MeshResult>();
        let queued = Arc::new(AtomicUsize::new(0));
        let stop = Arc::new(AtomicBool::new(false));

        let worker = {
            let requeue_tx = job_tx.clone();
            let queued = queued.clone();
            let stop = stop.clone();
            let services = WorkerServices {
                source,
                regions,
                materials,
                depths,
            };
            thread::spawn(move || {
                worker_loop(&job_rx, &requeue_tx, &res_tx, &queued, &stop, &services);
            })
        };

        Self {
            job_tx,
            res_rx,
            queued,
            stop,
            worker: Some(worker),
        }
    }

    /// Hands a grid to the worker; non-blocking.
    pub fn enqueue(&self, grid: Arc<ChunkGrid>) {
        self.queued.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(MeshJob { grid, attempts: 0 }).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Non-blocking poll for one finished chunk.
    pub fn try_dequeue_result(&self) -> Option<MeshResult> {
        self.res_rx.try_recv().ok()
    }

    /// Takes every result currently available.
    pub fn drain_results(&self) -> Vec<MeshResult> {
        self.res_rx.try_iter().collect()
    }

    /// Jobs enqueued but not yet picked up, including requeued ones.
    pub fn pending_count(&self) -> usize {
        self.queued.load(Ordering::Relaxed)
    }

    /// Signals the worker to stop after any in-flight chunk and waits for it
    /// to exit. Buffered results stay drainable afterwards.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for MeshPipeline {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// The collaborators every extraction needs, injected at construction.
struct WorkerServices {
    source: Arc<dyn VoxelSource>,
    regions: Arc<dyn RegionMap>,
    materials: Arc<dyn MaterialBank>,
    depths: DepthBudget,
}

fn neighbors_ready(source: &dyn VoxelSource, coord: ChunkCoord) -> bool {
    coord.neighbors8().iter().all(|c| source.has_chunk_data(*c))
}

fn worker_loop(
    job_rx: &Receiver<MeshJob>,
    requeue_tx: &Sender<MeshJob>,
    res_tx: &Sender<MeshResult>,
    queued: &AtomicUsize,
    stop: &AtomicBool,
    services: &WorkerServices,
) {
    while !stop.load(Ordering::Relaxed) {
        let job = match job_rx.recv_timeout(IDLE_POLL) {
            Ok(job) => job,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        queued.fetch_sub(1, Ordering::Relaxed);
        let coord = job.grid.coord;

        if !neighbors_ready(services.source.as_ref(), coord) {
            let attempts = job.attempts.saturating_add(1);
            if attempts % GATE_LOG_EVERY == 0 {
                log::debug!(
                    "chunk ({}, {}) still waiting on neighbors after {} attempts",
                    coord.cx,
                    coord.cz,
                    attempts
                );
            }
            queued.fetch_add(1, Ordering::Relaxed);
            let _ = requeue_tx.send(MeshJob {
                grid: job.grid,
                attempts,
            });
            thread::sleep(GATE_BACKOFF);
            continue;
        }

        let t0 = Instant::now();
        let occupancy = job.grid.occupancy();
        let mesh = if occupancy.is_empty() {
            ChunkMesh::empty(coord, chunk_bounds(&job.grid))
        } else {
            build_chunk_mesh(
                &job.grid,
                services.source.as_ref(),
                services.regions.as_ref(),
                services.materials.as_ref(),
                services.depths,
            )
        };
        let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
        let _ = res_tx.send(MeshResult {
            coord,
            mesh,
            grid: job.grid,
            occupancy,
            t_mesh_ms,
            attempts: job.attempts,
        });
    }
}

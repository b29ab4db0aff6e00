//! Generation-update engine.
//!
//! One generation fills the *next* buffer from the *current* grid (compute
//! phase), then publishes *next* back into the grid (publish phase). Five
//! interchangeable strategies cover sequential execution and the cross
//! product of two row-partitioning policies with two publish disciplines.
//!
//! The coordinated strategies join all workers before a single writer copies
//! the buffer back under a lock, and reproduce sequential output bit for bit
//! at any worker count. The uncoordinated strategies exist to benchmark the
//! cost of that discipline: each worker publishes its own rows with no
//! barrier and no lock, racing against workers still reading the grid.
//! Their output is intentionally unreliable with more than one worker and
//! must never be relied upon.

use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::AtomicUsize;
use std::sync::{Mutex, OnceLock};

pub mod rule;
pub mod schedule;

use crate::grid::{Cell, Grid, neighbor_count_at};
use rule::next_state;
use schedule::{Schedule, claim_guided, static_range};

struct SendPtr<T> {
    inner: *mut T,
}
unsafe impl<T> Send for SendPtr<T> {}
unsafe impl<T> Sync for SendPtr<T> {}
impl<T> Copy for SendPtr<T> {}
impl<T> Clone for SendPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> SendPtr<T> {
    #[inline(always)]
    fn new(ptr: *mut T) -> Self {
        Self { inner: ptr }
    }
    #[inline(always)]
    fn get(&self) -> *mut T {
        self.inner
    }
}

struct SendConstPtr<T> {
    inner: *const T,
}
unsafe impl<T> Send for SendConstPtr<T> {}
unsafe impl<T> Sync for SendConstPtr<T> {}
impl<T> Copy for SendConstPtr<T> {}
impl<T> Clone for SendConstPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> SendConstPtr<T> {
    #[inline(always)]
    fn new(ptr: *const T) -> Self {
        Self { inner: ptr }
    }
    #[inline(always)]
    fn get(&self) -> *const T {
        self.inner
    }
}

static PHYSICAL_CORES: OnceLock<usize> = OnceLock::new();

#[inline]
fn physical_core_count() -> usize {
    *PHYSICAL_CORES.get_or_init(|| num_cpus::get_physical().max(1))
}

/// Update strategy for a single generation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    /// Single-threaded row-major sweep, then a full buffer copy.
    Sequential,
    /// Static row partitioning; publish serialized behind a lock.
    ParallelStaticSafe,
    /// Guided row partitioning; publish serialized behind a lock.
    ParallelGuidedSafe,
    /// Static partitioning; each worker publishes its rows unguarded.
    ParallelStaticUnsafe,
    /// Guided partitioning; each worker publishes its rows unguarded.
    ParallelGuidedUnsafe,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Sequential,
        Strategy::ParallelStaticSafe,
        Strategy::ParallelGuidedSafe,
        Strategy::ParallelStaticUnsafe,
        Strategy::ParallelGuidedUnsafe,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Sequential => "serial",
            Strategy::ParallelStaticSafe => "parallel-static",
            Strategy::ParallelGuidedSafe => "parallel-guided",
            Strategy::ParallelStaticUnsafe => "parallel-static-unguarded",
            Strategy::ParallelGuidedUnsafe => "parallel-guided-unguarded",
        }
    }

    #[inline]
    pub fn is_parallel(&self) -> bool {
        !matches!(self, Strategy::Sequential)
    }

    /// Partitioning policy, `None` for the sequential strategy.
    #[inline]
    pub fn schedule(&self) -> Option<Schedule> {
        match self {
            Strategy::Sequential => None,
            Strategy::ParallelStaticSafe | Strategy::ParallelStaticUnsafe => Some(Schedule::Static),
            Strategy::ParallelGuidedSafe | Strategy::ParallelGuidedUnsafe => Some(Schedule::Guided),
        }
    }

    /// Whether the publish phase is serialized. Strategies with a coordinated
    /// publish are deterministic for any worker count.
    #[inline]
    pub fn coordinated_publish(&self) -> bool {
        matches!(
            self,
            Strategy::Sequential | Strategy::ParallelStaticSafe | Strategy::ParallelGuidedSafe
        )
    }
}

/// Engine construction options.
#[derive(Default, Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Number of threads for the compute pool.
    /// `None` means auto-detect (physical cores).
    pub thread_count: Option<usize>,
    /// Hard upper bound on threads regardless of auto-detection.
    pub max_threads: Option<usize>,
}

impl EngineConfig {
    /// Set an explicit thread count for the compute pool.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    /// Set a hard upper bound on threads.
    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n.max(1));
        self
    }

    fn resolve_workers(&self) -> usize {
        let base = self.thread_count.unwrap_or_else(physical_core_count);
        let capped = match self.max_threads {
            Some(cap) => base.min(cap),
            None => base,
        };
        capped.max(1)
    }
}

/// Owns the worker pool and the *next* buffer for the duration of each
/// update call. The caller owns the grid across generations.
pub struct LifeEngine {
    pool: rayon::ThreadPool,
    workers: usize,
    next: Vec<Cell>,
    publish_lock: Mutex<()>,
}

impl Default for LifeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let workers = config.resolve_workers();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .expect("failed to build life engine rayon thread pool");
        Self {
            pool,
            workers,
            next: Vec::new(),
            publish_lock: Mutex::new(()),
        }
    }

    /// Worker count used by the parallel strategies.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Advance `grid` by one generation under `strategy`, publishing the
    /// result back into `grid`.
    pub fn advance(&mut self, grid: &mut Grid, strategy: Strategy) {
        let len = grid.size() * grid.size();
        if self.next.len() != len {
            self.next.clear();
            self.next.resize(len, Cell::Dead);
        }

        match strategy {
            Strategy::Sequential => self.advance_sequential(grid),
            Strategy::ParallelStaticSafe => self.advance_coordinated(grid, Schedule::Static),
            Strategy::ParallelGuidedSafe => self.advance_coordinated(grid, Schedule::Guided),
            Strategy::ParallelStaticUnsafe => self.advance_uncoordinated(grid, Schedule::Static),
            Strategy::ParallelGuidedUnsafe => self.advance_uncoordinated(grid, Schedule::Guided),
        }
    }

    /// Live-cell count as a row-partitioned parallel reduction. Pure
    /// associative addition, safe under any partitioning.
    pub fn count_live(&self, grid: &Grid) -> usize {
        let size = grid.size();
        self.pool.install(|| {
            grid.cells()
                .par_chunks(size)
                .map(|row| row.iter().filter(|c| c.is_alive()).count())
                .sum()
        })
    }

    fn advance_sequential(&mut self, grid: &mut Grid) {
        let size = grid.size();
        let cells = grid.cells();
        for row in 0..size {
            for col in 0..size {
                let idx = row * size + col;
                let neighbors = neighbor_count_at(cells, size, row, col);
                self.next[idx] = next_state(cells[idx], neighbors);
            }
        }
        grid.cells_mut().copy_from_slice(&self.next);
    }

    /// Parallel compute over disjoint row ranges, implicit join, then a
    /// single writer copies *next* back under the publish lock.
    fn advance_coordinated(&mut self, grid: &mut Grid, schedule: Schedule) {
        let size = grid.size();
        let workers = self.workers;
        let current = SendConstPtr::new(grid.cells().as_ptr());
        let next = SendPtr::new(self.next.as_mut_ptr());

        self.pool.install(|| match schedule {
            Schedule::Static => {
                (0..workers).into_par_iter().for_each(|worker_id| {
                    let Some(rows) = static_range(size, workers, worker_id) else {
                        return;
                    };
                    // SAFETY: row ranges are disjoint across workers and
                    // `current` is only read during the compute phase.
                    unsafe { compute_rows(current.get(), next.get(), size, rows) };
                });
            }
            Schedule::Guided => {
                let cursor = AtomicUsize::new(0);
                (0..workers).into_par_iter().for_each(|_| {
                    while let Some(rows) = claim_guided(&cursor, size, workers) {
                        // SAFETY: the cursor hands out disjoint ranges.
                        unsafe { compute_rows(current.get(), next.get(), size, rows) };
                    }
                });
            }
        });

        // Critical section: exactly one writer touches the grid here, and
        // only after every worker has finished computing.
        let _guard = self
            .publish_lock
            .lock()
            .expect("publish lock poisoned");
        grid.cells_mut().copy_from_slice(&self.next);
    }

    /// Deliberately unguarded variant: each worker copies its own rows back
    /// into the grid as soon as it finishes computing them, while other
    /// workers may still be reading the grid. This is a data race on the
    /// shared buffer, kept on purpose to measure what the coordination in
    /// [`Self::advance_coordinated`] costs. With one worker it degenerates
    /// to compute-everything-then-publish and stays deterministic; with more
    /// workers the result must not be relied upon.
    fn advance_uncoordinated(&mut self, grid: &mut Grid, schedule: Schedule) {
        let size = grid.size();
        let workers = self.workers;
        let current = SendPtr::new(grid.cells_mut().as_mut_ptr());
        let next = SendPtr::new(self.next.as_mut_ptr());

        self.pool.install(|| match schedule {
            Schedule::Static => {
                (0..workers).into_par_iter().for_each(|worker_id| {
                    let Some(rows) = static_range(size, workers, worker_id) else {
                        return;
                    };
                    // SAFETY: writes to `next` and publishes to `current`
                    // stay within this worker's rows. Reads of `current`
                    // race with other workers' publishes; that hazard is
                    // the point of this strategy.
                    unsafe {
                        compute_rows(current.get() as *const Cell, next.get(), size, rows.clone());
                        publish_rows(next.get() as *const Cell, current.get(), size, rows);
                    }
                });
            }
            Schedule::Guided => {
                let cursor = AtomicUsize::new(0);
                (0..workers).into_par_iter().for_each(|_| {
                    let mut claimed: Vec<Range<usize>> = Vec::with_capacity(4);
                    while let Some(rows) = claim_guided(&cursor, size, workers) {
                        // SAFETY: as above; claimed ranges are disjoint.
                        unsafe {
                            compute_rows(
                                current.get() as *const Cell,
                                next.get(),
                                size,
                                rows.clone(),
                            );
                        }
                        claimed.push(rows);
                    }
                    for rows in claimed {
                        // SAFETY: publishes only this worker's claimed rows.
                        unsafe {
                            publish_rows(next.get() as *const Cell, current.get(), size, rows);
                        }
                    }
                });
            }
        });
    }
}

/// Compute next-state for a contiguous row range.
///
/// # Safety
/// `current` and `next` must each point at `size * size` cells, `rows` must
/// lie within `0..size`, and no other thread may write the `next` cells of
/// `rows` concurrently.
unsafe fn compute_rows(current: *const Cell, next: *mut Cell, size: usize, rows: Range<usize>) {
    let cells = unsafe { std::slice::from_raw_parts(current, size * size) };
    for row in rows {
        for col in 0..size {
            let idx = row * size + col;
            let neighbors = neighbor_count_at(cells, size, row, col);
            unsafe { *next.add(idx) = next_state(cells[idx], neighbors) };
        }
    }
}

/// Copy a contiguous row range of *next* back into *current*.
///
/// # Safety
/// Same buffer contract as [`compute_rows`]. Callers that overlap this with
/// concurrent readers of `current` get the documented unguarded-publish race.
unsafe fn publish_rows(next: *const Cell, current: *mut Cell, size: usize, rows: Range<usize>) {
    let offset = rows.start * size;
    let len = rows.len() * size;
    unsafe { std::ptr::copy_nonoverlapping(next.add(offset), current.add(offset), len) };
}

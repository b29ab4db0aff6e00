//! Strategy benchmark harness.
//!
//! Runs a full fixed-length simulation from the same seeded grid several
//! times per strategy, then reports mean whole-run durations, speedups over
//! sequential, and the synchronization cost of the coordinated publish for
//! each partitioning policy.

use std::time::{Duration, Instant};

use crate::engine::schedule::Schedule;
use crate::engine::{EngineConfig, LifeEngine, Strategy};
use crate::patterns::{self, Pattern};

pub const DEFAULT_REPETITIONS: u32 = 5;

#[derive(Clone, Copy, Debug)]
pub struct BenchConfig {
    pub grid_size: usize,
    pub generations: u64,
    /// Full-simulation repetitions averaged per strategy.
    pub repetitions: u32,
    pub pattern: Pattern,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            grid_size: crate::sim::DEFAULT_GRID_SIZE,
            generations: crate::sim::DEFAULT_GENERATIONS,
            repetitions: DEFAULT_REPETITIONS,
            pattern: Pattern::CenterBlock,
            seed: 0x5EED_0F11_FE00_0001,
        }
    }
}

/// Averaged timings for one strategy.
#[derive(Clone, Debug)]
pub struct StrategyTiming {
    pub strategy: Strategy,
    pub runs: Vec<Duration>,
    pub mean: Duration,
}

/// Full benchmark results over all five strategies.
#[derive(Debug)]
pub struct BenchReport {
    pub config: BenchConfig,
    pub workers: usize,
    pub timings: Vec<StrategyTiming>,
}

impl BenchReport {
    pub fn mean(&self, strategy: Strategy) -> Option<Duration> {
        self.timings
            .iter()
            .find(|t| t.strategy == strategy)
            .map(|t| t.mean)
    }

    /// Mean sequential duration divided by `strategy`'s mean duration.
    pub fn speedup(&self, strategy: Strategy) -> Option<f64> {
        let serial = self.mean(Strategy::Sequential)?.as_secs_f64();
        let other = self.mean(strategy)?.as_secs_f64();
        (other > 0.0).then(|| serial / other)
    }

    /// Coordinated-minus-uncoordinated mean duration for one partitioning
    /// policy, in seconds. Positive means the publish lock cost time.
    pub fn sync_cost(&self, schedule: Schedule) -> Option<f64> {
        let (safe, unguarded) = match schedule {
            Schedule::Static => (Strategy::ParallelStaticSafe, Strategy::ParallelStaticUnsafe),
            Schedule::Guided => (Strategy::ParallelGuidedSafe, Strategy::ParallelGuidedUnsafe),
        };
        let safe = self.mean(safe)?.as_secs_f64();
        let unguarded = self.mean(unguarded)?.as_secs_f64();
        Some(safe - unguarded)
    }

    /// The strategy with the lowest mean duration.
    pub fn best(&self) -> Option<&StrategyTiming> {
        self.timings.iter().min_by_key(|t| t.mean)
    }
}

/// Benchmark every strategy independently. Each repetition starts from a
/// freshly seeded grid so strategies see identical work.
pub fn run_benchmark(config: &BenchConfig, engine_config: EngineConfig) -> BenchReport {
    let mut engine = LifeEngine::with_config(engine_config);
    let workers = engine.workers();
    let mut timings = Vec::with_capacity(Strategy::ALL.len());

    for strategy in Strategy::ALL {
        let mut runs = Vec::with_capacity(config.repetitions as usize);
        for _ in 0..config.repetitions.max(1) {
            let mut grid = patterns::initialize(config.grid_size, config.pattern, config.seed);
            let start = Instant::now();
            for _ in 0..config.generations {
                engine.advance(&mut grid, strategy);
            }
            runs.push(start.elapsed());
        }
        let total: Duration = runs.iter().sum();
        let mean = total / runs.len() as u32;
        timings.push(StrategyTiming {
            strategy,
            runs,
            mean,
        });
    }

    BenchReport {
        config: *config,
        workers,
        timings,
    }
}

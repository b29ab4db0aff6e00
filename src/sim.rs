//! Simulation driver.
//!
//! Runs a configured number of generations against the engine, timing each
//! one and collecting per-run statistics into an explicit [`RunStats`] value.
//! Reporting is pushed through a [`ReportSink`] so the library never prints.

use std::time::{Duration, Instant};

use crate::engine::{LifeEngine, Strategy};
use crate::grid::Grid;
use crate::patterns::{self, Pattern};

pub const DEFAULT_GENERATIONS: u64 = 100;
pub const DEFAULT_GRID_SIZE: usize = 100;

/// One full run's configuration.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    pub grid_size: usize,
    pub generations: u64,
    pub pattern: Pattern,
    pub seed: u64,
    pub strategy: Strategy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            generations: DEFAULT_GENERATIONS,
            pattern: Pattern::CenterBlock,
            seed: 0x5EED_0F11_FE00_0001,
            strategy: Strategy::Sequential,
        }
    }
}

/// Per-generation statistics emitted once per tick.
#[derive(Clone, Copy, Debug)]
pub struct GenerationRecord {
    /// 1-based generation index.
    pub generation: u64,
    /// Live-cell count observed at the start of this generation.
    pub live: usize,
    pub strategy: Strategy,
    /// Wall-clock duration of the engine update for this generation.
    pub duration: Duration,
}

/// Aggregate statistics for a completed run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub records: Vec<GenerationRecord>,
    pub min_live: Option<usize>,
    pub max_live: Option<usize>,
    pub total: Duration,
}

impl RunStats {
    fn push(&mut self, record: GenerationRecord) {
        self.min_live = Some(self.min_live.map_or(record.live, |m| m.min(record.live)));
        self.max_live = Some(self.max_live.map_or(record.live, |m| m.max(record.live)));
        self.total += record.duration;
        self.records.push(record);
    }

    pub fn generations(&self) -> u64 {
        self.records.len() as u64
    }

    /// Mean generation duration for one strategy, if it ran at all.
    pub fn mean_duration(&self, strategy: Strategy) -> Option<Duration> {
        let mut total = Duration::ZERO;
        let mut count = 0u32;
        for record in &self.records {
            if record.strategy == strategy {
                total += record.duration;
                count += 1;
            }
        }
        (count > 0).then(|| total / count)
    }

    /// Speedup of `strategy`'s mean duration over the sequential mean.
    /// `None` unless both categories appear in the run.
    pub fn speedup(&self, strategy: Strategy) -> Option<f64> {
        let serial = self.mean_duration(Strategy::Sequential)?.as_secs_f64();
        let other = self.mean_duration(strategy)?.as_secs_f64();
        (other > 0.0).then(|| serial / other)
    }

    /// Strategies that actually ran, in [`Strategy::ALL`] order.
    pub fn strategies_used(&self) -> Vec<Strategy> {
        Strategy::ALL
            .into_iter()
            .filter(|s| self.records.iter().any(|r| r.strategy == *s))
            .collect()
    }
}

/// Receives per-tick and end-of-run statistics. Implementations render to a
/// terminal, a log file, or nothing at all.
pub trait ReportSink {
    fn on_generation(&mut self, _record: &GenerationRecord) {}
    fn on_complete(&mut self, _stats: &RunStats) {}
}

/// Discards everything.
pub struct NullSink;

impl ReportSink for NullSink {}

/// Seed a grid and run `config.generations` generations under the fixed
/// strategy. Returns the final grid alongside the collected statistics.
pub fn run(
    engine: &mut LifeEngine,
    config: &SimConfig,
    sink: &mut dyn ReportSink,
) -> (Grid, RunStats) {
    let strategy = config.strategy;
    run_with(engine, config, |_| strategy, sink)
}

/// Like [`run`], but the strategy is chosen per generation by `select`
/// (1-based generation index), covering runtime serial/parallel toggling.
pub fn run_with(
    engine: &mut LifeEngine,
    config: &SimConfig,
    mut select: impl FnMut(u64) -> Strategy,
    sink: &mut dyn ReportSink,
) -> (Grid, RunStats) {
    let mut grid = patterns::initialize(config.grid_size, config.pattern, config.seed);
    let mut stats = RunStats::default();

    for generation in 1..=config.generations {
        let strategy = select(generation);
        let live = engine.count_live(&grid);

        let start = Instant::now();
        engine.advance(&mut grid, strategy);
        let duration = start.elapsed();

        let record = GenerationRecord {
            generation,
            live,
            strategy,
            duration,
        };
        sink.on_generation(&record);
        stats.push(record);
    }

    sink.on_complete(&stats);
    (grid, stats)
}

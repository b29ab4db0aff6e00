//! Standalone strategy benchmark.
//!
//! Times a full fixed-length simulation per strategy, averaged over several
//! repetitions from the same seeded grid.

#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::env;

use toroid_life::bench::{BenchConfig, run_benchmark};
use toroid_life::engine::EngineConfig;
use toroid_life::engine::schedule::Schedule;
use toroid_life::patterns::Pattern;

fn parse_args() -> (BenchConfig, EngineConfig) {
    let mut cfg = BenchConfig::default();
    let mut engine = EngineConfig::default();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => {
                if let Some(v) = args.next() {
                    cfg.grid_size = v.parse().expect("--size requires a positive integer");
                }
            }
            "--generations" => {
                if let Some(v) = args.next() {
                    cfg.generations = v.parse().expect("--generations requires an integer");
                }
            }
            "--reps" => {
                if let Some(v) = args.next() {
                    cfg.repetitions = v.parse().expect("--reps requires a positive integer");
                }
            }
            "--density" => {
                if let Some(v) = args.next() {
                    let density: f64 = v.parse().expect("--density requires a number");
                    cfg.pattern = Pattern::Random { density };
                }
            }
            "--seed" => {
                if let Some(v) = args.next() {
                    cfg.seed = v.parse().expect("--seed requires an integer");
                }
            }
            "--threads" => {
                if let Some(v) = args.next() {
                    let n: usize = v.parse().expect("--threads requires a positive integer");
                    engine = engine.thread_count(n);
                }
            }
            other => panic!(
                "unknown argument: {other}\nusage: bench_strategies [--size N] \
                 [--generations N] [--reps N] [--density F] [--seed N] [--threads N]"
            ),
        }
    }
    (cfg, engine)
}

fn main() {
    let (cfg, engine) = parse_args();
    let report = run_benchmark(&cfg, engine);

    println!(
        "strategy benchmark: {}x{} {} pattern, {} generations x {} reps, {} workers",
        report.config.grid_size,
        report.config.grid_size,
        report.config.pattern.label(),
        report.config.generations,
        report.config.repetitions,
        report.workers
    );
    for timing in &report.timings {
        let runs: Vec<String> = timing
            .runs
            .iter()
            .map(|d| format!("{:.4}", d.as_secs_f64()))
            .collect();
        println!(
            "  {:28} mean {:.4} s  [{}]",
            timing.strategy.label(),
            timing.mean.as_secs_f64(),
            runs.join(", ")
        );
    }
    for (name, schedule) in [("static", Schedule::Static), ("guided", Schedule::Guided)] {
        if let Some(cost) = report.sync_cost(schedule) {
            println!("  {name} coordination cost: {cost:+.4} s per run");
        }
    }
}

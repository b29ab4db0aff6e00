#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::env;

use toroid_life::bench::{self, BenchConfig};
use toroid_life::engine::schedule::Schedule;
use toroid_life::engine::{EngineConfig, LifeEngine, Strategy};
use toroid_life::patterns::Pattern;
use toroid_life::sim::{self, GenerationRecord, ReportSink, RunStats, SimConfig};

struct MainArgs {
    sim: SimConfig,
    engine: EngineConfig,
    bench: bool,
    repetitions: u32,
    toggle_every: Option<u64>,
    dump_final: bool,
}

fn parse_strategy(value: &str) -> Strategy {
    match value.to_ascii_lowercase().as_str() {
        "serial" | "sequential" => Strategy::Sequential,
        "static" => Strategy::ParallelStaticSafe,
        "guided" => Strategy::ParallelGuidedSafe,
        "static-unguarded" => Strategy::ParallelStaticUnsafe,
        "guided-unguarded" => Strategy::ParallelGuidedUnsafe,
        other => panic!(
            "unknown strategy: {other} (expected serial, static, guided, static-unguarded, or guided-unguarded)"
        ),
    }
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = env::args().collect();
    let mut out = MainArgs {
        sim: SimConfig::default(),
        engine: EngineConfig::default(),
        bench: false,
        repetitions: bench::DEFAULT_REPETITIONS,
        toggle_every: None,
        dump_final: false,
    };
    let mut density = None;

    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--strategy" => {
                i += 1;
                out.sim.strategy = parse_strategy(next_arg(i, "--strategy"));
            }
            "--pattern" => {
                i += 1;
                out.sim.pattern = match next_arg(i, "--pattern").to_ascii_lowercase().as_str() {
                    "center" => Pattern::CenterBlock,
                    "random" => Pattern::Random {
                        density: toroid_life::patterns::DEFAULT_DENSITY,
                    },
                    "glider" => Pattern::GliderPlusNoise,
                    other => panic!("unknown pattern: {other} (expected center, random, or glider)"),
                };
            }
            "--density" => {
                i += 1;
                let d: f64 = next_arg(i, "--density")
                    .parse()
                    .expect("--density requires a number");
                density = Some(d);
            }
            "--size" => {
                i += 1;
                out.sim.grid_size = next_arg(i, "--size")
                    .parse()
                    .expect("--size requires a positive integer");
            }
            "--generations" => {
                i += 1;
                out.sim.generations = next_arg(i, "--generations")
                    .parse()
                    .expect("--generations requires a non-negative integer");
            }
            "--seed" => {
                i += 1;
                out.sim.seed = next_arg(i, "--seed")
                    .parse()
                    .expect("--seed requires an integer");
            }
            "--threads" => {
                i += 1;
                let n: usize = next_arg(i, "--threads")
                    .parse()
                    .expect("--threads requires a positive integer");
                out.engine = out.engine.thread_count(n);
            }
            "--max-threads" => {
                i += 1;
                let n: usize = next_arg(i, "--max-threads")
                    .parse()
                    .expect("--max-threads requires a positive integer");
                out.engine = out.engine.max_threads(n);
            }
            "--toggle-every" => {
                i += 1;
                let n: u64 = next_arg(i, "--toggle-every")
                    .parse()
                    .expect("--toggle-every requires a positive integer");
                out.toggle_every = Some(n.max(1));
            }
            "--bench" => out.bench = true,
            "--reps" => {
                i += 1;
                out.repetitions = next_arg(i, "--reps")
                    .parse()
                    .expect("--reps requires a positive integer");
            }
            "--dump-final" => out.dump_final = true,
            other => panic!(
                "unknown argument: {other}\nusage: toroid-life [--strategy S] [--pattern P] \
                 [--density F] [--size N] [--generations N] [--seed N] [--threads N] \
                 [--max-threads N] [--toggle-every N] [--dump-final] [--bench] [--reps N]"
            ),
        }
        i += 1;
    }

    // --density implies the random pattern; an out-of-range value falls back
    // to the default inside the seeder.
    if let Some(density) = density {
        out.sim.pattern = Pattern::Random { density };
    }
    out
}

struct TextSink {
    generations: u64,
}

impl ReportSink for TextSink {
    fn on_generation(&mut self, record: &GenerationRecord) {
        println!(
            "Gen {:4}/{:4} | live cells {:6} | {:.6} s | {}",
            record.generation,
            self.generations,
            record.live,
            record.duration.as_secs_f64(),
            record.strategy.label()
        );
    }

    fn on_complete(&mut self, stats: &RunStats) {
        println!();
        println!("Simulation completed: {} generations", stats.generations());
        println!("Total engine time: {:.4} s", stats.total.as_secs_f64());
        if let (Some(min), Some(max)) = (stats.min_live, stats.max_live) {
            println!("Live cells: min {min}, max {max}");
        }
        for strategy in stats.strategies_used() {
            let mean = stats
                .mean_duration(strategy)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);
            match stats.speedup(strategy).filter(|_| strategy.is_parallel()) {
                Some(speedup) => println!(
                    "  {}: {:.6} s/gen (speedup {:.2}x)",
                    strategy.label(),
                    mean,
                    speedup
                ),
                None => println!("  {}: {:.6} s/gen", strategy.label(), mean),
            }
        }
    }
}

fn print_bench_report(report: &bench::BenchReport) {
    println!(
        "Benchmark: {}x{} grid, {} generations, {} repetitions, {} workers",
        report.config.grid_size,
        report.config.grid_size,
        report.config.generations,
        report.config.repetitions,
        report.workers
    );
    println!();
    for timing in &report.timings {
        match report
            .speedup(timing.strategy)
            .filter(|_| timing.strategy.is_parallel())
        {
            Some(speedup) => println!(
                "  {:28} {:.4} s (speedup {:.2}x)",
                timing.strategy.label(),
                timing.mean.as_secs_f64(),
                speedup
            ),
            None => println!(
                "  {:28} {:.4} s",
                timing.strategy.label(),
                timing.mean.as_secs_f64()
            ),
        }
    }
    println!();
    for (name, schedule) in [("static", Schedule::Static), ("guided", Schedule::Guided)] {
        if let Some(cost) = report.sync_cost(schedule) {
            println!(
                "  {name} publish coordination cost: {:+.4} s per run",
                cost
            );
        }
    }
    if let Some(best) = report.best() {
        println!(
            "  best: {} ({:.4} s)",
            best.strategy.label(),
            best.mean.as_secs_f64()
        );
    }
    println!();
    println!("NOTE: unguarded strategies publish without coordination and may");
    println!("produce inconsistent grids when more than one worker runs.");
}

fn main() {
    let args = parse_args();

    if args.bench {
        let config = BenchConfig {
            grid_size: args.sim.grid_size,
            generations: args.sim.generations,
            repetitions: args.repetitions.max(1),
            pattern: args.sim.pattern,
            seed: args.sim.seed,
        };
        let report = bench::run_benchmark(&config, args.engine);
        print_bench_report(&report);
        return;
    }

    let mut engine = LifeEngine::with_config(args.engine);
    println!(
        "Conway's Game of Life: {}x{} torus, {} generations, {} ({} workers)",
        args.sim.grid_size,
        args.sim.grid_size,
        args.sim.generations,
        args.sim.strategy.label(),
        engine.workers()
    );

    let mut sink = TextSink {
        generations: args.sim.generations,
    };

    let (grid, _stats) = match args.toggle_every {
        // Alternate between serial and the configured parallel strategy in
        // blocks of N generations.
        Some(every) => {
            let parallel = if args.sim.strategy.is_parallel() {
                args.sim.strategy
            } else {
                Strategy::ParallelStaticSafe
            };
            sim::run_with(
                &mut engine,
                &args.sim,
                |generation| {
                    if ((generation - 1) / every) % 2 == 0 {
                        Strategy::Sequential
                    } else {
                        parallel
                    }
                },
                &mut sink,
            )
        }
        None => sim::run(&mut engine, &args.sim, &mut sink),
    };

    if args.dump_final {
        println!();
        println!("Final grid state:");
        print!("{}", grid.render_text());
    }
}

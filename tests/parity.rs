//! Coordinated strategies must reproduce sequential results bit for bit,
//! for any worker count.

use toroid_life::engine::{EngineConfig, LifeEngine, Strategy};
use toroid_life::grid::Grid;
use toroid_life::patterns::{self, Pattern};

fn evolve(threads: usize, strategy: Strategy, size: usize, density: f64, steps: u64, seed: u64) -> Grid {
    let mut engine = LifeEngine::with_config(EngineConfig::default().thread_count(threads));
    let mut grid = patterns::initialize(size, Pattern::Random { density }, seed);
    for _ in 0..steps {
        engine.advance(&mut grid, strategy);
    }
    grid
}

fn run_parity_case(size: usize, density: f64, steps: u64, seed: u64) {
    let reference = evolve(1, Strategy::Sequential, size, density, steps, seed);
    assert!(reference.live_cells() > 0, "degenerate case: seed {seed}");

    for strategy in [Strategy::ParallelStaticSafe, Strategy::ParallelGuidedSafe] {
        for threads in [1usize, 2, 4, 7] {
            let got = evolve(threads, strategy, size, density, steps, seed);
            assert!(
                got == reference,
                "{} with {threads} threads diverged from sequential (density {density}, seed {seed})",
                strategy.label()
            );
        }
    }
}

#[test]
fn parity_sparse_mid_dense() {
    run_parity_case(64, 0.10, 6, 0xA1);
    run_parity_case(64, 0.42, 6, 0xB2);
    run_parity_case(64, 0.83, 4, 0xC3);
}

#[test]
fn parity_multiple_seeds() {
    for seed in [11u64, 22, 33, 44] {
        run_parity_case(48, 0.35, 7, seed);
    }
}

#[test]
fn parity_single_generation_on_reference_size() {
    // One generation on the reference 100x100 grid, every safe strategy.
    let reference = evolve(1, Strategy::Sequential, 100, 0.3, 1, 0x600D);
    for strategy in [Strategy::ParallelStaticSafe, Strategy::ParallelGuidedSafe] {
        let got = evolve(4, strategy, 100, 0.3, 1, 0x600D);
        assert!(got == reference, "{} diverged", strategy.label());
    }
}

#[test]
fn single_worker_unguarded_matches_sequential() {
    // With exactly one worker the unguarded publish cannot race and the
    // fused compute-then-publish order matches the sequential sweep.
    let reference = evolve(1, Strategy::Sequential, 48, 0.4, 5, 0x1CE);
    for strategy in [Strategy::ParallelStaticUnsafe, Strategy::ParallelGuidedUnsafe] {
        let got = evolve(1, strategy, 48, 0.4, 5, 0x1CE);
        assert!(got == reference, "{} diverged", strategy.label());
    }
}

#[test]
fn unguarded_strategies_complete_without_determinism_guarantee() {
    // No bit-for-bit expectation here, deliberately: with more than one
    // worker the unguarded publish races and repeated runs may differ.
    // Assert only what still holds: the run finishes and the grid stays a
    // valid cell matrix.
    for strategy in [Strategy::ParallelStaticUnsafe, Strategy::ParallelGuidedUnsafe] {
        let grid = evolve(4, strategy, 64, 0.42, 8, 0xDEAD);
        assert_eq!(grid.cells().len(), 64 * 64);
        assert!(grid.live_cells() <= 64 * 64);
    }
}

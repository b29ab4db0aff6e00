//! Conway's Game of Life on a fixed-size toroidal grid, with sequential and
//! data-parallel generation-update strategies and a harness for comparing
//! their performance.

pub mod bench;
pub mod engine;
pub mod grid;
pub mod patterns;
pub mod sim;

pub use engine::{EngineConfig, LifeEngine, Strategy};
pub use grid::{Cell, Grid};
pub use patterns::Pattern;

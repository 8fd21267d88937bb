#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Conway's Game of Life on a fixed, bounded grid.
//!
//! [`Grid`] holds the cells and applies the B3/S23 rules. Cells past the edges count as
//! permanently dead. [`Simulation`] gates stepping on elapsed time and a run/pause state, and
//! accepts [`Intent`]s from whatever input layer drives it. Frontends talk to it through the
//! [`World`] trait.

mod config;
mod grid;
mod random;
mod simulation;

pub use config::{ConfigError, DEFAULT_GRID_SIZE, DEFAULT_STEP_INTERVAL, SimConfig};
pub use grid::{Grid, GridSize, Loc, next_state};
pub use random::Random;
pub use simulation::{Intent, RunState, Simulation};

use std::time::Duration;

/// What a frontend needs from a simulation: read access to the current generation once per
/// frame, a clock tick, and a way to deliver user intents.
pub trait World {
    fn size(&self) -> GridSize;
    fn is_alive(&self, loc: Loc) -> bool;
    fn for_each_alive<F>(&self, f: F)
    where
        F: FnMut(Loc);
    fn advance(&mut self, elapsed: Duration) -> bool;
    fn apply(&mut self, intent: Intent);
}

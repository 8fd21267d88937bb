use crate::World;
use crate::config::SimConfig;
use crate::grid::{Grid, GridSize, Loc};
use crate::random::Random;
use log::{debug, info, trace};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        }
    }
}

/// A discrete user action, as produced by the input layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    ToggleRun,
    Reset,
    Paint { x: i64, y: i64, alive: bool },
    Randomize { density: f64 },
}

/// Drives a [`Grid`] from user intents and elapsed wall-clock time.
///
/// Steps happen at a fixed rate independent of how often [`Simulation::advance`] is called.
/// Elapsed time accumulates on every call, paused or not, and a step fires once the
/// accumulator exceeds the step interval while running. Firing a step zeroes the accumulator,
/// so a long stall yields one step rather than a burst of catch-up steps.
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    state: RunState,
    time_accumulator: Duration,
    step_interval: Duration,
    generation: u64,
    rand: Option<Random>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self::new_with(config, None)
    }

    pub fn with_random(config: SimConfig, rand: Random) -> Self {
        Self::new_with(config, Some(rand))
    }

    fn new_with(config: SimConfig, rand: Option<Random>) -> Self {
        assert!(!config.step_interval.is_zero());
        Self {
            grid: Grid::new(config.size),
            state: RunState::Paused,
            time_accumulator: Duration::ZERO,
            step_interval: config.step_interval,
            generation: 0,
            rand,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn time_accumulator(&self) -> Duration {
        self.time_accumulator
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn toggle_run(&mut self) {
        self.state = self.state.toggled();
        debug!("simulation {:?} at generation {}", self.state, self.generation);
    }

    pub fn reset(&mut self) {
        self.state = RunState::Paused;
        self.time_accumulator = Duration::ZERO;
        self.generation = 0;
        self.grid.clear();
        info!("simulation reset");
    }

    /// Painting is allowed in either run state.
    pub fn paint(&mut self, x: i64, y: i64, alive: bool) {
        self.grid.set(x, y, alive);
    }

    pub fn randomize(&mut self, density: f64) {
        match self.rand.as_mut() {
            Some(rand) => {
                self.grid.randomize(rand, density);
                debug!(
                    "randomized grid at density {density}: {} alive",
                    self.grid.population()
                );
            }
            None => debug!("no random source, ignoring randomize"),
        }
    }

    /// Adds `elapsed` to the accumulator and applies at most one step. Returns whether a step
    /// was applied.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.time_accumulator = self.time_accumulator.saturating_add(elapsed);
        if !self.is_running() || self.time_accumulator <= self.step_interval {
            return false;
        }

        self.grid.step();
        self.time_accumulator = Duration::ZERO;
        self.generation += 1;
        trace!(
            "generation {}: {} alive",
            self.generation,
            self.grid.population()
        );
        true
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::ToggleRun => self.toggle_run(),
            Intent::Reset => self.reset(),
            Intent::Paint { x, y, alive } => self.paint(x, y, alive),
            Intent::Randomize { density } => self.randomize(density),
        }
    }
}

impl World for Simulation {
    fn size(&self) -> GridSize {
        self.grid.size()
    }

    fn is_alive(&self, loc: Loc) -> bool {
        self.grid.is_alive(loc)
    }

    fn for_each_alive<F>(&self, f: F)
    where
        F: FnMut(Loc),
    {
        self.grid.for_each_alive(f);
    }

    fn advance(&mut self, elapsed: Duration) -> bool {
        Simulation::advance(self, elapsed)
    }

    fn apply(&mut self, intent: Intent) {
        Simulation::apply(self, intent);
    }
}

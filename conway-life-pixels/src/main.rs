#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_grid::{Random, SimConfig, Simulation};
use log::info;
use pixels_main_support::{AnimateOptions, AppError, TileLayout, animate, log_error};
use std::process::ExitCode;

const GRID_WIDTH: u32 = 50;
const GRID_HEIGHT: u32 = 50;
const STEP_SECONDS: f64 = 1.0 / 6.0;
const TILE_SIZE: u32 = 13;
const TILE_MARGIN: u32 = 1;
const RANDOM_DENSITY: f64 = 0.3;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error("run", &err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = SimConfig::with_step_seconds(GRID_WIDTH, GRID_HEIGHT, STEP_SECONDS)?;
    info!(
        "starting {}x{} board, one step every {:?}",
        config.size.width, config.size.height, config.step_interval
    );
    let simulation = Simulation::with_random(config, Random::new());
    animate(
        simulation,
        AnimateOptions {
            title: "Game of Life",
            layout: TileLayout::new(TILE_SIZE, TILE_MARGIN),
            random_density: RANDOM_DENSITY,
        },
    )
}

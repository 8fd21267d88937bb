use crate::grid::GridSize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GRID_SIZE: GridSize = GridSize::new(50, 50);

/// One generation every sixth of a second.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 6);

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("step interval must be positive")]
    ZeroStepInterval,

    #[error("step interval must be a finite number of seconds, got {0}")]
    InvalidStepSeconds(f64),
}

/// Settings fixed when the simulation is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub size: GridSize,
    pub step_interval: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            step_interval: DEFAULT_STEP_INTERVAL,
        }
    }
}

impl SimConfig {
    pub fn new(width: u32, height: u32, step_interval: Duration) -> Result<Self, ConfigError> {
        let config = Self {
            size: GridSize::new(width, height),
            step_interval,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_step_seconds(width: u32, height: u32, seconds: f64) -> Result<Self, ConfigError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ConfigError::InvalidStepSeconds(seconds));
        }
        Self::new(width, height, Duration::from_secs_f64(seconds))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.size.width,
                height: self.size.height,
            });
        }
        if self.step_interval.is_zero() {
            return Err(ConfigError::ZeroStepInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_classic_board() {
        let config = SimConfig::default();
        assert_eq!(config.size, GridSize::new(50, 50));
        assert_eq!(config.step_interval.as_millis(), 166);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_grid() {
        assert_eq!(
            SimConfig::new(0, 50, DEFAULT_STEP_INTERVAL),
            Err(ConfigError::EmptyGrid { width: 0, height: 50 })
        );
        assert_eq!(
            SimConfig::new(50, 0, DEFAULT_STEP_INTERVAL),
            Err(ConfigError::EmptyGrid { width: 50, height: 0 })
        );
    }

    #[test]
    fn rejects_zero_interval() {
        assert_eq!(
            SimConfig::new(10, 10, Duration::ZERO),
            Err(ConfigError::ZeroStepInterval)
        );
    }

    #[test]
    fn step_seconds_must_be_finite() {
        assert!(matches!(
            SimConfig::with_step_seconds(10, 10, f64::NAN),
            Err(ConfigError::InvalidStepSeconds(_))
        ));
        assert!(matches!(
            SimConfig::with_step_seconds(10, 10, -1.0),
            Err(ConfigError::InvalidStepSeconds(_))
        ));
        let config = SimConfig::with_step_seconds(10, 10, 0.25).unwrap();
        assert_eq!(config.step_interval, Duration::from_millis(250));
    }
}

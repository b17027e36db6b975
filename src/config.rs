use crate::backtest::synthetic::RandomWalkConfig;
use crate::error::ConfigError;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `CROSSOVER_SHORT_WINDOW=5`
pub const ENV_PREFIX: &str = "CROSSOVER";

/// Upper bound on simulated days; the series and the window history are each
/// held in memory as one `f64` per day.
pub const MAX_DAYS: usize = 10_000_000;

/// Settings for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of simulated trading days
    pub days: usize,
    pub short_window: usize,
    pub long_window: usize,
    pub starting_cash: f64,
    pub walk: RandomWalkConfig,
    /// Fixed seed for reproducible runs; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 200,
            short_window: 10,
            long_window: 30,
            starting_cash: 10_000.0,
            walk: RandomWalkConfig::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load settings from an optional TOML file, then `CROSSOVER_*` environment
    ///
    /// Nested keys use `__`, e.g. `CROSSOVER_WALK__STEP_STD_DEV=2.0`.
    /// Values are not validated here; call [`SimulationConfig::validate`] once
    /// any command-line overrides have been applied.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        Self::build(builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        ))
    }

    /// Parse settings from TOML text; missing keys fall back to defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self, ConfigError> {
        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Reject settings that would make the run meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::NoDays);
        }
        if self.days > MAX_DAYS {
            return Err(ConfigError::TooManyDays {
                days: self.days,
                max: MAX_DAYS,
            });
        }
        if self.short_window == 0 {
            return Err(ConfigError::ZeroWindow { name: "Short" });
        }
        if self.long_window == 0 {
            return Err(ConfigError::ZeroWindow { name: "Long" });
        }
        if !(self.starting_cash.is_finite() && self.starting_cash > 0.0) {
            return Err(ConfigError::InvalidCash(self.starting_cash));
        }

        self.walk.validate()?;

        if self.short_window >= self.long_window {
            tracing::warn!(
                "Short window ({}) is not shorter than long window ({}); crossovers will be rare or absent",
                self.short_window,
                self.long_window
            );
        }

        Ok(())
    }
}

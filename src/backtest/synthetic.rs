use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Parameters of the bounded Gaussian random walk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RandomWalkConfig {
    pub start_price: f64,
    /// Standard deviation of the daily price increment
    pub step_std_dev: f64,
    /// Prices never fall below this level
    pub floor: f64,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            step_std_dev: 1.5,
            floor: 10.0,
        }
    }
}

impl RandomWalkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.start_price.is_finite() && self.start_price > 0.0) {
            return Err(ConfigError::InvalidPrice {
                name: "Start price",
                value: self.start_price,
            });
        }
        if !(self.floor.is_finite() && self.floor > 0.0) {
            return Err(ConfigError::InvalidPrice {
                name: "Floor",
                value: self.floor,
            });
        }
        if !(self.step_std_dev.is_finite() && self.step_std_dev >= 0.0) {
            return Err(ConfigError::InvalidStepStdDev(self.step_std_dev));
        }
        Ok(())
    }
}

/// Anything that can supply a series of daily prices
pub trait PriceSource {
    fn next_price(&mut self) -> f64;

    /// Collect `days` successive prices
    fn generate(&mut self, days: usize) -> Vec<f64> {
        (0..days).map(|_| self.next_price()).collect()
    }
}

/// Random walk with normally distributed increments, clamped at a floor
pub struct RandomWalkGenerator<R: Rng = StdRng> {
    rng: R,
    step: Normal<f64>,
    floor: f64,
    last_price: f64,
}

impl RandomWalkGenerator<StdRng> {
    /// Create a generator with a seed for reproducibility
    pub fn from_seed(config: &RandomWalkConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Create a generator seeded from OS entropy
    pub fn from_entropy(config: &RandomWalkConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> RandomWalkGenerator<R> {
    pub fn with_rng(config: &RandomWalkConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let step = Normal::new(0.0, config.step_std_dev)
            .map_err(|_| ConfigError::InvalidStepStdDev(config.step_std_dev))?;

        Ok(Self {
            rng,
            step,
            floor: config.floor,
            last_price: config.start_price,
        })
    }
}

impl<R: Rng> PriceSource for RandomWalkGenerator<R> {
    fn next_price(&mut self) -> f64 {
        let change = self.step.sample(&mut self.rng);
        self.last_price = (self.last_price + change).max(self.floor);
        self.last_price
    }
}

/// Replays a fixed price sequence, holding the last price once exhausted
#[derive(Debug, Clone)]
pub struct ScriptedPrices {
    prices: Vec<f64>,
    cursor: usize,
}

impl ScriptedPrices {
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices, cursor: 0 }
    }
}

impl PriceSource for ScriptedPrices {
    fn next_price(&mut self) -> f64 {
        let price = self
            .prices
            .get(self.cursor)
            .or_else(|| self.prices.last())
            .copied()
            .unwrap_or(0.0);
        self.cursor += 1;
        price
    }
}

pub mod metrics;
pub mod runner;
pub mod synthetic;

pub use metrics::{BacktestReport, RoundTrip};
pub use runner::BacktestRunner;
pub use synthetic::{PriceSource, RandomWalkConfig, RandomWalkGenerator, ScriptedPrices};

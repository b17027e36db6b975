// Trading strategy module
pub mod crossover;

use crate::models::Signal;

pub use crossover::{CrossoverState, CrossoverStrategy};

/// Base trait for day-by-day trading strategies
pub trait Strategy: Send {
    /// Evaluate the strategy once a new price has been appended to `history`
    ///
    /// `history` is the full price series observed so far, oldest first.
    fn on_price(&mut self, history: &[f64]) -> Signal;

    /// Get strategy name
    fn name(&self) -> &str;

    /// Minimum prices observed before the strategy produces signals
    fn min_prices_required(&self) -> usize;
}

use crate::backtest::metrics::BacktestReport;
use crate::backtest::synthetic::{PriceSource, RandomWalkGenerator};
use crate::config::SimulationConfig;
use crate::execution::Portfolio;
use crate::models::Signal;
use crate::strategy::{CrossoverStrategy, Strategy};
use crate::Result;

/// Drives one moving-average crossover simulation over a price series
pub struct BacktestRunner {
    config: SimulationConfig,
}

impl BacktestRunner {
    /// Create a runner, rejecting invalid settings before anything is simulated
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generate the configured number of days from the random walk
    ///
    /// Uses the configured seed when present, otherwise OS entropy.
    pub fn generate_prices(&self) -> Result<Vec<f64>> {
        let prices = match self.config.seed {
            Some(seed) => {
                tracing::debug!("Seeding random walk with {}", seed);
                RandomWalkGenerator::from_seed(&self.config.walk, seed)?.generate(self.config.days)
            }
            None => RandomWalkGenerator::from_entropy(&self.config.walk)?.generate(self.config.days),
        };
        Ok(prices)
    }

    /// Generate a series and backtest it, returning both
    pub fn simulate(&self) -> Result<(Vec<f64>, BacktestReport)> {
        let prices = self.generate_prices()?;
        let report = self.run(&prices)?;
        Ok((prices, report))
    }

    /// Pull the configured number of days from `source` and backtest them
    pub fn run_source<P: PriceSource>(&self, source: &mut P) -> Result<BacktestReport> {
        let prices = source.generate(self.config.days);
        self.run(&prices)
    }

    /// Run the crossover strategy over `prices`
    ///
    /// # Arguments
    /// * `prices` - Daily prices, oldest first. Day numbers in the report are 1-based.
    ///
    /// # Returns
    /// BacktestReport with every realized trade and the final portfolio value
    pub fn run(&self, prices: &[f64]) -> Result<BacktestReport> {
        let mut strategy = CrossoverStrategy::new(self.config.short_window, self.config.long_window);
        self.run_strategy(&mut strategy, prices)
    }

    fn run_strategy(
        &self,
        strategy: &mut CrossoverStrategy,
        prices: &[f64],
    ) -> Result<BacktestReport> {
        tracing::info!(
            "Starting backtest: {} days, {} needs {} prices to warm up",
            prices.len(),
            strategy.name(),
            strategy.min_prices_required()
        );

        let mut portfolio = Portfolio::new(self.config.starting_cash);
        let mut history = Vec::with_capacity(prices.len());

        for (i, &price) in prices.iter().enumerate() {
            history.push(price);
            let day = i + 1;

            match strategy.on_price(&history) {
                Signal::Buy => {
                    let event = portfolio.open_position(day, price)?;
                    tracing::debug!("{}", event);
                }
                Signal::Sell => {
                    let event = portfolio.close_position(day, price)?;
                    tracing::debug!("{}", event);
                }
                Signal::Hold => {}
            }
        }

        // Close any remaining open position at the final price
        if let Some(&final_price) = prices.last() {
            if let Some(event) = portfolio.force_close(prices.len(), final_price)? {
                tracing::debug!("{}", event);
            }
        }

        let report = BacktestReport::new(
            strategy.name(),
            strategy.short_window(),
            strategy.long_window(),
            prices.len(),
            portfolio.initial_cash(),
            portfolio.cash(),
            portfolio.into_events(),
        );

        tracing::info!(
            "Backtest complete: {} round trips, P&L: ${:.2} ({:.2}%)",
            report.round_trips,
            report.total_pnl,
            report.total_return_pct
        );

        Ok(report)
    }
}

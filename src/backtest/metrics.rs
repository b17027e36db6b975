use crate::models::TradeEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A buy paired with the sell (or end-of-run liquidation) that closed it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundTrip {
    pub entry_day: usize,
    pub exit_day: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub shares: u64,
    pub pnl: f64,
}

impl RoundTrip {
    /// Pair each buy with the exit event that follows it
    pub fn from_events(events: &[TradeEvent]) -> Vec<Self> {
        let mut trips = Vec::new();
        let mut entry: Option<&TradeEvent> = None;

        for event in events {
            match (entry, event.is_exit()) {
                (None, false) => entry = Some(event),
                (Some(buy), true) => {
                    trips.push(Self {
                        entry_day: buy.day(),
                        exit_day: event.day(),
                        entry_price: buy.price(),
                        exit_price: event.price(),
                        shares: buy.shares(),
                        pnl: (event.price() - buy.price()) * buy.shares() as f64,
                    });
                    entry = None;
                }
                _ => tracing::warn!("Unpaired trade event: {:?}", event),
            }
        }

        trips
    }

    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }
}

/// Outcome of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub strategy: String,
    pub short_window: usize,
    pub long_window: usize,
    pub days: usize,

    // P&L
    pub initial_cash: f64,
    pub final_value: f64,
    pub total_pnl: f64,
    pub total_return_pct: f64,

    // Trade statistics
    pub round_trips: usize,
    pub winning_trips: usize,

    pub events: Vec<TradeEvent>,
}

impl BacktestReport {
    pub fn new(
        strategy: &str,
        short_window: usize,
        long_window: usize,
        days: usize,
        initial_cash: f64,
        final_value: f64,
        events: Vec<TradeEvent>,
    ) -> Self {
        let trips = RoundTrip::from_events(&events);
        let total_pnl = final_value - initial_cash;

        Self {
            strategy: strategy.to_string(),
            short_window,
            long_window,
            days,
            initial_cash,
            final_value,
            total_pnl,
            total_return_pct: total_pnl / initial_cash * 100.0,
            round_trips: trips.len(),
            winning_trips: trips.iter().filter(|t| t.is_win()).count(),
            events,
        }
    }

    pub fn buy_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TradeEvent::Buy { .. }))
            .count()
    }

    pub fn sell_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TradeEvent::Sell { .. }))
            .count()
    }

    /// Print the textual report to stdout
    pub fn print_report(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for BacktestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Starting Algorithmic Trading Simulation ---")?;
        writeln!(
            f,
            "Strategy: Moving Average Crossover ({}-day vs {}-day SMA)",
            self.short_window, self.long_window
        )?;
        writeln!(f)?;

        for event in &self.events {
            if let TradeEvent::EndOfRun { .. } = event {
                writeln!(f)?;
            }
            writeln!(f, "{}", event)?;
        }

        writeln!(f)?;
        writeln!(f, "--- Simulation Complete ---")?;
        writeln!(f, "Final Portfolio Value: ${:.2}", self.final_value)?;
        writeln!(
            f,
            "Total Return: {:+.2}% | Round trips: {} | Winning: {}",
            self.total_return_pct, self.round_trips, self.winning_trips
        )
    }
}

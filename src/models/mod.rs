use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading signal emitted by the crossover detector for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Short/long moving averages observed on one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmaPair {
    pub short: f64,
    pub long: f64,
}

/// Ledger event produced when a trade is realized.
///
/// `day` is 1-based (the first simulated day is day 1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeEvent {
    Buy {
        day: usize,
        price: f64,
        shares: u64,
    },
    Sell {
        day: usize,
        price: f64,
        shares: u64,
        cash: f64,
    },
    /// Forced liquidation of a position still open after the last day
    EndOfRun {
        day: usize,
        price: f64,
        shares: u64,
        cash: f64,
    },
}

impl TradeEvent {
    pub fn day(&self) -> usize {
        match self {
            TradeEvent::Buy { day, .. }
            | TradeEvent::Sell { day, .. }
            | TradeEvent::EndOfRun { day, .. } => *day,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            TradeEvent::Buy { price, .. }
            | TradeEvent::Sell { price, .. }
            | TradeEvent::EndOfRun { price, .. } => *price,
        }
    }

    pub fn shares(&self) -> u64 {
        match self {
            TradeEvent::Buy { shares, .. }
            | TradeEvent::Sell { shares, .. }
            | TradeEvent::EndOfRun { shares, .. } => *shares,
        }
    }

    /// True for events that close a position (strategy sell or forced liquidation)
    pub fn is_exit(&self) -> bool {
        !matches!(self, TradeEvent::Buy { .. })
    }
}

impl fmt::Display for TradeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeEvent::Buy { day, price, shares } => write!(
                f,
                "Day {} | Price: ${:.2} | BUY SIGNAL (Golden Cross) | Bought {} shares.",
                day, price, shares
            ),
            TradeEvent::Sell {
                day,
                price,
                shares,
                cash,
            } => write!(
                f,
                "Day {} | Price: ${:.2} | SELL SIGNAL (Death Cross) | Sold {} shares. Portfolio: ${:.2}",
                day, price, shares, cash
            ),
            TradeEvent::EndOfRun { price, shares, .. } => write!(
                f,
                "End of simulation. Selling remaining {} shares at final price ${:.2}",
                shares, price
            ),
        }
    }
}

use crate::error::LedgerError;
use crate::models::TradeEvent;

/// Single-asset cash/shares ledger
///
/// Holds at most one position at a time. Purchases always spend a whole number
/// of shares, so neither cash nor shares can go negative.
#[derive(Debug, Clone)]
pub struct Portfolio {
    initial_cash: f64,
    cash: f64,
    shares: u64,
    position_open: bool,
    events: Vec<TradeEvent>,
}

impl Portfolio {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            initial_cash,
            cash: initial_cash,
            shares: 0,
            position_open: false,
            events: Vec::new(),
        }
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn shares(&self) -> u64 {
        self.shares
    }

    pub fn has_open_position(&self) -> bool {
        self.position_open
    }

    /// All realized events, in day order
    pub fn events(&self) -> &[TradeEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TradeEvent> {
        self.events
    }

    /// Spend as much cash as possible on whole shares at `price`
    ///
    /// The position is marked open even if no share is affordable, so the
    /// ledger stays in step with the signal stream.
    pub fn open_position(&mut self, day: usize, price: f64) -> Result<TradeEvent, LedgerError> {
        check_price(day, price)?;
        if self.position_open {
            return Err(LedgerError::PositionAlreadyOpen { day });
        }

        let mut shares = (self.cash / price).floor() as u64;
        // A rounded-up quotient can overshoot by one share
        if shares as f64 * price > self.cash {
            shares = shares.saturating_sub(1);
        }
        self.cash -= shares as f64 * price;
        self.shares = shares;
        self.position_open = true;

        tracing::debug!(
            "Opened position day {} @ ${:.2}: {} shares, cash left ${:.2}",
            day,
            price,
            shares,
            self.cash
        );

        let event = TradeEvent::Buy { day, price, shares };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Sell the entire held quantity at `price`
    pub fn close_position(&mut self, day: usize, price: f64) -> Result<TradeEvent, LedgerError> {
        let shares = self.liquidate(day, price)?;
        let event = TradeEvent::Sell {
            day,
            price,
            shares,
            cash: self.cash,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Liquidate a position still open after the last day, if any
    pub fn force_close(
        &mut self,
        day: usize,
        price: f64,
    ) -> Result<Option<TradeEvent>, LedgerError> {
        if !self.position_open {
            return Ok(None);
        }

        let shares = self.liquidate(day, price)?;
        let event = TradeEvent::EndOfRun {
            day,
            price,
            shares,
            cash: self.cash,
        };
        self.events.push(event.clone());
        Ok(Some(event))
    }

    fn liquidate(&mut self, day: usize, price: f64) -> Result<u64, LedgerError> {
        check_price(day, price)?;
        if !self.position_open {
            return Err(LedgerError::NoOpenPosition { day });
        }

        let shares = self.shares;
        self.cash += shares as f64 * price;
        self.shares = 0;
        self.position_open = false;

        tracing::debug!(
            "Closed position day {} @ ${:.2}: {} shares, cash ${:.2}",
            day,
            price,
            shares,
            self.cash
        );

        Ok(shares)
    }
}

fn check_price(day: usize, price: f64) -> Result<(), LedgerError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidPrice { day, price })
    }
}

use super::Strategy;
use crate::indicators::calculate_sma;
use crate::models::{Signal, SmaPair};

/// State carried between days by the crossover detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverState {
    pub prev_short: f64,
    pub prev_long: f64,
    pub position_open: bool,
}

impl Default for CrossoverState {
    fn default() -> Self {
        Self {
            prev_short: 0.0,
            prev_long: 0.0,
            position_open: false,
        }
    }
}

impl CrossoverState {
    /// Apply one warmed-up day's averages
    ///
    /// Buy on a golden cross (short moves from <= to > long) while flat, sell on
    /// a death cross (short moves from >= to < long) while holding. The previous
    /// averages are replaced by `sma` whether or not a signal fires.
    pub fn transition(self, sma: SmaPair) -> (Self, Signal) {
        let signal = if sma.short > sma.long
            && self.prev_short <= self.prev_long
            && !self.position_open
        {
            Signal::Buy
        } else if sma.short < sma.long
            && self.prev_short >= self.prev_long
            && self.position_open
        {
            Signal::Sell
        } else {
            Signal::Hold
        };

        let position_open = match signal {
            Signal::Buy => true,
            Signal::Sell => false,
            Signal::Hold => self.position_open,
        };

        let next = Self {
            prev_short: sma.short,
            prev_long: sma.long,
            position_open,
        };

        (next, signal)
    }
}

/// Moving average crossover strategy
///
/// Intended to be configured with `short_window < long_window`. Other
/// configurations are accepted; they simply cross rarely or never.
#[derive(Debug, Clone)]
pub struct CrossoverStrategy {
    short_window: usize,
    long_window: usize,
    state: CrossoverState,
}

impl CrossoverStrategy {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
            state: CrossoverState::default(),
        }
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }

    pub fn state(&self) -> CrossoverState {
        self.state
    }

    /// Both averages for the current history, or None during warm-up
    pub fn sma_pair(&self, history: &[f64]) -> Option<SmaPair> {
        if history.len() < self.min_prices_required() {
            return None;
        }

        Some(SmaPair {
            short: calculate_sma(history, self.short_window)?,
            long: calculate_sma(history, self.long_window)?,
        })
    }
}

impl Default for CrossoverStrategy {
    fn default() -> Self {
        Self::new(10, 30)
    }
}

impl Strategy for CrossoverStrategy {
    fn on_price(&mut self, history: &[f64]) -> Signal {
        let Some(sma) = self.sma_pair(history) else {
            return Signal::Hold;
        };

        let (next, signal) = self.state.transition(sma);
        self.state = next;
        signal
    }

    fn name(&self) -> &str {
        "MovingAverageCrossover"
    }

    fn min_prices_required(&self) -> usize {
        self.short_window.max(self.long_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat at 100 for 34 days, then 200 for days 35-42, then back to 100.
    /// With 10/30 windows this golden-crosses on day 35 and death-crosses on day 50.
    fn spike_series(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| if (34..=41).contains(&i) { 200.0 } else { 100.0 })
            .collect()
    }

    /// Run the strategy over `prices`, returning (day, signal) for every non-hold day
    fn signals(strategy: &mut CrossoverStrategy, prices: &[f64]) -> Vec<(usize, Signal)> {
        (0..prices.len())
            .filter_map(|i| match strategy.on_price(&prices[..=i]) {
                Signal::Hold => None,
                signal => Some((i + 1, signal)),
            })
            .collect()
    }

    #[test]
    fn test_transition_golden_cross() {
        let state = CrossoverState {
            prev_short: 99.0,
            prev_long: 100.0,
            position_open: false,
        };

        let (next, signal) = state.transition(SmaPair {
            short: 101.0,
            long: 100.0,
        });

        assert_eq!(signal, Signal::Buy);
        assert!(next.position_open);
        assert_eq!(next.prev_short, 101.0);
        assert_eq!(next.prev_long, 100.0);
    }

    #[test]
    fn test_transition_golden_cross_from_equal() {
        let state = CrossoverState {
            prev_short: 100.0,
            prev_long: 100.0,
            position_open: false,
        };

        let (_, signal) = state.transition(SmaPair {
            short: 100.5,
            long: 100.0,
        });
        assert_eq!(signal, Signal::Buy);
    }

    #[test]
    fn test_transition_death_cross() {
        let state = CrossoverState {
            prev_short: 101.0,
            prev_long: 100.0,
            position_open: true,
        };

        let (next, signal) = state.transition(SmaPair {
            short: 99.0,
            long: 100.0,
        });

        assert_eq!(signal, Signal::Sell);
        assert!(!next.position_open);
    }

    #[test]
    fn test_transition_ignores_cross_in_wrong_position() {
        // Golden cross while already holding
        let holding = CrossoverState {
            prev_short: 99.0,
            prev_long: 100.0,
            position_open: true,
        };
        let (next, signal) = holding.transition(SmaPair {
            short: 101.0,
            long: 100.0,
        });
        assert_eq!(signal, Signal::Hold);
        assert!(next.position_open);

        // Death cross while flat
        let flat = CrossoverState {
            prev_short: 101.0,
            prev_long: 100.0,
            position_open: false,
        };
        let (next, signal) = flat.transition(SmaPair {
            short: 99.0,
            long: 100.0,
        });
        assert_eq!(signal, Signal::Hold);
        assert!(!next.position_open);
    }

    #[test]
    fn test_transition_always_updates_previous_averages() {
        let state = CrossoverState {
            prev_short: 105.0,
            prev_long: 100.0,
            position_open: true,
        };

        let (next, signal) = state.transition(SmaPair {
            short: 107.0,
            long: 101.0,
        });

        assert_eq!(signal, Signal::Hold);
        assert_eq!(next.prev_short, 107.0);
        assert_eq!(next.prev_long, 101.0);
    }

    #[test]
    fn test_inert_during_warmup() {
        let mut strategy = CrossoverStrategy::new(3, 5);
        let prices = vec![1.0, 2.0, 3.0, 4.0];

        for i in 0..prices.len() {
            assert_eq!(strategy.on_price(&prices[..=i]), Signal::Hold);
        }

        assert_eq!(strategy.state(), CrossoverState::default());
    }

    #[test]
    fn test_buy_fires_exactly_on_day_35() {
        let mut strategy = CrossoverStrategy::default();
        let prices = spike_series(35);

        let fired = signals(&mut strategy, &prices);
        assert_eq!(fired, vec![(35, Signal::Buy)]);
    }

    #[test]
    fn test_sell_fires_exactly_on_day_50() {
        let mut strategy = CrossoverStrategy::default();
        let prices = spike_series(50);

        let fired = signals(&mut strategy, &prices);
        assert_eq!(fired, vec![(35, Signal::Buy), (50, Signal::Sell)]);
        assert!(!strategy.state().position_open);
    }

    #[test]
    fn test_monotonic_series_buys_once_on_first_valid_day() {
        let mut strategy = CrossoverStrategy::default();
        let prices: Vec<f64> = (0..200).map(|i| 100.0 + i as f64).collect();

        let fired = signals(&mut strategy, &prices);
        assert_eq!(fired, vec![(30, Signal::Buy)]);
    }

    #[test]
    fn test_equal_windows_never_cross() {
        let prices: Vec<f64> = (0..60)
            .map(|i| 100.0 + ((i as f64) * 0.7).sin() * 5.0)
            .collect();

        let mut equal = CrossoverStrategy::new(10, 10);
        let fired = signals(&mut equal, &prices);
        assert!(fired.is_empty(), "Equal windows never cross");
    }

    #[test]
    fn test_inverted_windows_cross_on_reversals() {
        // 100 for 40 days, 50 for days 41-70, back to 100 from day 71.
        // The 30-day "short" average lags the 10-day "long" one, so the drop
        // reads as a golden cross and the recovery as a death cross.
        let prices: Vec<f64> = (0..80)
            .map(|i| if (40..70).contains(&i) { 50.0 } else { 100.0 })
            .collect();

        let mut inverted = CrossoverStrategy::new(30, 10);
        assert_eq!(inverted.min_prices_required(), 30);

        // Warm-up lasts until the longer of the two windows is full
        for i in 0..29 {
            assert_eq!(inverted.on_price(&prices[..=i]), Signal::Hold);
        }
        assert_eq!(inverted.state(), CrossoverState::default());

        let mut inverted = CrossoverStrategy::new(30, 10);
        let fired = signals(&mut inverted, &prices);
        assert_eq!(fired, vec![(41, Signal::Buy), (71, Signal::Sell)]);
        assert!(fired.iter().all(|&(day, _)| day >= 30));
    }

    #[test]
    fn test_strategy_name() {
        let strategy = CrossoverStrategy::default();
        assert_eq!(strategy.name(), "MovingAverageCrossover");
        assert_eq!(strategy.min_prices_required(), 30);
    }
}

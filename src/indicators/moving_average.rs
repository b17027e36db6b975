/// Calculate Simple Moving Average (SMA) over the last `period` prices
///
/// Returns `None` while fewer than `period` prices are available, or when
/// `period` is zero.
pub fn calculate_sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let sum: f64 = prices.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0];
        let sma = calculate_sma(&prices, 5);
        assert_eq!(sma, Some(104.0));
    }

    #[test]
    fn test_sma_uses_most_recent_prices() {
        let prices = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(calculate_sma(&prices, 3), Some(4.0));
        assert_eq!(calculate_sma(&prices, 1), Some(5.0));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let prices = vec![100.0, 102.0];
        let sma = calculate_sma(&prices, 5);
        assert!(sma.is_none());
    }

    #[test]
    fn test_sma_zero_period() {
        let prices = vec![100.0, 102.0];
        assert!(calculate_sma(&prices, 0).is_none());
    }

    #[test]
    fn test_sma_zero_price_is_a_real_value() {
        let prices = vec![0.0, 0.0, 0.0];
        assert_eq!(calculate_sma(&prices, 3), Some(0.0));
    }

    #[test]
    fn test_sma_within_window_bounds() {
        let prices = vec![
            100.0, 97.5, 103.2, 99.9, 110.4, 88.1, 101.0, 95.3, 104.7, 102.2, 98.8,
        ];

        for period in 1..=prices.len() {
            let window = &prices[prices.len() - period..];
            let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            let sma = calculate_sma(&prices, period).unwrap();
            assert!(
                sma >= min && sma <= max,
                "SMA({}) = {} outside [{}, {}]",
                period,
                sma,
                min,
                max
            );
        }
    }
}

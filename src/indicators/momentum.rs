use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::mean;
use crate::types::PriceSeries;

/// RSI-style momentum index in [0, 100] over a trailing window.
///
/// Per-step changes are split into gains and losses and averaged with a
/// plain rolling mean over the last `window` steps. The first defined
/// output sits at index `window` (one delta per step, `window` deltas
/// needed). Boundary rule where the loss average is zero: all-gain
/// windows read 100, flat windows read exactly 50 — the division never
/// runs.
pub fn compute_momentum_index(series: &PriceSeries, window: usize) -> Vec<Option<Decimal>> {
    let closes = series.closes();
    let len = closes.len();
    let mut out = vec![None; len];
    if window == 0 || len < window + 1 {
        return out;
    }

    // gains[j] / losses[j] describe the step into series index j + 1
    let mut gains = Vec::with_capacity(len - 1);
    let mut losses = Vec::with_capacity(len - 1);
    for i in 1..len {
        let delta = closes[i] - closes[i - 1];
        gains.push(delta.max(Decimal::ZERO));
        losses.push((-delta).max(Decimal::ZERO));
    }

    for i in window..len {
        let avg_gain = mean(&gains[i - window..i]);
        let avg_loss = mean(&losses[i - window..i]);
        out[i] = Some(momentum_from_averages(avg_gain, avg_loss));
    }
    out
}

fn momentum_from_averages(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
    if avg_loss.is_zero() {
        if avg_gain.is_zero() {
            return dec!(50);
        }
        return dec!(100);
    }
    let rs = avg_gain / avg_loss;
    let value = dec!(100) - dec!(100) / (Decimal::ONE + rs);
    value.clamp(Decimal::ZERO, dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::series_from_closes;

    #[test]
    fn test_short_series_is_all_undefined() {
        // window + 1 bars are the minimum; 14 bars with window 14 is one short
        let closes: Vec<Decimal> = (0..14).map(|i| Decimal::from(100 + i)).collect();
        let series = series_from_closes(&closes);
        let out = compute_momentum_index(&series, 14);
        assert!(out.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_monotonic_rise_reads_100() {
        let closes: Vec<Decimal> = (0..20).map(|i| Decimal::from(100 + i)).collect();
        let series = series_from_closes(&closes);
        let out = compute_momentum_index(&series, 14);

        assert!(out[..14].iter().all(|v| v.is_none()));
        for value in &out[14..] {
            assert_eq!(*value, Some(dec!(100)));
        }
    }

    #[test]
    fn test_monotonic_fall_reads_0() {
        let closes: Vec<Decimal> = (0..20).map(|i| Decimal::from(200 - i)).collect();
        let series = series_from_closes(&closes);
        let out = compute_momentum_index(&series, 14);

        for value in &out[14..] {
            assert_eq!(*value, Some(Decimal::ZERO));
        }
    }

    #[test]
    fn test_flat_series_reads_exactly_50() {
        let closes = vec![dec!(100); 20];
        let series = series_from_closes(&closes);
        let out = compute_momentum_index(&series, 14);

        for value in &out[14..] {
            assert_eq!(*value, Some(dec!(50)));
        }
    }

    #[test]
    fn test_mixed_window_stays_in_bounds() {
        let closes: Vec<Decimal> = (0..30)
            .map(|i| Decimal::from(if i % 3 == 0 { 100 + i } else { 98 + i }))
            .collect();
        let series = series_from_closes(&closes);
        let out = compute_momentum_index(&series, 14);

        for value in out.iter().flatten() {
            assert!(*value >= Decimal::ZERO && *value <= dec!(100));
        }
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::sample_stddev;
use crate::types::PriceSeries;

/// Realized volatility: trailing standard deviation of day-over-day
/// returns, expressed in percent.
///
/// The deviation is the sample form (n-1 denominator), so the smallest
/// usable window is 2. The first defined output sits at index `window`
/// (`window` returns needed). A zero previous close makes that return —
/// and every window containing it — undefined rather than a panic; such
/// input is out of contract but must not crash.
pub fn compute_volatility(series: &PriceSeries, window: usize) -> Vec<Option<Decimal>> {
    let closes = series.closes();
    let len = closes.len();
    let mut out = vec![None; len];
    if window < 2 || len < window + 1 {
        return out;
    }

    // returns[j] describes the step into series index j + 1
    let mut returns: Vec<Option<Decimal>> = Vec::with_capacity(len - 1);
    for i in 1..len {
        let prev = closes[i - 1];
        if prev.is_zero() {
            returns.push(None);
        } else {
            returns.push(Some(closes[i] / prev - Decimal::ONE));
        }
    }

    for i in window..len {
        let trailing = &returns[i - window..i];
        if trailing.iter().all(|r| r.is_some()) {
            let values: Vec<Decimal> = trailing.iter().flatten().copied().collect();
            out[i] = Some(sample_stddev(&values) * dec!(100));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::series_from_closes;

    #[test]
    fn test_short_series_is_all_undefined() {
        let closes: Vec<Decimal> = (0..14).map(|i| Decimal::from(100 + i)).collect();
        let series = series_from_closes(&closes);
        let out = compute_volatility(&series, 14);
        assert!(out.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_constant_series_reads_zero() {
        let closes = vec![dec!(100); 20];
        let series = series_from_closes(&closes);
        let out = compute_volatility(&series, 14);

        assert!(out[..14].iter().all(|v| v.is_none()));
        for value in &out[14..] {
            assert_eq!(*value, Some(Decimal::ZERO));
        }
    }

    #[test]
    fn test_known_two_return_window() {
        // closes 100 -> 110 -> 99: returns +10% and -10%.
        // Sample stddev of {0.1, -0.1} is sqrt(0.02) ~= 0.141421,
        // i.e. ~14.1421 in percent units.
        let series = series_from_closes(&[dec!(100), dec!(110), dec!(99)]);
        let out = compute_volatility(&series, 2);

        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        let vol = out[2].unwrap();
        assert!((vol - dec!(14.1421)).abs() < dec!(0.001));
    }

    #[test]
    fn test_zero_close_does_not_panic() {
        let series = series_from_closes(&[dec!(100), Decimal::ZERO, dec!(100), dec!(101)]);
        let out = compute_volatility(&series, 2);
        // the window touching the zero-close step stays undefined
        assert_eq!(out[2], None);
        assert_eq!(out[1], None);
    }

    #[test]
    fn test_window_below_two_is_all_undefined() {
        let closes: Vec<Decimal> = (0..10).map(|i| Decimal::from(100 + i)).collect();
        let series = series_from_closes(&closes);
        assert!(compute_volatility(&series, 1).iter().all(|v| v.is_none()));
    }
}

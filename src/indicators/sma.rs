use rust_decimal::Decimal;

use super::mean;
use crate::types::PriceSeries;

/// Simple moving average of close prices over a trailing window.
///
/// `out[i]` is the mean of closes at positions `[i-window+1, i]` and is
/// `None` until all `window` positions exist (`i >= window - 1`).
pub fn compute_sma(series: &PriceSeries, window: usize) -> Vec<Option<Decimal>> {
    let closes = series.closes();
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() < window {
        return out;
    }

    for i in (window - 1)..closes.len() {
        out[i] = Some(mean(&closes[i + 1 - window..=i]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::series_from_closes;
    use rust_decimal_macros::dec;

    #[test]
    fn test_short_series_is_all_undefined() {
        let series = series_from_closes(&[dec!(100), dec!(101), dec!(102)]);
        let out = compute_sma(&series, 4);
        assert_eq!(out, vec![None, None, None]);
    }

    #[test]
    fn test_window_boundary_and_values() {
        let series = series_from_closes(&[dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);
        let out = compute_sma(&series, 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(dec!(2)));
        assert_eq!(out[3], Some(dec!(3)));
        assert_eq!(out[4], Some(dec!(4)));
    }

    #[test]
    fn test_constant_series() {
        let closes = vec![dec!(100); 60];
        let series = series_from_closes(&closes);
        let out = compute_sma(&series, 50);

        assert!(out[..49].iter().all(|v| v.is_none()));
        assert_eq!(out[49..].len(), 11);
        assert!(out[49..].iter().all(|v| *v == Some(dec!(100))));
    }

    #[test]
    fn test_output_length_matches_input() {
        let series = series_from_closes(&[dec!(10); 7]);
        assert_eq!(compute_sma(&series, 3).len(), 7);
        assert_eq!(compute_sma(&series, 100).len(), 7);
    }
}

pub mod momentum;
pub mod sma;
pub mod volatility;

pub use momentum::*;
pub use sma::*;
pub use volatility::*;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WindowSettings;
use crate::types::PriceSeries;

/// Derived series aligned index-for-index with the input price series.
/// `None` marks positions where the rolling window lacks history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub sma: Vec<Option<Decimal>>,
    pub momentum: Vec<Option<Decimal>>,
    pub volatility: Vec<Option<Decimal>>,
}

impl IndicatorSeries {
    /// Pure function of (series, windows); computing twice yields
    /// identical output.
    pub fn compute(series: &PriceSeries, windows: &WindowSettings) -> Self {
        Self {
            sma: compute_sma(series, windows.trend),
            momentum: compute_momentum_index(series, windows.momentum),
            volatility: compute_volatility(series, windows.volatility),
        }
    }

    pub fn len(&self) -> usize {
        self.sma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma.is_empty()
    }

    pub fn latest_sma(&self) -> Option<Decimal> {
        self.sma.last().copied().flatten()
    }

    pub fn latest_momentum(&self) -> Option<Decimal> {
        self.momentum.last().copied().flatten()
    }

    pub fn latest_volatility(&self) -> Option<Decimal> {
        self.volatility.last().copied().flatten()
    }
}

pub(crate) fn mean(values: &[Decimal]) -> Decimal {
    let sum: Decimal = values.iter().sum();
    sum / Decimal::from(values.len() as u64)
}

/// Sample standard deviation (n-1 denominator). Callers guarantee
/// `values.len() >= 2`.
pub(crate) fn sample_stddev(values: &[Decimal]) -> Decimal {
    let avg = mean(values);
    let sum_sq: Decimal = values
        .iter()
        .map(|v| {
            let diff = *v - avg;
            diff * diff
        })
        .sum();
    let variance = sum_sq / Decimal::from((values.len() - 1) as u64);
    sqrt_decimal(variance)
}

pub(crate) fn sqrt_decimal(value: Decimal) -> Decimal {
    if value.is_zero() || value.is_sign_negative() {
        return Decimal::ZERO;
    }

    let mut guess = value / Decimal::from(2);
    let epsilon = Decimal::new(1, 10); // 0.0000000001

    for _ in 0..50 {
        let new_guess = (guess + value / guess) / Decimal::from(2);
        if (new_guess - guess).abs() < epsilon {
            return new_guess;
        }
        guess = new_guess;
    }
    guess
}

/// Test helper: a flat-bar series with the given closes, one bar per day.
#[cfg(test)]
pub(crate) fn series_from_closes(closes: &[Decimal]) -> PriceSeries {
    use crate::types::PriceBar;
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, close)| PriceBar {
            date: start + chrono::Duration::days(i as i64),
            open: *close,
            high: *close,
            low: *close,
            close: *close,
        })
        .collect();
    PriceSeries::from_bars(bars).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sqrt_decimal() {
        assert_eq!(sqrt_decimal(Decimal::ZERO), Decimal::ZERO);
        let root = sqrt_decimal(dec!(2.25));
        assert!((root - dec!(1.5)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_sample_stddev_two_points() {
        // stddev of {1, 3} with n-1 denominator is sqrt(2)
        let sd = sample_stddev(&[dec!(1), dec!(3)]);
        assert!((sd - dec!(1.4142135)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let closes: Vec<Decimal> = (0..60).map(|i| Decimal::from(100 + (i * 7) % 13)).collect();
        let series = series_from_closes(&closes);
        let windows = WindowSettings::default();

        let first = IndicatorSeries::compute(&series, &windows);
        let second = IndicatorSeries::compute(&series, &windows);
        assert_eq!(first, second);
        assert_eq!(first.len(), series.len());
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily trading session for a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// An ordered daily price history: ascending dates, no duplicates.
/// Non-trading days are simply absent rows; every bar is one equal step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from bars already in ascending date order.
    /// Rejects out-of-order or duplicate dates and inverted ranges.
    pub fn from_bars(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    prev: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        for bar in &bars {
            if bar.high < bar.low {
                return Err(SeriesError::InvertedRange { date: bar.date });
            }
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn get(&self, index: usize) -> Option<&PriceBar> {
        self.bars.get(index)
    }

    pub fn closes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SeriesError {
    #[error("bars out of order: {next} follows {prev}")]
    OutOfOrder { prev: NaiveDate, next: NaiveDate },
    #[error("bar on {date} has high below low")]
    InvertedRange { date: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(y: i32, m: u32, d: u32, close: Decimal) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open: close,
            high: close + dec!(1),
            low: close - dec!(1),
            close,
        }
    }

    #[test]
    fn test_from_bars_accepts_ascending_dates() {
        let series = PriceSeries::from_bars(vec![
            bar(2024, 1, 2, dec!(100)),
            bar(2024, 1, 3, dec!(101)),
            bar(2024, 1, 5, dec!(99)), // gap over the 4th is fine
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![dec!(100), dec!(101), dec!(99)]);
    }

    #[test]
    fn test_from_bars_rejects_duplicates_and_disorder() {
        let dup = PriceSeries::from_bars(vec![
            bar(2024, 1, 2, dec!(100)),
            bar(2024, 1, 2, dec!(101)),
        ]);
        assert!(dup.is_err());

        let reversed = PriceSeries::from_bars(vec![
            bar(2024, 1, 3, dec!(100)),
            bar(2024, 1, 2, dec!(101)),
        ]);
        assert_eq!(
            reversed.unwrap_err(),
            SeriesError::OutOfOrder {
                prev: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                next: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            }
        );
    }

    #[test]
    fn test_from_bars_rejects_inverted_range() {
        let mut b = bar(2024, 1, 2, dec!(100));
        b.high = dec!(90);
        b.low = dec!(110);
        assert_eq!(
            PriceSeries::from_bars(vec![b]).unwrap_err(),
            SeriesError::InvertedRange {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
            }
        );
    }
}

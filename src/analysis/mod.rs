use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::indicators::IndicatorSeries;
use crate::regime::{RegimeAssessment, RegimeClassifier};
use crate::types::{AssetProfile, PriceSeries};

/// Latest scalar readings extracted from the price and indicator series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub current_price: Decimal,
    pub previous_close: Option<Decimal>,
    /// Percent change versus the previous close.
    pub change_pct: Option<Decimal>,
    pub sma: Option<Decimal>,
    pub momentum_index: Option<Decimal>,
    pub volatility: Option<Decimal>,
}

impl MarketSnapshot {
    pub fn from_series(series: &PriceSeries, indicators: &IndicatorSeries) -> Option<Self> {
        let current_price = series.last()?.close;
        let previous_close = series
            .len()
            .checked_sub(2)
            .and_then(|i| series.get(i))
            .map(|bar| bar.close);
        let change_pct = previous_close.and_then(|prev| {
            if prev.is_zero() {
                None
            } else {
                Some((current_price - prev) / prev * dec!(100))
            }
        });

        Some(Self {
            current_price,
            previous_close,
            change_pct,
            sma: indicators.latest_sma(),
            momentum_index: indicators.latest_momentum(),
            volatility: indicators.latest_volatility(),
        })
    }
}

/// Full analysis output for one instrument. `assessment` is `None` in the
/// insufficient-history state; the snapshot and whatever indicator values
/// exist are still reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub profile: AssetProfile,
    pub snapshot: MarketSnapshot,
    pub indicators: IndicatorSeries,
    pub assessment: Option<RegimeAssessment>,
}

/// Run the full pipeline over an already-fetched series: indicators, then
/// the regime read on the latest bar. Pure given its inputs; independent
/// instruments can run in parallel without coordination.
///
/// Returns `None` only for an empty series. A series shorter than the
/// trend window produces a report without an assessment — the caller-level
/// "insufficient data for trend analysis" state.
pub fn analyze(
    series: &PriceSeries,
    profile: AssetProfile,
    config: &AnalysisConfig,
) -> Option<AnalysisReport> {
    let indicators = IndicatorSeries::compute(series, &config.windows);
    let snapshot = MarketSnapshot::from_series(series, &indicators)?;

    let assessment = if series.len() < config.windows.trend {
        None
    } else {
        match (snapshot.sma, snapshot.momentum_index, snapshot.volatility) {
            (Some(sma), Some(momentum), Some(volatility)) => {
                let classifier = RegimeClassifier::new(config);
                Some(classifier.assess(snapshot.current_price, sma, momentum, volatility))
            }
            _ => None,
        }
    };

    Some(AnalysisReport {
        profile,
        snapshot,
        indicators,
        assessment,
    })
}

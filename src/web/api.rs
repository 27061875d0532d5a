use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::AppState;
use crate::analysis::{self, AnalysisReport, MarketSnapshot};
use crate::data::{MarketData, ProviderError};
use crate::news;
use crate::regime::RegimeAssessment;
use crate::types::{AssetProfile, Horizon, PriceSeries};

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    pub symbol: String,
    pub period: Option<String>,
}

pub async fn get_analysis(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
) -> Response {
    let symbol = params.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "symbol is required");
    }

    let horizon = match params.period.as_deref() {
        None => Horizon::M6,
        Some(p) => match Horizon::from_str(p) {
            Some(h) => h,
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("unknown period '{}', expected one of 3mo/6mo/1y/5y", p),
                )
            }
        },
    };

    let series = match state.provider.get_history(&symbol, horizon).await {
        Ok(series) => series,
        Err(err) => return provider_error_response(err),
    };

    // Metadata is decoration; a failed profile fetch degrades to defaults
    let profile = match state.provider.get_profile(&symbol).await {
        Ok(profile) => profile,
        Err(err) => {
            warn!("profile fetch failed for {}: {}", symbol, err);
            AssetProfile::unknown(&symbol)
        }
    };

    match analysis::analyze(&series, profile, &state.config) {
        Some(report) => {
            let payload = ChartPayload::build(&series, report, &state.config.thresholds);
            Json(payload).into_response()
        }
        None => error_response(
            StatusCode::NOT_FOUND,
            &format!("no price history for {}", symbol),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    pub symbol: String,
}

pub async fn get_news(Query(params): Query<NewsParams>) -> impl IntoResponse {
    let headlines = news::fetch_headlines(&params.symbol).await;
    Json(json!({ "items": headlines }))
}

fn provider_error_response(err: ProviderError) -> Response {
    match err {
        ProviderError::SymbolNotFound(symbol) => error_response(
            StatusCode::NOT_FOUND,
            &format!("symbol not found: {}", symbol),
        ),
        ProviderError::Request(e) => {
            warn!("upstream request failed: {}", e);
            error_response(StatusCode::BAD_GATEWAY, "market data source unreachable")
        }
        ProviderError::Api(msg) | ProviderError::Internal(msg) => {
            warn!("upstream returned bad data: {}", msg);
            error_response(StatusCode::BAD_GATEWAY, "market data source returned an error")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Everything the dashboard page needs to render one instrument.
#[derive(Debug, Serialize)]
pub struct ChartPayload {
    pub profile: AssetProfile,
    pub market_cap_display: String,
    pub snapshot: MarketSnapshot,
    pub assessment: Option<AssessmentView>,
    pub dates: Vec<NaiveDate>,
    pub close: Vec<Decimal>,
    pub sma: Vec<Option<Decimal>>,
    pub momentum: Vec<Option<Decimal>>,
    pub volatility: Vec<Option<Decimal>>,
    pub reference: ReferenceLevels,
}

#[derive(Debug, Serialize)]
pub struct ReferenceLevels {
    pub heated: Decimal,
    pub depressed: Decimal,
}

/// One regime card: label, blurb, and the tone color for the heading.
#[derive(Debug, Serialize)]
pub struct RegimeCard {
    pub label: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct AssessmentView {
    pub trend: RegimeCard,
    pub sentiment: RegimeCard,
    pub risk: RegimeCard,
}

impl AssessmentView {
    fn from_assessment(assessment: &RegimeAssessment) -> Self {
        Self {
            trend: RegimeCard {
                label: assessment.trend.label().to_string(),
                description: assessment.trend_description.clone(),
                color: assessment.trend.tone().color().to_string(),
            },
            sentiment: RegimeCard {
                label: assessment.sentiment.label().to_string(),
                description: assessment.sentiment.description().to_string(),
                color: assessment.sentiment.tone().color().to_string(),
            },
            risk: RegimeCard {
                label: assessment.risk.label().to_string(),
                description: format!("Short-term variance is {:.2}%.", assessment.volatility),
                color: assessment.risk.tone().color().to_string(),
            },
        }
    }
}

impl ChartPayload {
    fn build(
        series: &PriceSeries,
        report: AnalysisReport,
        thresholds: &crate::config::ThresholdSettings,
    ) -> Self {
        Self {
            market_cap_display: report.profile.market_cap_display(),
            assessment: report.assessment.as_ref().map(AssessmentView::from_assessment),
            profile: report.profile,
            snapshot: report.snapshot,
            dates: series.dates(),
            close: series.closes(),
            sma: report.indicators.sma,
            momentum: report.indicators.momentum,
            volatility: report.indicators.volatility,
            reference: ReferenceLevels {
                heated: thresholds.sentiment_heated,
                depressed: thresholds.sentiment_depressed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::indicators::series_from_closes;
    use rust_decimal_macros::dec;

    #[test]
    fn test_chart_payload_shape() {
        let closes: Vec<Decimal> = (0..60).map(|i| Decimal::from(100 + i)).collect();
        let series = series_from_closes(&closes);
        let config = AnalysisConfig::default();
        let report =
            analysis::analyze(&series, AssetProfile::unknown("TEST"), &config).unwrap();
        let payload = ChartPayload::build(&series, report, &config.thresholds);

        assert_eq!(payload.dates.len(), 60);
        assert_eq!(payload.close.len(), 60);
        assert_eq!(payload.sma.len(), 60);
        assert_eq!(payload.reference.heated, dec!(70));

        let view = payload.assessment.unwrap();
        assert_eq!(view.trend.label, "EXPANSION (Growth Phase)");
        assert_eq!(view.trend.color, "#09AB3B");
        assert!(view.risk.description.contains('%'));

        // undefined leading positions serialize as nulls for the chart
        let json = serde_json::to_value(&payload.sma).unwrap();
        assert!(json[0].is_null());
    }
}

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{MarketData, ProviderError};
use crate::types::{AssetProfile, Horizon, PriceBar, PriceSeries};

const YAHOO_API: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; marketpulse/0.1)";

/// Daily-bar and metadata client for Yahoo Finance's public JSON APIs.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketData for YahooClient {
    async fn get_history(
        &self,
        symbol: &str,
        horizon: Horizon,
    ) -> Result<PriceSeries, ProviderError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            YAHOO_API,
            symbol,
            horizon.as_str()
        );
        debug!("fetching history: {}", url);

        let resp: ChartResponse = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .json()
            .await?;

        series_from_chart(symbol, resp)
    }

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, ProviderError> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules=price,summaryProfile,summaryDetail",
            YAHOO_API, symbol
        );
        debug!("fetching profile: {}", url);

        let resp: QuoteSummaryResponse = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .json()
            .await?;

        profile_from_summary(symbol, resp)
    }
}

fn series_from_chart(symbol: &str, resp: ChartResponse) -> Result<PriceSeries, ProviderError> {
    if let Some(err) = resp.chart.error {
        if err.code.eq_ignore_ascii_case("not found") {
            return Err(ProviderError::SymbolNotFound(symbol.to_string()));
        }
        return Err(ProviderError::Api(format!("{}: {}", err.code, err.description)));
    }

    let data = resp
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| ProviderError::SymbolNotFound(symbol.to_string()))?;

    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Internal("chart payload without quote block".to_string()))?;

    let mut bars: Vec<PriceBar> = Vec::with_capacity(timestamps.len());
    let mut skipped = 0usize;
    for (i, ts) in timestamps.iter().enumerate() {
        let ohlc = (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = ohlc else {
            skipped += 1;
            continue;
        };
        let Some(date) = DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive()) else {
            skipped += 1;
            continue;
        };

        // Intraday refreshes can repeat the last session; keep the first
        if bars.last().map(|b| b.date >= date).unwrap_or(false) {
            skipped += 1;
            continue;
        }

        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close,
        });
    }

    if skipped > 0 {
        warn!("{}: skipped {} incomplete bars from provider", symbol, skipped);
    }
    PriceSeries::from_bars(bars).map_err(|e| ProviderError::Internal(e.to_string()))
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<Decimal> {
    values
        .get(index)
        .copied()
        .flatten()
        .and_then(|v| Decimal::try_from(v).ok())
}

fn profile_from_summary(
    symbol: &str,
    resp: QuoteSummaryResponse,
) -> Result<AssetProfile, ProviderError> {
    if let Some(err) = resp.quote_summary.error {
        if err.code.eq_ignore_ascii_case("not found") {
            return Err(ProviderError::SymbolNotFound(symbol.to_string()));
        }
        return Err(ProviderError::Api(format!("{}: {}", err.code, err.description)));
    }

    let modules = resp
        .quote_summary
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| ProviderError::SymbolNotFound(symbol.to_string()))?;

    let mut profile = AssetProfile::unknown(symbol);
    if let Some(price) = modules.price {
        if let Some(name) = price.long_name {
            profile.long_name = name;
        }
        if let Some(cap) = price.market_cap.and_then(|v| v.decimal()) {
            profile.market_cap = Some(cap);
        }
    }
    if let Some(summary) = modules.summary_profile {
        if let Some(sector) = summary.sector {
            profile.sector = sector;
        }
    }
    if let Some(detail) = modules.summary_detail {
        if let Some(beta) = detail.beta.and_then(|v| v.decimal()) {
            profile.beta = beta;
        }
    }
    Ok(profile)
}

// === Wire types ===

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    result: Option<Vec<SummaryModules>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SummaryModules {
    price: Option<PriceModule>,
    #[serde(rename = "summaryProfile")]
    summary_profile: Option<SummaryProfileModule>,
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetailModule>,
}

#[derive(Debug, Deserialize)]
struct PriceModule {
    #[serde(rename = "longName")]
    long_name: Option<String>,
    #[serde(rename = "marketCap")]
    market_cap: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct SummaryProfileModule {
    sector: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryDetailModule {
    beta: Option<RawValue>,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`.
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

impl RawValue {
    fn decimal(&self) -> Option<Decimal> {
        self.raw.and_then(|v| Decimal::try_from(v).ok())
    }
}

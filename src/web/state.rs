use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::data::MarketData;

/// Shared state for the dashboard server. The provider is behind the
/// `MarketData` trait so the server never knows which upstream it talks to.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MarketData>,
    pub config: AnalysisConfig,
}

impl AppState {
    pub fn new(provider: Arc<dyn MarketData>, config: AnalysisConfig) -> Self {
        Self { provider, config }
    }
}

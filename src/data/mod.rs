pub mod errors;
pub mod yahoo;

pub use errors::*;
pub use yahoo::*;

use async_trait::async_trait;

use crate::types::{AssetProfile, Horizon, PriceSeries};

/// The upstream source of daily bars and instrument metadata.
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn get_history(
        &self,
        symbol: &str,
        horizon: Horizon,
    ) -> Result<PriceSeries, ProviderError>;

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, ProviderError>;
}

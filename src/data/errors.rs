use thiserror::Error;

/// Errors surfaced by a `MarketData` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (network, timeout, TLS).
    #[error("market data request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with an explicit error payload.
    #[error("market data API error: {0}")]
    Api(String),

    /// The symbol is unknown to the provider.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider's payload could not be turned into a usable series.
    #[error("malformed provider response: {0}")]
    Internal(String),
}

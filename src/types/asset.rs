use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Static instrument metadata supplied by the data provider.
/// Passed through to display untouched; the analysis core never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetProfile {
    pub symbol: String,
    pub long_name: String,
    pub sector: String,
    pub market_cap: Option<Decimal>,
    pub beta: Decimal,
}

impl AssetProfile {
    /// Fallback profile used when the metadata fetch fails.
    pub fn unknown(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            long_name: symbol.to_string(),
            sector: "Diversified".to_string(),
            market_cap: None,
            beta: Decimal::ONE,
        }
    }

    pub fn market_cap_display(&self) -> String {
        match self.market_cap {
            Some(cap) => format_large_number(cap),
            None => "N/A".to_string(),
        }
    }
}

/// Human-readable dollar amount: $1.23T / $4.56B / $7.89M, plain below a million.
pub fn format_large_number(num: Decimal) -> String {
    const TRILLION: Decimal = dec!(1000000000000);
    const BILLION: Decimal = dec!(1000000000);
    const MILLION: Decimal = dec!(1000000);

    if num >= TRILLION {
        format!("${:.2}T", num / TRILLION)
    } else if num >= BILLION {
        format!("${:.2}B", num / BILLION)
    } else if num >= MILLION {
        format!("${:.2}M", num / MILLION)
    } else {
        format!("${:.2}", num)
    }
}

/// Analysis horizon: how much daily history the provider is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    M3,
    M6,
    Y1,
    Y5,
}

impl Horizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::M3 => "3mo",
            Horizon::M6 => "6mo",
            Horizon::Y1 => "1y",
            Horizon::Y5 => "5y",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "3mo" | "3m" => Some(Horizon::M3),
            "6mo" | "6m" => Some(Horizon::M6),
            "1y" | "12mo" => Some(Horizon::Y1),
            "5y" => Some(Horizon::Y5),
            _ => None,
        }
    }

    pub fn all() -> [Horizon; 4] {
        [Horizon::M3, Horizon::M6, Horizon::Y1, Horizon::Y5]
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(dec!(2450000000000)), "$2.45T");
        assert_eq!(format_large_number(dec!(312000000000)), "$312.00B");
        assert_eq!(format_large_number(dec!(45600000)), "$45.60M");
        assert_eq!(format_large_number(dec!(999999)), "$999999.00");
    }

    #[test]
    fn test_horizon_round_trip() {
        for horizon in Horizon::all() {
            assert_eq!(Horizon::from_str(horizon.as_str()), Some(horizon));
        }
        assert_eq!(Horizon::from_str("2d"), None);
    }

    #[test]
    fn test_unknown_profile_defaults() {
        let profile = AssetProfile::unknown("NVDA");
        assert_eq!(profile.sector, "Diversified");
        assert_eq!(profile.beta, Decimal::ONE);
        assert_eq!(profile.market_cap_display(), "N/A");
    }
}

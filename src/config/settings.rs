use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Analysis parameters. Every window and threshold the engine and the
/// classifier read lives here; the core modules contain no literals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub windows: WindowSettings,
    pub thresholds: ThresholdSettings,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            windows: WindowSettings::default(),
            thresholds: ThresholdSettings::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        if let Err(errors) = config.validate() {
            anyhow::bail!("invalid config {}: {}", path.display(), errors.join(", "));
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.windows.trend < 2 {
            errors.push("windows.trend must be >= 2".to_string());
        }
        if self.windows.momentum < 2 {
            errors.push("windows.momentum must be >= 2".to_string());
        }
        // Sample standard deviation needs at least two returns
        if self.windows.volatility < 2 {
            errors.push("windows.volatility must be >= 2".to_string());
        }

        let heated = self.thresholds.sentiment_heated;
        let depressed = self.thresholds.sentiment_depressed;
        if heated <= depressed {
            errors.push("thresholds: sentiment_heated must be > sentiment_depressed".to_string());
        }
        if depressed < Decimal::ZERO || heated > dec!(100) {
            errors.push("thresholds: sentiment bounds must lie within [0, 100]".to_string());
        }
        if self.thresholds.risk_high_volatility <= Decimal::ZERO {
            errors.push("thresholds.risk_high_volatility must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Rolling-window lengths, in bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Baseline SMA the trend classifier compares price against.
    pub trend: usize,
    pub momentum: usize,
    pub volatility: usize,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            trend: 50,
            momentum: 14,
            volatility: 14,
        }
    }
}

/// Classification boundaries. All comparisons against them are strict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
    pub sentiment_heated: Decimal,
    pub sentiment_depressed: Decimal,
    /// Realized volatility (percent) above which risk is flagged.
    pub risk_high_volatility: Decimal,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            sentiment_heated: dec!(70),
            sentiment_depressed: dec!(30),
            risk_high_volatility: dec!(2.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_crossed_sentiment_bounds() {
        let config = AnalysisConfig {
            thresholds: ThresholdSettings {
                sentiment_heated: dec!(30),
                sentiment_depressed: dec!(70),
                ..ThresholdSettings::default()
            },
            ..AnalysisConfig::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("sentiment_heated")));
    }

    #[test]
    fn test_validation_rejects_short_windows() {
        let config = AnalysisConfig {
            windows: WindowSettings {
                volatility: 1,
                ..WindowSettings::default()
            },
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
            [windows]
            trend = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.windows.trend, 20);
        assert_eq!(config.windows.momentum, 14);
        assert_eq!(config.thresholds.risk_high_volatility, dec!(2.5));
    }
}

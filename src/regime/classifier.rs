use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, ThresholdSettings};

/// Structural trend phase: where price sits relative to its baseline SMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendPhase {
    Expansion,
    Contraction,
}

impl TrendPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expansion => "EXPANSION (Growth Phase)",
            Self::Contraction => "CONTRACTION (Pressure Phase)",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Expansion => Tone::Positive,
            Self::Contraction => Tone::Negative,
        }
    }
}

/// Sentiment zone read from the momentum index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentZone {
    Heated,
    Depressed,
    Stable,
}

impl SentimentZone {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Heated => "HEATED / ELEVATED ATTENTION",
            Self::Depressed => "DEPRESSED / VALUE ZONE",
            Self::Stable => "STABLE / NORMALIZED",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Heated => {
                "Sentiment is historically stretched. Often correlates with news cycles or hype spikes."
            }
            Self::Depressed => {
                "Sentiment is historically low. May indicate over-reaction to negative news."
            }
            Self::Stable => {
                "Sentiment is within standard deviation. Price movement is likely rational."
            }
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Heated => Tone::Warning,
            Self::Depressed => Tone::Positive,
            Self::Stable => Tone::Neutral,
        }
    }
}

/// Short-term risk read from realized volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    HighVolatility,
    Stable,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighVolatility => "HIGH VOLATILITY",
            Self::Stable => "STABLE",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::HighVolatility => Tone::Negative,
            Self::Stable => Tone::Neutral,
        }
    }
}

/// Severity-style color hint, a pure function of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Warning,
    Neutral,
}

impl Tone {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Positive => "#09AB3B",
            Self::Negative => "#FF4B4B",
            Self::Warning => "orange",
            Self::Neutral => "gray",
        }
    }
}

/// The three independent assessments for the latest bar, with the scalar
/// readings they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeAssessment {
    pub trend: TrendPhase,
    pub trend_description: String,
    pub sentiment: SentimentZone,
    pub risk: RiskLevel,
    pub momentum_index: Decimal,
    pub volatility: Decimal,
}

/// Maps the latest scalar readings onto regime labels. Pure comparisons
/// against configured thresholds; each classification is independent of
/// the others.
///
/// Callers must hold at least the trend window of history before asking
/// for an assessment — the classifier itself never sees missing inputs.
#[derive(Debug, Clone)]
pub struct RegimeClassifier {
    thresholds: ThresholdSettings,
    trend_window: usize,
}

impl RegimeClassifier {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
            trend_window: config.windows.trend,
        }
    }

    /// Expansion only when price is strictly above the baseline; a price
    /// sitting exactly on it is Contraction.
    pub fn classify_trend(&self, current_price: Decimal, sma: Decimal) -> TrendPhase {
        if current_price > sma {
            TrendPhase::Expansion
        } else {
            TrendPhase::Contraction
        }
    }

    /// Strict bounds: readings exactly on the heated or depressed
    /// threshold stay Stable.
    pub fn classify_sentiment(&self, momentum_index: Decimal) -> SentimentZone {
        if momentum_index > self.thresholds.sentiment_heated {
            SentimentZone::Heated
        } else if momentum_index < self.thresholds.sentiment_depressed {
            SentimentZone::Depressed
        } else {
            SentimentZone::Stable
        }
    }

    /// Strict bound: volatility exactly on the threshold is Stable.
    pub fn classify_risk(&self, volatility: Decimal) -> RiskLevel {
        if volatility > self.thresholds.risk_high_volatility {
            RiskLevel::HighVolatility
        } else {
            RiskLevel::Stable
        }
    }

    pub fn assess(
        &self,
        current_price: Decimal,
        sma: Decimal,
        momentum_index: Decimal,
        volatility: Decimal,
    ) -> RegimeAssessment {
        let trend = self.classify_trend(current_price, sma);
        RegimeAssessment {
            trend,
            trend_description: self.trend_description(trend),
            sentiment: self.classify_sentiment(momentum_index),
            risk: self.classify_risk(volatility),
            momentum_index,
            volatility,
        }
    }

    fn trend_description(&self, trend: TrendPhase) -> String {
        match trend {
            TrendPhase::Expansion => format!(
                "Asset is trading above its {}-day baseline, indicating positive structural momentum.",
                self.trend_window
            ),
            TrendPhase::Contraction => format!(
                "Asset is trading below its {}-day baseline, indicating structural headwinds.",
                self.trend_window
            ),
        }
    }
}

//! Structured analysis verdict — what the strategist returns for a coin.
//!
//! Field names serialize in camelCase to match the JSON contract the model
//! is prompted to emit, so a raw response parses directly into these types.

use serde::{Deserialize, Serialize};

/// The call: enter, exit, or stand aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Buy,
    Sell,
    Wait,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Buy => "BUY",
            Verdict::Sell => "SELL",
            Verdict::Wait => "WAIT",
        }
    }
}

/// Directional bias on one timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

/// One timeframe's read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeOutlook {
    pub status: Bias,
    pub signal: String,
    pub key_level: String,
}

/// The three-timeframe stack: 4-hour, daily, weekly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeframeAnalysis {
    pub h4: TimeframeOutlook,
    pub d1: TimeframeOutlook,
    pub w1: TimeframeOutlook,
}

/// Actionable levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeLevels {
    pub entry_zone: String,
    pub targets: Vec<String>,
    pub stop_loss: String,
}

/// Complete structured verdict for one coin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyVerdict {
    pub verdict: Verdict,
    /// 0-100; the prompt demands decisiveness, the fallback uses 88/42.
    pub confidence_score: u8,
    pub timeframe_analysis: TimeframeAnalysis,
    pub levels: TradeLevels,
    pub executive_summary: String,
    pub detailed_reasoning: String,
    pub risk_factor: String,
}

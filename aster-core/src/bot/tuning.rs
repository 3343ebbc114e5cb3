//! Bot engine tunables.
//!
//! Scan probabilities, confidence bands, price offsets, and the reference
//! asset table were hard-coded in the first cut; they are plain data here so
//! scenarios and tests can pin them.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A tradeable asset the scanner can pick, with its simulation constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetProfile {
    pub symbol: String,
    /// Fixed reference entry price.
    pub reference_price: f64,
    /// Per-tick mark volatility while a position is open.
    pub mark_volatility: f64,
}

/// Everything that shapes signal manufacture and position marking.
#[derive(Debug, Clone)]
pub struct BotTuning {
    /// A scan tick finds an opportunity when a uniform draw exceeds this.
    /// 0.90 makes opportunities rare; tests pin -1.0 (always) or 2.0 (never).
    pub scan_opportunity_threshold: f64,
    /// Delay between spotting an opportunity and the signal being ready.
    pub signal_delay: Duration,
    /// Delay before an auto-executed signal is authorized.
    pub auto_execute_delay: Duration,
    /// Confidence is drawn from `floor ..= floor + span`.
    pub confidence_floor: u8,
    pub confidence_span: u8,
    /// Stop-loss / take-profit offsets from entry, percent (long side;
    /// mirrored for shorts).
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    /// Mark move each tick: `uniform(0,1) * vol * range_mult - vol * skew_mult`.
    /// The defaults skew slightly upward.
    pub mark_range_mult: f64,
    pub mark_skew_mult: f64,
    /// Probability the first listed asset is picked over the rest.
    pub primary_asset_weight: f64,
    /// Chance of a reminder toast per scan tick while awaiting authorization.
    pub reminder_probability: f64,
    pub assets: Vec<AssetProfile>,
}

impl Default for BotTuning {
    fn default() -> Self {
        Self {
            scan_opportunity_threshold: 0.90,
            signal_delay: Duration::seconds(1),
            auto_execute_delay: Duration::seconds(3),
            confidence_floor: 85,
            confidence_span: 14,
            stop_loss_pct: 1.5,
            take_profit_pct: 3.0,
            mark_range_mult: 4.0,
            mark_skew_mult: 1.5,
            primary_asset_weight: 0.6,
            reminder_probability: 0.2,
            assets: vec![
                AssetProfile {
                    symbol: "BTC".into(),
                    reference_price: 96_420.50,
                    mark_volatility: 0.0005,
                },
                AssetProfile {
                    symbol: "ETH".into(),
                    reference_price: 2_750.20,
                    mark_volatility: 0.001,
                },
            ],
        }
    }
}

impl BotTuning {
    pub fn asset(&self, symbol: &str) -> Option<&AssetProfile> {
        self.assets.iter().find(|a| a.symbol == symbol)
    }

    /// Mark volatility for a symbol, falling back to the noisiest profile.
    pub fn mark_volatility(&self, symbol: &str) -> f64 {
        self.asset(symbol)
            .map(|a| a.mark_volatility)
            .unwrap_or(0.001)
    }
}

/// Ticker cadences owned by the session.
#[derive(Debug, Clone, Copy)]
pub struct SessionIntervals {
    /// Display-only jitter (latency, confluence meters).
    pub cosmetic: Duration,
    /// Scan loop driving SCANNING -> ANALYZING.
    pub scan: Duration,
    /// Position mark-to-market loop, live only while a position is open.
    pub mark: Duration,
}

impl Default for SessionIntervals {
    fn default() -> Self {
        Self {
            cosmetic: Duration::milliseconds(800),
            scan: Duration::seconds(2),
            mark: Duration::seconds(1),
        }
    }
}

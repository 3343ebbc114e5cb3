//! Price/indicator alerts — persisted monitors evaluated against snapshots.

use crate::domain::coin::CoinSnapshot;
use serde::{Deserialize, Serialize};

/// What the alert watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    SmaCross,
    PriceTarget,
    SupertrendFlip,
    FibRetracement,
}

/// How the watched value must relate to the reference level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCondition {
    Above,
    Below,
    CrossUp,
    CrossDown,
}

/// A persisted alert. `value` is only meaningful for price targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub coin_symbol: String,
    pub kind: AlertKind,
    pub condition: AlertCondition,
    pub value: Option<f64>,
    pub active: bool,
    pub created_at: String,
}

impl Alert {
    /// Evaluate against the latest snapshot (and the previous one, for
    /// cross/flip conditions). Inactive alerts never trigger.
    pub fn is_triggered(&self, coin: &CoinSnapshot, prev: Option<&CoinSnapshot>) -> bool {
        if !self.active || coin.symbol != self.coin_symbol {
            return false;
        }

        let level = match self.kind {
            AlertKind::PriceTarget => match self.value {
                Some(v) => v,
                None => return false,
            },
            AlertKind::SmaCross => coin.sma_8w,
            // Golden-pocket retracement level off the all-time high.
            AlertKind::FibRetracement => coin.ath * 0.618,
            AlertKind::SupertrendFlip => {
                return match prev {
                    Some(p) => p.supertrend != coin.supertrend,
                    None => false,
                };
            }
        };

        match self.condition {
            AlertCondition::Above => coin.price >= level,
            AlertCondition::Below => coin.price <= level,
            AlertCondition::CrossUp => {
                matches!(prev, Some(p) if p.price < level && coin.price >= level)
            }
            AlertCondition::CrossDown => {
                matches!(prev, Some(p) if p.price > level && coin.price <= level)
            }
        }
    }
}

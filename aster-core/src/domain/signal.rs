//! Trade signals — candidate trades manufactured by the bot engine.

use crate::domain::ids::SignalId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a leveraged position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// +1.0 for long, -1.0 for short; multiplies the raw price move.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

/// A candidate trade awaiting authorization or rejection.
///
/// At most one pending signal exists at a time; the engine refuses to
/// manufacture a second one while this is unresolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSignal {
    pub id: SignalId,
    pub asset: String,
    pub direction: Direction,
    pub leverage: u32,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Manufactured certainty, 0-100. The engine only presents high-band values.
    pub confidence: u8,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

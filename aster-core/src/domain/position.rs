//! Open leveraged positions and the P&L marking math.

use crate::domain::ids::PositionId;
use crate::domain::signal::{Direction, TradeSignal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open leveraged position.
///
/// `liquidation_price` is computed once at open time and never recomputed;
/// `current_price`, `pnl_usd`, and `pnl_percent` are the only fields that
/// change afterwards, via [`mark`](OpenPosition::mark).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPosition {
    pub id: PositionId,
    pub asset: String,
    pub direction: Direction,
    pub leverage: u32,
    pub entry_price: f64,
    pub current_price: f64,
    /// Capital at risk, debited from the balance pool at open.
    pub margin: f64,
    pub pnl_usd: f64,
    pub pnl_percent: f64,
    pub liquidation_price: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub opened_at: DateTime<Utc>,
}

impl OpenPosition {
    /// Open a position from an authorized signal, debiting `margin`.
    ///
    /// Liquidation sits where the leveraged move consumes the full margin:
    /// `entry * (1 - 1/leverage)` for longs, `entry * (1 + 1/leverage)` for
    /// shorts.
    pub fn open(
        id: PositionId,
        signal: &TradeSignal,
        margin: f64,
        opened_at: DateTime<Utc>,
    ) -> Self {
        let leverage = signal.leverage.max(1);
        let offset = signal.entry_price / f64::from(leverage);
        let liquidation_price = match signal.direction {
            Direction::Long => signal.entry_price - offset,
            Direction::Short => signal.entry_price + offset,
        };

        Self {
            id,
            asset: signal.asset.clone(),
            direction: signal.direction,
            leverage,
            entry_price: signal.entry_price,
            current_price: signal.entry_price,
            margin,
            pnl_usd: 0.0,
            pnl_percent: 0.0,
            liquidation_price,
            stop_loss: Some(signal.stop_loss),
            take_profit: Some(signal.take_profit),
            opened_at,
        }
    }

    /// Re-mark the position at a new price, updating unrealized P&L.
    ///
    /// `pnl_percent = leverage * sign * (price - entry) / entry * 100`,
    /// `pnl_usd = margin * pnl_percent / 100`.
    pub fn mark(&mut self, price: f64) {
        if !price.is_finite() || price <= 0.0 || self.entry_price <= 0.0 {
            return;
        }
        let move_pct = (price - self.entry_price) / self.entry_price;
        let leveraged = self.direction.sign() * move_pct * f64::from(self.leverage);
        self.current_price = price;
        self.pnl_percent = leveraged * 100.0;
        self.pnl_usd = self.margin * leveraged;
    }

    /// Amount credited back to the balance pool on close.
    pub fn close_value(&self) -> f64 {
        self.margin + self.pnl_usd
    }
}

//! Realized trades and the running performance ledger.

use crate::domain::position::OpenPosition;
use crate::domain::signal::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A realized round trip, appended once per position close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub asset: String,
    pub direction: Direction,
    pub leverage: u32,
    pub entry_price: f64,
    pub exit_price: f64,
    pub margin: f64,
    pub pnl_usd: f64,
    pub pnl_percent: f64,
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
}

impl TradeRecord {
    /// Snapshot a position at the moment of close.
    pub fn from_close(position: &OpenPosition, closed_at: DateTime<Utc>) -> Self {
        Self {
            asset: position.asset.clone(),
            direction: position.direction,
            leverage: position.leverage,
            entry_price: position.entry_price,
            exit_price: position.current_price,
            margin: position.margin,
            pnl_usd: position.pnl_usd,
            pnl_percent: position.pnl_percent,
            opened_at: position.opened_at,
            closed_at,
        }
    }

    pub fn is_win(&self) -> bool {
        self.pnl_usd > 0.0
    }
}

/// Aggregate performance figures, updated exactly once per position close.
///
/// The win rate is a running weighted average, which keeps it inside
/// [0, 100] by construction. Profit factor is gross profit over gross loss,
/// capped at 100 for the all-winners edge case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceLedger {
    pub total_trades: u64,
    pub win_rate_pct: f64,
    pub profit_factor: f64,
    pub net_pnl: f64,
    gross_profit: f64,
    gross_loss: f64,
}

impl Default for PerformanceLedger {
    fn default() -> Self {
        Self {
            total_trades: 0,
            win_rate_pct: 0.0,
            profit_factor: 0.0,
            net_pnl: 0.0,
            gross_profit: 0.0,
            gross_loss: 0.0,
        }
    }
}

impl PerformanceLedger {
    /// Record one realized P&L figure.
    pub fn record(&mut self, pnl_usd: f64) {
        let n = self.total_trades as f64;
        let outcome = if pnl_usd > 0.0 { 100.0 } else { 0.0 };
        self.win_rate_pct = (self.win_rate_pct * n + outcome) / (n + 1.0);

        self.total_trades += 1;
        self.net_pnl += pnl_usd;
        if pnl_usd > 0.0 {
            self.gross_profit += pnl_usd;
        } else {
            self.gross_loss += pnl_usd.abs();
        }

        self.profit_factor = if self.gross_loss < 1e-10 {
            if self.gross_profit > 0.0 {
                100.0
            } else {
                0.0
            }
        } else {
            (self.gross_profit / self.gross_loss).min(100.0)
        };
    }
}

//! Persistence collaborator — durable key-value collections.
//!
//! One asynchronous-feeling contract, one implementation: reads are total
//! (missing or corrupt records yield defaults, never errors), writes return
//! a [`StoreError`] that callers are free to ignore — durability is
//! best-effort by design.

pub mod json;
pub mod mem;

use crate::domain::alert::Alert;
use crate::domain::config::BotConfig;
use crate::domain::ledger::TradeRecord;
use crate::domain::log::BotLogEntry;
use crate::domain::portfolio::PortfolioPosition;
use crate::domain::position::OpenPosition;
use thiserror::Error;

pub use json::JsonStore;
pub use mem::MemStore;

/// Stored log cap; older entries are evicted on append.
pub const STORED_LOG_CAP: usize = 500;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key-value contract shared by the engines and the surfaces.
pub trait Store: Send {
    fn load_bot_config(&self) -> BotConfig;
    fn save_bot_config(&mut self, config: &BotConfig) -> Result<(), StoreError>;

    fn has_license(&self) -> bool;
    fn set_license(&mut self, value: bool) -> Result<(), StoreError>;

    /// Append one log entry, evicting the oldest past [`STORED_LOG_CAP`].
    fn append_log(&mut self, entry: &BotLogEntry) -> Result<(), StoreError>;
    /// Most recent `limit` entries, oldest-first.
    fn recent_logs(&self, limit: usize) -> Vec<BotLogEntry>;

    fn save_open_position(&mut self, position: &OpenPosition) -> Result<(), StoreError>;
    fn open_position(&self) -> Option<OpenPosition>;
    fn clear_open_position(&mut self) -> Result<(), StoreError>;

    fn append_trade(&mut self, record: &TradeRecord) -> Result<(), StoreError>;
    fn trade_history(&self) -> Vec<TradeRecord>;

    fn load_portfolio(&self) -> Vec<PortfolioPosition>;
    fn save_portfolio(&mut self, positions: &[PortfolioPosition]) -> Result<(), StoreError>;

    fn load_alerts(&self) -> Vec<Alert>;
    fn save_alerts(&mut self, alerts: &[Alert]) -> Result<(), StoreError>;
}

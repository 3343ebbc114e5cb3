//! In-memory store — for tests and headless sessions with no data dir.

use super::{Store, StoreError, STORED_LOG_CAP};
use crate::domain::alert::Alert;
use crate::domain::config::BotConfig;
use crate::domain::ledger::TradeRecord;
use crate::domain::log::BotLogEntry;
use crate::domain::portfolio::PortfolioPosition;
use crate::domain::position::OpenPosition;

/// Volatile store with the same contract as [`super::JsonStore`].
#[derive(Debug, Default)]
pub struct MemStore {
    config: Option<BotConfig>,
    license: bool,
    logs: Vec<BotLogEntry>,
    open_position: Option<OpenPosition>,
    trades: Vec<TradeRecord>,
    portfolio: Vec<PortfolioPosition>,
    alerts: Vec<Alert>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemStore {
    fn load_bot_config(&self) -> BotConfig {
        self.config.clone().unwrap_or_default()
    }

    fn save_bot_config(&mut self, config: &BotConfig) -> Result<(), StoreError> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn has_license(&self) -> bool {
        self.license
    }

    fn set_license(&mut self, value: bool) -> Result<(), StoreError> {
        self.license = value;
        Ok(())
    }

    fn append_log(&mut self, entry: &BotLogEntry) -> Result<(), StoreError> {
        self.logs.push(entry.clone());
        if self.logs.len() > STORED_LOG_CAP {
            let excess = self.logs.len() - STORED_LOG_CAP;
            self.logs.drain(..excess);
        }
        Ok(())
    }

    fn recent_logs(&self, limit: usize) -> Vec<BotLogEntry> {
        let skip = self.logs.len().saturating_sub(limit);
        self.logs[skip..].to_vec()
    }

    fn save_open_position(&mut self, position: &OpenPosition) -> Result<(), StoreError> {
        self.open_position = Some(position.clone());
        Ok(())
    }

    fn open_position(&self) -> Option<OpenPosition> {
        self.open_position.clone()
    }

    fn clear_open_position(&mut self) -> Result<(), StoreError> {
        self.open_position = None;
        Ok(())
    }

    fn append_trade(&mut self, record: &TradeRecord) -> Result<(), StoreError> {
        self.trades.push(record.clone());
        Ok(())
    }

    fn trade_history(&self) -> Vec<TradeRecord> {
        self.trades.clone()
    }

    fn load_portfolio(&self) -> Vec<PortfolioPosition> {
        self.portfolio.clone()
    }

    fn save_portfolio(&mut self, positions: &[PortfolioPosition]) -> Result<(), StoreError> {
        self.portfolio = positions.to_vec();
        Ok(())
    }

    fn load_alerts(&self) -> Vec<Alert> {
        self.alerts.clone()
    }

    fn save_alerts(&mut self, alerts: &[Alert]) -> Result<(), StoreError> {
        self.alerts = alerts.to_vec();
        Ok(())
    }
}

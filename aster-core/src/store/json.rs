//! JSON-file store — one file per collection under a data directory.
//!
//! Missing or corrupt files yield defaults on read; writes create parent
//! directories on demand. Safe to call before any record exists.

use super::{Store, StoreError, STORED_LOG_CAP};
use crate::domain::alert::Alert;
use crate::domain::config::BotConfig;
use crate::domain::ledger::TradeRecord;
use crate::domain::log::BotLogEntry;
use crate::domain::portfolio::PortfolioPosition;
use crate::domain::position::OpenPosition;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    fn read<T: DeserializeOwned + Default>(&self, collection: &str) -> T {
        match std::fs::read_to_string(self.path(collection)) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => T::default(),
        }
    }

    fn read_opt<T: DeserializeOwned>(&self, collection: &str) -> Option<T> {
        let content = std::fs::read_to_string(self.path(collection)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write<T: Serialize>(&self, collection: &str, value: &T) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(self.path(collection), json)?;
        Ok(())
    }

    fn remove(&self, collection: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path(collection)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Store for JsonStore {
    fn load_bot_config(&self) -> BotConfig {
        self.read_opt("bot_config").unwrap_or_default()
    }

    fn save_bot_config(&mut self, config: &BotConfig) -> Result<(), StoreError> {
        self.write("bot_config", config)
    }

    fn has_license(&self) -> bool {
        self.read_opt::<bool>("license").unwrap_or(false)
    }

    fn set_license(&mut self, value: bool) -> Result<(), StoreError> {
        self.write("license", &value)
    }

    fn append_log(&mut self, entry: &BotLogEntry) -> Result<(), StoreError> {
        let mut logs: Vec<BotLogEntry> = self.read("bot_logs");
        logs.push(entry.clone());
        if logs.len() > STORED_LOG_CAP {
            let excess = logs.len() - STORED_LOG_CAP;
            logs.drain(..excess);
        }
        self.write("bot_logs", &logs)
    }

    fn recent_logs(&self, limit: usize) -> Vec<BotLogEntry> {
        let logs: Vec<BotLogEntry> = self.read("bot_logs");
        let skip = logs.len().saturating_sub(limit);
        logs.into_iter().skip(skip).collect()
    }

    fn save_open_position(&mut self, position: &OpenPosition) -> Result<(), StoreError> {
        self.write("open_position", position)
    }

    fn open_position(&self) -> Option<OpenPosition> {
        self.read_opt("open_position")
    }

    fn clear_open_position(&mut self) -> Result<(), StoreError> {
        self.remove("open_position")
    }

    fn append_trade(&mut self, record: &TradeRecord) -> Result<(), StoreError> {
        let mut trades: Vec<TradeRecord> = self.read("trade_history");
        trades.push(record.clone());
        self.write("trade_history", &trades)
    }

    fn trade_history(&self) -> Vec<TradeRecord> {
        self.read("trade_history")
    }

    fn load_portfolio(&self) -> Vec<PortfolioPosition> {
        self.read("portfolio")
    }

    fn save_portfolio(&mut self, positions: &[PortfolioPosition]) -> Result<(), StoreError> {
        self.write("portfolio", &positions)
    }

    fn load_alerts(&self) -> Vec<Alert> {
        self.read("alerts")
    }

    fn save_alerts(&mut self, alerts: &[Alert]) -> Result<(), StoreError> {
        self.write("alerts", &alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::log::LogLevel;
    use chrono::{DateTime, Utc};

    fn temp_store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path());
        (dir, store)
    }

    fn entry(id: u64, message: &str) -> BotLogEntry {
        BotLogEntry {
            id,
            timestamp: DateTime::<Utc>::UNIX_EPOCH
                .format("%H:%M:%S%.3f")
                .to_string(),
            level: LogLevel::Info,
            message: message.into(),
            asset: None,
        }
    }

    #[test]
    fn reads_before_any_write_return_defaults() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load_bot_config(), BotConfig::default());
        assert!(!store.has_license());
        assert!(store.recent_logs(50).is_empty());
        assert!(store.open_position().is_none());
        assert!(store.trade_history().is_empty());
        assert!(store.load_portfolio().is_empty());
        assert!(store.load_alerts().is_empty());
    }

    #[test]
    fn config_roundtrip() {
        let (_dir, mut store) = temp_store();
        let mut config = BotConfig::default();
        config.leverage = 20;
        config.auto_execute = true;
        store.save_bot_config(&config).unwrap();
        assert_eq!(store.load_bot_config(), config);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("bot_config.json"), "not json {{{").unwrap();
        assert_eq!(store.load_bot_config(), BotConfig::default());
    }

    #[test]
    fn license_flag_roundtrip() {
        let (_dir, mut store) = temp_store();
        store.set_license(true).unwrap();
        assert!(store.has_license());
    }

    #[test]
    fn log_append_caps_at_stored_limit() {
        let (_dir, mut store) = temp_store();
        for i in 0..(STORED_LOG_CAP as u64 + 25) {
            store.append_log(&entry(i, &format!("line {i}"))).unwrap();
        }
        let logs = store.recent_logs(usize::MAX);
        assert_eq!(logs.len(), STORED_LOG_CAP);
        // Oldest entries were evicted first.
        assert_eq!(logs.first().unwrap().id, 25);
    }

    #[test]
    fn recent_logs_returns_tail_oldest_first() {
        let (_dir, mut store) = temp_store();
        for i in 0..10 {
            store.append_log(&entry(i, &format!("line {i}"))).unwrap();
        }
        let logs = store.recent_logs(3);
        let ids: Vec<u64> = logs.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[test]
    fn open_position_save_and_clear() {
        use crate::domain::ids::{PositionId, SignalId};
        use crate::domain::signal::{Direction, TradeSignal};

        let (_dir, mut store) = temp_store();
        let signal = TradeSignal {
            id: SignalId(1),
            asset: "BTC".into(),
            direction: Direction::Long,
            leverage: 10,
            entry_price: 100.0,
            stop_loss: 98.5,
            take_profit: 103.0,
            confidence: 90,
            reason: "test".into(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let position =
            OpenPosition::open(PositionId(1), &signal, 500.0, DateTime::<Utc>::UNIX_EPOCH);

        store.save_open_position(&position).unwrap();
        assert!(store.open_position().is_some());

        store.clear_open_position().unwrap();
        assert!(store.open_position().is_none());

        // Clearing twice is fine.
        store.clear_open_position().unwrap();
    }
}

//! Bot diagnostic log — append-only, capped, oldest evicted first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Severity/category tag of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Signal,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Signal => "SIGNAL",
        }
    }
}

/// One diagnostic record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotLogEntry {
    pub id: u64,
    /// Pre-formatted emission clock (`HH:MM:SS.mmm`), ready for display.
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    pub asset: Option<String>,
}

/// Fixed-capacity in-memory log ring.
///
/// Appends are ordered by emission time; when the cap is reached the oldest
/// entry is evicted. The persistence collaborator keeps its own, larger cap.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<BotLogEntry>,
    cap: usize,
    next_id: u64,
}

/// Live view cap, matching the terminal panel height budget.
pub const LIVE_LOG_CAP: usize = 100;

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap.min(256)),
            cap: cap.max(1),
            next_id: 0,
        }
    }

    pub fn push(
        &mut self,
        level: LogLevel,
        message: impl Into<String>,
        asset: Option<String>,
        now: DateTime<Utc>,
    ) -> &BotLogEntry {
        self.next_id += 1;
        let entry = BotLogEntry {
            id: self.next_id,
            timestamp: now.format("%H:%M:%S%.3f").to_string(),
            level,
            message: message.into(),
            asset,
        };
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.entries.back().expect("just pushed")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest-first iteration.
    pub fn iter(&self) -> impl Iterator<Item = &BotLogEntry> {
        self.entries.iter()
    }

    /// The most recent `n` entries, oldest-first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &BotLogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(LIVE_LOG_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_sequential_ids() {
        let mut buf = LogBuffer::new(10);
        let now = DateTime::<Utc>::UNIX_EPOCH;
        buf.push(LogLevel::Info, "a", None, now);
        buf.push(LogLevel::Info, "b", None, now);
        let ids: Vec<u64> = buf.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn cap_evicts_oldest_first() {
        let mut buf = LogBuffer::new(3);
        let now = DateTime::<Utc>::UNIX_EPOCH;
        for msg in ["a", "b", "c", "d"] {
            buf.push(LogLevel::Info, msg, None, now);
        }
        assert_eq!(buf.len(), 3);
        let msgs: Vec<&str> = buf.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, vec!["b", "c", "d"]);
    }

    #[test]
    fn tail_returns_most_recent() {
        let mut buf = LogBuffer::new(10);
        let now = DateTime::<Utc>::UNIX_EPOCH;
        for msg in ["a", "b", "c"] {
            buf.push(LogLevel::Info, msg, None, now);
        }
        let last_two: Vec<&str> = buf.tail(2).map(|e| e.message.as_str()).collect();
        assert_eq!(last_two, vec!["b", "c"]);
    }

    #[test]
    fn timestamp_is_formatted_clock() {
        let mut buf = LogBuffer::new(4);
        let now = DateTime::<Utc>::UNIX_EPOCH;
        let entry = buf.push(LogLevel::Signal, "x", Some("BTC".into()), now);
        assert_eq!(entry.timestamp, "00:00:00.000");
    }

    #[test]
    fn level_labels() {
        assert_eq!(LogLevel::Warning.label(), "WARNING");
        assert_eq!(LogLevel::Signal.label(), "SIGNAL");
    }
}

//! Domain types shared by both engines and all collaborators.

pub mod alert;
pub mod coin;
pub mod config;
pub mod ids;
pub mod ledger;
pub mod log;
pub mod portfolio;
pub mod position;
pub mod signal;

pub use alert::{Alert, AlertCondition, AlertKind};
pub use coin::{CoinSnapshot, GlobalMetrics, Trend};
pub use config::{BotConfig, RiskLevel, RiskPreset, StrategyToggles};
pub use ids::{IdGen, PositionId, SignalId};
pub use ledger::{PerformanceLedger, TradeRecord};
pub use log::{BotLogEntry, LogBuffer, LogLevel, LIVE_LOG_CAP};
pub use portfolio::{recompute_allocations, HoldSignal, PortfolioPosition, PositionSource};
pub use position::OpenPosition;
pub use signal::{Direction, TradeSignal};

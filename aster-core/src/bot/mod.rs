//! Simulated trading bot.
//!
//! [`engine`] is the pure state machine; [`session`] wraps it with tickers,
//! an injected clock/RNG, the capped log ring, and best-effort persistence.

pub mod engine;
pub mod session;
pub mod tuning;

pub use engine::{BotEngine, BotEvent, Effect, Phase, DEFAULT_BALANCE};
pub use session::{BotSession, CosmeticState, Notification, StrategyMeter};
pub use tuning::{AssetProfile, BotTuning, SessionIntervals};

//! Market data collaborator: provider trait, CoinGecko client, circuit
//! breaker, fallback set, and the never-failing feed facade.

pub mod circuit_breaker;
pub mod coingecko;
pub mod fallback;
pub mod feed;
pub mod provider;

pub use circuit_breaker::CircuitBreaker;
pub use coingecko::CoinGeckoProvider;
pub use fallback::{fallback_coins, fallback_metrics};
pub use feed::{MarketFeed, MarketUpdate, POLL_INTERVAL};
pub use provider::{MarketError, MarketProvider, MarketSource};

//! Market data provider trait and structured error types.
//!
//! The MarketProvider trait abstracts over data sources (CoinGecko, the
//! built-in fallback set) so the feed can swap implementations and tests can
//! inject failures.

use crate::domain::coin::{CoinSnapshot, GlobalMetrics};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for market data operations.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("HTTP {status} from provider")]
    HttpStatus { status: u16 },

    #[error("hard stop: provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("market data error: {0}")]
    Other(String),
}

/// Where a market update came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSource {
    CoinGecko,
    Fallback,
}

impl MarketSource {
    pub fn label(self) -> &'static str {
        match self {
            MarketSource::CoinGecko => "LIVE",
            MarketSource::Fallback => "SIM",
        }
    }
}

/// Trait for market data providers.
///
/// Implementations handle the specifics of one source. The feed facade sits
/// above this trait and owns the fallback policy — providers don't know
/// about it.
pub trait MarketProvider: Send {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Global aggregates for the dashboard header.
    fn global_metrics(&self) -> Result<GlobalMetrics, MarketError>;

    /// Top coins by market cap.
    fn coin_list(&self) -> Result<Vec<CoinSnapshot>, MarketError>;

    /// Whether the provider is currently usable (not rate-limited/blocked).
    fn is_available(&self) -> bool;
}

//! Market feed facade — the never-failing view of market data.
//!
//! Wraps a provider and degrades to the built-in fallback set on any error,
//! so callers get a usable update with no error branch at all.

use super::fallback::{fallback_coins, fallback_metrics};
use super::provider::{MarketProvider, MarketSource};
use crate::domain::coin::{CoinSnapshot, GlobalMetrics};
use std::time::Duration;

/// Suggested poll cadence for the dashboard refresh loop.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// One complete market refresh.
#[derive(Debug, Clone)]
pub struct MarketUpdate {
    pub coins: Vec<CoinSnapshot>,
    pub metrics: GlobalMetrics,
    pub source: MarketSource,
}

/// Provider wrapper with the fallback policy.
pub struct MarketFeed {
    provider: Box<dyn MarketProvider>,
}

impl MarketFeed {
    pub fn new(provider: Box<dyn MarketProvider>) -> Self {
        Self { provider }
    }

    /// Fetch coins and global metrics. On any provider error both collapse
    /// to the fallback constants — a partial failure never mixes sources.
    pub fn fetch(&self) -> MarketUpdate {
        if !self.provider.is_available() {
            return Self::fallback_update();
        }

        let coins = match self.provider.coin_list() {
            Ok(coins) if !coins.is_empty() => coins,
            _ => return Self::fallback_update(),
        };
        let metrics = match self.provider.global_metrics() {
            Ok(metrics) => metrics,
            Err(_) => return Self::fallback_update(),
        };

        MarketUpdate {
            coins,
            metrics,
            source: MarketSource::CoinGecko,
        }
    }

    fn fallback_update() -> MarketUpdate {
        MarketUpdate {
            coins: fallback_coins(),
            metrics: fallback_metrics(),
            source: MarketSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::provider::MarketError;

    /// Provider that always errors, for the degradation path.
    struct FailingProvider;

    impl MarketProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn global_metrics(&self) -> Result<GlobalMetrics, MarketError> {
            Err(MarketError::HttpStatus { status: 500 })
        }

        fn coin_list(&self) -> Result<Vec<CoinSnapshot>, MarketError> {
            Err(MarketError::HttpStatus { status: 500 })
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    /// Provider whose coins work but metrics fail.
    struct HalfProvider;

    impl MarketProvider for HalfProvider {
        fn name(&self) -> &str {
            "half"
        }

        fn global_metrics(&self) -> Result<GlobalMetrics, MarketError> {
            Err(MarketError::NetworkUnreachable("dns".into()))
        }

        fn coin_list(&self) -> Result<Vec<CoinSnapshot>, MarketError> {
            Ok(fallback_coins())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn provider_error_yields_fallback() {
        let feed = MarketFeed::new(Box::new(FailingProvider));
        let update = feed.fetch();
        assert_eq!(update.source, MarketSource::Fallback);
        assert_eq!(update.coins.len(), 5);
        assert_eq!(update.metrics, fallback_metrics());
    }

    #[test]
    fn partial_failure_never_mixes_sources() {
        let feed = MarketFeed::new(Box::new(HalfProvider));
        let update = feed.fetch();
        assert_eq!(update.source, MarketSource::Fallback);
    }
}

//! Market snapshot types — one coin row and the global aggregates.

use serde::{Deserialize, Serialize};

/// Trend direction reported by the synthetic supertrend indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
}

/// Snapshot of a single coin as shown on the dashboard.
///
/// Core fields come straight from the market provider; `sma_8w`,
/// `supertrend`, and `s2f_ratio` are synthesized at fetch time since no
/// free endpoint serves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinSnapshot {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_24h_pct: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    /// Synthetic 8-week simple moving average level.
    pub sma_8w: f64,
    pub supertrend: Trend,
    /// Stock-to-flow deviation; 1.0 means fairly valued under the model.
    pub s2f_ratio: f64,
    pub ath: f64,
    pub ath_change_pct: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub circulating_supply: f64,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub fully_diluted_valuation: Option<f64>,
}

impl CoinSnapshot {
    /// Percentage distance of price from the 8-week SMA.
    ///
    /// Zero when the SMA is non-positive (degenerate synthetic data).
    pub fn sma_distance_pct(&self) -> f64 {
        if self.sma_8w <= 0.0 {
            return 0.0;
        }
        (self.price - self.sma_8w) / self.sma_8w * 100.0
    }

    pub fn is_above_sma(&self) -> bool {
        self.price > self.sma_8w
    }

    /// Circulating supply as a fraction of max supply, if capped.
    pub fn supply_progress(&self) -> Option<f64> {
        self.max_supply
            .filter(|&max| max > 0.0)
            .map(|max| self.circulating_supply / max)
    }
}

/// Global market aggregates for the dashboard header tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetrics {
    pub total_market_cap: f64,
    pub total_volume: f64,
    pub btc_dominance: f64,
    /// Fear/greed style sentiment gauge, clamped to [0, 100].
    pub sentiment_index: f64,
}

impl GlobalMetrics {
    /// Derive the sentiment gauge from the 24h market-cap change.
    pub fn sentiment_from_change(change_24h_pct: f64) -> f64 {
        (50.0 + change_24h_pct * 3.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(price: f64, sma: f64) -> CoinSnapshot {
        CoinSnapshot {
            id: "bitcoin".into(),
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            price,
            change_24h_pct: 1.2,
            market_cap: 1.9e12,
            volume_24h: 4.5e10,
            sma_8w: sma,
            supertrend: Trend::Bullish,
            s2f_ratio: 1.15,
            ath: 102_000.0,
            ath_change_pct: -5.4,
            high_24h: price * 1.01,
            low_24h: price * 0.99,
            circulating_supply: 19_750_000.0,
            total_supply: Some(19_750_000.0),
            max_supply: Some(21_000_000.0),
            fully_diluted_valuation: Some(2.02e12),
        }
    }

    #[test]
    fn sma_distance_positive_above() {
        let coin = snapshot(110.0, 100.0);
        assert!((coin.sma_distance_pct() - 10.0).abs() < 1e-10);
        assert!(coin.is_above_sma());
    }

    #[test]
    fn sma_distance_negative_below() {
        let coin = snapshot(90.0, 100.0);
        assert!((coin.sma_distance_pct() + 10.0).abs() < 1e-10);
        assert!(!coin.is_above_sma());
    }

    #[test]
    fn sma_distance_degenerate_sma_is_zero() {
        let coin = snapshot(100.0, 0.0);
        assert_eq!(coin.sma_distance_pct(), 0.0);
    }

    #[test]
    fn supply_progress_capped_asset() {
        let coin = snapshot(100.0, 95.0);
        let progress = coin.supply_progress().unwrap();
        assert!((progress - 19_750_000.0 / 21_000_000.0).abs() < 1e-12);
    }

    #[test]
    fn supply_progress_uncapped_asset() {
        let mut coin = snapshot(100.0, 95.0);
        coin.max_supply = None;
        assert!(coin.supply_progress().is_none());
    }

    #[test]
    fn sentiment_clamped() {
        assert_eq!(GlobalMetrics::sentiment_from_change(50.0), 100.0);
        assert_eq!(GlobalMetrics::sentiment_from_change(-50.0), 0.0);
        assert!((GlobalMetrics::sentiment_from_change(2.0) - 56.0).abs() < 1e-10);
    }
}

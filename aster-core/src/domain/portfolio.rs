//! Portfolio holdings — spot positions tracked outside the bot.

use crate::domain::coin::CoinSnapshot;
use serde::{Deserialize, Serialize};

/// Where a holding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSource {
    Wallet,
    Manual,
    Bot,
}

/// Hold/rotate advice derived from the SMA trend model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldSignal {
    Buy,
    Sell,
    Hold,
}

/// One spot holding in the tracked portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioPosition {
    pub id: String,
    pub coin_id: String,
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    pub avg_buy_price: f64,
    pub current_price: f64,
    pub value_usd: f64,
    pub pnl_usd: f64,
    pub pnl_percent: f64,
    /// Share of the total portfolio value, percent.
    pub allocation_pct: f64,
    pub signal: HoldSignal,
    pub source: PositionSource,
}

impl PortfolioPosition {
    /// Refresh the mark-dependent fields from a live snapshot.
    ///
    /// Allocation is a cross-position figure; recompute it afterwards with
    /// [`recompute_allocations`].
    pub fn refresh(&mut self, coin: &CoinSnapshot) {
        self.current_price = coin.price;
        self.value_usd = self.amount * coin.price;
        let cost = self.amount * self.avg_buy_price;
        self.pnl_usd = self.value_usd - cost;
        self.pnl_percent = if cost > 0.0 {
            self.pnl_usd / cost * 100.0
        } else {
            0.0
        };
        self.signal = if coin.sma_distance_pct() > 5.0 {
            HoldSignal::Buy
        } else if coin.sma_distance_pct() < -5.0 {
            HoldSignal::Sell
        } else {
            HoldSignal::Hold
        };
    }
}

/// Recompute allocation percentages across the whole portfolio.
pub fn recompute_allocations(positions: &mut [PortfolioPosition]) {
    let total: f64 = positions.iter().map(|p| p.value_usd).sum();
    for position in positions.iter_mut() {
        position.allocation_pct = if total > 0.0 {
            position.value_usd / total * 100.0
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::Trend;

    fn coin(price: f64, sma: f64) -> CoinSnapshot {
        CoinSnapshot {
            id: "bitcoin".into(),
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            price,
            change_24h_pct: 0.0,
            market_cap: 0.0,
            volume_24h: 0.0,
            sma_8w: sma,
            supertrend: Trend::Bullish,
            s2f_ratio: 1.0,
            ath: price,
            ath_change_pct: 0.0,
            high_24h: price,
            low_24h: price,
            circulating_supply: 0.0,
            total_supply: None,
            max_supply: None,
            fully_diluted_valuation: None,
        }
    }

    fn holding(amount: f64, avg: f64) -> PortfolioPosition {
        PortfolioPosition {
            id: "1".into(),
            coin_id: "bitcoin".into(),
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            amount,
            avg_buy_price: avg,
            current_price: avg,
            value_usd: amount * avg,
            pnl_usd: 0.0,
            pnl_percent: 0.0,
            allocation_pct: 0.0,
            signal: HoldSignal::Hold,
            source: PositionSource::Wallet,
        }
    }

    #[test]
    fn refresh_updates_value_and_pnl() {
        let mut pos = holding(2.0, 100.0);
        pos.refresh(&coin(110.0, 100.0));
        assert!((pos.value_usd - 220.0).abs() < 1e-10);
        assert!((pos.pnl_usd - 20.0).abs() < 1e-10);
        assert!((pos.pnl_percent - 10.0).abs() < 1e-10);
    }

    #[test]
    fn signal_follows_sma_distance() {
        let mut pos = holding(1.0, 100.0);
        pos.refresh(&coin(110.0, 100.0)); // +10% above SMA
        assert_eq!(pos.signal, HoldSignal::Buy);
        pos.refresh(&coin(90.0, 100.0)); // -10% below SMA
        assert_eq!(pos.signal, HoldSignal::Sell);
        pos.refresh(&coin(101.0, 100.0)); // within the band
        assert_eq!(pos.signal, HoldSignal::Hold);
    }

    #[test]
    fn allocations_sum_to_hundred() {
        let mut positions = vec![holding(1.0, 300.0), holding(1.0, 100.0)];
        recompute_allocations(&mut positions);
        assert!((positions[0].allocation_pct - 75.0).abs() < 1e-10);
        assert!((positions[1].allocation_pct - 25.0).abs() < 1e-10);
    }

    #[test]
    fn empty_portfolio_allocations_are_zero() {
        let mut positions = vec![holding(0.0, 0.0)];
        recompute_allocations(&mut positions);
        assert_eq!(positions[0].allocation_pct, 0.0);
    }
}

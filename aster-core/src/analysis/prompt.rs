//! Prompt builders for the hosted-model strategist.
//!
//! The persona and strategy framing mirror the product's in-app analyst:
//! the 8-week SMA as the primary trend line, stock-to-flow as the valuation
//! model, and an insistence on decisive JSON output.

use crate::domain::coin::CoinSnapshot;
use crate::domain::portfolio::PortfolioPosition;

/// Context the strategy prompt derives ahead of time, so the model argues
/// from concrete numbers instead of inventing them.
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext {
    /// Simulated 4-hour RSI reading.
    pub rsi_h4: f64,
}

/// Build the structured-verdict prompt for one coin.
pub fn strategy_prompt(coin: &CoinSnapshot, context: StrategyContext) -> String {
    let sma_distance = coin.sma_distance_pct();
    let daily_structure = if sma_distance > 0.0 {
        "Bullish structure (above the 8W SMA)"
    } else {
        "Bearish structure (below the 8W SMA)"
    };
    let s2f_status = if coin.s2f_ratio < 1.0 {
        "generational opportunity (S2F low)"
    } else {
        "bubble risk (S2F high)"
    };

    format!(
        r#"ACT AS: a ruthless hedge-fund desk head. Tone: aggressive, direct, no hedging. You issue execution orders, not lectures.

OBJECTIVE: find brutal risk/reward asymmetry.

BATTLE PLAN:
1. 8-week SMA: the lifeline. Below it is death, above it is glory.
2. Stock-to-Flow: the treasure map. Negative deviations are free money long-term.
3. Psychology: find where retail gets liquidated and trade against them.

TARGET DATA: {name} ({symbol})
- Current price: ${price:.2}
- Institutional average (8W SMA): ${sma:.2}
- S2F valuation: {s2f:.2} ({s2f_status})
- Relative strength (RSI H4): {rsi:.1}
- Daily structure: {daily_structure}

MANDATORY OUTPUT (JSON only):
{{
  "verdict": "BUY" | "SELL" | "WAIT",
  "confidenceScore": <0-100, be decisive, never 50>,
  "timeframeAnalysis": {{
    "h4": {{"status": "BULLISH"|"BEARISH"|"NEUTRAL", "signal": "e.g. Hidden accumulation", "keyLevel": "price"}},
    "d1": {{"status": "BULLISH"|"BEARISH"|"NEUTRAL", "signal": "e.g. Pivot break", "keyLevel": "price"}},
    "w1": {{"status": "BULLISH"|"BEARISH"|"NEUTRAL", "signal": "e.g. Secular trend", "keyLevel": "price"}}
  }},
  "levels": {{
    "entryZone": "exact price range to fire at",
    "targets": ["conservative target", "moon target"],
    "stopLoss": "thesis invalidation point"
  }},
  "executiveSummary": "one punchy line that forces a decision now.",
  "detailedReasoning": "short paragraph on why the big players are buying or selling. Use desk language (liquidity, stop hunt, absorption).",
  "riskFactor": "where the thesis fails."
}}"#,
        name = coin.name,
        symbol = coin.symbol,
        price = coin.price,
        sma = coin.sma_8w,
        s2f = coin.s2f_ratio,
        s2f_status = s2f_status,
        rsi = context.rsi_h4,
        daily_structure = daily_structure,
    )
}

/// Build the free-text portfolio review prompt.
pub fn portfolio_prompt(positions: &[PortfolioPosition]) -> String {
    let summary: Vec<String> = positions
        .iter()
        .map(|p| {
            format!(
                "- {} ({}): ${:.2} ({:.1}%). P&L: {:.1}%.",
                p.name, p.symbol, p.value_usd, p.allocation_pct, p.pnl_percent
            )
        })
        .collect();

    format!(
        r#"You are a Wall Street risk auditor. You have no mercy.
Audit this retail client's portfolio.

Strategy: accumulate below the 8-week SMA, sell into S2F euphoria.

Portfolio:
{}

Deliver a blunt diagnosis. If they are losing money, tell them they are
providing liquidity to professionals. If they are winning, tell them how to
optimize. Keep it short and sharp."#,
        summary.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin::Trend;
    use crate::domain::portfolio::{HoldSignal, PositionSource};

    fn coin() -> CoinSnapshot {
        CoinSnapshot {
            id: "bitcoin".into(),
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            price: 96_420.50,
            change_24h_pct: 1.2,
            market_cap: 1.9e12,
            volume_24h: 4.5e10,
            sma_8w: 92_100.0,
            supertrend: Trend::Bullish,
            s2f_ratio: 0.95,
            ath: 102_000.0,
            ath_change_pct: -5.4,
            high_24h: 97_100.0,
            low_24h: 95_800.0,
            circulating_supply: 19_750_000.0,
            total_supply: None,
            max_supply: None,
            fully_diluted_valuation: None,
        }
    }

    #[test]
    fn strategy_prompt_carries_target_numbers() {
        let prompt = strategy_prompt(&coin(), StrategyContext { rsi_h4: 61.3 });
        assert!(prompt.contains("Bitcoin (BTC)"));
        assert!(prompt.contains("$96420.50"));
        assert!(prompt.contains("$92100.00"));
        assert!(prompt.contains("61.3"));
        assert!(prompt.contains("generational opportunity"));
        assert!(prompt.contains("\"verdict\""));
    }

    #[test]
    fn strategy_prompt_flags_bearish_structure() {
        let mut c = coin();
        c.price = 80_000.0;
        let prompt = strategy_prompt(&c, StrategyContext { rsi_h4: 40.0 });
        assert!(prompt.contains("Bearish structure"));
    }

    #[test]
    fn portfolio_prompt_lists_every_position() {
        let positions = vec![PortfolioPosition {
            id: "1".into(),
            coin_id: "bitcoin".into(),
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            amount: 0.45,
            avg_buy_price: 55_000.0,
            current_price: 64_230.5,
            value_usd: 28_903.72,
            pnl_usd: 4_153.72,
            pnl_percent: 16.78,
            allocation_pct: 65.0,
            signal: HoldSignal::Buy,
            source: PositionSource::Wallet,
        }];
        let prompt = portfolio_prompt(&positions);
        assert!(prompt.contains("Bitcoin (BTC)"));
        assert!(prompt.contains("$28903.72"));
    }
}

//! Analyst facade — structured verdicts that never fail.
//!
//! Routes to the hosted model when a client is configured and falls back to
//! the local simulation on every error path: missing key, transport failure,
//! non-2xx status, or unparseable output. Callers see a verdict either way.

use crate::analysis::fallback::{
    portfolio_review_unavailable, simulated_portfolio_review, simulated_verdict,
};
use crate::analysis::gemini::GeminiClient;
use crate::analysis::prompt::{portfolio_prompt, strategy_prompt, StrategyContext};
use crate::analysis::verdict::StrategyVerdict;
use crate::domain::coin::CoinSnapshot;
use crate::domain::portfolio::PortfolioPosition;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Mutex;

/// The analysis collaborator.
pub struct Analyst {
    client: Option<GeminiClient>,
    /// Source for the simulated RSI context fed into the prompt.
    rng: Mutex<StdRng>,
}

impl Analyst {
    pub fn new(client: Option<GeminiClient>, rng: StdRng) -> Self {
        Self {
            client,
            rng: Mutex::new(rng),
        }
    }

    /// Build from the environment; no key means permanent simulation mode.
    pub fn from_env(rng: StdRng) -> Self {
        Self::new(GeminiClient::from_env(), rng)
    }

    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    /// Structured verdict for one coin. Never errors.
    pub fn analyze_strategy(&self, coin: &CoinSnapshot) -> StrategyVerdict {
        let Some(client) = &self.client else {
            return simulated_verdict(coin);
        };

        let rsi_h4 = {
            let mut rng = self.rng.lock().unwrap();
            if coin.change_24h_pct > 0.0 {
                45.0 + rng.gen::<f64>() * 30.0
            } else {
                35.0 + rng.gen::<f64>() * 30.0
            }
        };
        let prompt = strategy_prompt(coin, StrategyContext { rsi_h4 });

        match client.generate(&prompt, true) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|_| simulated_verdict(coin)),
            Err(_) => simulated_verdict(coin),
        }
    }

    /// Free-text portfolio review. Never errors.
    pub fn analyze_portfolio(&self, positions: &[PortfolioPosition]) -> String {
        let Some(client) = &self.client else {
            return simulated_portfolio_review();
        };
        let prompt = portfolio_prompt(positions);
        match client.generate(&prompt, false) {
            Ok(text) => text,
            Err(_) => portfolio_review_unavailable(),
        }
    }
}

//! Background worker thread — all network calls run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels, so a slow
//! or dead provider can never stall rendering. Every response is already
//! degraded (fallback market set, simulated verdict) by the core facades.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use aster_core::analysis::{Analyst, StrategyVerdict};
use aster_core::domain::{CoinSnapshot, PortfolioPosition};
use aster_core::market::{CircuitBreaker, CoinGeckoProvider, MarketFeed, MarketUpdate};
use aster_core::rng::SeedHierarchy;
use std::sync::Arc;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    RefreshMarket,
    AnalyzeCoin(Box<CoinSnapshot>),
    ReviewPortfolio(Vec<PortfolioPosition>),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Market(MarketUpdate),
    Analysis {
        symbol: String,
        verdict: Box<StrategyVerdict>,
    },
    PortfolioReview(String),
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    seeds: SeedHierarchy,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("aster-worker".into())
        .spawn(move || worker_loop(rx, tx, seeds))
        .expect("failed to spawn worker thread")
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>, seeds: SeedHierarchy) {
    let breaker = Arc::new(CircuitBreaker::default_provider());
    let provider = CoinGeckoProvider::new(breaker, seeds.rng_for("market", 0));
    let feed = MarketFeed::new(Box::new(provider));
    let analyst = Analyst::from_env(seeds.rng_for("analysis", 0));

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::RefreshMarket) => {
                let _ = tx.send(WorkerResponse::Market(feed.fetch()));
            }
            Ok(WorkerCommand::AnalyzeCoin(coin)) => {
                let verdict = analyst.analyze_strategy(&coin);
                let _ = tx.send(WorkerResponse::Analysis {
                    symbol: coin.symbol.clone(),
                    verdict: Box::new(verdict),
                });
            }
            Ok(WorkerCommand::ReviewPortfolio(positions)) => {
                let review = analyst.analyze_portfolio(&positions);
                let _ = tx.send(WorkerResponse::PortfolioReview(review));
            }
        }
    }
}

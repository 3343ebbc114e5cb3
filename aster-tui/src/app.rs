//! Application state — single-owner, main-thread only.
//!
//! All view state lives here. The worker thread communicates via channels;
//! the bot session runs against the real clock and is polled from the main
//! loop every frame.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use aster_core::analysis::StrategyVerdict;
use aster_core::bot::{BotSession, BotTuning, SessionIntervals};
use aster_core::clock::SystemClock;
use aster_core::dca::{project, DcaParams, Projection, VolatilityProfile};
use aster_core::domain::{
    recompute_allocations, CoinSnapshot, GlobalMetrics, HoldSignal, LogLevel, PortfolioPosition,
    PositionSource,
};
use aster_core::market::{MarketSource, MarketUpdate};
use aster_core::rng::SeedHierarchy;
use aster_core::store::{JsonStore, Store};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Dashboard,
    Detail,
    Portfolio,
    Bot,
}

impl View {
    pub fn index(self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Detail => 1,
            View::Portfolio => 2,
            View::Bot => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(View::Dashboard),
            1 => Some(View::Detail),
            2 => Some(View::Portfolio),
            3 => Some(View::Bot),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Detail => "Detail",
            View::Portfolio => "Portfolio",
            View::Bot => "Bot",
        }
    }

    pub fn next(self) -> View {
        View::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> View {
        View::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Transient status toast.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: LogLevel,
    pub shown_at: Instant,
}

pub struct AppState {
    pub view: View,
    pub should_quit: bool,

    // Market state
    pub coins: Vec<CoinSnapshot>,
    pub prev_coins: Vec<CoinSnapshot>,
    pub metrics: Option<GlobalMetrics>,
    pub market_source: Option<MarketSource>,
    pub selected_coin: usize,
    pub last_refresh: Option<Instant>,
    pub refresh_in_flight: bool,

    // Detail / DCA state
    pub detail_symbol: Option<String>,
    pub dca_params: DcaParams,
    pub dca_projection: Option<Projection>,
    dca_runs: u64,

    // Analysis state
    pub analysis: Option<StrategyVerdict>,
    pub analysis_symbol: Option<String>,
    pub analysis_in_flight: bool,

    // Portfolio state
    pub portfolio: Vec<PortfolioPosition>,
    pub portfolio_review: Option<String>,
    pub review_in_flight: bool,

    // Bot session (real clock, own store handle)
    pub bot: BotSession<SystemClock>,

    // Infrastructure
    pub store: JsonStore,
    pub seeds: SeedHierarchy,
    pub toast: Option<Toast>,
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
}

/// Starter holdings shown before the user saves a portfolio of their own.
fn starter_portfolio() -> Vec<PortfolioPosition> {
    vec![
        PortfolioPosition {
            id: "1".into(),
            coin_id: "bitcoin".into(),
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            amount: 0.45,
            avg_buy_price: 55_000.0,
            current_price: 64_230.50,
            value_usd: 28_903.72,
            pnl_usd: 4_153.72,
            pnl_percent: 16.78,
            allocation_pct: 65.0,
            signal: HoldSignal::Buy,
            source: PositionSource::Wallet,
        },
        PortfolioPosition {
            id: "2".into(),
            coin_id: "ethereum".into(),
            symbol: "ETH".into(),
            name: "Ethereum".into(),
            amount: 4.2,
            avg_buy_price: 3_600.0,
            current_price: 3_450.20,
            value_usd: 14_490.84,
            pnl_usd: -629.16,
            pnl_percent: -4.16,
            allocation_pct: 30.0,
            signal: HoldSignal::Sell,
            source: PositionSource::Wallet,
        },
    ]
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        store: JsonStore,
        seeds: SeedHierarchy,
    ) -> Self {
        let bot = BotSession::new(
            BotTuning::default(),
            SessionIntervals::default(),
            seeds.rng_for("bot", 0),
            SystemClock,
            Box::new(store.clone()),
        );

        let mut portfolio = store.load_portfolio();
        if portfolio.is_empty() {
            portfolio = starter_portfolio();
        }

        Self {
            view: View::Dashboard,
            should_quit: false,
            coins: Vec::new(),
            prev_coins: Vec::new(),
            metrics: None,
            market_source: None,
            selected_coin: 0,
            last_refresh: None,
            refresh_in_flight: false,
            detail_symbol: None,
            dca_params: DcaParams::default(),
            dca_projection: None,
            dca_runs: 0,
            analysis: None,
            analysis_symbol: None,
            analysis_in_flight: false,
            portfolio,
            portfolio_review: None,
            review_in_flight: false,
            bot,
            store,
            seeds,
            toast: None,
            worker_tx,
            worker_rx,
        }
    }

    // ── Market ────────────────────────────────────────────────────────

    pub fn request_refresh(&mut self) {
        if self.refresh_in_flight {
            return;
        }
        self.refresh_in_flight = true;
        let _ = self.worker_tx.send(WorkerCommand::RefreshMarket);
    }

    pub fn on_market_update(&mut self, update: MarketUpdate) {
        self.prev_coins = std::mem::take(&mut self.coins);
        self.coins = update.coins;
        self.metrics = Some(update.metrics);
        self.market_source = Some(update.source);
        self.last_refresh = Some(Instant::now());
        self.refresh_in_flight = false;

        if self.selected_coin >= self.coins.len() {
            self.selected_coin = self.coins.len().saturating_sub(1);
        }

        self.refresh_portfolio();
        self.check_alerts();

        // Keep the DCA context pinned to live numbers.
        if self.detail_symbol.is_some() {
            self.recompute_dca();
        }
    }

    fn refresh_portfolio(&mut self) {
        for position in &mut self.portfolio {
            if let Some(coin) = self.coins.iter().find(|c| c.symbol == position.symbol) {
                position.refresh(coin);
            }
        }
        recompute_allocations(&mut self.portfolio);
        let _ = self.store.save_portfolio(&self.portfolio);
    }

    fn check_alerts(&mut self) {
        let alerts = self.store.load_alerts();
        let mut triggered = Vec::new();
        for alert in &alerts {
            let Some(coin) = self.coins.iter().find(|c| c.symbol == alert.coin_symbol) else {
                continue;
            };
            let prev = self.prev_coins.iter().find(|c| c.symbol == alert.coin_symbol);
            if alert.is_triggered(coin, prev) {
                triggered.push(format!(
                    "ALERT: {} {:?} condition met",
                    alert.coin_symbol, alert.kind
                ));
            }
        }
        for message in triggered {
            self.show_toast(message, LogLevel::Warning);
        }
    }

    // ── Detail / DCA ──────────────────────────────────────────────────

    pub fn selected(&self) -> Option<&CoinSnapshot> {
        self.coins.get(self.selected_coin)
    }

    pub fn detail_coin(&self) -> Option<&CoinSnapshot> {
        let symbol = self.detail_symbol.as_deref()?;
        self.coins.iter().find(|c| c.symbol == symbol)
    }

    /// Open the detail view for the coin under the dashboard cursor.
    pub fn open_detail(&mut self) {
        let Some(coin) = self.selected().cloned() else {
            return;
        };
        self.detail_symbol = Some(coin.symbol.clone());
        if self.analysis_symbol.as_deref() != Some(coin.symbol.as_str()) {
            self.analysis = None;
        }
        self.view = View::Detail;
        self.recompute_dca();
    }

    /// Regenerate the projection wholesale; called on every input change.
    pub fn recompute_dca(&mut self) {
        let context = self
            .detail_coin()
            .map(|c| (c.price, c.sma_8w, c.symbol.clone()));
        if let Some((price, sma, symbol)) = context {
            self.dca_params.current_price = price;
            self.dca_params.current_sma = sma;
            self.dca_params.volatility = VolatilityProfile::for_symbol(&symbol);
        }
        self.dca_runs += 1;
        let mut rng = self.seeds.rng_for("dca", self.dca_runs);
        self.dca_projection = Some(project(&self.dca_params, &mut rng));
    }

    pub fn request_analysis(&mut self) {
        if self.analysis_in_flight {
            return;
        }
        let Some(coin) = self.detail_coin().cloned() else {
            return;
        };
        self.analysis_in_flight = true;
        self.analysis_symbol = Some(coin.symbol.clone());
        let _ = self
            .worker_tx
            .send(WorkerCommand::AnalyzeCoin(Box::new(coin)));
    }

    pub fn on_analysis(&mut self, symbol: String, verdict: StrategyVerdict) {
        self.analysis_in_flight = false;
        if self.analysis_symbol.as_deref() == Some(symbol.as_str()) {
            self.analysis = Some(verdict);
        }
    }

    // ── Portfolio ─────────────────────────────────────────────────────

    pub fn request_portfolio_review(&mut self) {
        if self.review_in_flight || self.portfolio.is_empty() {
            return;
        }
        self.review_in_flight = true;
        let _ = self
            .worker_tx
            .send(WorkerCommand::ReviewPortfolio(self.portfolio.clone()));
    }

    pub fn on_portfolio_review(&mut self, review: String) {
        self.review_in_flight = false;
        self.portfolio_review = Some(review);
    }

    // ── Toasts ────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: String, level: LogLevel) {
        self.toast = Some(Toast {
            message,
            level,
            shown_at: Instant::now(),
        });
    }

    /// Expire the toast after five seconds; surface bot notifications.
    pub fn tick(&mut self) {
        self.bot.poll();
        if let Some(notification) = self.bot.take_notification() {
            self.show_toast(notification.message, notification.level);
        }
        if let Some(toast) = &self.toast {
            if toast.shown_at.elapsed().as_secs() >= 5 {
                self.toast = None;
            }
        }
    }

    /// Drain worker responses without blocking.
    pub fn drain_worker(&mut self) {
        while let Ok(response) = self.worker_rx.try_recv() {
            match response {
                WorkerResponse::Market(update) => self.on_market_update(update),
                WorkerResponse::Analysis { symbol, verdict } => {
                    self.on_analysis(symbol, *verdict)
                }
                WorkerResponse::PortfolioReview(review) => self.on_portfolio_review(review),
            }
        }
    }
}

//! Bot session — owns the engine, its timers, and the effect plumbing.
//!
//! Three repeating tickers run while their governing condition holds:
//! cosmetic jitter (while active), the scan loop (while active), and the
//! position mark loop (while a position is open, even if the bot was paused
//! afterwards). Deactivation stops the scan/cosmetic tickers and cancels any
//! armed one-shots immediately, but never closes an open position.
//!
//! Store writes are fire-and-forget: the session does not wait on, retry, or
//! surface a failed write.

use crate::bot::engine::{BotEngine, BotEvent, Effect, Phase, DEFAULT_BALANCE};
use crate::bot::tuning::{BotTuning, SessionIntervals};
use crate::clock::{Clock, Ticker};
use crate::domain::config::{BotConfig, RiskPreset, StrategyToggles};
use crate::domain::ledger::PerformanceLedger;
use crate::domain::log::{LogBuffer, LogLevel};
use crate::domain::position::OpenPosition;
use crate::domain::signal::TradeSignal;
use crate::store::Store;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;

/// Transient toast for the surface.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: LogLevel,
    pub message: String,
}

/// One confluence meter in the HUD.
#[derive(Debug, Clone)]
pub struct StrategyMeter {
    pub name: &'static str,
    pub enabled: bool,
    /// Display-only 0-100 gauge, jittered by the cosmetic ticker.
    pub confidence: f64,
}

/// Display-only numbers the cosmetic ticker keeps alive.
#[derive(Debug, Clone)]
pub struct CosmeticState {
    pub network_latency_ms: f64,
    pub meters: Vec<StrategyMeter>,
}

impl CosmeticState {
    fn new(toggles: &StrategyToggles) -> Self {
        Self {
            network_latency_ms: 12.0,
            meters: vec![
                StrategyMeter {
                    name: "8-Week SMA",
                    enabled: toggles.sma_8w,
                    confidence: 0.0,
                },
                StrategyMeter {
                    name: "Stock-to-Flow",
                    enabled: toggles.stock_to_flow,
                    confidence: 0.0,
                },
                StrategyMeter {
                    name: "Fibonacci",
                    enabled: toggles.fibonacci,
                    confidence: 0.0,
                },
                StrategyMeter {
                    name: "Order Flow (HFT)",
                    enabled: true,
                    confidence: 0.0,
                },
            ],
        }
    }
}

/// Stateful driver around [`BotEngine`].
pub struct BotSession<C: Clock> {
    engine: BotEngine,
    clock: C,
    rng: StdRng,
    logs: LogBuffer,
    store: Box<dyn Store>,
    cosmetic_ticker: Ticker,
    scan_ticker: Ticker,
    mark_ticker: Ticker,
    signal_due: Option<DateTime<Utc>>,
    auto_execute_due: Option<DateTime<Utc>>,
    cosmetic: CosmeticState,
    notification: Option<Notification>,
}

impl<C: Clock> BotSession<C> {
    /// Build a session, restoring config and any open position from the
    /// store. A missing store record falls back to defaults.
    pub fn new(
        tuning: BotTuning,
        intervals: SessionIntervals,
        rng: StdRng,
        clock: C,
        store: Box<dyn Store>,
    ) -> Self {
        let mut config = store.load_bot_config();
        // A bot left "active" in a previous run does not resume hunting on
        // its own; reactivation is an explicit operator action.
        config.active = false;

        let mut engine = BotEngine::new(config, tuning, DEFAULT_BALANCE);
        if let Some(position) = store.open_position() {
            engine.restore_position(position);
        }

        let cosmetic = CosmeticState::new(&engine.config.strategies);
        let mut session = Self {
            engine,
            clock,
            rng,
            logs: LogBuffer::default(),
            store,
            cosmetic_ticker: Ticker::new(intervals.cosmetic),
            scan_ticker: Ticker::new(intervals.scan),
            mark_ticker: Ticker::new(intervals.mark),
            signal_due: None,
            auto_execute_due: None,
            cosmetic,
            notification: None,
        };
        let now = session.clock.now();
        session.sync_tickers(now);
        session
    }

    // ── Operator actions ──────────────────────────────────────────────

    pub fn activate(&mut self) {
        self.dispatch(BotEvent::Activate);
    }

    pub fn deactivate(&mut self) {
        // Stop scheduling immediately: armed one-shots die with the scan loop.
        self.signal_due = None;
        self.auto_execute_due = None;
        self.dispatch(BotEvent::Deactivate);
    }

    pub fn toggle_active(&mut self) {
        if self.engine.config.active {
            self.deactivate();
        } else {
            self.activate();
        }
    }

    pub fn authorize(&mut self, margin: Option<f64>) {
        self.dispatch(BotEvent::Authorize { margin });
    }

    pub fn reject(&mut self) {
        self.dispatch(BotEvent::Reject);
    }

    pub fn close_position(&mut self) {
        self.dispatch(BotEvent::Close);
    }

    pub fn set_risk_preset(&mut self, preset: RiskPreset) {
        let now = self.clock.now();
        let effects = self.engine.set_risk_preset(preset);
        self.apply_effects(effects, now);
    }

    pub fn toggle_auto_execute(&mut self) {
        let now = self.clock.now();
        let effects = self.engine.toggle_auto_execute();
        self.apply_effects(effects, now);
    }

    // ── Timer pump ────────────────────────────────────────────────────

    /// Advance the session against the clock: fire due one-shots, then due
    /// tickers, then re-derive which tickers should be running.
    pub fn poll(&mut self) {
        let now = self.clock.now();

        if self.signal_due.is_some_and(|due| now >= due) {
            self.signal_due = None;
            self.dispatch_at(BotEvent::GenerateSignal, now);
        }
        if self.auto_execute_due.is_some_and(|due| now >= due) {
            self.auto_execute_due = None;
            self.dispatch_at(BotEvent::Authorize { margin: None }, now);
        }

        if self.cosmetic_ticker.fire(now) {
            self.jitter_cosmetics();
        }
        if self.scan_ticker.fire(now) {
            self.dispatch_at(BotEvent::ScanTick, now);
        }
        if self.mark_ticker.fire(now) {
            self.dispatch_at(BotEvent::MarkTick, now);
        }

        self.sync_tickers(now);
    }

    fn dispatch(&mut self, event: BotEvent) {
        let now = self.clock.now();
        self.dispatch_at(event, now);
    }

    fn dispatch_at(&mut self, event: BotEvent, now: DateTime<Utc>) {
        let effects = self.engine.apply(event, &mut self.rng, now);
        self.apply_effects(effects, now);
        self.sync_tickers(now);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, now: DateTime<Utc>) {
        for effect in effects {
            match effect {
                Effect::Log {
                    level,
                    message,
                    asset,
                } => {
                    let entry = self.logs.push(level, message, asset, now).clone();
                    let _ = self.store.append_log(&entry);
                }
                Effect::Notify { level, message } => {
                    self.notification = Some(Notification { level, message });
                }
                Effect::ScheduleSignal(delay) => {
                    self.signal_due = Some(now + delay);
                }
                Effect::ScheduleAutoExecute(delay) => {
                    self.auto_execute_due = Some(now + delay);
                }
                Effect::SavePosition(position) => {
                    let _ = self.store.save_open_position(&position);
                }
                Effect::ClearPosition => {
                    let _ = self.store.clear_open_position();
                }
                Effect::RecordTrade(record) => {
                    let _ = self.store.append_trade(&record);
                }
                Effect::SaveConfig(config) => {
                    let _ = self.store.save_bot_config(&config);
                }
            }
        }
    }

    /// Start/stop tickers so each runs exactly while its governing condition
    /// holds: scan + cosmetic while active, mark while a position is open.
    fn sync_tickers(&mut self, now: DateTime<Utc>) {
        let active = self.engine.config.active;
        if active && !self.scan_ticker.is_running() {
            self.scan_ticker.start(now);
            self.cosmetic_ticker.start(now);
        } else if !active && self.scan_ticker.is_running() {
            self.scan_ticker.stop();
            self.cosmetic_ticker.stop();
        }

        let position_open = self.engine.position.is_some();
        if position_open && !self.mark_ticker.is_running() {
            self.mark_ticker.start(now);
        } else if !position_open && self.mark_ticker.is_running() {
            self.mark_ticker.stop();
        }
    }

    fn jitter_cosmetics(&mut self) {
        let latency = self.cosmetic.network_latency_ms + (self.rng.gen::<f64>() * 6.0 - 3.0);
        self.cosmetic.network_latency_ms = latency.clamp(8.0, 35.0);

        let toggles = self.engine.config.strategies;
        for meter in &mut self.cosmetic.meters {
            meter.enabled = match meter.name {
                "8-Week SMA" => toggles.sma_8w,
                "Stock-to-Flow" => toggles.stock_to_flow,
                "Fibonacci" => toggles.fibonacci,
                _ => true,
            };
            if meter.enabled {
                let next = meter.confidence + (self.rng.gen::<f64>() * 30.0 - 15.0);
                meter.confidence = next.clamp(15.0, 99.0);
            } else {
                meter.confidence = 0.0;
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.engine.phase
    }

    pub fn config(&self) -> &BotConfig {
        &self.engine.config
    }

    pub fn balance(&self) -> f64 {
        self.engine.balance
    }

    pub fn pending_signal(&self) -> Option<&TradeSignal> {
        self.engine.pending_signal.as_ref()
    }

    pub fn position(&self) -> Option<&OpenPosition> {
        self.engine.position.as_ref()
    }

    pub fn ledger(&self) -> &PerformanceLedger {
        &self.engine.ledger
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn cosmetic(&self) -> &CosmeticState {
        &self.cosmetic
    }

    /// Take the pending toast, if any. The surface clears it by reading it.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    /// The injected clock. Tests advance a virtual clock through this.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Read-only view of the persistence collaborator.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}

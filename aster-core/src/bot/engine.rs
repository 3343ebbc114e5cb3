//! Bot state machine — IDLE / SCANNING / ANALYZING / EXECUTING.
//!
//! The engine is framework-free: it holds the simulation state and maps
//! `(event, rng, now)` to a list of [`Effect`]s for the session layer to
//! apply (log appends, notifications, one-shot scheduling, store writes).
//! At most one pending signal and at most one open position exist at any
//! time; every event handler starts with the guard ladder enforcing that.

use crate::bot::tuning::BotTuning;
use crate::domain::config::{BotConfig, RiskPreset};
use crate::domain::ids::IdGen;
use crate::domain::ledger::{PerformanceLedger, TradeRecord};
use crate::domain::log::LogLevel;
use crate::domain::position::OpenPosition;
use crate::domain::signal::{Direction, TradeSignal};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::Rng;

/// Default simulated wallet balance for a fresh session.
pub const DEFAULT_BALANCE: f64 = 54_320.50;

/// Engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Deactivated, no open position. No background work.
    Idle,
    /// Active, hunting for an opportunity on each scan tick.
    Scanning,
    /// A signal is pending authorization (manual or delayed auto-execute).
    Analyzing,
    /// A position is open and being marked to market.
    Executing,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Scanning => "SCANNING",
            Phase::Analyzing => "ANALYZING",
            Phase::Executing => "EXECUTING",
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone)]
pub enum BotEvent {
    Activate,
    Deactivate,
    /// Periodic scan tick while active.
    ScanTick,
    /// Fires after the signal delay scheduled by a successful scan.
    GenerateSignal,
    /// User (or auto-execute timer) accepts the pending signal. A manual
    /// margin overrides the configured max allocation.
    Authorize { margin: Option<f64> },
    /// User discards the pending signal.
    Reject,
    /// Periodic mark-to-market tick while a position is open.
    MarkTick,
    /// User closes the open position, realizing P&L.
    Close,
}

/// Side effects for the session layer.
#[derive(Debug, Clone)]
pub enum Effect {
    Log {
        level: LogLevel,
        message: String,
        asset: Option<String>,
    },
    /// Transient toast for the surface.
    Notify { level: LogLevel, message: String },
    /// Arm the one-shot that delivers `GenerateSignal`.
    ScheduleSignal(Duration),
    /// Arm the one-shot that delivers `Authorize` when auto-execute is on.
    ScheduleAutoExecute(Duration),
    SavePosition(OpenPosition),
    ClearPosition,
    RecordTrade(TradeRecord),
    SaveConfig(BotConfig),
}

/// The bot simulation state.
#[derive(Debug, Clone)]
pub struct BotEngine {
    pub phase: Phase,
    pub config: BotConfig,
    pub tuning: BotTuning,
    /// Simulated available balance pool (quote currency).
    pub balance: f64,
    pub pending_signal: Option<TradeSignal>,
    pub position: Option<OpenPosition>,
    pub ledger: PerformanceLedger,
    id_gen: IdGen,
}

impl BotEngine {
    pub fn new(config: BotConfig, tuning: BotTuning, balance: f64) -> Self {
        let mut engine = Self {
            phase: Phase::Idle,
            config,
            tuning,
            balance,
            pending_signal: None,
            position: None,
            ledger: PerformanceLedger::default(),
            id_gen: IdGen::default(),
        };
        engine.phase = engine.resting_phase();
        engine
    }

    /// Adopt a position restored from the store (survives restarts).
    pub fn restore_position(&mut self, position: OpenPosition) {
        self.position = Some(position);
        self.phase = Phase::Executing;
    }

    /// Phase implied by the current state when nothing is in flight.
    fn resting_phase(&self) -> Phase {
        if self.position.is_some() {
            Phase::Executing
        } else if self.pending_signal.is_some() {
            Phase::Analyzing
        } else if self.config.active {
            Phase::Scanning
        } else {
            Phase::Idle
        }
    }

    /// Advance the state machine by one event.
    pub fn apply(&mut self, event: BotEvent, rng: &mut StdRng, now: DateTime<Utc>) -> Vec<Effect> {
        match event {
            BotEvent::Activate => self.on_activate(),
            BotEvent::Deactivate => self.on_deactivate(),
            BotEvent::ScanTick => self.on_scan_tick(rng),
            BotEvent::GenerateSignal => self.on_generate_signal(rng, now),
            BotEvent::Authorize { margin } => self.on_authorize(margin, now),
            BotEvent::Reject => self.on_reject(),
            BotEvent::MarkTick => self.on_mark_tick(rng),
            BotEvent::Close => self.on_close(now),
        }
    }

    fn on_activate(&mut self) -> Vec<Effect> {
        if self.config.active {
            return Vec::new();
        }
        self.config.active = true;
        self.phase = self.resting_phase();
        vec![
            Effect::Log {
                level: LogLevel::Info,
                message: "ASTER engine started. Scanning for setups.".into(),
                asset: None,
            },
            Effect::SaveConfig(self.config.clone()),
        ]
    }

    /// Deactivation stops the hunt but never touches an open position —
    /// closing is always a separate explicit action.
    fn on_deactivate(&mut self) -> Vec<Effect> {
        if !self.config.active {
            return Vec::new();
        }
        self.config.active = false;
        self.phase = self.resting_phase();
        vec![
            Effect::Log {
                level: LogLevel::Info,
                message: "ASTER engine paused.".into(),
                asset: None,
            },
            Effect::SaveConfig(self.config.clone()),
        ]
    }

    fn on_scan_tick(&mut self, rng: &mut StdRng) -> Vec<Effect> {
        if !self.config.active || self.position.is_some() {
            return Vec::new();
        }

        if let Some(signal) = &self.pending_signal {
            // Awaiting a manual decision: nudge the operator now and then.
            if !self.config.auto_execute && rng.gen::<f64>() < self.tuning.reminder_probability {
                return vec![Effect::Notify {
                    level: LogLevel::Signal,
                    message: format!(
                        "Awaiting authorization for {} {}",
                        signal.direction.label(),
                        signal.asset
                    ),
                }];
            }
            return Vec::new();
        }

        if rng.gen::<f64>() > self.tuning.scan_opportunity_threshold {
            self.phase = Phase::Analyzing;
            vec![
                Effect::Log {
                    level: LogLevel::Info,
                    message: "Opportunity window detected. Running confluence checks...".into(),
                    asset: None,
                },
                Effect::ScheduleSignal(self.tuning.signal_delay),
            ]
        } else {
            self.phase = Phase::Scanning;
            vec![self.scan_diagnostic(rng)]
        }
    }

    /// One diagnostic log line per uneventful scan, drawn from the lines the
    /// enabled strategies contribute.
    fn scan_diagnostic(&self, rng: &mut StdRng) -> Effect {
        let mut lines: Vec<(LogLevel, &str)> = vec![
            (LogLevel::Info, "Block sweep complete. No qualifying setup."),
            (
                LogLevel::Info,
                "Order flow: positive volume delta. Institutional pressure building.",
            ),
            (
                LogLevel::Warning,
                "Volatility rising. Recomputing position size...",
            ),
        ];
        if self.config.strategies.sma_8w {
            lines.push((
                LogLevel::Info,
                "8-week SMA: validating primary trend on BTC/ETH...",
            ));
        }
        if self.config.strategies.stock_to_flow {
            lines.push((
                LogLevel::Info,
                "S2F model: deviation at -0.4. Asset undervalued.",
            ));
        }
        if self.config.strategies.fibonacci {
            lines.push((
                LogLevel::Info,
                "Fibonacci: price testing the 0.618 retracement (golden pocket).",
            ));
        }
        if self.config.strategies.dca {
            lines.push((LogLevel::Info, "DCA ladder: next accumulation tranche armed."));
        }

        let (level, message) = lines[rng.gen_range(0..lines.len())];
        Effect::Log {
            level,
            message: message.into(),
            asset: None,
        }
    }

    fn on_generate_signal(&mut self, rng: &mut StdRng, now: DateTime<Utc>) -> Vec<Effect> {
        // The at-most-one invariants: a second signal is never manufactured
        // while one is pending or a position is open.
        if !self.config.active
            || self.pending_signal.is_some()
            || self.position.is_some()
            || self.tuning.assets.is_empty()
        {
            return Vec::new();
        }

        if self.balance < self.config.max_allocation_per_trade {
            self.phase = Phase::Scanning;
            return vec![Effect::Log {
                level: LogLevel::Warning,
                message: format!(
                    "EXECUTION BLOCKED: insufficient balance (${:.2}).",
                    self.balance
                ),
                asset: None,
            }];
        }

        let index = if self.tuning.assets.len() == 1
            || rng.gen::<f64>() < self.tuning.primary_asset_weight
        {
            0
        } else {
            rng.gen_range(1..self.tuning.assets.len())
        };
        let asset = self.tuning.assets[index].clone();

        let direction = if rng.gen::<f64>() < 0.5 {
            Direction::Long
        } else {
            Direction::Short
        };
        let entry = asset.reference_price;
        let stop_offset = self.tuning.stop_loss_pct / 100.0;
        let take_offset = self.tuning.take_profit_pct / 100.0;
        let (stop_loss, take_profit) = match direction {
            Direction::Long => (entry * (1.0 - stop_offset), entry * (1.0 + take_offset)),
            Direction::Short => (entry * (1.0 + stop_offset), entry * (1.0 - take_offset)),
        };
        let confidence =
            self.tuning.confidence_floor + rng.gen_range(0..=self.tuning.confidence_span);

        let signal = TradeSignal {
            id: self.id_gen.next_signal(),
            asset: asset.symbol.clone(),
            direction,
            leverage: self.config.leverage,
            entry_price: entry,
            stop_loss,
            take_profit,
            confidence,
            reason: "Confluence: 8-week SMA trend + order-flow divergence".into(),
            created_at: now,
        };

        let mut effects = vec![
            Effect::Log {
                level: LogLevel::Signal,
                message: format!(
                    "TARGET ACQUIRED: {} {}. Probability {}%.",
                    direction.label(),
                    asset.symbol,
                    confidence
                ),
                asset: Some(asset.symbol.clone()),
            },
            Effect::Notify {
                level: LogLevel::Signal,
                message: format!(
                    "{} {} detected. Confidence {}%",
                    direction.label(),
                    asset.symbol,
                    confidence
                ),
            },
        ];

        if self.config.auto_execute {
            effects.push(Effect::Log {
                level: LogLevel::Info,
                message: "Auto-execution armed. Submitting order in 3s...".into(),
                asset: Some(asset.symbol),
            });
            effects.push(Effect::ScheduleAutoExecute(self.tuning.auto_execute_delay));
        }

        self.pending_signal = Some(signal);
        self.phase = Phase::Analyzing;
        effects
    }

    fn on_authorize(&mut self, margin_override: Option<f64>, now: DateTime<Utc>) -> Vec<Effect> {
        let Some(signal) = self.pending_signal.clone() else {
            return Vec::new();
        };

        let margin = margin_override.unwrap_or(self.config.max_allocation_per_trade);
        if !margin.is_finite() || margin <= 0.0 {
            return vec![Effect::Log {
                level: LogLevel::Warning,
                message: "Invalid margin amount. Order not submitted.".into(),
                asset: Some(signal.asset),
            }];
        }
        if self.balance < margin {
            return vec![Effect::Log {
                level: LogLevel::Warning,
                message: format!(
                    "Authorization refused: margin ${:.2} exceeds balance ${:.2}.",
                    margin, self.balance
                ),
                asset: Some(signal.asset),
            }];
        }

        self.balance -= margin;
        let position = OpenPosition::open(self.id_gen.next_position(), &signal, margin, now);
        self.pending_signal = None;
        self.phase = Phase::Executing;

        let effects = vec![
            Effect::Log {
                level: LogLevel::Success,
                message: format!(
                    "ORDER FILLED: {} {} @ {:.2} ({}x).",
                    signal.direction.label(),
                    signal.asset,
                    signal.entry_price,
                    position.leverage
                ),
                asset: Some(signal.asset.clone()),
            },
            Effect::SavePosition(position.clone()),
        ];
        self.position = Some(position);
        effects
    }

    fn on_reject(&mut self) -> Vec<Effect> {
        let Some(signal) = self.pending_signal.take() else {
            return Vec::new();
        };
        self.phase = self.resting_phase();
        vec![Effect::Log {
            level: LogLevel::Warning,
            message: "Signal rejected by operator.".into(),
            asset: Some(signal.asset),
        }]
    }

    fn on_mark_tick(&mut self, rng: &mut StdRng) -> Vec<Effect> {
        let Some(symbol) = self.position.as_ref().map(|p| p.asset.clone()) else {
            return Vec::new();
        };
        let volatility = self.tuning.mark_volatility(&symbol);
        let change = rng.gen::<f64>() * volatility * self.tuning.mark_range_mult
            - volatility * self.tuning.mark_skew_mult;

        if let Some(position) = self.position.as_mut() {
            let price = position.current_price * (1.0 + change);
            position.mark(price);
        }
        Vec::new()
    }

    fn on_close(&mut self, now: DateTime<Utc>) -> Vec<Effect> {
        let Some(position) = self.position.take() else {
            return Vec::new();
        };

        let returned = position.close_value();
        self.balance += returned;
        self.ledger.record(position.pnl_usd);
        let record = TradeRecord::from_close(&position, now);
        self.phase = self.resting_phase();

        let level = if position.pnl_usd >= 0.0 {
            LogLevel::Success
        } else {
            LogLevel::Warning
        };
        vec![
            Effect::Log {
                level,
                message: format!(
                    "POSITION CLOSED. Returned ${:.2} (P&L {:+.2}).",
                    returned, position.pnl_usd
                ),
                asset: Some(position.asset.clone()),
            },
            Effect::ClearPosition,
            Effect::RecordTrade(record),
        ]
    }

    /// Apply a named risk preset, overwriting leverage and allocation
    /// atomically.
    pub fn set_risk_preset(&mut self, preset: RiskPreset) -> Vec<Effect> {
        self.config.apply_preset(preset);
        let level = if preset == RiskPreset::Aggressive {
            LogLevel::Warning
        } else {
            LogLevel::Info
        };
        vec![
            Effect::Log {
                level,
                message: format!(
                    "Risk profile set: {} ({}x, ${:.0} per trade).",
                    preset.label(),
                    self.config.leverage,
                    self.config.max_allocation_per_trade
                ),
                asset: None,
            },
            Effect::SaveConfig(self.config.clone()),
        ]
    }

    /// Flip the auto-execute permission flag.
    pub fn toggle_auto_execute(&mut self) -> Vec<Effect> {
        self.config.auto_execute = !self.config.auto_execute;
        let state = if self.config.auto_execute { "ON" } else { "OFF" };
        vec![
            Effect::Log {
                level: LogLevel::Info,
                message: format!("Auto-execution {state}."),
                asset: None,
            },
            Effect::SaveConfig(self.config.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    /// Tuning pinned so a scan always (or never) finds an opportunity.
    fn tuning(threshold: f64) -> BotTuning {
        BotTuning {
            scan_opportunity_threshold: threshold,
            ..BotTuning::default()
        }
    }

    fn active_engine(threshold: f64) -> BotEngine {
        let config = BotConfig {
            active: true,
            ..BotConfig::default()
        };
        BotEngine::new(config, tuning(threshold), DEFAULT_BALANCE)
    }

    fn generate(engine: &mut BotEngine, rng: &mut StdRng) -> Vec<Effect> {
        engine.apply(BotEvent::GenerateSignal, rng, now())
    }

    #[test]
    fn starts_idle_when_inactive() {
        let engine = BotEngine::new(BotConfig::default(), BotTuning::default(), DEFAULT_BALANCE);
        assert_eq!(engine.phase, Phase::Idle);
    }

    #[test]
    fn starts_scanning_when_config_active() {
        assert_eq!(active_engine(0.9).phase, Phase::Scanning);
    }

    #[test]
    fn scan_hit_schedules_signal_generation() {
        let mut engine = active_engine(-1.0); // every draw is a hit
        let effects = engine.apply(BotEvent::ScanTick, &mut rng(), now());
        assert_eq!(engine.phase, Phase::Analyzing);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::ScheduleSignal(_))));
    }

    #[test]
    fn scan_miss_logs_and_stays_scanning() {
        let mut engine = active_engine(2.0); // no draw ever hits
        let effects = engine.apply(BotEvent::ScanTick, &mut rng(), now());
        assert_eq!(engine.phase, Phase::Scanning);
        assert!(matches!(effects.as_slice(), [Effect::Log { .. }]));
    }

    #[test]
    fn scan_does_nothing_while_inactive() {
        let mut engine = BotEngine::new(BotConfig::default(), tuning(-1.0), DEFAULT_BALANCE);
        let effects = engine.apply(BotEvent::ScanTick, &mut rng(), now());
        assert!(effects.is_empty());
        assert_eq!(engine.phase, Phase::Idle);
    }

    #[test]
    fn generated_signal_is_high_confidence() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        let signal = engine.pending_signal.as_ref().expect("signal pending");
        assert!(signal.confidence >= 85 && signal.confidence <= 99);
        assert_eq!(signal.leverage, engine.config.leverage);
        assert_eq!(engine.phase, Phase::Analyzing);
    }

    #[test]
    fn signal_levels_bracket_entry_by_direction() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        let signal = engine.pending_signal.as_ref().unwrap();
        match signal.direction {
            Direction::Long => {
                assert!(signal.stop_loss < signal.entry_price);
                assert!(signal.take_profit > signal.entry_price);
            }
            Direction::Short => {
                assert!(signal.stop_loss > signal.entry_price);
                assert!(signal.take_profit < signal.entry_price);
            }
        }
    }

    #[test]
    fn insufficient_balance_blocks_signal_with_warning() {
        // Balance 400 cannot cover a 500 allocation.
        let config = BotConfig {
            active: true,
            max_allocation_per_trade: 500.0,
            ..BotConfig::default()
        };
        let mut engine = BotEngine::new(config, tuning(-1.0), 400.0);
        let effects = generate(&mut engine, &mut rng());
        assert!(engine.pending_signal.is_none());
        assert_eq!(engine.phase, Phase::Scanning);
        assert!(matches!(
            effects.as_slice(),
            [Effect::Log {
                level: LogLevel::Warning,
                ..
            }]
        ));
    }

    #[test]
    fn at_most_one_pending_signal() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        let first_id = engine.pending_signal.as_ref().unwrap().id;

        // A second generation attempt is a silent no-op.
        let effects = generate(&mut engine, &mut r);
        assert!(effects.is_empty());
        assert_eq!(engine.pending_signal.as_ref().unwrap().id, first_id);
    }

    #[test]
    fn authorize_debits_margin_and_opens_position() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        let balance_before = engine.balance;

        let effects = engine.apply(BotEvent::Authorize { margin: None }, &mut r, now());
        assert_eq!(engine.phase, Phase::Executing);
        assert!(engine.pending_signal.is_none());
        let position = engine.position.as_ref().expect("position open");
        assert_eq!(position.margin, engine.config.max_allocation_per_trade);
        assert!(
            (balance_before - engine.balance - engine.config.max_allocation_per_trade).abs()
                < 1e-9
        );
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::SavePosition(_))));
    }

    #[test]
    fn authorize_without_pending_signal_is_noop() {
        let mut engine = active_engine(-1.0);
        let effects = engine.apply(BotEvent::Authorize { margin: None }, &mut rng(), now());
        assert!(effects.is_empty());
        assert!(engine.position.is_none());
    }

    #[test]
    fn authorize_with_invalid_manual_margin_keeps_signal() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        let effects = engine.apply(
            BotEvent::Authorize {
                margin: Some(f64::NAN),
            },
            &mut r,
            now(),
        );
        assert!(matches!(
            effects.as_slice(),
            [Effect::Log {
                level: LogLevel::Warning,
                ..
            }]
        ));
        assert!(engine.pending_signal.is_some());
        assert!(engine.position.is_none());
    }

    #[test]
    fn second_signal_never_generated_while_position_open() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        engine.apply(BotEvent::Authorize { margin: None }, &mut r, now());
        let effects = generate(&mut engine, &mut r);
        assert!(effects.is_empty());
        assert!(engine.pending_signal.is_none());
    }

    #[test]
    fn reject_discards_signal_and_resumes_scanning() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        engine.apply(BotEvent::Reject, &mut r, now());
        assert!(engine.pending_signal.is_none());
        assert_eq!(engine.phase, Phase::Scanning);
    }

    #[test]
    fn mark_tick_matches_pnl_formula() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        engine.apply(BotEvent::Authorize { margin: None }, &mut r, now());

        for _ in 0..25 {
            engine.apply(BotEvent::MarkTick, &mut r, now());
            let p = engine.position.as_ref().unwrap();
            let expected = f64::from(p.leverage) * p.direction.sign()
                * (p.current_price - p.entry_price)
                / p.entry_price
                * 100.0;
            assert!((p.pnl_percent - expected).abs() < 1e-9);
            assert!((p.pnl_usd - p.margin * expected / 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn close_credits_balance_and_updates_ledger() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        engine.apply(BotEvent::Authorize { margin: None }, &mut r, now());
        for _ in 0..10 {
            engine.apply(BotEvent::MarkTick, &mut r, now());
        }

        let pnl = engine.position.as_ref().unwrap().pnl_usd;
        let margin = engine.position.as_ref().unwrap().margin;
        let balance_before = engine.balance;

        let effects = engine.apply(BotEvent::Close, &mut r, now());
        assert!(engine.position.is_none());
        assert_eq!(engine.phase, Phase::Scanning);
        assert!((engine.balance - (balance_before + margin + pnl)).abs() < 1e-9);
        assert_eq!(engine.ledger.total_trades, 1);
        assert!((engine.ledger.net_pnl - pnl).abs() < 1e-9);
        assert!(effects.iter().any(|e| matches!(e, Effect::ClearPosition)));
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::RecordTrade(_))));
    }

    #[test]
    fn deactivate_does_not_close_open_position() {
        let mut engine = active_engine(-1.0);
        let mut r = rng();
        generate(&mut engine, &mut r);
        engine.apply(BotEvent::Authorize { margin: None }, &mut r, now());

        engine.apply(BotEvent::Deactivate, &mut r, now());
        assert!(!engine.config.active);
        assert!(engine.position.is_some());
        assert_eq!(engine.phase, Phase::Executing);

        // Closing afterwards returns to Idle, not Scanning.
        engine.apply(BotEvent::Close, &mut r, now());
        assert_eq!(engine.phase, Phase::Idle);
    }

    #[test]
    fn risk_preset_applies_atomically() {
        let mut engine = active_engine(0.9);
        engine.set_risk_preset(RiskPreset::Aggressive);
        assert_eq!(engine.config.leverage, 50);
        assert_eq!(engine.config.max_allocation_per_trade, 5_000.0);
    }

    #[test]
    fn auto_execute_schedules_authorization() {
        let config = BotConfig {
            active: true,
            auto_execute: true,
            ..BotConfig::default()
        };
        let mut engine = BotEngine::new(config, tuning(-1.0), DEFAULT_BALANCE);
        let effects = generate(&mut engine, &mut rng());
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::ScheduleAutoExecute(_))));
    }
}

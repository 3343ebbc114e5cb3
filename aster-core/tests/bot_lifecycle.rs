//! Bot engine scenarios driven through the session with virtual time.

use aster_core::bot::{BotSession, BotTuning, Phase, SessionIntervals};
use aster_core::clock::VirtualClock;
use aster_core::domain::{BotConfig, LogLevel, RiskPreset};
use aster_core::rng::SeedHierarchy;
use aster_core::store::{MemStore, Store};
use chrono::Duration;

fn tuning(threshold: f64) -> BotTuning {
    BotTuning {
        scan_opportunity_threshold: threshold,
        ..BotTuning::default()
    }
}

fn session_with(threshold: f64, store: MemStore) -> BotSession<VirtualClock> {
    BotSession::new(
        tuning(threshold),
        SessionIntervals::default(),
        SeedHierarchy::new(99).rng_for("bot", 0),
        VirtualClock::at_epoch(),
        Box::new(store),
    )
}

/// Advance virtual time in 200ms steps, polling after each.
fn run_for(session: &mut BotSession<VirtualClock>, total_millis: i64) {
    let mut elapsed = 0;
    while elapsed < total_millis {
        session.clock().advance(Duration::milliseconds(200));
        session.poll();
        elapsed += 200;
    }
}

#[test]
fn signal_to_close_lifecycle_realizes_pnl_once() {
    let mut session = session_with(-1.0, MemStore::new());
    session.activate();

    // Scan hit -> signal delay -> pending signal.
    run_for(&mut session, 3_200);
    assert!(session.pending_signal().is_some());
    assert_eq!(session.phase(), Phase::Analyzing);

    let balance_before = session.balance();
    session.authorize(None);
    assert_eq!(session.phase(), Phase::Executing);

    // Let the mark loop move the position.
    run_for(&mut session, 5_000);
    let position = session.position().expect("position open");
    let pnl = position.pnl_usd;
    let margin = position.margin;

    session.close_position();
    assert!(session.position().is_none());
    assert_eq!(session.ledger().total_trades, 1);
    assert!((session.ledger().net_pnl - pnl).abs() < 1e-9);
    // Margin travels out and back; only the P&L shifts the balance.
    assert!((session.balance() - (balance_before + pnl)).abs() < 1e-9);
}

#[test]
fn pnl_formula_holds_on_every_tick() {
    let mut session = session_with(-1.0, MemStore::new());
    session.activate();
    run_for(&mut session, 3_200);
    session.authorize(None);

    for _ in 0..20 {
        run_for(&mut session, 1_000);
        let p = session.position().expect("open");
        let expected = f64::from(p.leverage)
            * p.direction.sign()
            * (p.current_price - p.entry_price)
            / p.entry_price
            * 100.0;
        assert!((p.pnl_percent - expected).abs() < 1e-9);
        assert!((p.pnl_usd - p.margin * expected / 100.0).abs() < 1e-9);
    }
}

#[test]
fn insufficient_margin_rejects_signal_with_warning() {
    // The configured allocation exceeds the available balance, so signal
    // generation must warn and keep scanning.
    let mut store = MemStore::new();
    let config = BotConfig {
        max_allocation_per_trade: 100_000.0, // above the default balance
        ..BotConfig::default()
    };
    store.save_bot_config(&config).unwrap();

    let mut session = session_with(-1.0, store);
    session.activate();
    run_for(&mut session, 3_200);

    assert!(session.pending_signal().is_none());
    assert!(session.position().is_none());
    assert_eq!(session.phase(), Phase::Scanning);
    assert!(
        session
            .logs()
            .iter()
            .any(|e| e.level == LogLevel::Warning && e.message.contains("insufficient")),
        "expected an insufficient-balance warning in the log"
    );
}

#[test]
fn at_most_one_signal_and_position_at_any_time() {
    let mut session = session_with(-1.0, MemStore::new());
    session.activate();
    run_for(&mut session, 3_200);
    let first_id = session.pending_signal().unwrap().id;

    // Further scan ticks never replace the pending signal.
    run_for(&mut session, 10_000);
    assert_eq!(session.pending_signal().unwrap().id, first_id);

    session.authorize(None);
    let position_id = session.position().unwrap().id;

    // And never open a second position.
    run_for(&mut session, 10_000);
    assert!(session.pending_signal().is_none());
    assert_eq!(session.position().unwrap().id, position_id);
}

#[test]
fn risk_preset_switch_is_atomic_and_logged() {
    let mut session = session_with(2.0, MemStore::new());
    session.set_risk_preset(RiskPreset::Aggressive);
    assert_eq!(session.config().leverage, 50);
    assert_eq!(session.config().max_allocation_per_trade, 5_000.0);
    assert!(session
        .logs()
        .iter()
        .any(|e| e.message.contains("AGGRESSIVE")));

    session.set_risk_preset(RiskPreset::Conservative);
    assert_eq!(session.config().leverage, 2);
    assert_eq!(session.config().max_allocation_per_trade, 500.0);
}

#[test]
fn store_receives_position_and_trade_writes() {
    let mut session = session_with(-1.0, MemStore::new());
    session.activate();
    run_for(&mut session, 3_200);
    session.authorize(None);

    assert!(session.store().open_position().is_some());

    run_for(&mut session, 2_000);
    session.close_position();

    assert!(session.store().open_position().is_none());
    assert_eq!(session.store().trade_history().len(), 1);
    let record = &session.store().trade_history()[0];
    assert_eq!(record.margin, session.config().max_allocation_per_trade);
}

#[test]
fn config_changes_are_persisted() {
    let mut session = session_with(2.0, MemStore::new());
    session.set_risk_preset(RiskPreset::Balanced);
    let stored = session.store().load_bot_config();
    assert_eq!(stored.leverage, 10);
    assert_eq!(stored.max_allocation_per_trade, 2_000.0);
}

#[test]
fn deactivation_stops_scanning_but_not_marking() {
    let mut session = session_with(-1.0, MemStore::new());
    session.activate();
    run_for(&mut session, 3_200);
    session.authorize(None);

    session.deactivate();
    let logs_before = session.logs().len();
    let price_before = session.position().unwrap().current_price;

    run_for(&mut session, 10_000);

    // No new scan chatter...
    assert_eq!(session.logs().len(), logs_before);
    // ...but the open position kept marking.
    assert_ne!(session.position().unwrap().current_price, price_before);
}

#[test]
fn stored_logs_match_live_log_emissions() {
    let mut session = session_with(2.0, MemStore::new());
    session.activate();
    run_for(&mut session, 10_000);

    let live: Vec<String> = session.logs().iter().map(|e| e.message.clone()).collect();
    let stored: Vec<String> = session
        .store()
        .recent_logs(usize::MAX)
        .into_iter()
        .map(|e| e.message)
        .collect();
    assert_eq!(live, stored);
}

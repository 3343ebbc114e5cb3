//! Keyboard handling per view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use aster_core::domain::LogLevel;

use crate::app::{AppState, View};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Global keys first.
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.view = app.view.next();
            return;
        }
        KeyCode::BackTab => {
            app.view = app.view.prev();
            return;
        }
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(view) = View::from_index(c as usize - '1' as usize) {
                app.view = view;
            }
            return;
        }
        _ => {}
    }

    match app.view {
        View::Dashboard => handle_dashboard(app, key),
        View::Detail => handle_detail(app, key),
        View::Portfolio => handle_portfolio(app, key),
        View::Bot => handle_bot(app, key),
    }
}

fn handle_dashboard(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            if app.selected_coin + 1 < app.coins.len() {
                app.selected_coin += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected_coin = app.selected_coin.saturating_sub(1);
        }
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('r') => {
            app.request_refresh();
            app.show_toast("Refreshing market data...".into(), LogLevel::Info);
        }
        _ => {}
    }
}

fn handle_detail(app: &mut AppState, key: KeyEvent) {
    let mut changed = true;
    match key.code {
        KeyCode::Char('a') => {
            app.request_analysis();
            app.show_toast("Requesting analysis...".into(), LogLevel::Info);
            changed = false;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.dca_params.contribution += 100.0;
        }
        KeyCode::Char('-') => {
            app.dca_params.contribution = (app.dca_params.contribution - 100.0).max(0.0);
        }
        KeyCode::Char('f') => {
            app.dca_params.frequency = app.dca_params.frequency.next();
        }
        KeyCode::Char('y') => {
            app.dca_params.projection_years = (app.dca_params.projection_years + 1).min(50);
        }
        KeyCode::Char('Y') => {
            app.dca_params.projection_years = app.dca_params.projection_years.saturating_sub(1);
        }
        KeyCode::Char('p') => {
            app.dca_params.backtest_years = (app.dca_params.backtest_years + 1).min(10);
        }
        KeyCode::Char('P') => {
            app.dca_params.backtest_years = app.dca_params.backtest_years.saturating_sub(1);
        }
        KeyCode::Char('t') => {
            app.dca_params.target_apy_pct += 5.0;
        }
        KeyCode::Char('T') => {
            app.dca_params.target_apy_pct -= 5.0;
        }
        KeyCode::Char('s') => {
            app.dca_params.smart_accumulation = !app.dca_params.smart_accumulation;
        }
        KeyCode::Esc => {
            app.view = View::Dashboard;
            changed = false;
        }
        _ => changed = false,
    }
    if changed {
        app.recompute_dca();
    }
}

fn handle_portfolio(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('a') {
        app.request_portfolio_review();
        app.show_toast("Auditing portfolio...".into(), LogLevel::Info);
    }
}

fn handle_bot(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => app.bot.toggle_active(),
        KeyCode::Char('e') | KeyCode::Enter => app.bot.authorize(None),
        KeyCode::Char('r') => app.bot.reject(),
        KeyCode::Char('c') => app.bot.close_position(),
        KeyCode::Char('p') => {
            let next = preset_for(app).next();
            app.bot.set_risk_preset(next);
        }
        KeyCode::Char('x') => app.bot.toggle_auto_execute(),
        _ => {}
    }
}

/// Infer the closest preset from the configured leverage, for cycling.
fn preset_for(app: &AppState) -> aster_core::domain::RiskPreset {
    use aster_core::domain::RiskPreset;
    let leverage = app.bot.config().leverage;
    if leverage <= 3 {
        RiskPreset::Conservative
    } else if leverage <= 20 {
        RiskPreset::Balanced
    } else {
        RiskPreset::Aggressive
    }
}

//! Bot terminal view — HUD, signal/position card, confluence meters, logs.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use aster_core::bot::Phase;
use aster_core::domain::Direction as TradeDirection;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(6)])
        .split(area);

    render_hud(f, chunks[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(26),
            Constraint::Percentage(42),
            Constraint::Percentage(32),
        ])
        .split(chunks[1]);

    render_controls(f, columns[0], app);
    render_stage(f, columns[1], app);
    render_logs(f, columns[2], app);
}

fn render_hud(f: &mut Frame, area: Rect, app: &AppState) {
    let bot = &app.bot;
    let phase = bot.phase();
    let phase_style = match phase {
        Phase::Idle => theme::muted(),
        Phase::Scanning => theme::accent(),
        Phase::Analyzing => Style::default().fg(theme::SIGNAL),
        Phase::Executing => Style::default().fg(theme::POSITIVE),
    };
    let ledger = bot.ledger();

    let line = Line::from(vec![
        Span::styled(format!(" {} ", phase.label()), phase_style.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(
                "| balance ${:.2} | trades {} | win {:.1}% | PF {:.2} | net P&L {:+.2} ",
                bot.balance(),
                ledger.total_trades,
                ledger.win_rate_pct,
                ledger.profit_factor,
                ledger.net_pnl
            ),
            Style::default().fg(theme::TEXT),
        ),
        Span::styled(
            format!("| latency {:.0}ms", bot.cosmetic().network_latency_ms),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_controls(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(" Config ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let config = app.bot.config();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(inner);

    let lines = vec![
        Line::from(Span::styled(
            if config.active {
                " [space] STOP SYSTEM"
            } else {
                " [space] START BOT"
            },
            if config.active {
                Style::default().fg(theme::NEGATIVE)
            } else {
                Style::default().fg(theme::POSITIVE)
            },
        )),
        Line::from(Span::styled(
            format!(
                " risk {}x / ${:.0} [p]",
                config.leverage, config.max_allocation_per_trade
            ),
            Style::default().fg(theme::TEXT),
        )),
        Line::from(Span::styled(
            format!(
                " auto-execute: {} [x]",
                if config.auto_execute { "ON" } else { "off" }
            ),
            if config.auto_execute {
                theme::accent()
            } else {
                theme::muted()
            },
        )),
    ];
    f.render_widget(Paragraph::new(lines), chunks[0]);

    // Confluence meters, jittered by the cosmetic ticker.
    let meters = &app.bot.cosmetic().meters;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); meters.len()])
        .split(chunks[1]);
    for (meter, row) in meters.iter().zip(rows.iter()) {
        let gauge = Gauge::default()
            .label(format!("{} {:.0}%", meter.name, meter.confidence))
            .ratio((meter.confidence / 100.0).clamp(0.0, 1.0))
            .gauge_style(if meter.enabled {
                theme::accent()
            } else {
                theme::muted()
            });
        f.render_widget(gauge, *row);
    }
}

fn render_stage(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(" Stage ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(signal) = app.bot.pending_signal() {
        let direction_style = match signal.direction {
            TradeDirection::Long => Style::default().fg(theme::POSITIVE),
            TradeDirection::Short => Style::default().fg(theme::NEGATIVE),
        };
        let lines = vec![
            Line::from(Span::styled(" SIGNAL DETECTED", theme::title())),
            Line::from(vec![
                Span::styled(
                    format!(" {} {} ", signal.direction.label(), signal.asset),
                    direction_style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("@ ${:.2}  {}x", signal.entry_price, signal.leverage),
                    Style::default().fg(theme::TEXT),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    " confidence {}%  stop ${:.2}  target ${:.2}",
                    signal.confidence, signal.stop_loss, signal.take_profit
                ),
                theme::muted(),
            )),
            Line::from(Span::styled(format!(" {}", signal.reason), theme::muted())),
            Line::from(""),
            Line::from(Span::styled(
                " [e] execute   [r] ignore",
                theme::accent(),
            )),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    } else if let Some(position) = app.bot.position() {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} PERP ", position.asset),
                    theme::title(),
                ),
                Span::styled(
                    format!("{} {}x", position.direction.label(), position.leverage),
                    theme::muted(),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    " entry ${:.2} -> mark ${:.2}",
                    position.entry_price, position.current_price
                ),
                Style::default().fg(theme::TEXT),
            )),
            Line::from(Span::styled(
                format!(
                    " P&L {:+.2}% (${:+.2})",
                    position.pnl_percent, position.pnl_usd
                ),
                theme::pnl(position.pnl_usd).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    " margin ${:.2}  liquidation ${:.2}",
                    position.margin, position.liquidation_price
                ),
                theme::muted(),
            )),
            Line::from(""),
            Line::from(Span::styled(" [c] close position", theme::accent())),
        ];
        f.render_widget(Paragraph::new(lines), inner);
    } else {
        let text = if app.bot.config().active {
            "Monitoring the market.\nThe algorithm is hunting high-probability setups."
        } else {
            "Standing by.\nStart the bot to begin scanning."
        };
        f.render_widget(
            Paragraph::new(text).style(theme::muted()).wrap(Wrap { trim: true }),
            inner,
        );
    }
}

fn render_logs(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(" System Logs ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = inner.height as usize;
    let lines: Vec<Line> = app
        .bot
        .logs()
        .tail(visible)
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("{} ", entry.timestamp), theme::muted()),
                Span::styled(
                    format!("{} ", entry.level.label()),
                    theme::log_level(entry.level),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(theme::TEXT)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

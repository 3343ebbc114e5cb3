//! Coin detail view — price context, the DCA simulator chart, and the
//! on-demand analysis verdict.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(coin) = app.detail_coin() else {
        f.render_widget(
            Paragraph::new("Select a coin on the dashboard (Enter) first.").style(theme::muted()),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(2),
            Constraint::Length(7),
        ])
        .split(area);

    // Header: live numbers for the selected coin.
    let header = Line::from(vec![
        Span::styled(format!("{} ({}) ", coin.name, coin.symbol), theme::title()),
        Span::styled(format!("${:.2} ", coin.price), Style::default().fg(theme::TEXT)),
        Span::styled(
            format!("{:+.2}% 24h  ", coin.change_24h_pct),
            theme::pnl(coin.change_24h_pct),
        ),
        Span::styled(
            format!(
                "SMA8W ${:.2} ({:+.1}%)  S2F {:.2}  ATH ${:.2}",
                coin.sma_8w,
                coin.sma_distance_pct(),
                coin.s2f_ratio,
                coin.ath
            ),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    render_dca_chart(f, chunks[1], app);
    render_dca_controls(f, chunks[2], app);
    render_analysis(f, chunks[3], app);
}

fn render_dca_chart(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(projection) = &app.dca_projection else {
        f.render_widget(Paragraph::new("Computing projection...").style(theme::muted()), area);
        return;
    };

    let past: Vec<(f64, f64)> = projection
        .points
        .iter()
        .filter(|p| p.is_past)
        .map(|p| (p.period as f64, p.portfolio_value))
        .collect();
    let future: Vec<(f64, f64)> = projection
        .points
        .iter()
        .filter(|p| !p.is_past)
        .map(|p| (p.period as f64, p.portfolio_value))
        .collect();
    let invested: Vec<(f64, f64)> = projection
        .points
        .iter()
        .map(|p| (p.period as f64, p.total_invested))
        .collect();

    let x_min = projection.points.first().map(|p| p.period as f64).unwrap_or(0.0);
    let x_max = projection
        .points
        .last()
        .map(|p| p.period as f64)
        .unwrap_or(1.0)
        .max(x_min + 1.0);
    let y_max = projection
        .points
        .iter()
        .map(|p| p.portfolio_value.max(p.total_invested))
        .fold(1.0_f64, f64::max);

    let datasets = vec![
        Dataset::default()
            .name("invested")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::muted())
            .data(&invested),
        Dataset::default()
            .name("backtest")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::WARNING))
            .data(&past),
        Dataset::default()
            .name("projection")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::POSITIVE))
            .data(&future),
    ];

    let summary = projection.summary;
    let title = format!(
        " DCA Simulator — invested ${:.0} -> ${:.0} ({:+.1}%) ",
        summary.total_invested, summary.final_value, summary.total_return_pct
    );

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(
            Axis::default()
                .bounds([x_min, x_max])
                .labels([format!("{x_min:.0}"), "0".into(), format!("{x_max:.0}")])
                .style(theme::muted()),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max * 1.05])
                .labels(["0".to_string(), format!("${:.0}", y_max / 2.0), format!("${y_max:.0}")])
                .style(theme::muted()),
        );

    f.render_widget(chart, area);
}

fn render_dca_controls(f: &mut Frame, area: Rect, app: &AppState) {
    let p = &app.dca_params;
    let line = Line::from(vec![
        Span::styled(
            format!(
                " ${:.0}/period [+/-]  {} [f]  {}y ahead [y/Y]  {}y back [p/P]  {:.0}% APY [t/T]  ",
                p.contribution,
                p.frequency.label(),
                p.projection_years,
                p.backtest_years,
                p.target_apy_pct
            ),
            Style::default().fg(theme::TEXT),
        ),
        Span::styled(
            format!(
                "smart accumulation: {} [s]",
                if p.smart_accumulation { "ON" } else { "off" }
            ),
            if p.smart_accumulation {
                theme::accent()
            } else {
                theme::muted()
            },
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_analysis(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Analysis [a] ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.analysis_in_flight {
        f.render_widget(
            Paragraph::new("Running multi-timeframe analysis...").style(theme::muted()),
            inner,
        );
        return;
    }

    let Some(verdict) = &app.analysis else {
        f.render_widget(
            Paragraph::new("Press 'a' for a strategy verdict.").style(theme::muted()),
            inner,
        );
        return;
    };

    let verdict_style = match verdict.verdict {
        aster_core::analysis::Verdict::Buy => Style::default().fg(theme::POSITIVE),
        aster_core::analysis::Verdict::Sell => Style::default().fg(theme::NEGATIVE),
        aster_core::analysis::Verdict::Wait => Style::default().fg(theme::WARNING),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", verdict.verdict.label()),
                verdict_style.add_modifier(ratatui::style::Modifier::BOLD),
            ),
            Span::styled(
                format!("confidence {}%  ", verdict.confidence_score),
                theme::title(),
            ),
            Span::styled(
                format!(
                    "entry {}  stop {}",
                    verdict.levels.entry_zone, verdict.levels.stop_loss
                ),
                theme::muted(),
            ),
        ]),
        Line::from(Span::styled(
            verdict.executive_summary.clone(),
            Style::default().fg(theme::TEXT),
        )),
        Line::from(Span::styled(
            format!("Risk: {}", verdict.risk_factor),
            theme::muted(),
        )),
    ];

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

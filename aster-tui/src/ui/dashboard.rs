//! Dashboard view — global metric tiles and the coin table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use aster_core::domain::Trend;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_metric_tiles(f, chunks[0], app);
    render_coin_table(f, chunks[1], app);
}

fn format_large(value: f64) -> String {
    if value >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${value:.0}")
    }
}

fn render_metric_tiles(f: &mut Frame, area: Rect, app: &AppState) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let values = match &app.metrics {
        Some(m) => [
            ("Market Cap", format_large(m.total_market_cap)),
            ("24h Volume", format_large(m.total_volume)),
            ("BTC Dominance", format!("{:.1}%", m.btc_dominance)),
            ("Sentiment", format!("{:.0}/100", m.sentiment_index)),
        ],
        None => [
            ("Market Cap", "--".into()),
            ("24h Volume", "--".into()),
            ("BTC Dominance", "--".into()),
            ("Sentiment", "--".into()),
        ],
    };

    for (tile, (label, value)) in tiles.iter().zip(values) {
        let text = Line::from(vec![
            Span::styled(format!("{label}: "), theme::muted()),
            Span::styled(value, theme::title()),
        ]);
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            *tile,
        );
    }
}

fn render_coin_table(f: &mut Frame, area: Rect, app: &AppState) {
    if app.coins.is_empty() {
        f.render_widget(
            Paragraph::new("Loading market data... (press r to retry)").style(theme::muted()),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        "Sym", "Name", "Price", "24h%", "SMA 8W", "Trend", "S2F", "Mkt Cap",
    ])
    .style(theme::muted().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .coins
        .iter()
        .enumerate()
        .map(|(i, coin)| {
            let trend = match coin.supertrend {
                Trend::Bullish => Cell::from("BULL").style(Style::default().fg(theme::POSITIVE)),
                Trend::Bearish => Cell::from("BEAR").style(Style::default().fg(theme::NEGATIVE)),
            };
            let row = Row::new(vec![
                Cell::from(coin.symbol.clone()),
                Cell::from(coin.name.clone()),
                Cell::from(format!("{:.2}", coin.price)),
                Cell::from(format!("{:+.1}%", coin.change_24h_pct))
                    .style(theme::pnl(coin.change_24h_pct)),
                Cell::from(format!("{:.2}", coin.sma_8w)),
                trend,
                Cell::from(format!("{:.2}", coin.s2f_ratio)),
                Cell::from(format_large(coin.market_cap)),
            ]);
            if i == app.selected_coin {
                row.style(Style::default().bg(ratatui::style::Color::Rgb(40, 44, 52)))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(10),
        ],
    )
    .header(header);

    f.render_widget(table, area);
}

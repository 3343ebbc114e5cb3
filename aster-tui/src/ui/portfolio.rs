//! Portfolio view — holdings table and the on-demand audit.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use aster_core::domain::HoldSignal;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(6)])
        .split(area);

    render_holdings(f, chunks[0], app);
    render_review(f, chunks[1], app);
}

fn render_holdings(f: &mut Frame, area: Rect, app: &AppState) {
    if app.portfolio.is_empty() {
        f.render_widget(
            Paragraph::new("No tracked positions.").style(theme::muted()),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        "Sym", "Amount", "Avg Buy", "Price", "Value", "P&L", "P&L%", "Alloc", "Signal",
    ])
    .style(theme::muted().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .portfolio
        .iter()
        .map(|p| {
            let signal = match p.signal {
                HoldSignal::Buy => Cell::from("BUY").style(Style::default().fg(theme::POSITIVE)),
                HoldSignal::Sell => Cell::from("SELL").style(Style::default().fg(theme::NEGATIVE)),
                HoldSignal::Hold => Cell::from("HOLD").style(theme::muted()),
            };
            Row::new(vec![
                Cell::from(p.symbol.clone()),
                Cell::from(format!("{:.4}", p.amount)),
                Cell::from(format!("{:.2}", p.avg_buy_price)),
                Cell::from(format!("{:.2}", p.current_price)),
                Cell::from(format!("${:.2}", p.value_usd)),
                Cell::from(format!("{:+.2}", p.pnl_usd)).style(theme::pnl(p.pnl_usd)),
                Cell::from(format!("{:+.1}%", p.pnl_percent)).style(theme::pnl(p.pnl_percent)),
                Cell::from(format!("{:.1}%", p.allocation_pct)),
                signal,
            ])
        })
        .collect();

    let total: f64 = app.portfolio.iter().map(|p| p.value_usd).sum();
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Holdings — ${total:.2} ")),
    );

    f.render_widget(table, area);
}

fn render_review(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(" Audit [a] ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = if app.review_in_flight {
        "Auditing allocation...".to_string()
    } else if let Some(review) = &app.portfolio_review {
        review.clone()
    } else {
        "Press 'a' for a portfolio audit.".to_string()
    };

    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(theme::TEXT))
            .wrap(Wrap { trim: true }),
        inner,
    );
}

//! Top-level UI layout — tab strip, active view, status bar.

pub mod bot;
pub mod dashboard;
pub mod detail;
pub mod portfolio;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, View};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_tabs(f, chunks[0], app);
    draw_view(f, chunks[1], app);
    draw_status(f, chunks[2], app);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(" ASTER ", theme::title())];
    for i in 0..4 {
        let view = View::from_index(i).unwrap();
        spans.push(Span::styled(
            format!("  {} [{}]", view.label(), i + 1),
            theme::tab(view == app.view),
        ));
    }
    if let Some(source) = app.market_source {
        spans.push(Span::styled(
            format!("   data: {}", source.label()),
            theme::muted(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_view(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.view.label()))
        .title_style(theme::title());
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.view {
        View::Dashboard => dashboard::render(f, inner, app),
        View::Detail => detail::render(f, inner, app),
        View::Portfolio => portfolio::render(f, inner, app),
        View::Bot => bot::render(f, inner, app),
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    let line = if let Some(toast) = &app.toast {
        Line::from(vec![
            Span::styled(
                format!(" {} ", toast.level.label()),
                theme::log_level(toast.level),
            ),
            Span::styled(toast.message.clone(), Style::default().fg(theme::TEXT)),
        ])
    } else {
        Line::from(Span::styled(
            " q quit | Tab switch view | Enter open | r refresh ",
            theme::muted(),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

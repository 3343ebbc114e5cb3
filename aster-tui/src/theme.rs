//! Dark terminal theme tokens.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(59, 130, 246);
pub const POSITIVE: Color = Color::Rgb(34, 197, 94);
pub const NEGATIVE: Color = Color::Rgb(239, 68, 68);
pub const WARNING: Color = Color::Rgb(234, 179, 8);
pub const SIGNAL: Color = Color::Rgb(168, 85, 247);
pub const MUTED: Color = Color::Rgb(120, 120, 130);
pub const TEXT: Color = Color::Rgb(230, 230, 235);

pub fn title() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn pnl(value: f64) -> Style {
    if value >= 0.0 {
        Style::default().fg(POSITIVE)
    } else {
        Style::default().fg(NEGATIVE)
    }
}

pub fn tab(selected: bool) -> Style {
    if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn log_level(level: aster_core::domain::LogLevel) -> Style {
    use aster_core::domain::LogLevel;
    let color = match level {
        LogLevel::Info => ACCENT,
        LogLevel::Success => POSITIVE,
        LogLevel::Warning => WARNING,
        LogLevel::Error => NEGATIVE,
        LogLevel::Signal => SIGNAL,
    };
    Style::default().fg(color)
}

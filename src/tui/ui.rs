//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::SessionMode;
use crate::tui::app::Screen;

const LOCK_HINTS: &str = "Esc/e: emergency exit";
const STANDARD_HINTS: &str = "q: end session";

/// Render one frame.
pub fn render(frame: &mut Frame<'_>, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Countdown
            Constraint::Length(3), // Progress
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, screen, chunks[0]);
    render_countdown(frame, screen, chunks[1]);
    render_progress(frame, screen, chunks[2]);
    render_status_bar(frame, screen, chunks[3]);
}

const fn accent(mode: SessionMode) -> Color {
    match mode {
        SessionMode::Lock => Color::Magenta,
        SessionMode::Standard => Color::Cyan,
    }
}

fn render_header(frame: &mut Frame<'_>, screen: &Screen, area: Rect) {
    let color = accent(screen.mode);
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", screen.mode.display_name()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", screen.rewards.label()),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(header, area);
}

fn render_countdown(frame: &mut Frame<'_>, screen: &Screen, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            screen.remaining.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(attempts) = screen.exit_attempts {
        let style = if attempts == 0 {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Red)
        };
        lines.push(Line::from(Span::styled(
            format!("Exit attempts: {attempts}"),
            style,
        )));
    }

    let countdown = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(countdown, area);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_progress(frame: &mut Frame<'_>, screen: &Screen, area: Rect) {
    let percent = screen.progress.clamp(0.0, 100.0).round() as u16;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(accent(screen.mode)))
        .percent(percent);

    frame.render_widget(gauge, area);
}

fn render_status_bar(frame: &mut Frame<'_>, screen: &Screen, area: Rect) {
    let hints = match screen.mode {
        SessionMode::Lock => LOCK_HINTS,
        SessionMode::Standard => STANDARD_HINTS,
    };
    let status_text = screen.status.as_deref().unwrap_or(hints);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

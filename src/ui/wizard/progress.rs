//! Progress trail widget

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::booking::{MarkerState, Progress};

pub(crate) fn render_progress(frame: &mut Frame, area: Rect, progress: &Progress) {
    let block = Block::default()
        .title(format!(" Book an appointment · step {} of {} ", progress.current, progress.total))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let mut spans = Vec::new();
    for (i, marker) in progress.markers.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let (glyph, style) = match marker.state {
            MarkerState::Done => ("●", Style::default().fg(Color::Green)),
            MarkerState::Current => (
                "◉",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            MarkerState::Upcoming => ("○", Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(
            format!("{glyph} {} {}", marker.number, marker.title),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress.ratio().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, rows[1]);
}

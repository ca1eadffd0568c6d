//! Screen shown while the location is outside the booking flow

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::booking::{BookingConfirmation, Location};

pub fn render_home(
    frame: &mut Frame,
    location: &Location,
    last_confirmation: Option<&BookingConfirmation>,
) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" careflow ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "City Hospital appointments",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Location: ", Style::default().fg(Color::Gray)),
            Span::raw(location.as_str().to_string()),
        ]),
        Line::from(""),
    ];

    if let Some(confirmation) = last_confirmation {
        lines.push(Line::from(Span::styled(
            format!("Booked: {}", confirmation.short_reference()),
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(format!(
            "{} with {}",
            confirmation.service_name, confirmation.doctor_name
        )));
        lines.push(Line::from(
            confirmation.slot.format("%A %d %B %Y, %H:%M").to_string(),
        ));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(" [B]", Style::default().fg(Color::Yellow)),
        Span::raw("ook an appointment   "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit   "),
        Span::styled("Alt+←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" history"),
    ]));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

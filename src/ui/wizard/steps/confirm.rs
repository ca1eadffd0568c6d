//! Confirmation step rendering

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::catalog::Catalog;
use crate::ui::wizard::WizardScreen;

impl WizardScreen {
    pub(crate) fn render_confirm_step(&self, frame: &mut Frame, area: Rect, catalog: &Catalog) {
        let block = Block::default()
            .title(" Confirm your booking ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let service = self.draft.service_id().and_then(|id| catalog.service(id));
        let doctor = self.draft.doctor_id().and_then(|id| catalog.doctor(id));
        let missing = || Span::styled("not chosen", Style::default().fg(Color::Red));

        let row = |label: &str, value: Span<'static>| {
            Line::from(vec![
                Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
                value,
            ])
        };

        let patient = &self.draft.patient;
        let mut lines = vec![
            row(
                "Service",
                service.map_or_else(missing, |s| Span::raw(s.name.clone())),
            ),
            row(
                "Doctor",
                doctor.map_or_else(missing, |d| Span::raw(d.display_name())),
            ),
            row(
                "Time",
                self.draft.slot().map_or_else(missing, |slot| {
                    Span::raw(slot.format("%A %d %B %Y, %H:%M").to_string())
                }),
            ),
            row(
                "Duration",
                service.map_or_else(missing, |s| {
                    Span::raw(format!("{} minutes", s.duration_minutes))
                }),
            ),
            row(
                "Price",
                service.map_or_else(missing, |s| Span::raw(format!("{:.2}", s.price))),
            ),
            Line::from(""),
            row("Patient", Span::raw(patient.full_name.trim().to_string())),
            row("Phone", Span::raw(patient.phone.trim().to_string())),
            row("Date of birth", Span::raw(patient.date_of_birth.trim().to_string())),
        ];
        if !patient.email.trim().is_empty() {
            lines.push(row("Email", Span::raw(patient.email.trim().to_string())));
        }
        if !patient.notes.trim().is_empty() {
            lines.push(row("Notes", Span::raw(patient.notes.trim().to_string())));
        }
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                " Press Enter to book ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

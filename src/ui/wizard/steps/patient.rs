//! Patient information step rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::booking::PatientField;
use crate::ui::wizard::WizardScreen;

impl WizardScreen {
    pub(crate) fn render_patient_step(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Patient information ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let fields = PatientField::all();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                fields
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .chain(std::iter::once(Constraint::Min(0)))
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for (i, field) in fields.iter().enumerate() {
            let focused = *field == self.focused_field;
            let error = self.field_errors.iter().find(|e| e.field == *field);

            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let cursor = if focused { "▏" } else { "" };

            let mut spans = vec![
                Span::styled(format!("{:<28}", field.label()), label_style),
                Span::raw(self.draft.patient.get(*field).to_string()),
                Span::styled(cursor, Style::default().fg(Color::Yellow)),
            ];
            if let Some(error) = error {
                spans.push(Span::styled(
                    format!("  {}", error.message),
                    Style::default().fg(Color::Red),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), rows[i]);
        }
    }
}

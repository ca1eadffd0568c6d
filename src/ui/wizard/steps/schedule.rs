//! Service & schedule step rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::catalog::Catalog;
use crate::ui::wizard::{SchedulePane, WizardScreen};

impl WizardScreen {
    pub(crate) fn render_schedule_step(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        catalog: &Catalog,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Services
                Constraint::Percentage(35), // Doctors
                Constraint::Percentage(25), // Slots
            ])
            .split(area);

        let chosen_service = self.draft.service_id().map(str::to_string);
        let services: Vec<ListItem> = catalog
            .services
            .iter()
            .map(|s| {
                let marker = if chosen_service.as_deref() == Some(s.id.as_str()) {
                    "✓ "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::raw(s.name.clone()),
                    Span::styled(
                        format!("  {} min · {:.2}", s.duration_minutes, s.price),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let chosen_doctor = self.draft.doctor_id().map(str::to_string);
        let doctors: Vec<ListItem> = self
            .doctors(catalog)
            .into_iter()
            .map(|d| {
                let marker = if chosen_doctor.as_deref() == Some(d.id.as_str()) {
                    "✓ "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::raw(d.display_name()),
                ]))
            })
            .collect();

        let chosen_slot = self.draft.slot();
        let slots: Vec<ListItem> = self
            .slots(catalog)
            .into_iter()
            .map(|slot| {
                let marker = if chosen_slot == Some(slot) { "✓ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::raw(slot.format("%a %d %b %H:%M").to_string()),
                ]))
            })
            .collect();

        let pane = self.pane;
        render_pane(
            frame,
            columns[0],
            " Service ",
            services,
            &mut self.service_state,
            pane == SchedulePane::Service,
        );
        render_pane(
            frame,
            columns[1],
            " Doctor ",
            doctors,
            &mut self.doctor_state,
            pane == SchedulePane::Doctor,
        );
        render_pane(
            frame,
            columns[2],
            " Time ",
            slots,
            &mut self.slot_state,
            pane == SchedulePane::Slot,
        );
    }
}

fn render_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem>,
    state: &mut ListState,
    focused: bool,
) {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let list = List::new(items)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, state);
}

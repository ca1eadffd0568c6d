//! Booking wizard screen: the three step components and their shared draft.
//!
//! Which component is drawn is decided by the booking flow; this screen only
//! holds the draft, list cursors and form focus that the components need.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{ListState, Paragraph},
    Frame,
};

use crate::booking::{
    BookingConfirmation, BookingDraft, DraftError, FieldError, PatientField, Progress,
    StepComponent,
};
use crate::catalog::{Catalog, Doctor};
use crate::notifications::Notify;

mod progress;
mod steps;

#[cfg(test)]
mod tests;

/// List the first step's cursor is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePane {
    Service,
    Doctor,
    Slot,
}

impl SchedulePane {
    fn next(self) -> Self {
        match self {
            SchedulePane::Service => SchedulePane::Doctor,
            SchedulePane::Doctor => SchedulePane::Slot,
            SchedulePane::Slot => SchedulePane::Slot,
        }
    }

    fn previous(self) -> Self {
        match self {
            SchedulePane::Service => SchedulePane::Service,
            SchedulePane::Doctor => SchedulePane::Service,
            SchedulePane::Slot => SchedulePane::Doctor,
        }
    }
}

/// What the host should do after Enter on a step component
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Stay on the step
    Stay,
    /// The step is complete; move forward
    Advance,
    /// The booking was submitted; leave the flow
    Submitted(BookingConfirmation),
}

/// State behind the three step components
pub struct WizardScreen {
    /// Everything collected so far
    pub draft: BookingDraft,
    /// Active list on the service & schedule step
    pub pane: SchedulePane,
    pub(crate) service_state: ListState,
    pub(crate) doctor_state: ListState,
    pub(crate) slot_state: ListState,
    /// Focused patient form field
    pub focused_field: PatientField,
    /// Failures from the last patient form check
    pub field_errors: Vec<FieldError>,
    /// Most recent successful booking
    pub last_confirmation: Option<BookingConfirmation>,
}

impl Default for WizardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardScreen {
    pub fn new() -> Self {
        let mut service_state = ListState::default();
        service_state.select(Some(0));

        Self {
            draft: BookingDraft::new(),
            pane: SchedulePane::Service,
            service_state,
            doctor_state: ListState::default(),
            slot_state: ListState::default(),
            focused_field: PatientField::FullName,
            field_errors: Vec::new(),
            last_confirmation: None,
        }
    }

    /// Clear the draft for a new booking, keeping the last confirmation
    pub fn reset(&mut self) {
        let last = self.last_confirmation.take();
        *self = Self::new();
        self.last_confirmation = last;
    }

    /// Doctors offered for the chosen service
    pub(crate) fn doctors<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Doctor> {
        self.draft
            .service_id()
            .map(|id| catalog.doctors_for_service(id))
            .unwrap_or_default()
    }

    /// Open slots of the chosen doctor
    pub(crate) fn slots(&self, catalog: &Catalog) -> Vec<chrono::NaiveDateTime> {
        self.draft
            .doctor_id()
            .and_then(|id| catalog.doctor(id))
            .map(|doctor| doctor.slots.clone())
            .unwrap_or_default()
    }

    /// Whether typed characters go to a form field
    pub fn captures_text(&self, component: StepComponent) -> bool {
        component == StepComponent::PatientInformation
    }

    /// Handle a key that isn't a flow action (Enter/Esc are the host's)
    pub fn handle_key(&mut self, component: StepComponent, key: KeyCode, catalog: &Catalog) {
        match component {
            StepComponent::ServiceSchedule => match key {
                KeyCode::Up | KeyCode::Char('k') => self.move_cursor(catalog, -1),
                KeyCode::Down | KeyCode::Char('j') => self.move_cursor(catalog, 1),
                KeyCode::Tab | KeyCode::Right => self.pane = self.pane.next(),
                KeyCode::BackTab | KeyCode::Left => self.pane = self.pane.previous(),
                _ => {}
            },
            StepComponent::PatientInformation => match key {
                KeyCode::Up | KeyCode::BackTab => self.focus_field(-1),
                KeyCode::Down | KeyCode::Tab => self.focus_field(1),
                KeyCode::Char(c) => self.draft.patient.get_mut(self.focused_field).push(c),
                KeyCode::Backspace => {
                    self.draft.patient.get_mut(self.focused_field).pop();
                }
                _ => {}
            },
            StepComponent::Confirmation => {}
        }
    }

    /// Enter on the step component. Validates the step's data and reports
    /// problems through `notify`.
    pub fn confirm(
        &mut self,
        component: StepComponent,
        catalog: &Catalog,
        notify: &mut dyn Notify,
    ) -> StepOutcome {
        match component {
            StepComponent::ServiceSchedule => self.confirm_schedule(catalog, notify),
            StepComponent::PatientInformation => self.confirm_patient(notify),
            StepComponent::Confirmation => self.confirm_booking(catalog, notify),
        }
    }

    fn confirm_schedule(&mut self, catalog: &Catalog, notify: &mut dyn Notify) -> StepOutcome {
        match self.pane {
            SchedulePane::Service => {
                let Some(service) = self
                    .service_state
                    .selected()
                    .and_then(|i| catalog.services.get(i))
                else {
                    notify.warning("No services available");
                    return StepOutcome::Stay;
                };
                self.draft.select_service(service.id.clone());
                let has_doctors = !self.doctors(catalog).is_empty();
                self.doctor_state.select(has_doctors.then_some(0));
                self.slot_state.select(None);
                if has_doctors {
                    self.pane = SchedulePane::Doctor;
                } else {
                    notify.warning("No doctors offer this service");
                }
                StepOutcome::Stay
            }
            SchedulePane::Doctor => {
                let doctors = self.doctors(catalog);
                let Some(doctor) = self.doctor_state.selected().and_then(|i| doctors.get(i))
                else {
                    notify.warning(&DraftError::MissingDoctor.to_string());
                    return StepOutcome::Stay;
                };
                let (id, open_slots) = (doctor.id.clone(), !doctor.slots.is_empty());
                self.draft.select_doctor(id);
                self.slot_state.select(open_slots.then_some(0));
                if open_slots {
                    self.pane = SchedulePane::Slot;
                } else {
                    notify.warning("This doctor has no open slots");
                }
                StepOutcome::Stay
            }
            SchedulePane::Slot => {
                let slots = self.slots(catalog);
                if let Some(slot) = self.slot_state.selected().and_then(|i| slots.get(i)) {
                    self.draft.select_slot(*slot);
                }
                match self.draft.validate_selection(catalog) {
                    Ok(()) => StepOutcome::Advance,
                    Err(e) => {
                        notify.warning(&e.to_string());
                        StepOutcome::Stay
                    }
                }
            }
        }
    }

    fn confirm_patient(&mut self, notify: &mut dyn Notify) -> StepOutcome {
        match self.draft.validate_patient() {
            Ok(()) => {
                self.field_errors.clear();
                StepOutcome::Advance
            }
            Err(DraftError::InvalidPatient(errors)) => {
                if let Some(first) = errors.first() {
                    self.focused_field = first.field;
                    notify.error(&first.to_string());
                }
                self.field_errors = errors;
                StepOutcome::Stay
            }
            Err(e) => {
                notify.error(&e.to_string());
                StepOutcome::Stay
            }
        }
    }

    fn confirm_booking(&mut self, catalog: &Catalog, notify: &mut dyn Notify) -> StepOutcome {
        match self.draft.submit(catalog) {
            Ok(confirmation) => {
                notify.success(&format!(
                    "Booked {} with {} ({})",
                    confirmation.service_name,
                    confirmation.doctor_name,
                    confirmation.short_reference()
                ));
                self.last_confirmation = Some(confirmation.clone());
                self.reset();
                StepOutcome::Submitted(confirmation)
            }
            Err(e) => {
                notify.error(&e.to_string());
                StepOutcome::Stay
            }
        }
    }

    fn move_cursor(&mut self, catalog: &Catalog, delta: isize) {
        let (state, len) = match self.pane {
            SchedulePane::Service => (&mut self.service_state, catalog.services.len()),
            SchedulePane::Doctor => {
                let len = self.doctors(catalog).len();
                (&mut self.doctor_state, len)
            }
            SchedulePane::Slot => {
                let len = self.slots(catalog).len();
                (&mut self.slot_state, len)
            }
        };
        if len == 0 {
            state.select(None);
            return;
        }
        let current = state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        state.select(Some(next));
    }

    fn focus_field(&mut self, delta: isize) {
        let fields = PatientField::all();
        let current = fields
            .iter()
            .position(|f| *f == self.focused_field)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(fields.len() as isize) as usize;
        self.focused_field = fields[next];
    }

    /// Draw the progress trail, the step component and its key hints
    pub fn render(
        &mut self,
        frame: &mut Frame,
        component: StepComponent,
        progress: &Progress,
        catalog: &Catalog,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Progress
                Constraint::Min(8),    // Step component
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        progress::render_progress(frame, chunks[0], progress);

        match component {
            StepComponent::ServiceSchedule => self.render_schedule_step(frame, chunks[1], catalog),
            StepComponent::PatientInformation => self.render_patient_step(frame, chunks[1]),
            StepComponent::Confirmation => self.render_confirm_step(frame, chunks[1], catalog),
        }

        render_hints(frame, chunks[2], component);
    }
}

fn render_hints(frame: &mut Frame, area: Rect, component: StepComponent) {
    let hints = match component {
        StepComponent::ServiceSchedule => "↑↓ move  Tab switch list  Enter choose  Esc back  Alt+←/→ history",
        StepComponent::PatientInformation => "Type to edit  ↑↓ field  Enter continue  Esc back",
        StepComponent::Confirmation => "Enter book  Esc back  Alt+←/→ history",
    };
    let line = Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(line), area);
}

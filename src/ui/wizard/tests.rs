//! Tests for the booking wizard screen

use std::time::Duration;

use crossterm::event::KeyCode;

use super::{SchedulePane, StepOutcome, WizardScreen};
use crate::booking::{PatientField, StepComponent};
use crate::catalog::tests::sample_catalog;
use crate::catalog::Catalog;
use crate::notifications::{ToastLevel, ToastQueue};

fn toasts() -> ToastQueue {
    ToastQueue::new(Duration::from_secs(5), 5)
}

fn type_text(screen: &mut WizardScreen, catalog: &Catalog, text: &str) {
    for c in text.chars() {
        screen.handle_key(StepComponent::PatientInformation, KeyCode::Char(c), catalog);
    }
}

/// Walk the first step choosing the highlighted service, doctor and slot
fn choose_first_schedule(screen: &mut WizardScreen, catalog: &Catalog) -> StepOutcome {
    let mut queue = toasts();
    let component = StepComponent::ServiceSchedule;
    assert_eq!(screen.confirm(component, catalog, &mut queue), StepOutcome::Stay);
    assert_eq!(screen.confirm(component, catalog, &mut queue), StepOutcome::Stay);
    screen.confirm(component, catalog, &mut queue)
}

fn fill_patient(screen: &mut WizardScreen, catalog: &Catalog) {
    type_text(screen, catalog, "Maya Lindqvist");
    screen.handle_key(StepComponent::PatientInformation, KeyCode::Tab, catalog);
    type_text(screen, catalog, "+46 70 123 45 67");
    screen.handle_key(StepComponent::PatientInformation, KeyCode::Tab, catalog);
    screen.handle_key(StepComponent::PatientInformation, KeyCode::Tab, catalog);
    type_text(screen, catalog, "1988-03-14");
}

#[test]
fn test_new_screen_starts_on_service_list() {
    let screen = WizardScreen::new();
    assert_eq!(screen.pane, SchedulePane::Service);
    assert_eq!(screen.service_state.selected(), Some(0));
    assert_eq!(screen.focused_field, PatientField::FullName);
    assert!(screen.draft.service_id().is_none());
}

#[test]
fn test_schedule_walks_service_doctor_slot() {
    let catalog = sample_catalog();
    let mut screen = WizardScreen::new();

    let outcome = choose_first_schedule(&mut screen, &catalog);
    assert_eq!(outcome, StepOutcome::Advance);
    assert_eq!(screen.draft.service_id(), Some(catalog.services[0].id.as_str()));
    assert!(screen.draft.doctor_id().is_some());
    assert!(screen.draft.slot().is_some());
}

#[test]
fn test_schedule_cursor_wraps() {
    let catalog = sample_catalog();
    let mut screen = WizardScreen::new();
    screen.handle_key(StepComponent::ServiceSchedule, KeyCode::Up, &catalog);
    assert_eq!(
        screen.service_state.selected(),
        Some(catalog.services.len() - 1)
    );
    screen.handle_key(StepComponent::ServiceSchedule, KeyCode::Down, &catalog);
    assert_eq!(screen.service_state.selected(), Some(0));
}

#[test]
fn test_slot_pane_without_selection_warns() {
    let catalog = sample_catalog();
    let mut screen = WizardScreen::new();
    let mut queue = toasts();

    screen.pane = SchedulePane::Slot;
    let outcome = screen.confirm(StepComponent::ServiceSchedule, &catalog, &mut queue);
    assert_eq!(outcome, StepOutcome::Stay);
    let toast = queue.latest().unwrap();
    assert_eq!(toast.level, ToastLevel::Warning);
    assert_eq!(toast.message, "Please choose a service");
}

#[test]
fn test_typing_edits_focused_field() {
    let catalog = sample_catalog();
    let mut screen = WizardScreen::new();
    assert!(screen.captures_text(StepComponent::PatientInformation));
    assert!(!screen.captures_text(StepComponent::ServiceSchedule));

    type_text(&mut screen, &catalog, "Ann");
    screen.handle_key(StepComponent::PatientInformation, KeyCode::Backspace, &catalog);
    assert_eq!(screen.draft.patient.full_name, "An");

    screen.handle_key(StepComponent::PatientInformation, KeyCode::Up, &catalog);
    assert_eq!(screen.focused_field, PatientField::Notes);
}

#[test]
fn test_invalid_patient_stays_and_focuses_first_error() {
    let catalog = sample_catalog();
    let mut screen = WizardScreen::new();
    let mut queue = toasts();

    screen.focused_field = PatientField::Notes;
    let outcome = screen.confirm(StepComponent::PatientInformation, &catalog, &mut queue);
    assert_eq!(outcome, StepOutcome::Stay);
    assert_eq!(screen.focused_field, PatientField::FullName);
    assert!(screen.field_errors.len() >= 3);
    assert_eq!(queue.latest().unwrap().level, ToastLevel::Error);
}

#[test]
fn test_valid_patient_advances() {
    let catalog = sample_catalog();
    let mut screen = WizardScreen::new();
    let mut queue = toasts();

    fill_patient(&mut screen, &catalog);
    let outcome = screen.confirm(StepComponent::PatientInformation, &catalog, &mut queue);
    assert_eq!(outcome, StepOutcome::Advance);
    assert!(screen.field_errors.is_empty());
    assert!(queue.is_empty());
}

#[test]
fn test_confirmation_submits_and_resets() {
    let catalog = sample_catalog();
    let mut screen = WizardScreen::new();
    let mut queue = toasts();

    assert_eq!(choose_first_schedule(&mut screen, &catalog), StepOutcome::Advance);
    fill_patient(&mut screen, &catalog);

    let outcome = screen.confirm(StepComponent::Confirmation, &catalog, &mut queue);
    let StepOutcome::Submitted(confirmation) = outcome else {
        panic!("expected submission, got {outcome:?}");
    };
    assert_eq!(confirmation.patient_name, "Maya Lindqvist");
    assert_eq!(queue.latest().unwrap().level, ToastLevel::Success);

    assert!(screen.draft.service_id().is_none());
    assert_eq!(
        screen.last_confirmation.as_ref().map(|c| c.reference),
        Some(confirmation.reference)
    );
}

#[test]
fn test_confirmation_with_empty_draft_reports_error() {
    let catalog = sample_catalog();
    let mut screen = WizardScreen::new();
    let mut queue = toasts();

    let outcome = screen.confirm(StepComponent::Confirmation, &catalog, &mut queue);
    assert_eq!(outcome, StepOutcome::Stay);
    assert_eq!(queue.latest().unwrap().message, "Please choose a service");
}

//! Integration tests for the booking flow against an in-memory history
//!
//! These walk the flow the way a host would: sync to render, act on the
//! rendered step, and use the history's own back/forward in between.

use careflow::booking::{
    BookingFlow, BookingPaths, BookingStep, MemoryHistory, NavigationMode, RenderPass,
    StepComponent, Transition,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Flow mounted at `path`, with "/" as the previous history entry
fn mounted_at(path: &str) -> BookingFlow<MemoryHistory> {
    let mut history = MemoryHistory::new("/");
    history.push(path);
    let mut flow = BookingFlow::new(history, BookingPaths::default());
    flow.mount();
    flow
}

fn rendered_step(flow: &mut BookingFlow<MemoryHistory>) -> Option<BookingStep> {
    flow.sync().expect("navigation failed").step()
}

// ─── Resolution scenarios ────────────────────────────────────────────────────

#[test]
fn test_invalid_token_redirects_once_and_renders_first_step() {
    for path in ["/booking/abc", "/booking/4", "/booking/0", "/booking/2.5", "/booking/+2"] {
        let mut flow = mounted_at(path);

        let RenderPass::Redirected(request) = flow.sync().unwrap() else {
            panic!("{path} should redirect");
        };
        assert_eq!(request.mode, NavigationMode::Replace);
        assert_eq!(flow.navigator().current().as_str(), "/booking/1");

        // Second pass renders; no further redirect
        let len = flow.navigator().len();
        assert_eq!(rendered_step(&mut flow), Some(BookingStep::ServiceSchedule));
        assert_eq!(flow.navigator().len(), len);
    }
}

#[test]
fn test_valid_token_renders_its_component() {
    let mut flow = mounted_at("/booking/2");
    match flow.sync().unwrap() {
        RenderPass::Step {
            step,
            component,
            progress,
        } => {
            assert_eq!(step, BookingStep::PatientInformation);
            assert_eq!(component, StepComponent::PatientInformation);
            assert_eq!((progress.current, progress.total), (2, 3));
        }
        other => panic!("expected a step, got {other:?}"),
    }
}

#[test]
fn test_leading_zero_is_accepted() {
    let mut flow = mounted_at("/booking/02");
    assert_eq!(rendered_step(&mut flow), Some(BookingStep::PatientInformation));
    assert_eq!(flow.navigator().current().as_str(), "/booking/02");
}

// ─── History ─────────────────────────────────────────────────────────────────

#[test]
fn test_corrected_location_is_not_reachable_by_back() {
    let mut flow = mounted_at("/booking/99");
    flow.sync().unwrap();
    assert_eq!(flow.navigator().current().as_str(), "/booking/1");

    assert!(flow.navigator_mut().back());
    assert_eq!(flow.navigator().current().as_str(), "/");
    assert!(flow
        .navigator()
        .entries()
        .iter()
        .all(|l| l.as_str() != "/booking/99"));
}

#[test]
fn test_host_back_retraces_wizard_steps() {
    let mut flow = mounted_at("/booking/1");
    flow.advance().unwrap();
    flow.advance().unwrap();
    assert_eq!(rendered_step(&mut flow), Some(BookingStep::Confirmation));

    flow.navigator_mut().back();
    assert_eq!(rendered_step(&mut flow), Some(BookingStep::PatientInformation));
    flow.navigator_mut().back();
    assert_eq!(rendered_step(&mut flow), Some(BookingStep::ServiceSchedule));
    flow.navigator_mut().forward();
    assert_eq!(rendered_step(&mut flow), Some(BookingStep::PatientInformation));
}

#[test]
fn test_advance_after_back_drops_forward_entries() {
    let mut flow = mounted_at("/booking/1");
    flow.advance().unwrap();
    flow.advance().unwrap();
    flow.navigator_mut().back();
    flow.navigator_mut().back();

    flow.advance().unwrap();
    assert!(!flow.navigator().can_go_forward());
    assert_eq!(flow.navigator().current().as_str(), "/booking/2");
}

// ─── Boundaries ──────────────────────────────────────────────────────────────

#[test]
fn test_boundaries() {
    let mut flow = mounted_at("/booking/2");
    assert_eq!(
        flow.retreat().unwrap(),
        Transition::To(BookingStep::ServiceSchedule)
    );
    assert_eq!(flow.retreat().unwrap(), Transition::Exit);
    assert_eq!(flow.navigator().current().as_str(), "/");
    assert_eq!(flow.sync().unwrap(), RenderPass::Inactive);

    let mut flow = mounted_at("/booking/3");
    assert_eq!(flow.advance().unwrap(), Transition::Stay);
    assert_eq!(rendered_step(&mut flow), Some(BookingStep::Confirmation));
}

#[test]
fn test_round_trip_from_first_two_steps() {
    for start in [1, 2] {
        let mut flow = mounted_at(&format!("/booking/{start}"));
        flow.advance().unwrap();
        flow.retreat().unwrap();
        assert_eq!(rendered_step(&mut flow).map(|s| s.number()), Some(start));
    }
}

// ─── Lifetime ────────────────────────────────────────────────────────────────

#[test]
fn test_unmounted_flow_never_navigates() {
    let mut flow = mounted_at("/booking/abc");
    flow.unmount();

    assert_eq!(flow.sync().unwrap(), RenderPass::Inactive);
    assert_eq!(flow.retreat().unwrap(), Transition::Stay);
    assert_eq!(flow.navigator().current().as_str(), "/booking/abc");
    assert_eq!(flow.navigator().len(), 2);
}

#[test]
fn test_custom_paths() {
    let mut history = MemoryHistory::new("/home");
    history.push("/appointments/x");
    let mut flow = BookingFlow::new(history, BookingPaths::new("/appointments/", "/home"));
    flow.mount();

    flow.sync().unwrap();
    assert_eq!(flow.navigator().current().as_str(), "/appointments/1");
    assert_eq!(flow.retreat().unwrap(), Transition::Exit);
    assert_eq!(flow.navigator().current().as_str(), "/home");
}

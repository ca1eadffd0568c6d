//! Navigation primitive and the step navigator.
//!
//! Forward and back transitions always push a history entry so that the
//! host's own "back" retraces the wizard. Only the resolver's corrective
//! redirect uses replace.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::booking::location::{BookingPaths, Location};
use crate::booking::step::BookingStep;

/// How a navigation affects history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Add a new history entry
    Push,
    /// Overwrite the current history entry
    Replace,
}

/// A request to move to a new location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub location: Location,
    pub mode: NavigationMode,
}

impl NavigationRequest {
    pub fn push(location: impl Into<Location>) -> Self {
        Self {
            location: location.into(),
            mode: NavigationMode::Push,
        }
    }

    pub fn replace(location: impl Into<Location>) -> Self {
        Self {
            location: location.into(),
            mode: NavigationMode::Replace,
        }
    }
}

/// Errors raised by a navigation primitive
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation is unavailable: {0}")]
    Unavailable(String),
}

/// The host's navigation primitive: supplies the current location and
/// performs navigation.
pub trait Navigate {
    /// Current location
    fn location(&self) -> Location;

    /// Perform a navigation request
    fn navigate(&mut self, request: &NavigationRequest) -> Result<(), NavigationError>;
}

/// Outcome of a navigator action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to another step
    To(BookingStep),
    /// Leave the wizard
    Exit,
    /// Nothing to do
    Stay,
}

impl Transition {
    /// Push request for this transition, `None` for [`Transition::Stay`]
    pub fn request(self, paths: &BookingPaths) -> Option<NavigationRequest> {
        match self {
            Transition::To(step) => Some(NavigationRequest::push(paths.step_path(step))),
            Transition::Exit => Some(NavigationRequest::push(paths.exit())),
            Transition::Stay => None,
        }
    }
}

/// User actions the navigator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Advance,
    Retreat,
}

/// Computes forward/back transitions from the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepNavigator {
    current: BookingStep,
}

impl StepNavigator {
    pub fn new(current: BookingStep) -> Self {
        Self { current }
    }

    pub fn current(&self) -> BookingStep {
        self.current
    }

    /// Next step, or `Stay` on the last step. The confirmation step's own
    /// submission is what ends the flow from there.
    pub fn advance(&self) -> Transition {
        self.current.next().map_or(Transition::Stay, Transition::To)
    }

    /// Previous step, or `Exit` on the first step
    pub fn retreat(&self) -> Transition {
        self.current.previous().map_or(Transition::Exit, Transition::To)
    }

    pub fn apply(&self, action: StepAction) -> Transition {
        match action {
            StepAction::Advance => self.advance(),
            StepAction::Retreat => self.retreat(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_transitions() {
        assert_eq!(
            StepNavigator::new(BookingStep::ServiceSchedule).advance(),
            Transition::To(BookingStep::PatientInformation)
        );
        assert_eq!(
            StepNavigator::new(BookingStep::PatientInformation).advance(),
            Transition::To(BookingStep::Confirmation)
        );
    }

    #[test]
    fn test_advance_on_last_step_stays() {
        let nav = StepNavigator::new(BookingStep::Confirmation);
        assert_eq!(nav.advance(), Transition::Stay);
        assert_eq!(nav.advance().request(&BookingPaths::default()), None);
    }

    #[test]
    fn test_retreat_transitions() {
        assert_eq!(
            StepNavigator::new(BookingStep::Confirmation).retreat(),
            Transition::To(BookingStep::PatientInformation)
        );
        assert_eq!(
            StepNavigator::new(BookingStep::PatientInformation).retreat(),
            Transition::To(BookingStep::ServiceSchedule)
        );
    }

    #[test]
    fn test_retreat_on_first_step_exits() {
        let nav = StepNavigator::new(BookingStep::ServiceSchedule);
        assert_eq!(nav.retreat(), Transition::Exit);

        let request = nav.retreat().request(&BookingPaths::default()).unwrap();
        assert_eq!(request.location.as_str(), "/");
        assert_eq!(request.mode, NavigationMode::Push);
    }

    #[test]
    fn test_advance_then_retreat_round_trips() {
        for step in [BookingStep::ServiceSchedule, BookingStep::PatientInformation] {
            let Transition::To(next) = StepNavigator::new(step).advance() else {
                panic!("expected a step transition from {step:?}");
            };
            assert_eq!(StepNavigator::new(next).retreat(), Transition::To(step));
        }
    }

    #[test]
    fn test_transitions_push() {
        let paths = BookingPaths::default();
        let request = StepNavigator::new(BookingStep::ServiceSchedule)
            .apply(StepAction::Advance)
            .request(&paths)
            .unwrap();
        assert_eq!(request, NavigationRequest::push("/booking/2"));
    }
}

//! Booking wizard steps and their static definition table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of steps in the booking wizard
pub const TOTAL_STEPS: u32 = 3;

/// The three states of the booking wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    /// Select service, doctor and time slot
    ServiceSchedule,
    /// Collect patient details
    PatientInformation,
    /// Review and submit
    Confirmation,
}

impl BookingStep {
    /// The canonical step used for entry and for correcting invalid locations
    pub const CANONICAL: BookingStep = BookingStep::ServiceSchedule;

    /// All steps in wizard order
    pub fn all() -> &'static [BookingStep] {
        &[
            BookingStep::ServiceSchedule,
            BookingStep::PatientInformation,
            BookingStep::Confirmation,
        ]
    }

    /// Convert a 1-based step number into a step, if it is in range
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(BookingStep::ServiceSchedule),
            2 => Some(BookingStep::PatientInformation),
            3 => Some(BookingStep::Confirmation),
            _ => None,
        }
    }

    /// 1-based position of this step
    pub fn number(self) -> u32 {
        match self {
            BookingStep::ServiceSchedule => 1,
            BookingStep::PatientInformation => 2,
            BookingStep::Confirmation => 3,
        }
    }

    /// The step after this one, `None` on the last step
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The step before this one, `None` on the first step
    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn is_first(self) -> bool {
        self.previous().is_none()
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Static definition for this step
    pub fn definition(self) -> &'static StepDefinition {
        &STEP_DEFINITIONS[(self.number() - 1) as usize]
    }

    pub fn title(self) -> &'static str {
        self.definition().title
    }
}

/// What a step's component is responsible for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StepRole {
    /// Service/time selection UI
    Selection,
    /// Form collection UI
    FormCollection,
    /// Review & submit UI
    ReviewSubmit,
}

impl StepRole {
    pub fn label(self) -> &'static str {
        match self {
            StepRole::Selection => "Service/time selection",
            StepRole::FormCollection => "Form collection",
            StepRole::ReviewSubmit => "Review & submit",
        }
    }
}

/// One row of the step table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub step: BookingStep,
    pub title: &'static str,
    pub role: StepRole,
}

/// Step table, indexed by `number - 1`
pub static STEP_DEFINITIONS: [StepDefinition; TOTAL_STEPS as usize] = [
    StepDefinition {
        step: BookingStep::ServiceSchedule,
        title: "Select service & schedule",
        role: StepRole::Selection,
    },
    StepDefinition {
        step: BookingStep::PatientInformation,
        title: "Patient information",
        role: StepRole::FormCollection,
    },
    StepDefinition {
        step: BookingStep::Confirmation,
        title: "Confirmation",
        role: StepRole::ReviewSubmit,
    },
];

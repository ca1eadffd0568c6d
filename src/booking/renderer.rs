//! Maps validated steps to the component that renders them.

use serde::{Deserialize, Serialize};

use crate::booking::step::{BookingStep, StepRole};

/// The three step components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepComponent {
    ServiceSchedule,
    PatientInformation,
    Confirmation,
}

impl StepComponent {
    pub fn name(self) -> &'static str {
        match self {
            StepComponent::ServiceSchedule => "service_schedule",
            StepComponent::PatientInformation => "patient_information",
            StepComponent::Confirmation => "confirmation",
        }
    }

    pub fn role(self) -> StepRole {
        match self {
            StepComponent::ServiceSchedule => StepRole::Selection,
            StepComponent::PatientInformation => StepRole::FormCollection,
            StepComponent::Confirmation => StepRole::ReviewSubmit,
        }
    }
}

/// Step renderer
pub struct StepRenderer;

impl StepRenderer {
    /// Component for a validated step. Total over every step.
    pub fn render(step: BookingStep) -> StepComponent {
        match step {
            BookingStep::ServiceSchedule => StepComponent::ServiceSchedule,
            BookingStep::PatientInformation => StepComponent::PatientInformation,
            BookingStep::Confirmation => StepComponent::Confirmation,
        }
    }

    /// Component for a raw step number. Out-of-range numbers render nothing
    /// and are left for the resolver's redirect to correct.
    pub fn render_number(number: u32) -> Option<StepComponent> {
        let component = BookingStep::from_number(number).map(Self::render);
        if component.is_none() {
            tracing::warn!(number, "step renderer received an unresolved step");
        }
        component
    }
}

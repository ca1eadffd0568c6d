//! Booking wizard: step resolution, navigation, rendering and progress.

pub mod draft;
pub mod flow;
pub mod history;
pub mod location;
pub mod navigator;
pub mod progress;
pub mod renderer;
pub mod resolver;
pub mod step;

pub use draft::{BookingConfirmation, BookingDraft, DraftError, FieldError, PatientField, PatientForm};
pub use flow::{BookingFlow, RenderPass};
pub use history::MemoryHistory;
pub use location::{BookingPaths, BookingPathsError, Location};
pub use navigator::{
    Navigate, NavigationError, NavigationMode, NavigationRequest, StepAction, StepNavigator,
    Transition,
};
pub use progress::{MarkerState, Progress, ProgressMarker};
pub use renderer::{StepComponent, StepRenderer};
pub use resolver::{parse_step_token, Resolution, StepResolver};
pub use step::{BookingStep, StepDefinition, StepRole, TOTAL_STEPS};

//! Data Transfer Objects for the REST API.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::booking::{
    BookingConfirmation, BookingPaths, BookingStep, NavigationRequest, PatientForm, Progress,
    StepAction, StepRenderer, StepRole, Transition,
};
use crate::catalog::{Department, Doctor, Service};

// =============================================================================
// Health DTOs
// =============================================================================

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Booking flow DTOs
// =============================================================================

/// One step of the booking wizard
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StepResponse {
    pub number: u32,
    pub title: String,
    pub role: StepRole,
    /// Component rendered for this step
    pub component: String,
    pub path: String,
}

impl StepResponse {
    pub fn new(step: BookingStep, paths: &BookingPaths) -> Self {
        Self {
            number: step.number(),
            title: step.title().to_string(),
            role: step.definition().role,
            component: StepRenderer::render(step).name().to_string(),
            path: paths.step_path(step),
        }
    }
}

/// One marker of the progress trail
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgressMarkerResponse {
    pub number: u32,
    pub title: String,
    /// "done", "current" or "upcoming"
    pub state: String,
}

/// Progress trail for a step
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgressResponse {
    pub current: u32,
    pub total: u32,
    pub markers: Vec<ProgressMarkerResponse>,
}

impl From<&Progress> for ProgressResponse {
    fn from(progress: &Progress) -> Self {
        Self {
            current: progress.current,
            total: progress.total,
            markers: progress
                .markers
                .iter()
                .map(|m| ProgressMarkerResponse {
                    number: m.number,
                    title: m.title.to_string(),
                    state: match m.state {
                        crate::booking::MarkerState::Done => "done",
                        crate::booking::MarkerState::Current => "current",
                        crate::booking::MarkerState::Upcoming => "upcoming",
                    }
                    .to_string(),
                })
                .collect(),
        }
    }
}

/// A navigation the client should perform
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NavigationResponse {
    pub location: String,
    /// "push" or "replace"
    pub mode: String,
}

impl From<&NavigationRequest> for NavigationResponse {
    fn from(request: &NavigationRequest) -> Self {
        Self {
            location: request.location.as_str().to_string(),
            mode: match request.mode {
                crate::booking::NavigationMode::Push => "push",
                crate::booking::NavigationMode::Replace => "replace",
            }
            .to_string(),
        }
    }
}

/// Query for resolving a location
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolveQuery {
    /// Location to resolve, e.g. `/booking/2`
    pub path: String,
}

/// Resolution of a location against the booking flow
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolveResponse {
    pub location: String,
    /// Whether the location is inside the booking flow
    pub in_flow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<StepResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressResponse>,
    /// Corrective navigation for an invalid step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<NavigationResponse>,
}

/// Request a navigator transition from a step
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransitionRequest {
    pub current_step: u32,
    pub action: StepAction,
}

/// Outcome of a navigator transition
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransitionResponse {
    pub from_step: u32,
    /// "step", "exit" or "stay"
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_step: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationResponse>,
}

impl TransitionResponse {
    pub fn new(from: BookingStep, transition: Transition, paths: &BookingPaths) -> Self {
        let (outcome, to_step) = match transition {
            Transition::To(step) => ("step", Some(step.number())),
            Transition::Exit => ("exit", None),
            Transition::Stay => ("stay", None),
        };
        Self {
            from_step: from.number(),
            outcome: outcome.to_string(),
            to_step,
            navigation: transition
                .request(paths)
                .as_ref()
                .map(NavigationResponse::from),
        }
    }
}

/// A rendered wizard page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingPageResponse {
    pub step: StepResponse,
    pub progress: ProgressResponse,
}

impl BookingPageResponse {
    pub fn new(step: BookingStep, paths: &BookingPaths) -> Self {
        Self {
            step: StepResponse::new(step, paths),
            progress: ProgressResponse::from(&Progress::of(step)),
        }
    }
}

// =============================================================================
// Catalog DTOs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
}

impl From<&Department> for DepartmentResponse {
    fn from(d: &Department) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub department_id: String,
    /// Open slots as `YYYY-MM-DDTHH:MM`
    pub slots: Vec<String>,
}

impl From<&Doctor> for DoctorResponse {
    fn from(d: &Doctor) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            title: d.title.clone(),
            department_id: d.department_id.clone(),
            slots: d
                .slots
                .iter()
                .map(|s| s.format("%Y-%m-%dT%H:%M").to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub id: String,
    pub name: String,
    pub department_id: String,
    pub duration_minutes: u32,
    pub price: f64,
}

impl From<&Service> for ServiceResponse {
    fn from(s: &Service) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            department_id: s.department_id.clone(),
            duration_minutes: s.duration_minutes,
            price: s.price,
        }
    }
}

/// Filter doctors by service
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DoctorQuery {
    /// Only doctors who provide this service
    pub service: Option<String>,
}

// =============================================================================
// Booking DTOs
// =============================================================================

/// Patient details
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientRequest {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    #[serde(default)]
    pub notes: String,
}

impl From<PatientRequest> for PatientForm {
    fn from(p: PatientRequest) -> Self {
        Self {
            full_name: p.full_name,
            phone: p.phone,
            email: p.email,
            date_of_birth: p.date_of_birth,
            notes: p.notes,
        }
    }
}

/// Submit a completed booking
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub service_id: String,
    pub doctor_id: String,
    /// `YYYY-MM-DDTHH:MM`
    pub slot: String,
    pub patient: PatientRequest,
}

/// A confirmed booking
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub reference: String,
    pub short_reference: String,
    pub service_id: String,
    pub service_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub slot: String,
    pub duration_minutes: u32,
    pub price: f64,
    pub patient_name: String,
    pub created_at: String,
}

impl From<&BookingConfirmation> for BookingResponse {
    fn from(c: &BookingConfirmation) -> Self {
        Self {
            reference: c.reference.to_string(),
            short_reference: c.short_reference(),
            service_id: c.service_id.clone(),
            service_name: c.service_name.clone(),
            doctor_id: c.doctor_id.clone(),
            doctor_name: c.doctor_name.clone(),
            slot: c.slot.format("%Y-%m-%dT%H:%M").to_string(),
            duration_minutes: c.duration_minutes,
            price: c.price,
            patient_name: c.patient_name.clone(),
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

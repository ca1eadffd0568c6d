//! OpenAPI specification builder using utoipa.

use utoipa::OpenApi;

use crate::rest::dto::{
    BookingPageResponse, BookingResponse, CreateBookingRequest, DepartmentResponse,
    DoctorResponse, HealthResponse, NavigationResponse, PatientRequest, ProgressMarkerResponse,
    ProgressResponse, ResolveResponse, ServiceResponse, StepResponse, TransitionRequest,
    TransitionResponse,
};
use crate::rest::error::{ErrorResponse, FieldErrorResponse};

/// OpenAPI documentation for the careflow REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Careflow API",
        version = "0.1.0",
        description = "REST API for the careflow hospital booking wizard and clinic catalog.",
        license(name = "MIT")
    ),
    paths(
        // Health endpoints
        crate::rest::routes::health::health,
        // Booking flow endpoints
        crate::rest::routes::booking::steps,
        crate::rest::routes::booking::resolve,
        crate::rest::routes::booking::transition,
        crate::rest::routes::booking::entry_page,
        crate::rest::routes::booking::step_page,
        // Catalog endpoints
        crate::rest::routes::catalog::departments,
        crate::rest::routes::catalog::doctors,
        crate::rest::routes::catalog::doctor,
        crate::rest::routes::catalog::services,
        // Booking submission endpoints
        crate::rest::routes::bookings::list,
        crate::rest::routes::bookings::create,
    ),
    components(
        schemas(
            // Response types
            HealthResponse,
            StepResponse,
            ProgressResponse,
            ProgressMarkerResponse,
            NavigationResponse,
            ResolveResponse,
            TransitionResponse,
            BookingPageResponse,
            DepartmentResponse,
            DoctorResponse,
            ServiceResponse,
            BookingResponse,
            ErrorResponse,
            FieldErrorResponse,
            // Request types
            TransitionRequest,
            CreateBookingRequest,
            PatientRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Booking", description = "Booking wizard step resolution and navigation"),
        (name = "Catalog", description = "Departments, doctors and services"),
        (name = "Bookings", description = "Booking submission"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI specification as a JSON string
    pub fn json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }

    /// Generate the OpenAPI specification as a YAML string
    pub fn yaml() -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&Self::openapi())
    }
}

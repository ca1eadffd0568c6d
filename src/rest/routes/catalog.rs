//! Catalog endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::rest::dto::{DepartmentResponse, DoctorQuery, DoctorResponse, ServiceResponse};
use crate::rest::error::{ApiError, ErrorResponse};
use crate::rest::state::ApiState;

/// List all departments
#[utoipa::path(
    get,
    path = "/api/v1/catalog/departments",
    tag = "Catalog",
    responses(
        (status = 200, description = "List of departments", body = Vec<DepartmentResponse>)
    )
)]
pub async fn departments(State(state): State<ApiState>) -> Json<Vec<DepartmentResponse>> {
    Json(
        state
            .catalog
            .departments
            .iter()
            .map(DepartmentResponse::from)
            .collect(),
    )
}

/// List doctors, optionally only those providing a service
#[utoipa::path(
    get,
    path = "/api/v1/catalog/doctors",
    tag = "Catalog",
    params(DoctorQuery),
    responses(
        (status = 200, description = "List of doctors", body = Vec<DoctorResponse>),
        (status = 404, description = "Service not found", body = ErrorResponse)
    )
)]
pub async fn doctors(
    State(state): State<ApiState>,
    Query(query): Query<DoctorQuery>,
) -> Result<Json<Vec<DoctorResponse>>, ApiError> {
    let doctors = match query.service.as_deref() {
        Some(service_id) => {
            if state.catalog.service(service_id).is_none() {
                return Err(ApiError::NotFound(format!(
                    "Service '{}' not found",
                    service_id
                )));
            }
            state
                .catalog
                .doctors_for_service(service_id)
                .into_iter()
                .map(DoctorResponse::from)
                .collect()
        }
        None => state.catalog.doctors.iter().map(DoctorResponse::from).collect(),
    };
    Ok(Json(doctors))
}

/// Get a single doctor by id
#[utoipa::path(
    get,
    path = "/api/v1/catalog/doctors/{id}",
    tag = "Catalog",
    params(
        ("id" = String, Path, description = "Doctor id")
    ),
    responses(
        (status = 200, description = "Doctor details", body = DoctorResponse),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    )
)]
pub async fn doctor(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<DoctorResponse>, ApiError> {
    let doctor = state
        .catalog
        .doctor(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Doctor '{}' not found", id)))?;
    Ok(Json(DoctorResponse::from(doctor)))
}

/// List all services
#[utoipa::path(
    get,
    path = "/api/v1/catalog/services",
    tag = "Catalog",
    responses(
        (status = 200, description = "List of services", body = Vec<ServiceResponse>)
    )
)]
pub async fn services(State(state): State<ApiState>) -> Json<Vec<ServiceResponse>> {
    Json(
        state
            .catalog
            .services
            .iter()
            .map(ServiceResponse::from)
            .collect(),
    )
}

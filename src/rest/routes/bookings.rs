//! Booking submission endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::booking::BookingDraft;
use crate::catalog::parse_slot;
use crate::rest::dto::{BookingResponse, CreateBookingRequest};
use crate::rest::error::{ApiError, ErrorResponse};
use crate::rest::state::ApiState;

/// List bookings accepted since the server started
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "Accepted bookings", body = Vec<BookingResponse>)
    )
)]
pub async fn list(State(state): State<ApiState>) -> Json<Vec<BookingResponse>> {
    let bookings = state.bookings.read().await;
    Json(bookings.iter().map(BookingResponse::from).collect())
}

/// Submit a completed booking
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking confirmed", body = BookingResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<ApiState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let slot = parse_slot(&request.slot).ok_or_else(|| {
        ApiError::ValidationError(format!("Invalid slot '{}'", request.slot))
    })?;

    let mut draft = BookingDraft::new();
    draft.select_service(request.service_id);
    draft.select_doctor(request.doctor_id);
    draft.select_slot(slot);
    draft.patient = request.patient.into();

    let confirmation = draft.submit(&state.catalog)?;
    let response = BookingResponse::from(&confirmation);
    state.bookings.write().await.push(confirmation);

    Ok((StatusCode::CREATED, Json(response)))
}

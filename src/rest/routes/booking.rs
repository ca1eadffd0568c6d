//! Booking flow endpoints.
//!
//! Each request resolves its own location; nothing about the wizard's
//! position is kept between requests.

use axum::{
    extract::{OriginalUri, Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::booking::{BookingStep, Location, Progress, Resolution, StepNavigator};
use crate::rest::dto::{
    BookingPageResponse, NavigationResponse, ProgressResponse, ResolveQuery, ResolveResponse,
    StepResponse, TransitionRequest, TransitionResponse,
};
use crate::rest::error::{ApiError, ErrorResponse};
use crate::rest::state::ApiState;

/// List the wizard's steps in order
#[utoipa::path(
    get,
    path = "/api/v1/booking/steps",
    tag = "Booking",
    responses(
        (status = 200, description = "Steps in order", body = Vec<StepResponse>)
    )
)]
pub async fn steps(State(state): State<ApiState>) -> Json<Vec<StepResponse>> {
    let steps = BookingStep::all()
        .iter()
        .map(|step| StepResponse::new(*step, &state.paths))
        .collect();
    Json(steps)
}

/// Resolve a location against the booking flow
#[utoipa::path(
    get,
    path = "/api/v1/booking/resolve",
    tag = "Booking",
    params(ResolveQuery),
    responses(
        (status = 200, description = "Resolution of the location", body = ResolveResponse)
    )
)]
pub async fn resolve(
    State(state): State<ApiState>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolveResponse> {
    let location = Location::new(query.path);
    let mut response = ResolveResponse {
        location: location.as_str().to_string(),
        in_flow: state.paths.contains(&location),
        step: None,
        progress: None,
        redirect: None,
    };
    if !response.in_flow {
        return Json(response);
    }

    match state.resolver().resolve_location(&location) {
        Resolution::Step(step) => {
            response.step = Some(StepResponse::new(step, &state.paths));
            response.progress = Some(ProgressResponse::from(&Progress::of(step)));
        }
        Resolution::Redirect(request) => {
            response.redirect = Some(NavigationResponse::from(&request));
        }
    }
    Json(response)
}

/// Compute the navigator transition for an action on a step
#[utoipa::path(
    post,
    path = "/api/v1/booking/transition",
    tag = "Booking",
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Transition outcome", body = TransitionResponse),
        (status = 400, description = "Unknown step", body = ErrorResponse)
    )
)]
pub async fn transition(
    State(state): State<ApiState>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let step = BookingStep::from_number(request.current_step).ok_or_else(|| {
        ApiError::BadRequest(format!("Unknown booking step {}", request.current_step))
    })?;

    let transition = StepNavigator::new(step).apply(request.action);
    Ok(Json(TransitionResponse::new(step, transition, &state.paths)))
}

/// Entry page of the wizard, rendering the first step
#[utoipa::path(
    get,
    path = "/booking",
    tag = "Booking",
    responses(
        (status = 200, description = "First step", body = BookingPageResponse)
    )
)]
pub async fn entry_page(State(state): State<ApiState>) -> Json<BookingPageResponse> {
    Json(BookingPageResponse::new(BookingStep::CANONICAL, &state.paths))
}

/// A step page. The request path goes through the same resolver as every
/// other host, so `/booking/2/` is step 2 and `/booking/` is the entry.
/// Invalid steps redirect to the first step.
#[utoipa::path(
    get,
    path = "/booking/{step}",
    tag = "Booking",
    params(
        ("step" = String, Path, description = "Step number (1-3)")
    ),
    responses(
        (status = 200, description = "Step page", body = BookingPageResponse),
        (status = 307, description = "Invalid step, redirected to the first step")
    )
)]
pub async fn step_page(
    State(state): State<ApiState>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    match state.resolver().resolve_location(&Location::new(uri.path())) {
        Resolution::Step(step) => Json(BookingPageResponse::new(step, &state.paths)).into_response(),
        Resolution::Redirect(request) => {
            Redirect::temporary(request.location.as_str()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::StepAction;
    use crate::catalog::tests::sample_catalog;
    use crate::config::Config;
    use axum::http::{header, StatusCode, Uri};

    fn state() -> ApiState {
        ApiState::new(Config::default(), sample_catalog())
    }

    #[tokio::test]
    async fn test_steps_in_order() {
        let resp = steps(State(state())).await;
        let numbers: Vec<_> = resp.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(resp[0].path, "/booking/1");
    }

    #[tokio::test]
    async fn test_resolve_valid_step() {
        let resp = resolve(
            State(state()),
            Query(ResolveQuery {
                path: "/booking/3".to_string(),
            }),
        )
        .await;
        assert!(resp.in_flow);
        assert_eq!(resp.step.as_ref().unwrap().number, 3);
        assert_eq!(resp.progress.as_ref().unwrap().current, 3);
        assert!(resp.redirect.is_none());
    }

    #[tokio::test]
    async fn test_resolve_invalid_step_redirects() {
        for path in ["/booking/0", "/booking/4", "/booking/abc", "/booking/2.5", "/booking/-1"] {
            let resp = resolve(
                State(state()),
                Query(ResolveQuery {
                    path: path.to_string(),
                }),
            )
            .await;
            let redirect = resp.redirect.as_ref().expect(path);
            assert_eq!(redirect.location, "/booking/1");
            assert_eq!(redirect.mode, "replace");
            assert!(resp.step.is_none());
        }
    }

    #[tokio::test]
    async fn test_resolve_outside_flow() {
        let resp = resolve(
            State(state()),
            Query(ResolveQuery {
                path: "/doctors".to_string(),
            }),
        )
        .await;
        assert!(!resp.in_flow);
        assert!(resp.step.is_none());
        assert!(resp.redirect.is_none());
    }

    #[tokio::test]
    async fn test_transition_unknown_step() {
        let result = transition(
            State(state()),
            Json(TransitionRequest {
                current_step: 9,
                action: StepAction::Advance,
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_transition_retreat_from_first_step() {
        let resp = transition(
            State(state()),
            Json(TransitionRequest {
                current_step: 1,
                action: StepAction::Retreat,
            }),
        )
        .await
        .unwrap();
        assert_eq!(resp.outcome, "exit");
        assert_eq!(resp.navigation.as_ref().unwrap().location, "/");
    }

    async fn page(path: &'static str) -> Response {
        step_page(State(state()), OriginalUri(Uri::from_static(path))).await
    }

    #[tokio::test]
    async fn test_step_page_redirect() {
        let response = page("/booking/abc").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/booking/1");
    }

    #[tokio::test]
    async fn test_step_page_valid() {
        let response = page("/booking/2").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_step_page_ignores_trailing_slash_and_query() {
        assert_eq!(page("/booking/2/").await.status(), StatusCode::OK);
        assert_eq!(page("/booking/3?ref=mail").await.status(), StatusCode::OK);
        assert_eq!(page("/booking/").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_step_page_rejects_extra_segments() {
        let response = page("/booking/2/extra").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }
}

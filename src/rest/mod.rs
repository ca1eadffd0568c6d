//! REST API for the booking flow and clinic catalog.
//!
//! Every request resolves its location independently; the server keeps no
//! per-client wizard state.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::ApiState;

/// Build the API router with all routes
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let entry = state.paths.entry().to_string();
    let step_route = if entry == "/" {
        "/*step".to_string()
    } else {
        format!("{}/*step", entry)
    };

    let mut router = Router::new()
        // Health endpoints
        .route("/api/v1/health", get(routes::health::health))
        // Booking flow endpoints
        .route("/api/v1/booking/steps", get(routes::booking::steps))
        .route("/api/v1/booking/resolve", get(routes::booking::resolve))
        .route(
            "/api/v1/booking/transition",
            post(routes::booking::transition),
        )
        // Catalog endpoints
        .route(
            "/api/v1/catalog/departments",
            get(routes::catalog::departments),
        )
        .route("/api/v1/catalog/doctors", get(routes::catalog::doctors))
        .route("/api/v1/catalog/doctors/:id", get(routes::catalog::doctor))
        .route("/api/v1/catalog/services", get(routes::catalog::services))
        // Booking submission endpoints
        .route(
            "/api/v1/bookings",
            get(routes::bookings::list).post(routes::bookings::create),
        )
        // Wizard pages
        .route(&entry, get(routes::booking::entry_page))
        .route(&step_route, get(routes::booking::step_page));

    // Wildcards never match an empty segment, so the entry with a trailing
    // slash needs its own route
    if entry != "/" {
        router = router.route(&format!("{}/", entry), get(routes::booking::step_page));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the REST API server and run until Ctrl-C
pub async fn serve(state: ApiState, host: &str, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    tracing::info!("REST API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("REST API shutting down");
        })
        .await?;

    Ok(())
}

//! Axum router construction.
//!
//! [`build`] assembles the complete application router:
//! - the health route,
//! - the `/api/ai` routes, the authenticated ones behind
//!   [`require_auth`](crate::auth::require_auth),
//! - request tracing and CORS layers.

mod ai;
mod health;

use std::sync::Arc;

use axum::Router;
use axum::extract::FromRequest;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// A JSON body whose rejection uses the API failure envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/ai", ai::router(Arc::clone(&state)))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use color_advisor_core::Advisor;

use crate::auth::TokenVerifier;
use crate::store::SeasonStore;

/// State shared across all HTTP handlers.
///
/// Every client is constructed once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    /// The chat orchestrator.
    pub advisor: Advisor,
    /// Where analyzed seasons are recorded.
    pub store: Arc<dyn SeasonStore>,
    /// Verifies bearer tokens on authenticated routes.
    pub verifier: TokenVerifier,
}

//! The success envelope shared by all API routes.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A successful API response.
///
/// Serializes as `{"success": true, "message": ...}` with the fields of
/// `data` flattened next to them.
#[derive(Clone, Debug, Serialize)]
pub struct ApiSuccess<T> {
    success: bool,
    message: &'static str,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    /// Wraps `data` with a human-readable message.
    #[inline]
    pub fn new(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

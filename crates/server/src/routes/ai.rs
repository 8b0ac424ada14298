//! Color advisor routes.
//!
//! - `POST /chat` and `POST /chat-guest` send one message with the visible
//!   history to the advisor.
//! - `POST /analyze-color` extracts the analysis from the history and
//!   records the season on the account.

use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::routing::post;
use axum::{Router, middleware};
use color_advisor_core::analysis::extract_analysis_from_value;
use color_advisor_core::conversation::{coerce_text, history_from_value};
use color_advisor_core::{
    AnalysisError, AnalysisResult, ChatError, ChatReply,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiJson;
use crate::auth::{Claims, require_auth};
use crate::error::ApiError;
use crate::response::ApiSuccess;
use crate::state::AppState;
use crate::store::persist_analysis;

/// Register the advisor routes.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/analyze-color", post(analyze_color))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
        .route("/chat-guest", post(chat_guest))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    #[serde(default)]
    message: Value,
    #[serde(default)]
    conversation_history: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    #[serde(default)]
    conversation_history: Value,
    #[serde(default)]
    account_id: Value,
}

#[derive(Debug, Serialize)]
struct AnalyzeData {
    result: AnalysisResult,
}

/// `POST /api/ai/chat`
async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> Result<ApiSuccess<ChatReply>, ApiError> {
    debug!(account_id = claims.id, "authenticated chat message received");
    let reply = send_message(&state, req).await?;
    Ok(ApiSuccess::new("Chat response generated", reply))
}

/// `POST /api/ai/chat-guest`
async fn chat_guest(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ChatRequest>,
) -> Result<ApiSuccess<ChatReply>, ApiError> {
    debug!("guest chat message received");
    let reply = send_message(&state, req).await?;
    Ok(ApiSuccess::new("Guest chat response generated", reply))
}

async fn send_message(
    state: &AppState,
    req: ChatRequest,
) -> Result<ChatReply, ApiError> {
    let message = coerce_text(&req.message).unwrap_or_default();
    if message.is_empty() {
        return Err(ChatError::MessageRequired.into());
    }
    let history = history_from_value(&req.conversation_history)
        .map_err(|err| ApiError::InvalidInput(err.to_string()))?;
    let reply = state.advisor.chat(&message, &history).await?;
    if reply.should_analyze {
        info!("advisor signalled that the analysis is ready");
    }
    Ok(reply)
}

/// `POST /api/ai/analyze-color`
async fn analyze_color(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ApiJson(req): ApiJson<AnalyzeRequest>,
) -> Result<ApiSuccess<AnalyzeData>, ApiError> {
    let account_id = account_id(&req.account_id, &claims)?;

    let history = req.conversation_history;
    let result = tokio::task::spawn_blocking(move || {
        extract_analysis_from_value(&history)
    })
    .await
    .map_err(|err| AnalysisError::Failed(err.to_string()))??;

    persist_analysis(state.store.as_ref(), account_id, &result).await;
    Ok(ApiSuccess::new(
        "Color analysis completed",
        AnalyzeData { result },
    ))
}

/// Resolves the account to record the analysis on. Falls back to the
/// token's account when the body names none.
fn account_id(value: &Value, claims: &Claims) -> Result<i64, ApiError> {
    let invalid = || ApiError::InvalidInput("Account ID must be an integer".to_owned());
    match value {
        Value::Null => Ok(claims.id),
        Value::Number(number) => number.as_i64().ok_or_else(invalid),
        Value::String(text) => text.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn claims() -> Claims {
        Claims {
            id: 42,
            username: "anna".to_owned(),
            email: "anna@example.com".to_owned(),
            exp: 0,
        }
    }

    #[test]
    fn test_account_id() {
        assert_eq!(account_id(&Value::Null, &claims()).unwrap(), 42);
        assert_eq!(account_id(&json!(7), &claims()).unwrap(), 7);
        assert_eq!(account_id(&json!("8"), &claims()).unwrap(), 8);
        assert!(account_id(&json!("eight"), &claims()).is_err());
        assert!(account_id(&json!(1.5), &claims()).is_err());
        assert!(account_id(&json!([1]), &claims()).is_err());
    }
}

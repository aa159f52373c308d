// HTTP request handlers
pub mod comments;
pub mod posts;
pub mod search;
pub mod threads;
pub mod votes;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::error;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Health check endpoint. Reports 503 when the store does not answer.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.forum.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

/// Trims `value` and rejects it when nothing is left.
fn required_text(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn deleted(entity: &str) -> Json<serde_json::Value> {
    Json(json!({ "message": format!("{entity} deleted") }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("title", "  hello \n").unwrap(), "hello");
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let err = required_text("content", " \t ").unwrap_err();
        assert_eq!(err.to_string(), "content must not be empty");
    }
}

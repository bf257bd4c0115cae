//! Write-notification validation invocation.
//!
//! Consumes one raw notification body: decode, parse, normalize, then
//! hand the event to the boundary validator. Blocked verdicts are a
//! success-class response; only a failed delete is a server error,
//! because the offending object is still in the bucket.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use bytes::Bytes;
use focusrelay_core::AppError;
use focusrelay_services::{normalize_event, BoundaryValidator, Verdict};

use crate::error::{log_app_error, HttpAppError};
use crate::state::AppState;

pub async fn validate_object(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, HttpAppError> {
    if body.is_empty() {
        return Err(AppError::EventParse("Empty event data received".to_string()).into());
    }
    let text = std::str::from_utf8(&body)
        .map_err(|_| AppError::EventParse("Failed to decode event data".to_string()))?;
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| AppError::EventParse(format!("Invalid JSON in event data: {}", e)))?;

    let event = normalize_event(&value)?;
    tracing::info!(
        namespace = %event.namespace,
        bucket = %event.bucket,
        object = %event.object_name,
        "Extracted event"
    );

    let secret = state
        .config
        .secret
        .as_deref()
        .ok_or_else(|| AppError::Config("Missing required config key 'secret'. Set SECRET.".to_string()))?;

    let validator = BoundaryValidator::new(state.storage.clone(), secret);
    let response = match validator.evaluate(&event).await {
        Ok(Verdict::Valid) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "File validated successfully",
                "status": "valid",
                "object_name": event.object_name,
                "namespace": event.namespace,
                "bucket": event.bucket,
            })),
        )
            .into_response(),
        Ok(Verdict::Deleted) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "File deleted - invalid secret prefix",
                "status": "deleted",
                "object_name": event.object_name,
                "namespace": event.namespace,
                "bucket": event.bucket,
            })),
        )
            .into_response(),
        Ok(Verdict::Blocked { reason }) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("File validation failed but cannot delete - {}", reason),
                "status": "validation_failed",
                "object_name": event.object_name,
                "namespace": event.namespace,
                "bucket": event.bucket,
            })),
        )
            .into_response(),
        Err(err) => {
            log_app_error(&err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": "File validation failed but deletion error occurred",
                    "status": "error",
                    "object_name": event.object_name,
                    "namespace": event.namespace,
                    "bucket": event.bucket,
                    "error": err.to_string(),
                })),
            )
                .into_response()
        }
    };
    Ok(response)
}

//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>` so every
//! `AppError` renders as a structured JSON envelope at the right status,
//! logged at the level the variant asks for. The host process never
//! terminates on an invocation error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use focusrelay_core::{AppError, LogLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    /// Always `"error"`; mirrors the `status` field of success envelopes.
    pub status: &'static str,
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: &'static str,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from
/// focusrelay-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::Internal(err.to_string()))
    }
}

pub fn log_app_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = code, "Error occurred");
        }
    }
}

/// Fixed client-facing message per error class; the variant detail goes
/// into the `error` field.
fn client_message(error: &AppError) -> &'static str {
    match error {
        AppError::EventParse(_) => "Error parsing event data",
        AppError::IncompleteEvent(_) => "Incomplete event data",
        _ => "Error processing file validation",
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_app_error(app_error);

        let body = Json(ErrorResponse {
            message: client_message(app_error).to_string(),
            status: "error",
            error: app_error.to_string(),
            code: app_error.error_code(),
        });

        (status, body).into_response()
    }
}

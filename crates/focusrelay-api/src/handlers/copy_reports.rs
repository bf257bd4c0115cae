//! Report copy invocation.
//!
//! Runs one replication pass for `today - lookback_days`. Both outcomes
//! carry the processed-file list: a failure response reports the files
//! that completed before the fatal error.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use chrono::Local;
use focusrelay_core::AppError;
use focusrelay_services::{RunFailure, RunOutcome};

use crate::error::log_app_error;
use crate::state::AppState;

pub async fn copy_reports(State(state): State<Arc<AppState>>) -> Response {
    match run_copy(&state).await {
        Ok(outcome) => {
            let message = format!("Processed {} file(s) successfully", outcome.results.len());
            tracing::info!(files_processed = outcome.results.len(), "Copy run succeeded");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": message,
                    "files_processed": outcome.results.len(),
                    "files": outcome.results,
                    "namespace": outcome.namespace,
                    "source_bucket": outcome.source_bucket,
                    "destination_bucket": outcome.destination_bucket,
                })),
            )
                .into_response()
        }
        Err(failure) => {
            log_app_error(&failure.error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": "Error processing reports",
                    "error": failure.error.to_string(),
                    "files_processed": failure.partial.len(),
                    "files": failure.partial,
                })),
            )
                .into_response()
        }
    }
}

async fn run_copy(state: &AppState) -> Result<RunOutcome, RunFailure> {
    // The reporting tenancy publishes each tenancy's reports into a bucket
    // named after the tenancy OCID; configuration wins, the credential
    // profile is the fallback.
    let source_bucket = state
        .config
        .tenancy_ocid
        .clone()
        .or_else(|| state.credentials.tenancy_ocid().map(String::from))
        .ok_or_else(|| RunFailure {
            error: AppError::Config(
                "Missing required config key 'tenancy_ocid'. Set TENANCY_OCID.".to_string(),
            ),
            partial: Vec::new(),
        })?;

    let report_date =
        Local::now().date_naive() - chrono::Duration::days(state.config.lookback_days);

    state
        .replicator
        .run(&state.config, &source_bucket, report_date)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{test_config, test_server, StubStorage};
    use focusrelay_core::naming;

    fn todays_report_prefix(lookback_days: i64) -> String {
        let date = Local::now().date_naive() - chrono::Duration::days(lookback_days);
        naming::report_prefix(date)
    }

    #[tokio::test]
    async fn test_copy_reports_success_envelope() {
        let mut storage = StubStorage::with_namespace("destns");
        let prefix = todays_report_prefix(3);
        storage.add_object(&format!("{}/report.csv", prefix), b"body");
        let (server, storage, _scratch) = test_server(storage, test_config());

        let response = server.post("/api/v0/reports/copy").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Processed 1 file(s) successfully");
        assert_eq!(body["files_processed"], 1);
        assert_eq!(body["namespace"], "destns");
        assert_eq!(body["source_bucket"], "ocid1.tenancy.oc1..aaaa");
        assert_eq!(body["destination_bucket"], "usage-reports");
        assert_eq!(
            body["files"][0]["source"],
            format!("{}/report.csv", prefix)
        );
        assert_eq!(body["files"][0]["cross_tenancy"], false);

        // The configured secret tags the destination name.
        let expected = naming::expected_prefix("s3cr3t");
        let puts = storage.recorded_puts();
        assert_eq!(puts.len(), 1);
        assert!(puts[0].2.starts_with(&expected));
    }

    #[tokio::test]
    async fn test_copy_reports_zero_matches_is_success() {
        let (server, storage, _scratch) =
            test_server(StubStorage::with_namespace("destns"), test_config());

        let response = server.post("/api/v0/reports/copy").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["files_processed"], 0);
        assert_eq!(body["files"], serde_json::json!([]));
        assert!(storage.recorded_puts().is_empty());
    }

    #[tokio::test]
    async fn test_copy_reports_listing_failure_envelope() {
        let mut storage = StubStorage::with_namespace("destns");
        storage.fail_listing = true;
        let (server, _storage, _scratch) = test_server(storage, test_config());

        let response = server.post("/api/v0/reports/copy").await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Error processing reports");
        assert_eq!(body["files_processed"], 0);
        assert!(body["error"].as_str().unwrap().contains("Listing failed"));
    }

    #[tokio::test]
    async fn test_copy_reports_without_tenancy_is_config_error() {
        let mut config = test_config();
        config.tenancy_ocid = None;
        let (server, _storage, _scratch) =
            test_server(StubStorage::with_namespace("destns"), config);

        let response = server.post("/api/v0/reports/copy").await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("tenancy_ocid"));
    }
}

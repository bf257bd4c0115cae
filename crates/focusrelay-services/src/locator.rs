//! Report locator.
//!
//! Computes the date-derived listing prefix and finds every matching report
//! object in the fixed source namespace/bucket. The match set is unbounded;
//! pagination is the storage backend's problem.

use chrono::NaiveDate;
use focusrelay_core::{naming, AppError, ReportObject};
use focusrelay_storage::ObjectStorage;
use std::sync::Arc;

/// Cap on the unfiltered diagnostic listing after an empty match.
const DIAGNOSTIC_LISTING_CAP: usize = 10;

pub struct ReportLocator {
    storage: Arc<dyn ObjectStorage>,
}

impl ReportLocator {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        ReportLocator { storage }
    }

    /// Locate all report objects generated on `report_date`.
    ///
    /// A listing failure is fatal for the run. An empty match set is not:
    /// it triggers one extra capped, unfiltered listing that is logged for
    /// diagnostics and whose own failure is swallowed.
    pub async fn locate(
        &self,
        source_namespace: &str,
        source_bucket: &str,
        report_date: NaiveDate,
    ) -> Result<Vec<ReportObject>, AppError> {
        let prefix = naming::report_prefix(report_date);
        tracing::info!(
            namespace = %source_namespace,
            bucket = %source_bucket,
            prefix = %prefix,
            "Looking for reports"
        );

        let objects = self
            .storage
            .list_objects(source_namespace, source_bucket, Some(&prefix))
            .await
            .map_err(AppError::from)?;

        tracing::info!(count = objects.len(), "Found objects matching the prefix");

        if objects.is_empty() {
            tracing::warn!(
                prefix = %prefix,
                bucket = %source_bucket,
                "No objects found with prefix"
            );
            self.log_available_objects(source_namespace, source_bucket)
                .await;
        }

        Ok(objects
            .into_iter()
            .map(|o| ReportObject {
                name: o.name,
                size: o.size,
                source_namespace: source_namespace.to_string(),
                source_bucket: source_bucket.to_string(),
            })
            .collect())
    }

    /// Diagnostic-only peek at what the bucket does contain. Never raises.
    async fn log_available_objects(&self, namespace: &str, bucket: &str) {
        match self
            .storage
            .list_objects_capped(namespace, bucket, DIAGNOSTIC_LISTING_CAP)
            .await
        {
            Ok(objects) if objects.is_empty() => {
                tracing::info!("No objects found in bucket at all");
            }
            Ok(objects) => {
                for object in objects {
                    tracing::info!(name = %object.name, "Available object in bucket");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error listing all objects");
            }
        }
    }
}

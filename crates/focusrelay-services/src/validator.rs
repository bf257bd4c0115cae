//! Tenancy-boundary validator.
//!
//! Every storage write notification lands here. Objects carrying the
//! expected secret prefix pass; anything else is deleted. Identifier
//! checks fail safe: if any identifier is blank after trimming, the
//! event is blocked without touching storage, because a delete issued
//! against a partial address could hit the wrong object.

use focusrelay_core::{naming, AppError, ValidationEvent};
use focusrelay_storage::ObjectStorage;
use std::sync::Arc;

/// Outcome of evaluating one write notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The object carries the expected prefix and stays.
    Valid,
    /// The object lacked the prefix and was removed.
    Deleted,
    /// The event could not be safely acted on; nothing was deleted.
    Blocked { reason: String },
}

pub struct BoundaryValidator {
    storage: Arc<dyn ObjectStorage>,
    expected_prefix: String,
}

impl BoundaryValidator {
    pub fn new(storage: Arc<dyn ObjectStorage>, secret: &str) -> Self {
        BoundaryValidator {
            storage,
            expected_prefix: naming::expected_prefix(secret),
        }
    }

    /// Evaluate one normalized event, deleting the object when it fails
    /// the prefix check. A failed delete is an error, not a verdict: the
    /// offending object is still in the bucket.
    pub async fn evaluate(&self, event: &ValidationEvent) -> Result<Verdict, AppError> {
        if event.object_name.starts_with(&self.expected_prefix) {
            tracing::info!(object = %event.object_name, "Object carries expected prefix");
            return Ok(Verdict::Valid);
        }

        let namespace = event.namespace.trim();
        let bucket = event.bucket.trim();
        let object_name = event.object_name.trim();

        let blank = if namespace.is_empty() {
            Some("namespace is empty")
        } else if bucket.is_empty() {
            Some("bucket is empty")
        } else if object_name.is_empty() {
            Some("object name is empty")
        } else {
            None
        };
        if let Some(reason) = blank {
            tracing::warn!(
                namespace = %namespace,
                bucket = %bucket,
                object = %object_name,
                reason = reason,
                "Blocking event with blank identifier; nothing deleted"
            );
            return Ok(Verdict::Blocked {
                reason: reason.to_string(),
            });
        }

        tracing::warn!(
            namespace = %namespace,
            bucket = %bucket,
            object = %object_name,
            "Object missing expected prefix, deleting"
        );
        self.storage
            .delete_object(namespace, bucket, object_name)
            .await
            .map_err(AppError::from)?;

        tracing::info!(object = %object_name, "Deleted out-of-boundary object");
        Ok(Verdict::Deleted)
    }
}

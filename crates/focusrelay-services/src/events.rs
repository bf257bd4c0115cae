//! Event normalizer for storage write notifications.
//!
//! The notification payload arrives in more than one shape depending on
//! how the event service was wired. Normalization is a pure function over
//! the parsed JSON with a fixed priority order; the first shape that
//! yields all three of (namespace, bucket, object name) non-empty wins.

use focusrelay_core::{AppError, ValidationEvent};
use serde_json::Value;

/// Normalize a parsed notification into a [`ValidationEvent`].
///
/// Shapes, in priority order:
/// 1. `data.resourceName` holding a composite `namespace/bucket/object`.
/// 2. `data.additionalDetails.{namespace,bucketName}` with
///    `data.resourceName` as the bare object name.
/// 3. Flat `{namespace, bucket, object}`.
///
/// When no shape yields a complete triple the event is incomplete and no
/// deletion may be attempted on its behalf.
pub fn normalize_event(value: &Value) -> Result<ValidationEvent, AppError> {
    from_composite_resource(value)
        .or_else(|| from_nested_details(value))
        .or_else(|| from_flat(value))
        .ok_or_else(|| {
            AppError::IncompleteEvent(
                "Event does not resolve to a complete (namespace, bucket, object) triple"
                    .to_string(),
            )
        })
}

fn non_empty(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Shape 1: `data.resourceName` = `namespace/bucket/object`, split on the
/// first two separators so object names may themselves contain `/`.
fn from_composite_resource(value: &Value) -> Option<ValidationEvent> {
    let resource = non_empty(value.get("data")?, "resourceName")?;
    let mut parts = resource.splitn(3, '/');
    let namespace = parts.next()?;
    let bucket = parts.next()?;
    let object_name = parts.next()?;
    if namespace.is_empty() || bucket.is_empty() || object_name.is_empty() {
        return None;
    }
    Some(ValidationEvent {
        namespace: namespace.to_string(),
        bucket: bucket.to_string(),
        object_name: object_name.to_string(),
    })
}

/// Shape 2: namespace and bucket under `data.additionalDetails`,
/// `data.resourceName` as the bare object name.
fn from_nested_details(value: &Value) -> Option<ValidationEvent> {
    let data = value.get("data")?;
    let details = data.get("additionalDetails")?;
    Some(ValidationEvent {
        namespace: non_empty(details, "namespace")?,
        bucket: non_empty(details, "bucketName")?,
        object_name: non_empty(data, "resourceName")?,
    })
}

/// Shape 3: flat `{namespace, bucket, object}`.
fn from_flat(value: &Value) -> Option<ValidationEvent> {
    Some(ValidationEvent {
        namespace: non_empty(value, "namespace")?,
        bucket: non_empty(value, "bucket")?,
        object_name: non_empty(value, "object")?,
    })
}

//! Domain models shared across focusrelay components.

use serde::Serialize;

/// A report object discovered by the locator. Transient: discovered per
/// run and discarded after download.
#[derive(Debug, Clone)]
pub struct ReportObject {
    pub name: String,
    pub size: u64,
    pub source_namespace: String,
    pub source_bucket: String,
}

/// A listed object name and size, as returned by the storage collaborator.
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    pub name: String,
    pub size: u64,
}

/// Where one replication run uploads. Chosen once per run from
/// configuration, never per object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTarget {
    /// Authenticated put against the destination namespace/bucket.
    Direct { namespace: String, bucket: String },
    /// Unauthenticated PUT against a scoped upload credential URL.
    ScopedCredential { url: String },
}

impl UploadTarget {
    pub fn is_cross_tenancy(&self) -> bool {
        matches!(self, UploadTarget::ScopedCredential { .. })
    }
}

/// Normalized form of an inbound storage write notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationEvent {
    pub namespace: String,
    pub bucket: String,
    pub object_name: String,
}

/// One successfully replicated object, accumulated in a per-invocation
/// list and returned on both the success and failure paths.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub source: String,
    pub destination: String,
    pub size: u64,
    pub cross_tenancy: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_result_serializes_with_snake_case_fields() {
        let result = ProcessingResult {
            source: "FOCUS Reports/2024/03/05/report.csv".to_string(),
            destination: "2024_03_05_report.csv".to_string(),
            size: 42,
            cross_tenancy: true,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            json.get("source").and_then(|v| v.as_str()),
            Some("FOCUS Reports/2024/03/05/report.csv")
        );
        assert_eq!(json.get("cross_tenancy").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(json.get("size").and_then(|v| v.as_u64()), Some(42));
    }

    #[test]
    fn test_upload_target_cross_tenancy_flag() {
        let direct = UploadTarget::Direct {
            namespace: "ns".to_string(),
            bucket: "reports".to_string(),
        };
        let scoped = UploadTarget::ScopedCredential {
            url: "https://example.com/p/abc/n/ns/b/reports/o".to_string(),
        };
        assert!(!direct.is_cross_tenancy());
        assert!(scoped.is_cross_tenancy());
    }
}

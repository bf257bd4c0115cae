//! Report replicator.
//!
//! One run: locate the day's report objects, then for each one download it
//! to scratch, compute its destination name, and upload it over the path
//! selected once for the whole run. The first failure aborts the remaining
//! objects; results accumulated so far travel with the error so partial
//! progress stays observable. Nothing is rolled back or retried.

use chrono::NaiveDate;
use focusrelay_core::{
    naming, AppError, ProcessingResult, RelayConfig, ReportObject, UploadTarget,
};
use focusrelay_storage::ObjectStorage;
use futures::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::locator::ReportLocator;

const UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";
const SCOPED_UPLOAD_TIMEOUT_SECS: u64 = 300;

/// Everything a successful run reports back.
#[derive(Debug)]
pub struct RunOutcome {
    pub results: Vec<ProcessingResult>,
    pub namespace: String,
    pub source_bucket: String,
    pub destination_bucket: String,
}

/// A failed run: the fatal error plus whatever completed before it.
#[derive(Debug)]
pub struct RunFailure {
    pub error: AppError,
    pub partial: Vec<ProcessingResult>,
}

pub struct Replicator {
    storage: Arc<dyn ObjectStorage>,
    locator: ReportLocator,
    http: reqwest::Client,
    scratch_dir: PathBuf,
}

impl Replicator {
    pub fn new(storage: Arc<dyn ObjectStorage>, scratch_dir: PathBuf) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(SCOPED_UPLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Replicator {
            locator: ReportLocator::new(storage.clone()),
            storage,
            http,
            scratch_dir,
        })
    }

    /// Run one replication pass for `report_date`.
    pub async fn run(
        &self,
        config: &RelayConfig,
        source_bucket: &str,
        report_date: NaiveDate,
    ) -> Result<RunOutcome, RunFailure> {
        let mut results = Vec::new();
        match self
            .run_inner(config, source_bucket, report_date, &mut results)
            .await
        {
            Ok(namespace) => Ok(RunOutcome {
                results,
                namespace,
                source_bucket: source_bucket.to_string(),
                destination_bucket: config.bucket_name.clone(),
            }),
            Err(error) => Err(RunFailure {
                error,
                partial: results,
            }),
        }
    }

    async fn run_inner(
        &self,
        config: &RelayConfig,
        source_bucket: &str,
        report_date: NaiveDate,
        results: &mut Vec<ProcessingResult>,
    ) -> Result<String, AppError> {
        let namespace = self.storage.get_namespace().await.map_err(AppError::from)?;
        tracing::info!(namespace = %namespace, "Retrieved destination namespace");

        // The upload path is a per-run decision, never a per-object one.
        let target = select_target(config, &namespace);
        if target.is_cross_tenancy() {
            tracing::info!("Cross-tenancy upload enabled via scoped credential");
        }

        let objects = self
            .locator
            .locate(&config.source_namespace, source_bucket, report_date)
            .await?;

        for object in &objects {
            tracing::info!(object = %object.name, "Processing object");

            let scratch_path = self.download_to_scratch(object).await?;
            let destination =
                naming::destination_name(report_date, &object.name, config.secret.as_deref());

            match &target {
                UploadTarget::ScopedCredential { url } => {
                    self.upload_scoped(url, &destination, &scratch_path).await?;
                }
                UploadTarget::Direct { namespace, bucket } => {
                    self.upload_direct(namespace, bucket, &destination, &scratch_path)
                        .await?;
                }
            }

            results.push(ProcessingResult {
                source: object.name.clone(),
                destination,
                size: object.size,
                cross_tenancy: target.is_cross_tenancy(),
            });
        }

        tracing::info!(files_processed = results.len(), "Replication run complete");
        Ok(namespace)
    }

    /// Stream one object body into the scratch directory, truncating any
    /// stale file of the same name. Chunks are written as they arrive.
    async fn download_to_scratch(&self, object: &ReportObject) -> Result<PathBuf, AppError> {
        let filename = naming::original_filename(&object.name);
        let path = self.scratch_dir.join(filename);
        tracing::info!(path = %path.display(), "Downloading to scratch");

        let mut stream = self
            .storage
            .get_object(&object.source_namespace, &object.source_bucket, &object.name)
            .await
            .map_err(AppError::from)?;

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| AppError::Download(format!("Failed to create scratch file: {}", e)))?;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(AppError::from)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::Download(format!("Failed to write scratch file: {}", e)))?;
        }
        file.flush()
            .await
            .map_err(|e| AppError::Download(format!("Failed to flush scratch file: {}", e)))?;

        tracing::info!(
            filename = %filename,
            size_bytes = object.size,
            "Downloaded object"
        );
        Ok(path)
    }

    /// Unauthenticated PUT against the scoped upload credential. The URL
    /// itself is the authentication; a non-2xx status is fatal for the run.
    async fn upload_scoped(
        &self,
        scoped_url: &str,
        destination: &str,
        scratch_path: &Path,
    ) -> Result<(), AppError> {
        let data = tokio::fs::read(scratch_path)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to read scratch file: {}", e)))?;
        let url = resolve_upload_url(scoped_url, destination);

        tracing::info!(
            destination = %destination,
            size_bytes = data.len(),
            "Uploading via scoped credential"
        );

        let response = self
            .http
            .put(&url)
            .header(CONTENT_TYPE, UPLOAD_CONTENT_TYPE)
            .header(CONTENT_LENGTH, data.len())
            .body(data)
            .send()
            .await
            .map_err(|e| AppError::Upload(format!("Scoped upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upload(format!(
                "Scoped upload returned status {}",
                response.status()
            )));
        }

        tracing::info!(destination = %destination, "Successfully uploaded via scoped credential");
        Ok(())
    }

    async fn upload_direct(
        &self,
        namespace: &str,
        bucket: &str,
        destination: &str,
        scratch_path: &Path,
    ) -> Result<(), AppError> {
        let data = tokio::fs::read(scratch_path)
            .await
            .map_err(|e| AppError::Upload(format!("Failed to read scratch file: {}", e)))?;

        tracing::info!(
            namespace = %namespace,
            bucket = %bucket,
            destination = %destination,
            "Uploading to destination bucket"
        );

        self.storage
            .put_object(namespace, bucket, destination, data, UPLOAD_CONTENT_TYPE)
            .await
            .map_err(AppError::from)?;

        tracing::info!(destination = %destination, "Successfully uploaded");
        Ok(())
    }
}

/// Pick the upload path for a run: the scoped credential iff both the
/// scoped URL and the secret are configured, direct otherwise.
pub fn select_target(config: &RelayConfig, namespace: &str) -> UploadTarget {
    match (&config.scoped_upload_url, &config.secret) {
        (Some(url), Some(_)) => UploadTarget::ScopedCredential { url: url.clone() },
        _ => UploadTarget::Direct {
            namespace: namespace.to_string(),
            bucket: config.bucket_name.clone(),
        },
    }
}

/// Resolve the final PUT URL for one destination object.
///
/// The scoped credential is assumed to be created at the bucket root: after
/// stripping trailing slashes, a URL ending in `/o` gets `/{destination}`
/// appended; a URL already ending in `/{destination}` is object-scoped and
/// used unchanged; anything else is treated as bucket-root and gets
/// `/{destination}` appended.
pub fn resolve_upload_url(scoped_url: &str, destination: &str) -> String {
    let base = scoped_url.trim_end_matches('/');
    if base.ends_with("/o") {
        format!("{}/{}", base, destination)
    } else if base.ends_with(&format!("/{}", destination)) {
        base.to_string()
    } else {
        format!("{}/{}", base, destination)
    }
}

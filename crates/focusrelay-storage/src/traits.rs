//! Storage abstraction trait
//!
//! This module defines the `ObjectStorage` trait the replicator and the
//! boundary validator are written against. Addressing is always the full
//! (namespace, bucket, object) triple because one invocation touches
//! buckets in more than one namespace.

use async_trait::async_trait;
use bytes::Bytes;
use focusrelay_core::ObjectSummary;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Listing failed: {0}")]
    ListFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for focusrelay_core::AppError {
    fn from(err: StorageError) -> Self {
        use focusrelay_core::AppError;
        match err {
            StorageError::ListFailed(msg) => AppError::Listing(msg),
            StorageError::DownloadFailed(msg) => AppError::Download(msg),
            StorageError::NotFound(msg) => AppError::Download(format!("Object not found: {}", msg)),
            StorageError::UploadFailed(msg) => AppError::Upload(msg),
            StorageError::DeleteFailed(msg) => AppError::Delete(msg),
            StorageError::ConfigError(msg) => AppError::Config(msg),
        }
    }
}

/// Stream of body chunks for one object download.
pub type ByteStream = Pin<Box<dyn Stream<Item = StorageResult<Bytes>> + Send>>;

/// Object-storage collaborator contract.
///
/// Backends must paginate `list_objects` internally: callers always get the
/// complete match set, however large.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// List every object under `prefix` (all objects when `None`).
    async fn list_objects(
        &self,
        namespace: &str,
        bucket: &str,
        prefix: Option<&str>,
    ) -> StorageResult<Vec<ObjectSummary>>;

    /// List at most `cap` object names, unfiltered. Diagnostic use only.
    async fn list_objects_capped(
        &self,
        namespace: &str,
        bucket: &str,
        cap: usize,
    ) -> StorageResult<Vec<ObjectSummary>>;

    /// Download an object as a stream of bounded chunks.
    async fn get_object(
        &self,
        namespace: &str,
        bucket: &str,
        name: &str,
    ) -> StorageResult<ByteStream>;

    /// Upload a complete object body.
    async fn put_object(
        &self,
        namespace: &str,
        bucket: &str,
        name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Delete an object.
    async fn delete_object(&self, namespace: &str, bucket: &str, name: &str) -> StorageResult<()>;

    /// The destination tenancy's namespace.
    async fn get_namespace(&self) -> StorageResult<String>;
}

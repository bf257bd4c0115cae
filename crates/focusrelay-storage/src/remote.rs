use crate::credentials::CredentialSource;
use crate::traits::{ByteStream, ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use focusrelay_core::ObjectSummary;
use futures::StreamExt;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};
use std::sync::Arc;

/// Remote object-storage implementation.
///
/// Builds an S3-compatible store per (namespace, bucket) against the
/// tenancy's compatibility endpoint, with credentials applied by the
/// selected [`CredentialSource`].
#[derive(Clone)]
pub struct RemoteStorage {
    credentials: Arc<dyn CredentialSource>,
    region: Option<String>,
    endpoint: Option<String>, // Custom endpoint overriding the per-namespace default
    namespace: Option<String>,
}

impl RemoteStorage {
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        region: Option<String>,
        endpoint: Option<String>,
        namespace: Option<String>,
    ) -> StorageResult<Self> {
        if region.is_none() && endpoint.is_none() {
            return Err(StorageError::ConfigError(
                "Either a region or an explicit endpoint is required".to_string(),
            ));
        }
        Ok(RemoteStorage {
            credentials,
            region,
            endpoint,
            namespace,
        })
    }

    /// Endpoint for a namespace: the explicit override when configured,
    /// otherwise the tenancy compatibility endpoint for the region.
    fn endpoint_for(&self, namespace: &str) -> StorageResult<String> {
        if let Some(ref endpoint) = self.endpoint {
            return Ok(endpoint.trim_end_matches('/').to_string());
        }
        let region = self.region.as_deref().ok_or_else(|| {
            StorageError::ConfigError("No region configured for object storage".to_string())
        })?;
        Ok(format!(
            "https://{}.compat.objectstorage.{}.oraclecloud.com",
            namespace, region
        ))
    }

    /// Build a store scoped to one (namespace, bucket).
    fn store_for(&self, namespace: &str, bucket: &str) -> StorageResult<AmazonS3> {
        let endpoint = self.endpoint_for(namespace)?;
        let allow_http = endpoint.starts_with("http://");

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket.to_string())
            .with_endpoint(endpoint)
            .with_allow_http(allow_http);
        if let Some(ref region) = self.region {
            builder = builder.with_region(region.clone());
        }
        builder = self.credentials.configure(builder);

        builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }
}

#[async_trait]
impl ObjectStorage for RemoteStorage {
    async fn list_objects(
        &self,
        namespace: &str,
        bucket: &str,
        prefix: Option<&str>,
    ) -> StorageResult<Vec<ObjectSummary>> {
        let store = self.store_for(namespace, bucket)?;
        let prefix_path = prefix.map(Path::from);
        let start = std::time::Instant::now();

        let mut stream = object_store::ObjectStore::list(&store, prefix_path.as_ref());
        let mut objects = Vec::new();
        while let Some(meta) = stream.next().await {
            let meta = meta.map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    prefix = ?prefix,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Listing failed"
                );
                StorageError::ListFailed(e.to_string())
            })?;
            objects.push(ObjectSummary {
                name: meta.location.to_string(),
                size: meta.size,
            });
        }

        tracing::info!(
            bucket = %bucket,
            prefix = ?prefix,
            count = objects.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Listing complete"
        );

        Ok(objects)
    }

    async fn list_objects_capped(
        &self,
        namespace: &str,
        bucket: &str,
        cap: usize,
    ) -> StorageResult<Vec<ObjectSummary>> {
        let store = self.store_for(namespace, bucket)?;

        let mut stream = object_store::ObjectStore::list(&store, None).take(cap);
        let mut objects = Vec::new();
        while let Some(meta) = stream.next().await {
            let meta = meta.map_err(|e| StorageError::ListFailed(e.to_string()))?;
            objects.push(ObjectSummary {
                name: meta.location.to_string(),
                size: meta.size,
            });
        }
        Ok(objects)
    }

    async fn get_object(
        &self,
        namespace: &str,
        bucket: &str,
        name: &str,
    ) -> StorageResult<ByteStream> {
        let store = self.store_for(namespace, bucket)?;
        let location = Path::from(name.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(name.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %bucket,
                    key = %name,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bucket = bucket.to_string();
        let key = name.to_string();

        let stream = result.into_stream().map(move |res: ObjectResult<Bytes>| {
            res.map_err(|e| {
                tracing::error!(bucket = %bucket, key = %key, error = %e, "Download stream error");
                StorageError::DownloadFailed(e.to_string())
            })
        });

        Ok(Box::pin(stream))
    }

    async fn put_object(
        &self,
        namespace: &str,
        bucket: &str,
        name: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<()> {
        let store = self.store_for(namespace, bucket)?;
        let size = data.len() as u64;
        let location = Path::from(name.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = store.put(&location, PutPayload::from(Bytes::from(data))).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %name,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload successful"
        );

        Ok(())
    }

    async fn delete_object(&self, namespace: &str, bucket: &str, name: &str) -> StorageResult<()> {
        let store = self.store_for(namespace, bucket)?;
        let location = Path::from(name.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = store.delete(&location).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %name,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Delete failed"
            );
            StorageError::DeleteFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %name,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Delete successful"
        );

        Ok(())
    }

    async fn get_namespace(&self) -> StorageResult<String> {
        self.namespace
            .clone()
            .or_else(|| self.credentials.namespace().map(String::from))
            .ok_or_else(|| {
                StorageError::ConfigError(
                    "Destination namespace is not configured (set STORAGE_NAMESPACE or add \
                     'namespace' to the credentials file)"
                        .to_string(),
                )
            })
    }
}

//! Shared test double for the storage collaborator.

use async_trait::async_trait;
use bytes::Bytes;
use focusrelay_core::ObjectSummary;
use focusrelay_storage::{ByteStream, ObjectStorage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every call and can inject failures per operation.
#[derive(Default)]
pub struct MockStorage {
    pub namespace: String,
    pub objects: Vec<ObjectSummary>,
    pub bodies: HashMap<String, Vec<u8>>,
    pub fail_listing: bool,
    pub fail_download_of: Option<String>,
    pub fail_upload_of: Option<String>,
    pub fail_delete: bool,
    pub puts: Mutex<Vec<(String, String, String, usize)>>,
    pub deletes: Mutex<Vec<(String, String, String)>>,
    pub capped_listings: Mutex<Vec<usize>>,
}

impl MockStorage {
    pub fn with_namespace(namespace: &str) -> Self {
        MockStorage {
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    pub fn add_object(&mut self, name: &str, body: &[u8]) {
        self.objects.push(ObjectSummary {
            name: name.to_string(),
            size: body.len() as u64,
        });
        self.bodies.insert(name.to_string(), body.to_vec());
    }

    pub fn recorded_puts(&self) -> Vec<(String, String, String, usize)> {
        self.puts.lock().unwrap().clone()
    }

    pub fn recorded_deletes(&self) -> Vec<(String, String, String)> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn list_objects(
        &self,
        _namespace: &str,
        _bucket: &str,
        prefix: Option<&str>,
    ) -> StorageResult<Vec<ObjectSummary>> {
        if self.fail_listing {
            return Err(StorageError::ListFailed("injected listing failure".into()));
        }
        Ok(self
            .objects
            .iter()
            .filter(|o| prefix.map_or(true, |p| o.name.starts_with(p)))
            .cloned()
            .collect())
    }

    async fn list_objects_capped(
        &self,
        _namespace: &str,
        _bucket: &str,
        cap: usize,
    ) -> StorageResult<Vec<ObjectSummary>> {
        self.capped_listings.lock().unwrap().push(cap);
        Ok(self.objects.iter().take(cap).cloned().collect())
    }

    async fn get_object(
        &self,
        _namespace: &str,
        _bucket: &str,
        name: &str,
    ) -> StorageResult<ByteStream> {
        if self.fail_download_of.as_deref() == Some(name) {
            return Err(StorageError::DownloadFailed(
                "injected download failure".into(),
            ));
        }
        let body = self
            .bodies
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        let chunks: Vec<StorageResult<Bytes>> = body
            .chunks(4)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    async fn put_object(
        &self,
        namespace: &str,
        bucket: &str,
        name: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<()> {
        if self.fail_upload_of.as_deref() == Some(name) {
            return Err(StorageError::UploadFailed("injected upload failure".into()));
        }
        self.puts.lock().unwrap().push((
            namespace.to_string(),
            bucket.to_string(),
            name.to_string(),
            data.len(),
        ));
        Ok(())
    }

    async fn delete_object(&self, namespace: &str, bucket: &str, name: &str) -> StorageResult<()> {
        if self.fail_delete {
            return Err(StorageError::DeleteFailed("injected delete failure".into()));
        }
        self.deletes.lock().unwrap().push((
            namespace.to_string(),
            bucket.to_string(),
            name.to_string(),
        ));
        Ok(())
    }

    async fn get_namespace(&self) -> StorageResult<String> {
        if self.namespace.is_empty() {
            return Err(StorageError::ConfigError("no namespace configured".into()));
        }
        Ok(self.namespace.clone())
    }
}

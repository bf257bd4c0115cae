//! Endpoint-test fixtures: an in-memory storage double, a static
//! credential source, and a `TestServer` wired through the real router.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use focusrelay_core::{ObjectSummary, RelayConfig};
use focusrelay_services::Replicator;
use focusrelay_storage::{
    ByteStream, CredentialSource, ObjectStorage, StorageError, StorageResult,
};
use object_store::aws::AmazonS3Builder;

use crate::routes::setup_routes;
use crate::state::AppState;

#[derive(Default)]
pub struct StubStorage {
    pub namespace: String,
    pub objects: Vec<ObjectSummary>,
    pub bodies: HashMap<String, Vec<u8>>,
    pub fail_listing: bool,
    pub fail_delete: bool,
    pub puts: Mutex<Vec<(String, String, String, usize)>>,
    pub deletes: Mutex<Vec<(String, String, String)>>,
}

impl StubStorage {
    pub fn with_namespace(namespace: &str) -> Self {
        StubStorage {
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
impl ObjectStorage for StubStorage {
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
        Ok(self.objects.iter().take(cap).cloned().collect())
    }

    async fn get_object(
        &self,
        _namespace: &str,
        _bucket: &str,
        name: &str,
    ) -> StorageResult<ByteStream> {
        let body = self
            .bodies
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        Ok(Box::pin(futures::stream::once(async move {
            Ok(Bytes::from(body))
        })))
    }

    async fn put_object(
        &self,
        namespace: &str,
        bucket: &str,
        name: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<()> {
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

pub struct StaticCredentials;

impl CredentialSource for StaticCredentials {
    fn configure(&self, builder: AmazonS3Builder) -> AmazonS3Builder {
        builder
    }

    fn tenancy_ocid(&self) -> Option<&str> {
        None
    }

    fn namespace(&self) -> Option<&str> {
        None
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

pub fn test_config() -> RelayConfig {
    RelayConfig {
        server_port: 8080,
        environment: "test".to_string(),
        tenancy_ocid: Some("ocid1.tenancy.oc1..aaaa".to_string()),
        bucket_name: "usage-reports".to_string(),
        secret: Some("s3cr3t".to_string()),
        scoped_upload_url: None,
        lookback_days: 3,
        source_namespace: "bling".to_string(),
        storage_namespace: Some("destns".to_string()),
        storage_region: Some("eu-frankfurt-1".to_string()),
        storage_endpoint: None,
        credentials_file: PathBuf::from("/nonexistent-config"),
        // Replaced with a fresh tempdir by `test_server`.
        scratch_dir: std::env::temp_dir(),
    }
}

/// Build a `TestServer` over the real router. The returned `TempDir`
/// guard keeps the scratch directory alive for the test's duration.
pub fn test_server(
    storage: StubStorage,
    config: RelayConfig,
) -> (TestServer, Arc<StubStorage>, tempfile::TempDir) {
    let scratch = tempfile::tempdir().unwrap();
    let storage = Arc::new(storage);
    let config = RelayConfig {
        scratch_dir: scratch.path().to_path_buf(),
        ..config
    };
    let replicator = Replicator::new(storage.clone(), config.scratch_dir.clone()).unwrap();
    let state = Arc::new(AppState {
        config,
        storage: storage.clone(),
        credentials: Arc::new(StaticCredentials),
        replicator,
    });
    let server = TestServer::new(setup_routes(state)).unwrap();
    (server, storage, scratch)
}

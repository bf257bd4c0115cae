use crate::credentials::{select_credentials, CredentialSource};
use crate::remote::RemoteStorage;
use crate::traits::{ObjectStorage, StorageResult};
use focusrelay_core::RelayConfig;
use std::sync::Arc;

/// Create the storage backend and its credential source from configuration.
///
/// The credential source is selected exactly once here; callers receive it
/// alongside the storage handle so they can derive the tenancy identity
/// without ever asking which source won.
pub fn create_storage(
    config: &RelayConfig,
) -> StorageResult<(Arc<dyn ObjectStorage>, Arc<dyn CredentialSource>)> {
    let credentials = select_credentials(&config.credentials_file)?;

    let storage = RemoteStorage::new(
        credentials.clone(),
        config.storage_region.clone(),
        config.storage_endpoint.clone(),
        config.storage_namespace.clone(),
    )?;

    Ok((Arc::new(storage), credentials))
}

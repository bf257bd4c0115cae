//! Application state shared across handlers.

use std::sync::Arc;

use focusrelay_core::RelayConfig;
use focusrelay_services::Replicator;
use focusrelay_storage::{CredentialSource, ObjectStorage};

pub struct AppState {
    pub config: RelayConfig,
    pub storage: Arc<dyn ObjectStorage>,
    /// Kept alongside the storage handle so handlers can fall back to the
    /// credential profile for the tenancy OCID when it is not configured.
    pub credentials: Arc<dyn CredentialSource>,
    pub replicator: Replicator,
}

mod error;
mod handlers;
mod routes;
mod server;
mod state;
mod telemetry;

use std::sync::Arc;

use focusrelay_core::RelayConfig;
use focusrelay_services::Replicator;
use focusrelay_storage::create_storage;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = RelayConfig::from_env()?;

    telemetry::init_telemetry(&config);

    // Storage backend and credential source are selected once at startup.
    let (storage, credentials) = create_storage(&config)?;
    let replicator = Replicator::new(storage.clone(), config.scratch_dir.clone())?;

    let state = Arc::new(AppState {
        config: config.clone(),
        storage,
        credentials,
        replicator,
    });
    let router = routes::setup_routes(state);

    server::start_server(&config, router).await?;

    Ok(())
}

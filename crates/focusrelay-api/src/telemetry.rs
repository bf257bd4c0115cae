//! Tracing subscriber setup.

use focusrelay_core::RelayConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber: JSON lines in production, the
/// human-readable format everywhere else. `RUST_LOG` overrides the
/// default filter.
pub fn init_telemetry(config: &RelayConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "focusrelay=debug,tower_http=debug".into());

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(environment = %config.environment, "Telemetry initialized");
}

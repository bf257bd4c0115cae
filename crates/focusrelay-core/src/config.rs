//! Configuration module
//!
//! Flat key-value configuration for both invocations, loaded from the
//! environment. `bucket_name` is the only hard requirement at load time;
//! the validator's secret requirement and the replicator's tenancy
//! derivation are checked at invocation time so one deployment can serve
//! either role.

use std::env;
use std::path::PathBuf;

use crate::naming;

const DEFAULT_SOURCE_NAMESPACE: &str = "bling";
const DEFAULT_CREDENTIALS_FILE: &str = "/config";
const DEFAULT_PORT: u16 = 8080;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub server_port: u16,
    pub environment: String,
    /// Source bucket name (the tenancy OCID). Auto-derived from the active
    /// credential source when absent.
    pub tenancy_ocid: Option<String>,
    /// Destination bucket for direct uploads. Required.
    pub bucket_name: String,
    /// Shared provenance secret; presence alone drives secret tagging.
    pub secret: Option<String>,
    /// Pre-signed bucket-root PUT URL for cross-tenancy uploads.
    pub scoped_upload_url: Option<String>,
    /// Effective lookback days, already defaulted and clamped.
    pub lookback_days: i64,
    /// Fixed namespace the usage reports are published under.
    pub source_namespace: String,
    /// Destination tenancy namespace; may also come from the credential
    /// profile when absent here.
    pub storage_namespace: Option<String>,
    pub storage_region: Option<String>,
    pub storage_endpoint: Option<String>,
    /// Local credential profile path; the profile source is selected when
    /// this file exists, the ambient source otherwise.
    pub credentials_file: PathBuf,
    /// Scratch directory for downloads.
    pub scratch_dir: PathBuf,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let bucket_name = env::var("BUCKET_NAME").map_err(|_| {
            anyhow::anyhow!("Missing required config key 'bucket_name'. Set BUCKET_NAME.")
        })?;

        let config = RelayConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("APP_ENV"))
                .unwrap_or_else(|_| "development".to_string()),
            tenancy_ocid: env::var("TENANCY_OCID").ok().filter(|s| !s.trim().is_empty()),
            bucket_name,
            secret: env::var("SECRET").ok().filter(|s| !s.trim().is_empty()),
            scoped_upload_url: env::var("SCOPED_UPLOAD_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            lookback_days: naming::effective_lookback_days(env::var("DAYS").ok().as_deref()),
            source_namespace: env::var("SOURCE_NAMESPACE")
                .unwrap_or_else(|_| DEFAULT_SOURCE_NAMESPACE.to_string()),
            storage_namespace: env::var("STORAGE_NAMESPACE")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            storage_region: env::var("STORAGE_REGION").ok().filter(|s| !s.trim().is_empty()),
            storage_endpoint: env::var("STORAGE_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            credentials_file: env::var("CREDENTIALS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_FILE)),
            scratch_dir: env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.bucket_name.trim().is_empty() {
            return Err(anyhow::anyhow!("BUCKET_NAME must not be empty"));
        }
        if self.storage_region.is_none() && self.storage_endpoint.is_none() {
            return Err(anyhow::anyhow!(
                "STORAGE_REGION or STORAGE_ENDPOINT must be set to reach object storage"
            ));
        }
        Ok(())
    }

    /// Whether uploads go through the scoped credential: requires *both*
    /// the scoped URL and the secret.
    pub fn cross_tenancy_enabled(&self) -> bool {
        self.scoped_upload_url.is_some() && self.secret.is_some()
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

//! Credential source selection.
//!
//! Two identities can drive the storage backend: a local key-value profile
//! file (developer workstations, default path `/config`) or the ambient
//! process environment (the deployed runtime's injected credentials). The
//! choice is made once at startup; everything downstream depends only on
//! the `CredentialSource` trait and never branches on which source is
//! active.

use object_store::aws::AmazonS3Builder;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::traits::{StorageError, StorageResult};

/// A source of storage credentials and tenancy identity.
pub trait CredentialSource: Send + Sync {
    /// Apply this source's credentials to a store builder.
    fn configure(&self, builder: AmazonS3Builder) -> AmazonS3Builder;

    /// The tenancy OCID carried by this identity, when it knows one.
    fn tenancy_ocid(&self) -> Option<&str>;

    /// The destination namespace carried by this identity, when it knows one.
    fn namespace(&self) -> Option<&str>;

    /// Short name for logging.
    fn source_name(&self) -> &'static str;
}

/// Credentials read from a local profile file of `key = value` lines.
///
/// Recognized keys: `access_key_id`, `secret_access_key`, `region`,
/// `endpoint`, `tenancy`, `namespace`. Lines starting with `#` or `[` are
/// skipped, so an INI-style profile parses as-is.
#[derive(Debug)]
pub struct ProfileCredentials {
    access_key_id: String,
    secret_access_key: String,
    region: Option<String>,
    endpoint: Option<String>,
    tenancy: Option<String>,
    namespace: Option<String>,
}

impl ProfileCredentials {
    pub fn load(path: &Path) -> StorageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        let entries = parse_profile(&contents);

        let access_key_id = entries.get("access_key_id").cloned().ok_or_else(|| {
            StorageError::ConfigError(format!(
                "Credentials file {} is missing 'access_key_id'",
                path.display()
            ))
        })?;
        let secret_access_key = entries.get("secret_access_key").cloned().ok_or_else(|| {
            StorageError::ConfigError(format!(
                "Credentials file {} is missing 'secret_access_key'",
                path.display()
            ))
        })?;

        Ok(ProfileCredentials {
            access_key_id,
            secret_access_key,
            region: entries.get("region").cloned(),
            endpoint: entries.get("endpoint").cloned(),
            tenancy: entries.get("tenancy").cloned(),
            namespace: entries.get("namespace").cloned(),
        })
    }
}

impl CredentialSource for ProfileCredentials {
    fn configure(&self, builder: AmazonS3Builder) -> AmazonS3Builder {
        let mut builder = builder
            .with_access_key_id(self.access_key_id.clone())
            .with_secret_access_key(self.secret_access_key.clone());
        if let Some(ref region) = self.region {
            builder = builder.with_region(region.clone());
        }
        if let Some(ref endpoint) = self.endpoint {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }
        builder
    }

    fn tenancy_ocid(&self) -> Option<&str> {
        self.tenancy.as_deref()
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn source_name(&self) -> &'static str {
        "profile"
    }
}

/// Credentials taken from the process environment.
pub struct AmbientCredentials {
    tenancy: Option<String>,
    namespace: Option<String>,
}

impl AmbientCredentials {
    pub fn from_env() -> Self {
        AmbientCredentials {
            tenancy: std::env::var("TENANCY_OCID").ok().filter(|s| !s.is_empty()),
            namespace: std::env::var("STORAGE_NAMESPACE")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }
}

impl CredentialSource for AmbientCredentials {
    fn configure(&self, builder: AmazonS3Builder) -> AmazonS3Builder {
        // AmazonS3Builder::from_env has already picked up the ambient keys;
        // nothing more to apply.
        builder
    }

    fn tenancy_ocid(&self) -> Option<&str> {
        self.tenancy.as_deref()
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn source_name(&self) -> &'static str {
        "ambient"
    }
}

/// Select the credential source once at process start: the profile file
/// when it exists, the ambient environment otherwise.
pub fn select_credentials(profile_path: &Path) -> StorageResult<Arc<dyn CredentialSource>> {
    if profile_path.exists() {
        tracing::info!(path = %profile_path.display(), "Using profile credentials");
        Ok(Arc::new(ProfileCredentials::load(profile_path)?))
    } else {
        tracing::info!(
            path = %profile_path.display(),
            "No credentials file found, using ambient credentials"
        );
        Ok(Arc::new(AmbientCredentials::from_env()))
    }
}

fn parse_profile(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('['))
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            Some((key.trim().to_lowercase(), value.to_string()))
        })
        .collect()
}

//! Focusrelay Storage Library
//!
//! This crate provides the object-storage abstraction used by the
//! replicator and the boundary validator, the remote S3-compatible
//! backend, and the credential-source selection layer.
//!
//! Addressing is always (namespace, bucket, object): the replicator reads
//! from the reporting tenancy's namespace and writes into its own, and the
//! validator deletes wherever the notification points.

pub mod credentials;
pub mod factory;
pub mod remote;
pub mod traits;

// Re-export commonly used types
pub use credentials::{select_credentials, AmbientCredentials, CredentialSource, ProfileCredentials};
pub use factory::create_storage;
pub use remote::RemoteStorage;
pub use traits::{ByteStream, ObjectStorage, StorageError, StorageResult};

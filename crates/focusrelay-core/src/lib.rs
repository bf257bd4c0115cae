//! Focusrelay Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! shared naming convention used across all focusrelay components.
//!
//! # Naming convention
//!
//! The secret-derived name prefix is the entire tenancy-boundary enforcement
//! mechanism: the replicator tags every destination name with it and the
//! boundary validator deletes anything that lacks it. Both sides must compute
//! it from the same function, so all name derivation lives in the `naming`
//! module and nowhere else.

pub mod config;
pub mod error;
pub mod models;
pub mod naming;

// Re-export commonly used types
pub use config::RelayConfig;
pub use error::{AppError, LogLevel};
pub use models::{ObjectSummary, ProcessingResult, ReportObject, UploadTarget, ValidationEvent};

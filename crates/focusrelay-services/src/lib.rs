//! Focusrelay Services Library
//!
//! The two coupled halves of the system live here: the replication side
//! (report locator + replicator) and the enforcement side (event
//! normalizer + boundary validator). They never call each other; their
//! only coupling is the shared naming convention in `focusrelay-core`.

pub mod events;
pub mod locator;
pub mod replicator;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use events::normalize_event;
pub use locator::ReportLocator;
pub use replicator::{Replicator, RunFailure, RunOutcome};
pub use validator::{BoundaryValidator, Verdict};

//! Shared name derivation for the replicator and the boundary validator.
//!
//! Both sides of the tenancy boundary must agree byte-for-byte on the
//! secret-derived prefix; keeping every name rule in this module is what
//! guarantees that agreement. Nothing outside this module may encode the
//! secret or format a report name.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Datelike, NaiveDate};

/// Default number of days to look back for reports.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 3;

/// Lookback is clamped to this inclusive range.
pub const LOOKBACK_RANGE: (i64, i64) = (0, 31);

/// Base64 tag derived from the shared secret.
pub fn secret_tag(secret: &str) -> String {
    BASE64.encode(secret.as_bytes())
}

/// The prefix every correctly tagged destination name must start with:
/// `base64(secret) + "_"`.
pub fn expected_prefix(secret: &str) -> String {
    format!("{}_", secret_tag(secret))
}

/// Listing prefix for report objects generated on `date`.
pub fn report_prefix(date: NaiveDate) -> String {
    format!(
        "FOCUS Reports/{}/{:02}/{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// The filename component of a source object name (everything after the
/// last `/`; the whole name when there is no `/`).
pub fn original_filename(object_name: &str) -> &str {
    object_name.rsplit('/').next().unwrap_or(object_name)
}

/// Destination object name for a replicated report.
///
/// `{year}_{month:02}_{day:02}_{original_filename}`, prefixed with
/// [`expected_prefix`] iff a secret is configured. Secret tagging is driven
/// by secret presence alone, independent of the upload path.
pub fn destination_name(date: NaiveDate, source_name: &str, secret: Option<&str>) -> String {
    let base = format!(
        "{}_{:02}_{:02}_{}",
        date.year(),
        date.month(),
        date.day(),
        original_filename(source_name)
    );
    match secret {
        Some(secret) if !secret.trim().is_empty() => {
            format!("{}{}", expected_prefix(secret), base)
        }
        _ => base,
    }
}

/// Effective lookback days for a raw configuration value.
///
/// Absent or non-numeric values fall back to [`DEFAULT_LOOKBACK_DAYS`];
/// numeric values are clamped to [`LOOKBACK_RANGE`].
pub fn effective_lookback_days(raw: Option<&str>) -> i64 {
    let (min, max) = LOOKBACK_RANGE;
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_LOOKBACK_DAYS)
        .clamp(min, max)
}

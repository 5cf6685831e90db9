//! Timestamp-derived identifiers for catalog entities.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh id with the given prefix, unique for the lifetime of the process.
///
/// The timestamp keeps ids readable and roughly sortable; the counter makes
/// ids minted in the same millisecond distinct.
pub fn fresh(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{n}", Utc::now().timestamp_millis())
}

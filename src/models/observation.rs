use super::status::Status;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single status poll for a store.
/// Immutable once ingested; duplicate timestamps for the same store are
/// permitted and treated as redundant samples.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub store_id: String,
    pub ts: DateTime<Utc>, // ⇔ store_status.timestamp_utc (TEXT, RFC 3339)
    pub status: Status,    // ⇔ store_status.status ('active' | 'inactive')
}

impl Observation {
    pub fn new(store_id: impl Into<String>, ts: DateTime<Utc>, status: Status) -> Self {
        Self {
            store_id: store_id.into(),
            ts,
            status,
        }
    }
}

//! Per-store chronologically sorted poll sequences.

use crate::db::queries::StatusRow;
use crate::models::{Observation, Status};
use crate::utils::time::parse_utc_timestamp;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// All observations in the dataset, grouped by store and sorted ascending
/// by timestamp. Rows with an unparseable timestamp or an unknown status
/// string are skipped and counted, never fatal.
#[derive(Debug, Default)]
pub struct ObservationSeries {
    by_store: HashMap<String, Vec<Observation>>,
    skipped: usize,
}

impl ObservationSeries {
    pub fn from_rows(rows: Vec<StatusRow>) -> Self {
        let mut by_store: HashMap<String, Vec<Observation>> = HashMap::new();
        let mut skipped = 0usize;

        for row in rows {
            let ts = match parse_utc_timestamp(&row.timestamp_utc) {
                Some(ts) => ts,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let status = match Status::from_db_str(row.status.trim()) {
                Some(s) => s,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            by_store
                .entry(row.store_id.clone())
                .or_default()
                .push(Observation::new(row.store_id, ts, status));
        }

        for obs in by_store.values_mut() {
            obs.sort_by_key(|o| o.ts);
        }

        Self { by_store, skipped }
    }

    /// Observations for one store, ascending by timestamp. Empty slice for
    /// stores never polled.
    pub fn for_store(&self, store_id: &str) -> &[Observation] {
        self.by_store.get(store_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn stores(&self) -> impl Iterator<Item = &str> {
        self.by_store.keys().map(String::as_str)
    }

    /// The dataset-wide reference instant candidate: the latest timestamp
    /// across every store. None when there are no observations at all.
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.by_store
            .values()
            .filter_map(|obs| obs.last())
            .map(|o| o.ts)
            .max()
    }

    /// Number of rows dropped during construction.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

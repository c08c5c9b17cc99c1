//! Weekly business-hours schedules, indexed per store and weekday.

use crate::db::queries::HoursRow;
use crate::models::BusinessInterval;
use crate::utils::time::parse_local_time;
use std::collections::HashMap;

/// Per store, per weekday (0 = Monday .. 6 = Sunday), the ordered set of
/// non-overlapping local-time open intervals.
///
/// A store with no entry in the index at all is open 24/7 every day. A
/// store that has entries for some weekdays but none for weekday `d` is
/// closed on `d`. The two cases are deliberately distinct.
#[derive(Debug, Default)]
pub struct BusinessHoursIndex {
    by_store: HashMap<String, [Vec<BusinessInterval>; 7]>,
}

/// A store whose schedule rows were malformed. The store is excluded from
/// the index; the caller decides whether to drop it from the report or
/// fail the run.
#[derive(Debug, Clone)]
pub struct RejectedStore {
    pub store_id: String,
    pub reason: String,
}

impl BusinessHoursIndex {
    /// Build the index, validating every row. A single bad row rejects the
    /// whole store: a partially trusted schedule would miscount uptime.
    pub fn build(rows: &[HoursRow]) -> (Self, Vec<RejectedStore>) {
        let mut by_store: HashMap<String, [Vec<BusinessInterval>; 7]> = HashMap::new();
        let mut bad: HashMap<String, String> = HashMap::new();

        for row in rows {
            if bad.contains_key(&row.store_id) {
                continue;
            }
            match parse_row(row) {
                Ok(interval) => {
                    let days = by_store.entry(row.store_id.clone()).or_default();
                    days[interval.weekday as usize].push(interval);
                }
                Err(reason) => {
                    bad.insert(row.store_id.clone(), reason);
                }
            }
        }

        for store_id in bad.keys() {
            by_store.remove(store_id);
        }

        // Overlap validation per store+weekday, after sorting by start.
        let mut rejected: Vec<RejectedStore> = bad
            .into_iter()
            .map(|(store_id, reason)| RejectedStore { store_id, reason })
            .collect();

        by_store.retain(|store_id, days| {
            for day in days.iter_mut() {
                day.sort_by_key(|iv| (iv.start, iv.end));
                for pair in day.windows(2) {
                    if pair[0].overlaps(&pair[1]) {
                        rejected.push(RejectedStore {
                            store_id: store_id.clone(),
                            reason: format!(
                                "overlapping intervals on weekday {}: {}-{} and {}-{}",
                                pair[0].weekday,
                                pair[0].start,
                                pair[0].end,
                                pair[1].start,
                                pair[1].end
                            ),
                        });
                        return false;
                    }
                }
            }
            true
        });

        rejected.sort_by(|a, b| a.store_id.cmp(&b.store_id));
        (Self { by_store }, rejected)
    }

    /// Open intervals for one store on one weekday. Empty means closed
    /// that day, unless the store is [`always_open`](Self::is_always_open).
    pub fn intervals_for(&self, store_id: &str, weekday: u8) -> &[BusinessInterval] {
        self.by_store
            .get(store_id)
            .map(|days| days[weekday as usize].as_slice())
            .unwrap_or(&[])
    }

    /// True when the store has no schedule at all (open 24/7 every day).
    pub fn is_always_open(&self, store_id: &str) -> bool {
        !self.by_store.contains_key(store_id)
    }

    pub fn stores(&self) -> impl Iterator<Item = &str> {
        self.by_store.keys().map(String::as_str)
    }
}

fn parse_row(row: &HoursRow) -> Result<BusinessInterval, String> {
    if !(0..=6).contains(&row.day_of_week) {
        return Err(format!("day_of_week {} outside 0..6", row.day_of_week));
    }
    let start = parse_local_time(&row.start_time_local)
        .ok_or_else(|| format!("unparseable start time '{}'", row.start_time_local))?;
    let end = parse_local_time(&row.end_time_local)
        .ok_or_else(|| format!("unparseable end time '{}'", row.end_time_local))?;
    if start > end {
        return Err(format!(
            "interval start {} after end {} on weekday {}",
            start, end, row.day_of_week
        ));
    }
    Ok(BusinessInterval::new(row.day_of_week as u8, start, end))
}

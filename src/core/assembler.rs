//! Dataset-wide report assembly: one row per known store.

use crate::core::engine::compute_store_uptime;
use crate::core::hours::{BusinessHoursIndex, RejectedStore};
use crate::core::series::ObservationSeries;
use crate::core::tz::TimezoneResolver;
use crate::errors::{AppError, AppResult};
use crate::models::ReportRow;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;

/// A store that could not be reported on (malformed schedule data). Its
/// row is omitted; the rest of the run is unaffected.
#[derive(Debug, Clone)]
pub struct StoreFailure {
    pub store_id: String,
    pub reason: String,
}

/// Result of one report run, including partial-failure bookkeeping.
#[derive(Debug)]
pub struct RunOutcome {
    pub reference: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
    pub failures: Vec<StoreFailure>,
    pub skipped_observations: usize,
}

/// Iterates all known stores and invokes the uptime engine once per
/// store, fanning out over a bounded worker pool. All lookup tables are
/// read-only during a run; workers hand rows back over a channel.
pub struct ReportAssembler {
    series: ObservationSeries,
    hours: BusinessHoursIndex,
    tz: TimezoneResolver,
    rejected: Vec<StoreFailure>,
    workers: usize,
    cancel: Arc<AtomicBool>,
}

impl ReportAssembler {
    pub fn new(
        series: ObservationSeries,
        hours: BusinessHoursIndex,
        rejected: Vec<RejectedStore>,
        tz: TimezoneResolver,
        workers: usize,
    ) -> Self {
        Self {
            series,
            hours,
            tz,
            rejected: rejected
                .into_iter()
                .map(|r| StoreFailure {
                    store_id: r.store_id,
                    reason: r.reason,
                })
                .collect(),
            workers: workers.max(1),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for cooperative cancellation. Checked between per-store
    /// computations, never inside one.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Produce one row per store with at least one observation or at
    /// least one valid business-hours entry.
    ///
    /// Without an explicit reference instant the latest observation
    /// timestamp is used; an entirely empty dataset is `AppError::NoData`.
    /// Rows come back sorted by store id so repeat runs over the same
    /// inputs serialize identically.
    pub fn run(&self, reference: Option<DateTime<Utc>>) -> AppResult<RunOutcome> {
        let reference = reference
            .or_else(|| self.series.latest_timestamp())
            .ok_or(AppError::NoData)?;

        let mut stores: BTreeSet<&str> = self.series.stores().collect();
        stores.extend(self.hours.stores());
        for failure in &self.rejected {
            stores.remove(failure.store_id.as_str());
        }
        let stores: Vec<&str> = stores.into_iter().collect();

        let mut rows: Vec<ReportRow> = Vec::with_capacity(stores.len());
        if self.workers == 1 {
            for store_id in &stores {
                if self.cancel.load(Ordering::Relaxed) {
                    return Err(AppError::Cancelled);
                }
                rows.push(self.compute_row(store_id, reference));
            }
        } else {
            let next = AtomicUsize::new(0);
            let (tx, rx) = mpsc::channel::<ReportRow>();

            thread::scope(|s| {
                for _ in 0..self.workers.min(stores.len().max(1)) {
                    let tx = tx.clone();
                    let next = &next;
                    let stores = &stores;
                    s.spawn(move || {
                        loop {
                            if self.cancel.load(Ordering::Relaxed) {
                                break;
                            }
                            let i = next.fetch_add(1, Ordering::Relaxed);
                            let Some(store_id) = stores.get(i) else { break };
                            if tx.send(self.compute_row(store_id, reference)).is_err() {
                                break;
                            }
                        }
                    });
                }
                drop(tx);
                for row in rx {
                    rows.push(row);
                }
            });

            if self.cancel.load(Ordering::Relaxed) && rows.len() < stores.len() {
                return Err(AppError::Cancelled);
            }
            rows.sort_by(|a, b| a.store_id.cmp(&b.store_id));
        }

        Ok(RunOutcome {
            reference,
            rows,
            failures: self.rejected.clone(),
            skipped_observations: self.series.skipped(),
        })
    }

    fn compute_row(&self, store_id: &str, reference: DateTime<Utc>) -> ReportRow {
        let tz = self.tz.resolve(store_id);
        let totals = compute_store_uptime(
            store_id,
            self.series.for_store(store_id),
            &self.hours,
            tz,
            reference,
        );

        ReportRow {
            store_id: store_id.to_string(),
            uptime_last_hour: totals.hour.uptime_minutes,
            uptime_last_day: totals.day.uptime_minutes / 60.0,
            uptime_last_week: totals.week.uptime_minutes / 60.0,
            downtime_last_hour: totals.hour.downtime_minutes,
            downtime_last_day: totals.day.downtime_minutes / 60.0,
            downtime_last_week: totals.week.downtime_minutes / 60.0,
        }
    }
}

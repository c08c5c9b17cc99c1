//! Uptime/downtime extrapolation for one store.
//!
//! Sparse status polls are turned into continuous-time coverage by
//! carry-forward interpolation: a store keeps the status of its latest
//! poll until the next one. Coverage is counted only inside the store's
//! business-open intervals, intersected with each trailing window ending
//! at the dataset's reference instant. Time before a store's first poll
//! is unknown and counted as neither uptime nor downtime.

use crate::core::hours::BusinessHoursIndex;
use crate::models::Observation;
use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Uptime/downtime for a single trailing window, in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowTotals {
    pub uptime_minutes: f64,
    pub downtime_minutes: f64,
}

/// Totals for the three trailing windows of one store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StoreUptime {
    pub hour: WindowTotals,
    pub day: WindowTotals,
    pub week: WindowTotals,
}

/// Compute uptime/downtime for every window of one store.
///
/// `observations` must be sorted ascending by timestamp (as produced by
/// `ObservationSeries`). A store with no observations yields all zeros:
/// with nothing to carry forward, every open minute is unknown.
pub fn compute_store_uptime(
    store_id: &str,
    observations: &[Observation],
    hours: &BusinessHoursIndex,
    tz: Tz,
    reference: DateTime<Utc>,
) -> StoreUptime {
    if observations.is_empty() {
        return StoreUptime::default();
    }

    let window = |len: Duration| {
        let open = open_subintervals(store_id, hours, tz, reference - len, reference);
        carry_forward_split(observations, &open)
    };

    StoreUptime {
        hour: window(Duration::hours(1)),
        day: window(Duration::days(1)),
        week: window(Duration::weeks(1)),
    }
}

/// Business-open spans inside `[window_start, window_end]`, as disjoint
/// UTC intervals sorted ascending. Spans from adjacent local days that
/// touch (e.g. a 24/7 store) are coalesced.
fn open_subintervals(
    store_id: &str,
    hours: &BusinessHoursIndex,
    tz: Tz,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let always_open = hours.is_always_open(store_id);
    let first_day = window_start.with_timezone(&tz).date_naive();
    let last_day = window_end.with_timezone(&tz).date_naive();

    let mut spans: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
    let mut day = first_day;
    while day <= last_day {
        let mut push_span = |start_local: NaiveDateTime, end_local: NaiveDateTime| {
            let start = local_to_utc(tz, start_local).max(window_start);
            let end = local_to_utc(tz, end_local).min(window_end);
            if start < end {
                spans.push((start, end));
            }
        };

        if always_open {
            let midnight = day.and_time(NaiveTime::MIN);
            push_span(midnight, midnight + Duration::days(1));
        } else {
            let weekday = day.weekday().num_days_from_monday() as u8;
            for iv in hours.intervals_for(store_id, weekday) {
                push_span(day.and_time(iv.start), day.and_time(iv.end));
            }
        }

        day = day + Duration::days(1);
    }

    spans.sort_by_key(|&(start, _)| start);

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Map a local wall-clock time to a UTC instant.
///
/// During a fall-back transition the local time is ambiguous; the earlier
/// of the two UTC instants wins. During a spring-forward gap the local
/// time does not exist; the first valid instant after the gap is used.
fn local_to_utc(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(t) => t.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            let mut probe = local;
            for _ in 0..240 {
                probe = probe + Duration::minutes(1);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(t) => return t.with_timezone(&Utc),
                    LocalResult::Ambiguous(earlier, _) => return earlier.with_timezone(&Utc),
                    LocalResult::None => {}
                }
            }
            // No real zone has a gap this long; read the wall time as UTC.
            Utc.from_utc_datetime(&local)
        }
    }
}

/// Split the open spans into constant-status slices by carrying each
/// observation's status forward to the next one, and sum the slice
/// durations by status. Spans (or leading parts of spans) with no
/// preceding observation stay unknown and are excluded from both totals.
fn carry_forward_split(
    observations: &[Observation],
    open: &[(DateTime<Utc>, DateTime<Utc>)],
) -> WindowTotals {
    let mut uptime = Duration::zero();
    let mut downtime = Duration::zero();

    for &(start, end) in open {
        // Status in force when the span opens: latest observation at or
        // before `start`, if any.
        let mut idx = observations.partition_point(|o| o.ts <= start);
        let mut current = idx.checked_sub(1).map(|i| observations[i].status);
        let mut cursor = start;

        while idx < observations.len() && observations[idx].ts < end {
            let obs = &observations[idx];
            if obs.ts > cursor {
                tally(&mut uptime, &mut downtime, current, obs.ts - cursor);
                cursor = obs.ts;
            }
            current = Some(obs.status);
            idx += 1;
        }
        tally(&mut uptime, &mut downtime, current, end - cursor);
    }

    WindowTotals {
        uptime_minutes: minutes(uptime),
        downtime_minutes: minutes(downtime),
    }
}

fn tally(
    uptime: &mut Duration,
    downtime: &mut Duration,
    status: Option<crate::models::Status>,
    span: Duration,
) {
    match status {
        Some(s) if s.is_active() => *uptime = *uptime + span,
        Some(_) => *downtime = *downtime + span,
        None => {} // unknown: excluded from both
    }
}

fn minutes(d: Duration) -> f64 {
    d.num_seconds() as f64 / 60.0
}

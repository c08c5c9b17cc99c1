mod common;

use chrono::Duration;
use chrono_tz::Tz;
use common::{hours_row, ts};
use storepulse::core::{BusinessHoursIndex, compute_store_uptime};
use storepulse::models::{Observation, Status};

fn chicago() -> Tz {
    "America/Chicago".parse().expect("known zone")
}

fn always_open() -> BusinessHoursIndex {
    let (index, rejected) = BusinessHoursIndex::build(&[]);
    assert!(rejected.is_empty());
    index
}

#[test]
fn store_with_no_observations_reports_zero_everywhere() {
    let reference = ts("2023-01-25T12:00:00Z");
    let totals = compute_store_uptime("s1", &[], &always_open(), chrono_tz::UTC, reference);

    assert_eq!(totals.hour.uptime_minutes, 0.0);
    assert_eq!(totals.hour.downtime_minutes, 0.0);
    assert_eq!(totals.day.uptime_minutes, 0.0);
    assert_eq!(totals.week.downtime_minutes, 0.0);
}

#[test]
fn single_active_observation_before_window_carries_across_all_windows() {
    let reference = ts("2023-01-25T12:00:00Z");
    let obs = [Observation::new(
        "s1",
        ts("2023-01-01T00:00:00Z"),
        Status::Active,
    )];
    let totals = compute_store_uptime("s1", &obs, &always_open(), chrono_tz::UTC, reference);

    assert_eq!(totals.hour.uptime_minutes, 60.0);
    assert_eq!(totals.day.uptime_minutes, 24.0 * 60.0);
    assert_eq!(totals.week.uptime_minutes, 7.0 * 24.0 * 60.0);
    assert_eq!(totals.week.downtime_minutes, 0.0);
}

#[test]
fn time_before_first_observation_is_excluded_from_both_totals() {
    // Single "inactive" poll 30 minutes before the reference: the first
    // half of the hour window has no state to carry and counts as neither.
    let reference = ts("2023-01-25T12:00:00Z");
    let obs = [Observation::new(
        "s1",
        ts("2023-01-25T11:30:00Z"),
        Status::Inactive,
    )];
    let totals = compute_store_uptime("s1", &obs, &always_open(), chrono_tz::UTC, reference);

    assert_eq!(totals.hour.uptime_minutes, 0.0);
    assert_eq!(totals.hour.downtime_minutes, 30.0);
    assert!(totals.hour.uptime_minutes + totals.hour.downtime_minutes <= 60.0);
}

#[test]
fn chicago_store_with_monday_business_hours() {
    // Mon 2023-01-23, America/Chicago (CST, UTC-6). Business hours Monday
    // 09:00-17:00 local only. Polls: 10:00 local inactive, 15:00 local
    // active. Reference instant: Monday 17:00 local (23:00Z).
    let rows = [hours_row("s1", 0, "09:00:00", "17:00:00")];
    let (index, rejected) = BusinessHoursIndex::build(&rows);
    assert!(rejected.is_empty());

    let obs = [
        Observation::new("s1", ts("2023-01-23T16:00:00Z"), Status::Inactive),
        Observation::new("s1", ts("2023-01-23T21:00:00Z"), Status::Active),
    ];
    let reference = ts("2023-01-23T23:00:00Z");
    let totals = compute_store_uptime("s1", &obs, &index, chicago(), reference);

    // Last hour (16:00-17:00 local) is fully open and active since 15:00.
    assert_eq!(totals.hour.uptime_minutes, 60.0);
    assert_eq!(totals.hour.downtime_minutes, 0.0);

    // Last day: open 09:00-17:00 local. 09:00-10:00 unknown (excluded),
    // 10:00-15:00 inactive, 15:00-17:00 active.
    assert_eq!(totals.day.uptime_minutes, 120.0);
    assert_eq!(totals.day.downtime_minutes, 300.0);

    // Last week: the only other Monday's hours fall entirely before the
    // window start, so the week equals the day here.
    assert_eq!(totals.week.uptime_minutes, 120.0);
    assert_eq!(totals.week.downtime_minutes, 300.0);
}

#[test]
fn observation_exactly_at_window_start_seeds_carry_forward() {
    let reference = ts("2023-01-25T12:00:00Z");
    let obs = [Observation::new(
        "s1",
        ts("2023-01-25T11:00:00Z"),
        Status::Active,
    )];
    let totals = compute_store_uptime("s1", &obs, &always_open(), chrono_tz::UTC, reference);

    assert_eq!(totals.hour.uptime_minutes, 60.0);
}

#[test]
fn observations_after_window_end_do_not_influence_it() {
    let reference = ts("2023-01-25T12:00:00Z");
    let obs = [
        Observation::new("s1", ts("2023-01-25T10:00:00Z"), Status::Active),
        Observation::new("s1", ts("2023-01-25T13:00:00Z"), Status::Inactive),
    ];
    let totals = compute_store_uptime("s1", &obs, &always_open(), chrono_tz::UTC, reference);

    assert_eq!(totals.hour.uptime_minutes, 60.0);
    assert_eq!(totals.hour.downtime_minutes, 0.0);
}

#[test]
fn weekday_without_schedule_is_closed_when_store_has_any_schedule() {
    // Schedule exists only for Tuesday; the whole day window ending
    // Monday evening is closed time.
    let rows = [hours_row("s1", 1, "09:00:00", "17:00:00")];
    let (index, rejected) = BusinessHoursIndex::build(&rows);
    assert!(rejected.is_empty());

    let obs = [Observation::new(
        "s1",
        ts("2023-01-01T00:00:00Z"),
        Status::Active,
    )];
    // Monday 2023-01-23 17:00Z; day window spans Sunday evening + Monday.
    let totals = compute_store_uptime("s1", &obs, &index, chrono_tz::UTC, ts("2023-01-23T17:00:00Z"));

    assert_eq!(totals.hour.uptime_minutes, 0.0);
    assert_eq!(totals.hour.downtime_minutes, 0.0);
    assert_eq!(totals.day.uptime_minutes, 0.0);
    assert_eq!(totals.day.downtime_minutes, 0.0);
}

#[test]
fn multiple_polls_split_open_interval_into_slices() {
    let rows = [hours_row("s1", 2, "08:00:00", "12:00:00")];
    let (index, _) = BusinessHoursIndex::build(&rows);

    // Wednesday 2023-01-25, zone UTC. Open 08:00-12:00.
    let obs = [
        Observation::new("s1", ts("2023-01-25T07:00:00Z"), Status::Active),
        Observation::new("s1", ts("2023-01-25T09:00:00Z"), Status::Inactive),
        Observation::new("s1", ts("2023-01-25T11:30:00Z"), Status::Active),
    ];
    let totals = compute_store_uptime("s1", &obs, &index, chrono_tz::UTC, ts("2023-01-25T12:00:00Z"));

    // 08:00-09:00 active, 09:00-11:30 inactive, 11:30-12:00 active.
    assert_eq!(totals.day.uptime_minutes, 90.0);
    assert_eq!(totals.day.downtime_minutes, 150.0);
}

#[test]
fn always_open_store_day_window_is_stable_across_dst_fall_back() {
    // 2023-11-05 America/Chicago repeats 01:00-02:00 local. For a 24/7
    // store the open set still covers the full UTC day window.
    let obs = [Observation::new(
        "s1",
        ts("2023-11-01T00:00:00Z"),
        Status::Active,
    )];
    let totals =
        compute_store_uptime("s1", &obs, &always_open(), chicago(), ts("2023-11-06T12:00:00Z"));

    assert_eq!(totals.day.uptime_minutes, 24.0 * 60.0);
    assert_eq!(totals.day.downtime_minutes, 0.0);
}

#[test]
fn ambiguous_fall_back_hour_maps_to_the_earlier_instant() {
    // Sunday 2023-11-05 America/Chicago repeats 01:00-02:00 local. The
    // span start maps to the first (CDT) pass of the repeated hour, so
    // the open span covers both passes: 01:00 CDT = 06:00Z up to the
    // unambiguous 02:00 CST = 08:00Z.
    let rows = [hours_row("s1", 6, "01:00:00", "02:00:00")];
    let (index, rejected) = BusinessHoursIndex::build(&rows);
    assert!(rejected.is_empty());

    let obs = [Observation::new(
        "s1",
        ts("2023-11-01T00:00:00Z"),
        Status::Active,
    )];
    let totals = compute_store_uptime("s1", &obs, &index, chicago(), ts("2023-11-05T12:00:00Z"));

    assert_eq!(totals.day.uptime_minutes, 120.0);
    assert_eq!(totals.day.downtime_minutes, 0.0);
}

#[test]
fn nonexistent_spring_forward_hour_advances_to_the_first_valid_instant() {
    // Sunday 2023-03-12 America/Chicago skips 02:00-03:00 local. A span
    // opening inside the gap starts at the first valid instant instead:
    // 03:00 CDT = 08:00Z, up to 04:00 CDT = 09:00Z.
    let rows = [hours_row("s1", 6, "02:00:00", "04:00:00")];
    let (index, rejected) = BusinessHoursIndex::build(&rows);
    assert!(rejected.is_empty());

    let obs = [Observation::new(
        "s1",
        ts("2023-03-01T00:00:00Z"),
        Status::Active,
    )];
    let totals = compute_store_uptime("s1", &obs, &index, chicago(), ts("2023-03-12T12:00:00Z"));

    assert_eq!(totals.day.uptime_minutes, 60.0);
    assert_eq!(totals.day.downtime_minutes, 0.0);
}

#[test]
fn duplicate_timestamps_are_tolerated() {
    let reference = ts("2023-01-25T12:00:00Z");
    let base = reference - Duration::minutes(10);
    let obs = [
        Observation::new("s1", base, Status::Active),
        Observation::new("s1", base, Status::Active),
    ];
    let totals = compute_store_uptime("s1", &obs, &always_open(), chrono_tz::UTC, reference);

    assert_eq!(totals.hour.uptime_minutes, 10.0);
    assert_eq!(totals.hour.downtime_minutes, 0.0);
}

use chrono::NaiveTime;
use serde::Serialize;

/// One local-time open span for a store on a given weekday.
/// Weekday 0 = Monday .. 6 = Sunday. Invariant: `start <= end`; an
/// overnight shift must be encoded as two same-day-bounded rows.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BusinessInterval {
    pub weekday: u8,      // ⇔ business_hours.day_of_week (INTEGER 0..6)
    pub start: NaiveTime, // ⇔ business_hours.start_time_local (TEXT "HH:MM:SS")
    pub end: NaiveTime,   // ⇔ business_hours.end_time_local
}

impl BusinessInterval {
    pub fn new(weekday: u8, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            weekday,
            start,
            end,
        }
    }

    /// True when `other` shares at least one instant with `self` on the
    /// same weekday. Touching endpoints do not count as overlap.
    pub fn overlaps(&self, other: &BusinessInterval) -> bool {
        self.weekday == other.weekday && self.start < other.end && other.start < self.end
    }
}

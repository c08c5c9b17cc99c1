use serde::{Deserialize, Serialize};

/// One output row of an uptime report.
/// Hour-window values are minutes; day and week values are hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRow {
    pub store_id: String,
    pub uptime_last_hour: f64,
    pub uptime_last_day: f64,
    pub uptime_last_week: f64,
    pub downtime_last_hour: f64,
    pub downtime_last_day: f64,
    pub downtime_last_week: f64,
}

/// Header column order of the CSV artifact. Fixed by the report contract.
pub const REPORT_HEADER: [&str; 7] = [
    "store_id",
    "uptime_last_hour",
    "uptime_last_day",
    "uptime_last_week",
    "downtime_last_hour",
    "downtime_last_day",
    "downtime_last_week",
];

impl ReportRow {
    /// Values formatted for the tabular artifact, two decimal places.
    pub fn csv_record(&self) -> [String; 7] {
        [
            self.store_id.clone(),
            format!("{:.2}", self.uptime_last_hour),
            format!("{:.2}", self.uptime_last_day),
            format!("{:.2}", self.uptime_last_week),
            format!("{:.2}", self.downtime_last_hour),
            format!("{:.2}", self.downtime_last_day),
            format!("{:.2}", self.downtime_last_week),
        ]
    }
}

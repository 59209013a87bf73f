use crate::model::attendance::Location;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// One cell of the monthly report: an (employee, business day) pair. The
/// attendance fields are all `None` when no record matched the day; an
/// absent cell is never represented by anything other than these options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "account_id": 3,
    "first_name": "Zidni",
    "last_name": "Imani",
    "date": "2026-05-04",
    "in_time": "2026-05-04T01:05:00Z",
    "in_location": { "lat": -6.175, "long": 106.8286 },
    "out_time": "2026-05-04T10:10:00Z",
    "out_location": { "lat": -6.175, "long": 106.8286 },
    "work_duration_minutes": 545
}))]
pub struct MonthlyReportRow {
    pub account_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub date: NaiveDate,
    pub in_time: Option<DateTime<Utc>>,
    pub in_location: Option<Location>,
    pub out_time: Option<DateTime<Utc>>,
    pub out_location: Option<Location>,
    pub work_duration_minutes: Option<i64>,
}

/// Per-employee absence summary for one period. Only employees below the
/// tolerance threshold appear in the output at all.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "account_id": 3,
    "first_name": "Zidni",
    "last_name": "Imani",
    "email": "zidni.imani@example.com",
    "business_days": 21,
    "attended_days": 10,
    "absent_days": ["2026-05-04", "2026-05-05"]
}))]
pub struct AbsenceReport {
    pub account_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Business days in the period, truncated to today for the current month
    pub business_days: usize,
    /// Days with a completed session of at least the qualifying duration
    pub attended_days: usize,
    pub absent_days: Vec<NaiveDate>,
}

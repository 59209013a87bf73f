use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Reason attached to admin-entered corrections. Regular check-ins carry
/// no reason.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AbsenceReason {
    Leave,
    Sick,
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "lat": -6.175, "long": 106.8286 }))]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

/// A single attendance session. `out_*` fields are present iff the session
/// has been completed; at most one open record may exist per account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: u64,
    pub account_id: u64,
    pub in_time: DateTime<Utc>,
    pub in_lat: f64,
    pub in_long: f64,
    pub out_time: Option<DateTime<Utc>>,
    pub out_lat: Option<f64>,
    pub out_long: Option<f64>,
    pub reason: Option<AbsenceReason>,
    pub description: Option<String>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }

    pub fn in_location(&self) -> Location {
        Location {
            lat: self.in_lat,
            long: self.in_long,
        }
    }

    pub fn out_location(&self) -> Option<Location> {
        match (self.out_lat, self.out_long) {
            (Some(lat), Some(long)) => Some(Location { lat, long }),
            _ => None,
        }
    }

    pub fn work_duration_minutes(&self) -> Option<i64> {
        work_duration_minutes(self.in_time, self.out_time)
    }
}

/// Whole minutes between check-in and check-out. Derived on every read,
/// never stored.
pub fn work_duration_minutes(
    in_time: DateTime<Utc>,
    out_time: Option<DateTime<Utc>>,
) -> Option<i64> {
    out_time.map(|out| (out - in_time).num_milliseconds() / 60_000)
}

/// Insert payload for `AttendanceStore`. Check-in fills only the `in_*`
/// fields; admin corrections may provide a completed session with a reason.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub account_id: u64,
    pub in_time: DateTime<Utc>,
    pub in_location: Location,
    pub out_time: Option<DateTime<Utc>>,
    pub out_location: Option<Location>,
    pub reason: Option<AbsenceReason>,
    pub description: Option<String>,
}

impl NewAttendance {
    pub fn check_in(account_id: u64, in_time: DateTime<Utc>, in_location: Location) -> Self {
        Self {
            account_id,
            in_time,
            in_location,
            out_time: None,
            out_location: None,
            reason: None,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn duration_is_undefined_while_open() {
        let in_time = Utc.with_ymd_and_hms(2026, 5, 4, 1, 0, 0).unwrap();
        assert_eq!(work_duration_minutes(in_time, None), None);
    }

    #[test]
    fn duration_floors_to_whole_minutes() {
        let in_time = Utc.with_ymd_and_hms(2026, 5, 4, 1, 0, 0).unwrap();
        let out_time = Utc.with_ymd_and_hms(2026, 5, 4, 10, 30, 59).unwrap();
        assert_eq!(work_duration_minutes(in_time, Some(out_time)), Some(570));
    }
}

use crate::error::ApiError;
use crate::model::attendance::{AttendanceRecord, Location, NewAttendance};
use crate::store::AttendanceStore;
use crate::utils::calendar::{org_date, org_today};
use crate::utils::geo::distance_meters;
use crate::utils::report_cache::ReportCache;
use chrono::{Datelike, Utc};
use std::sync::Arc;

/// Derived per-request view of what the employee may do next. Recomputed
/// on every query so it always reflects the latest write.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceStatus {
    pub can_check_in: bool,
    pub can_check_out: bool,
    pub last_record: Option<AttendanceRecord>,
}

#[derive(Clone)]
pub struct AttendanceService {
    attendance: Arc<dyn AttendanceStore>,
    cache: ReportCache,
    office: Location,
    geofence_radius_m: f64,
}

impl AttendanceService {
    pub fn new(
        attendance: Arc<dyn AttendanceStore>,
        cache: ReportCache,
        office: Location,
        geofence_radius_m: f64,
    ) -> Self {
        Self {
            attendance,
            cache,
            office,
            geofence_radius_m,
        }
    }

    /// Decision table over the most recent record:
    /// 1. no record            -> may check in
    /// 2. open record          -> must check out, even across midnight
    /// 3. last record past day -> may check in
    /// 4. completed today      -> neither
    pub async fn status(&self, account_id: u64) -> Result<AttendanceStatus, ApiError> {
        let last = self.attendance.find_most_recent(account_id).await?;

        let status = match last {
            None => AttendanceStatus {
                can_check_in: true,
                can_check_out: false,
                last_record: None,
            },
            Some(record) if record.is_open() => AttendanceStatus {
                can_check_in: false,
                can_check_out: true,
                last_record: Some(record),
            },
            Some(record) => {
                let from_past_day = org_date(record.in_time) < org_today();
                AttendanceStatus {
                    can_check_in: from_past_day,
                    can_check_out: false,
                    last_record: Some(record),
                }
            }
        };
        Ok(status)
    }

    pub async fn check_in(&self, account_id: u64, location: Location) -> Result<(), ApiError> {
        let status = self.status(account_id).await?;
        if !status.can_check_in {
            return Err(ApiError::Forbidden("You already checked in today.".into()));
        }
        self.ensure_within_geofence(location)?;

        let new = NewAttendance::check_in(account_id, Utc::now(), location);
        // Re-checked at write time; the status read above may be stale
        // under concurrent requests for the same account.
        if !self.attendance.insert_if_no_open_record(&new).await? {
            return Err(ApiError::Conflict(
                "An open attendance record already exists.".into(),
            ));
        }

        self.invalidate_month(new.in_time).await;
        tracing::info!(account_id, "checked in");
        Ok(())
    }

    pub async fn check_out(
        &self,
        account_id: u64,
        location: Location,
    ) -> Result<AttendanceRecord, ApiError> {
        let status = self.status(account_id).await?;
        let open = match (status.can_check_out, status.last_record) {
            (true, Some(record)) => record,
            _ => {
                return Err(ApiError::Forbidden(
                    "No open attendance record to check out from.".into(),
                ));
            }
        };
        self.ensure_within_geofence(location)?;

        let out_time = Utc::now();
        if !self.attendance.complete(open.id, out_time, location).await? {
            return Err(ApiError::Conflict(
                "Attendance record was already completed.".into(),
            ));
        }

        // The report is keyed by in_time's month; an overnight session may
        // close in a different month than it opened.
        self.invalidate_month(open.in_time).await;
        self.invalidate_month(out_time).await;
        tracing::info!(account_id, record_id = open.id, "checked out");

        Ok(AttendanceRecord {
            out_time: Some(out_time),
            out_lat: Some(location.lat),
            out_long: Some(location.long),
            ..open
        })
    }

    /// Admin-entered correction; bypasses status and geofence gating.
    pub async fn record_correction(&self, new: NewAttendance) -> Result<u64, ApiError> {
        if new.out_time.is_some() != new.out_location.is_some() {
            return Err(ApiError::Validation(
                "out_time and out_location must be provided together.".into(),
            ));
        }
        if let Some(out_time) = new.out_time {
            if out_time <= new.in_time {
                return Err(ApiError::Validation(
                    "out_time must be after in_time.".into(),
                ));
            }
        }
        let id = self.attendance.insert(&new).await?;
        self.invalidate_month(new.in_time).await;
        tracing::info!(account_id = new.account_id, record_id = id, "attendance correction recorded");
        Ok(id)
    }

    fn ensure_within_geofence(&self, location: Location) -> Result<(), ApiError> {
        let distance = distance_meters(self.office, location);
        if distance > self.geofence_radius_m {
            return Err(ApiError::Forbidden(format!(
                "Location rejected: {distance:.0} m from the office, limit is {:.0} m.",
                self.geofence_radius_m
            )));
        }
        Ok(())
    }

    async fn invalidate_month(&self, instant: chrono::DateTime<Utc>) {
        let day = org_date(instant);
        self.cache.invalidate(day.year(), day.month()).await;
    }
}

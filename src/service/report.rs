use crate::error::ApiError;
use crate::model::account::Account;
use crate::model::attendance::AttendanceRecord;
use crate::model::report::{AbsenceReport, MonthlyReportRow};
use crate::store::{AccountStore, AttendanceStore};
use crate::utils::calendar::{month_bounds_utc, org_date, org_today, reporting_days};
use crate::utils::report_cache::ReportCache;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A day counts toward attendance only when the session was completed and
/// lasted at least this long.
pub const MIN_WORK_MINUTES: i64 = 540;

#[derive(Clone)]
pub struct ReportService {
    accounts: Arc<dyn AccountStore>,
    attendance: Arc<dyn AttendanceStore>,
    cache: ReportCache,
    absence_tolerance_days: usize,
}

impl ReportService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        attendance: Arc<dyn AttendanceStore>,
        cache: ReportCache,
        absence_tolerance_days: usize,
    ) -> Self {
        Self {
            accounts,
            attendance,
            cache,
            absence_tolerance_days,
        }
    }

    /// Read-through against the report cache. Concurrent misses may each
    /// rebuild; the last full result wins, which is idempotent.
    pub async fn monthly_report(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Arc<Vec<MonthlyReportRow>>, ApiError> {
        if let Some(rows) = self.cache.get(year, month).await {
            return Ok(rows);
        }

        let (roster, days, records) = self.load_period(year, month).await?;
        let rows = merge_rows(&roster, &days, &records);
        Ok(self.cache.set(year, month, rows).await)
    }

    /// Absence classification runs over the same period data but is not
    /// routed through the report cache.
    pub async fn absences(&self, year: i32, month: u32) -> Result<Vec<AbsenceReport>, ApiError> {
        let (roster, days, records) = self.load_period(year, month).await?;
        Ok(classify_absences(
            &roster,
            &days,
            &records,
            self.absence_tolerance_days,
        ))
    }

    async fn load_period(
        &self,
        year: i32,
        month: u32,
    ) -> Result<(Vec<Account>, Vec<NaiveDate>, Vec<AttendanceRecord>), ApiError> {
        // Rejects future and malformed periods before any store access.
        let days = reporting_days(year, month, org_today())?;
        let (start, end) = month_bounds_utc(year, month)
            .ok_or_else(|| ApiError::Validation("Requested date is invalid.".into()))?;

        let roster = self.accounts.find_approved_non_admin().await?;
        let records = self.attendance.find_in_range(start, end).await?;
        Ok((roster, days, records))
    }
}

/// Cartesian merge: roster order outer, business-day order inner; exactly
/// one row per (employee, day) whether or not attendance exists.
fn merge_rows(
    roster: &[Account],
    days: &[NaiveDate],
    records: &[AttendanceRecord],
) -> Vec<MonthlyReportRow> {
    // Day equality compares only the calendar date of in_time. The first
    // record of a day wins should corrections ever produce duplicates.
    let mut by_day: HashMap<(u64, NaiveDate), &AttendanceRecord> = HashMap::new();
    for record in records {
        by_day
            .entry((record.account_id, org_date(record.in_time)))
            .or_insert(record);
    }

    let mut rows = Vec::with_capacity(roster.len() * days.len());
    for account in roster {
        for day in days {
            let record = by_day.get(&(account.id, *day));
            rows.push(MonthlyReportRow {
                account_id: account.id,
                first_name: account.first_name.clone(),
                last_name: account.last_name.clone(),
                date: *day,
                in_time: record.map(|r| r.in_time),
                in_location: record.map(|r| r.in_location()),
                out_time: record.and_then(|r| r.out_time),
                out_location: record.and_then(|r| r.out_location()),
                work_duration_minutes: record.and_then(|r| r.work_duration_minutes()),
            });
        }
    }
    rows
}

/// An employee is absent on a business day with no completed session of at
/// least `MIN_WORK_MINUTES`. Employees with more than
/// (business days − tolerance) qualifying days are exempted entirely.
fn classify_absences(
    roster: &[Account],
    days: &[NaiveDate],
    records: &[AttendanceRecord],
    tolerance_days: usize,
) -> Vec<AbsenceReport> {
    let mut qualifying: HashMap<u64, HashSet<NaiveDate>> = HashMap::new();
    for record in records {
        let long_enough = record
            .work_duration_minutes()
            .is_some_and(|minutes| minutes >= MIN_WORK_MINUTES);
        if long_enough {
            qualifying
                .entry(record.account_id)
                .or_default()
                .insert(org_date(record.in_time));
        }
    }

    let exempt_above = days.len().saturating_sub(tolerance_days);
    let mut reports = Vec::new();
    for account in roster {
        let attended = qualifying.get(&account.id);
        let attended_count = attended.map_or(0, HashSet::len);
        if attended_count > exempt_above {
            continue;
        }
        let absent_days: Vec<NaiveDate> = days
            .iter()
            .filter(|day| !attended.is_some_and(|set| set.contains(day)))
            .copied()
            .collect();
        reports.push(AbsenceReport {
            account_id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            business_days: days.len(),
            attended_days: attended_count,
            absent_days,
        });
    }
    reports
}

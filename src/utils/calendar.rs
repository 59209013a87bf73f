use crate::error::ApiError;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

/// All day-boundary math runs in the organizational timezone, UTC+7
/// (Asia/Jakarta, no DST).
const ORG_UTC_OFFSET_HOURS: i64 = 7;

pub fn org_offset() -> FixedOffset {
    FixedOffset::east_opt((ORG_UTC_OFFSET_HOURS * 3600) as i32).expect("UTC+7 is a valid offset")
}

pub fn org_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&org_offset())
}

pub fn org_today() -> NaiveDate {
    org_now().date_naive()
}

/// Calendar date of an instant, in the organizational timezone.
pub fn org_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&org_offset()).date_naive()
}

/// Midnight at the start of `date` in the organizational timezone, as UTC.
pub fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&(midnight - Duration::hours(ORG_UTC_OFFSET_HOURS)))
}

/// Half-open UTC interval covering the whole month: [first day 00:00,
/// first day of next month 00:00), organizational timezone.
pub fn month_bounds_utc(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((day_start_utc(first), day_start_utc(next)))
}

/// Ordered weekdays of the month. No holiday table.
pub fn business_days(year: i32, month: u32) -> Vec<NaiveDate> {
    (1..=31)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

/// Business days usable for reporting: truncated to `today` when the
/// period is still in progress. A period that has not started yet is
/// rejected, never returned empty.
pub fn reporting_days(year: i32, month: u32, today: NaiveDate) -> Result<Vec<NaiveDate>, ApiError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::Validation("Requested date is invalid.".into()))?;
    if first > today {
        return Err(ApiError::Validation("Requested date not applicable.".into()));
    }
    Ok(business_days(year, month)
        .into_iter()
        .filter(|d| *d <= today)
        .collect())
}

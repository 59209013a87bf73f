use crate::error::ApiError;
use crate::model::attendance::{AttendanceRecord, Location, NewAttendance};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

const ATTENDANCE_COLUMNS: &str =
    "id, account_id, in_time, in_lat, in_long, out_time, out_lat, out_long, reason, description";

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Most recent record by in_time, if any.
    async fn find_most_recent(&self, account_id: u64)
    -> Result<Option<AttendanceRecord>, ApiError>;

    /// Records whose in_time falls within [start, end).
    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>, ApiError>;

    /// Atomic conditional insert for check-in: writes nothing and returns
    /// false if the account already has an open record. The condition is
    /// evaluated at write time, not trusted from an earlier status read.
    async fn insert_if_no_open_record(&self, new: &NewAttendance) -> Result<bool, ApiError>;

    /// Unconditional insert (admin corrections).
    async fn insert(&self, new: &NewAttendance) -> Result<u64, ApiError>;

    /// Completes an open record. Returns false when the record is missing
    /// or already completed.
    async fn complete(
        &self,
        record_id: u64,
        out_time: DateTime<Utc>,
        out_location: Location,
    ) -> Result<bool, ApiError>;
}

pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn find_most_recent(
        &self,
        account_id: u64,
    ) -> Result<Option<AttendanceRecord>, ApiError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances
             WHERE account_id = ?
             ORDER BY in_time DESC, id DESC
             LIMIT 1"
        ))
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances
             WHERE in_time >= ? AND in_time < ?
             ORDER BY in_time"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn insert_if_no_open_record(&self, new: &NewAttendance) -> Result<bool, ApiError> {
        let done = sqlx::query(
            "INSERT INTO attendances (account_id, in_time, in_lat, in_long)
             SELECT ?, ?, ?, ? FROM DUAL
             WHERE NOT EXISTS (
                 SELECT 1 FROM attendances WHERE account_id = ? AND out_time IS NULL
             )",
        )
        .bind(new.account_id)
        .bind(new.in_time)
        .bind(new.in_location.lat)
        .bind(new.in_location.long)
        .bind(new.account_id)
        .execute(&self.pool)
        .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn insert(&self, new: &NewAttendance) -> Result<u64, ApiError> {
        let done = sqlx::query(
            "INSERT INTO attendances
                 (account_id, in_time, in_lat, in_long,
                  out_time, out_lat, out_long, reason, description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new.account_id)
        .bind(new.in_time)
        .bind(new.in_location.lat)
        .bind(new.in_location.long)
        .bind(new.out_time)
        .bind(new.out_location.map(|l| l.lat))
        .bind(new.out_location.map(|l| l.long))
        .bind(new.reason)
        .bind(&new.description)
        .execute(&self.pool)
        .await?;
        Ok(done.last_insert_id())
    }

    async fn complete(
        &self,
        record_id: u64,
        out_time: DateTime<Utc>,
        out_location: Location,
    ) -> Result<bool, ApiError> {
        let done = sqlx::query(
            "UPDATE attendances
             SET out_time = ?, out_lat = ?, out_long = ?
             WHERE id = ? AND out_time IS NULL",
        )
        .bind(out_time)
        .bind(out_location.lat)
        .bind(out_location.long)
        .bind(record_id)
        .execute(&self.pool)
        .await?;
        Ok(done.rows_affected() > 0)
    }
}

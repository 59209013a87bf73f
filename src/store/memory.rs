//! In-memory store implementations backing the integration tests and
//! local development without a MySQL instance. Writes take the lock for
//! their full read-check-write span, so the open-record guarantee holds
//! under concurrent callers just like the SQL conditional insert.

use crate::error::ApiError;
use crate::model::account::{Account, ApprovalStatus, NewAccount};
use crate::model::attendance::{AttendanceRecord, Location, NewAttendance};
use crate::store::{AccountStore, AttendanceStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryAccountStore {
    inner: Mutex<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<Account>, ApiError> {
        let accounts = self.inner.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError> {
        let accounts = self.inner.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_approved_non_admin(&self) -> Result<Vec<Account>, ApiError> {
        let accounts = self.inner.lock().unwrap();
        Ok(accounts
            .iter()
            .filter(|a| a.status == ApprovalStatus::Approved && !a.is_admin)
            .cloned()
            .collect())
    }

    async fn find_non_admin(&self) -> Result<Vec<Account>, ApiError> {
        let accounts = self.inner.lock().unwrap();
        Ok(accounts.iter().filter(|a| !a.is_admin).cloned().collect())
    }

    async fn insert(&self, new: NewAccount) -> Result<u64, ApiError> {
        let mut accounts = self.inner.lock().unwrap();
        if accounts.iter().any(|a| a.email == new.email) {
            return Err(ApiError::Conflict("Email already in use.".into()));
        }
        let id = accounts.len() as u64 + 1;
        accounts.push(Account {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            password: new.password,
            is_admin: new.is_admin,
            status: new.status,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn set_status(&self, id: u64, status: ApprovalStatus) -> Result<bool, ApiError> {
        let mut accounts = self.inner.lock().unwrap();
        match accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                account.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryAttendanceStore {
    inner: Mutex<Vec<AttendanceRecord>>,
}

impl MemoryAttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(records: &mut Vec<AttendanceRecord>, new: &NewAttendance) -> u64 {
        let id = records.len() as u64 + 1;
        records.push(AttendanceRecord {
            id,
            account_id: new.account_id,
            in_time: new.in_time,
            in_lat: new.in_location.lat,
            in_long: new.in_location.long,
            out_time: new.out_time,
            out_lat: new.out_location.map(|l| l.lat),
            out_long: new.out_location.map(|l| l.long),
            reason: new.reason,
            description: new.description.clone(),
        });
        id
    }
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn find_most_recent(
        &self,
        account_id: u64,
    ) -> Result<Option<AttendanceRecord>, ApiError> {
        let records = self.inner.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.account_id == account_id)
            .max_by_key(|r| (r.in_time, r.id))
            .cloned())
    }

    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let records = self.inner.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.in_time >= start && r.in_time < end)
            .cloned()
            .collect())
    }

    async fn insert_if_no_open_record(&self, new: &NewAttendance) -> Result<bool, ApiError> {
        let mut records = self.inner.lock().unwrap();
        if records
            .iter()
            .any(|r| r.account_id == new.account_id && r.out_time.is_none())
        {
            return Ok(false);
        }
        Self::push(&mut records, new);
        Ok(true)
    }

    async fn insert(&self, new: &NewAttendance) -> Result<u64, ApiError> {
        let mut records = self.inner.lock().unwrap();
        Ok(Self::push(&mut records, new))
    }

    async fn complete(
        &self,
        record_id: u64,
        out_time: DateTime<Utc>,
        out_location: Location,
    ) -> Result<bool, ApiError> {
        let mut records = self.inner.lock().unwrap();
        match records
            .iter_mut()
            .find(|r| r.id == record_id && r.out_time.is_none())
        {
            Some(record) => {
                record.out_time = Some(out_time);
                record.out_lat = Some(out_location.lat);
                record.out_long = Some(out_location.long);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

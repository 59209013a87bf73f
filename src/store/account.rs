use crate::error::ApiError;
use crate::model::account::{Account, ApprovalStatus, NewAccount};
use async_trait::async_trait;
use sqlx::MySqlPool;

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, email, password, is_admin, status, created_at";

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Result<Option<Account>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError>;
    /// Roster used by the monthly report: approved, non-admin accounts.
    async fn find_approved_non_admin(&self) -> Result<Vec<Account>, ApiError>;
    /// All non-admin accounts regardless of status (admin approval list).
    async fn find_non_admin(&self) -> Result<Vec<Account>, ApiError>;
    async fn insert(&self, new: NewAccount) -> Result<u64, ApiError>;
    /// Returns false when the account does not exist.
    async fn set_status(&self, id: u64, status: ApprovalStatus) -> Result<bool, ApiError>;
}

pub struct MySqlAccountStore {
    pool: MySqlPool,
}

impl MySqlAccountStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for MySqlAccountStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<Account>, ApiError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn find_approved_non_admin(&self) -> Result<Vec<Account>, ApiError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts
             WHERE status = 'approved' AND is_admin = FALSE
             ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    async fn find_non_admin(&self) -> Result<Vec<Account>, ApiError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE is_admin = FALSE ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    async fn insert(&self, new: NewAccount) -> Result<u64, ApiError> {
        let result = sqlx::query(
            "INSERT INTO accounts (first_name, last_name, email, password, is_admin, status)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.password)
        .bind(new.is_admin)
        .bind(new.status)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_id()),
            Err(e) => {
                // Unique index on email; a raced duplicate surfaces here
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some("23000") {
                        return Err(ApiError::Conflict("Email already in use.".into()));
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn set_status(&self, id: u64, status: ApprovalStatus) -> Result<bool, ApiError> {
        let done = sqlx::query("UPDATE accounts SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}

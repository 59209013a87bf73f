use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Registration leaves an account pending until an admin approves it.
/// Rejected accounts are kept, never deleted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_admin: bool,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `AccountStore::insert`. Registration always passes
/// `is_admin: false` and `status: Pending`; test fixtures seed other shapes.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
    pub status: ApprovalStatus,
}

/// Projection returned by the admin account listing.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": 7,
    "first_name": "Zidni",
    "last_name": "Imani",
    "email": "zidni.imani@example.com",
    "status": "pending",
    "created_at": "2026-08-01"
}))]
pub struct AccountSummary {
    #[schema(example = 7)]
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: ApprovalStatus,
    /// Creation date, `YYYY-MM-DD`
    #[schema(example = "2026-08-01")]
    pub created_at: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            status: account.status,
            created_at: account.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

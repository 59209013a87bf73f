use serde::{Deserialize, Serialize};

/// Claims carried by an access token. `is_admin` is snapshotted at issue
/// time; the renewal middleware re-reads it from the store when minting a
/// replacement token so a stale flag never survives a refresh.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub id: u64,
    pub is_admin: bool,
    pub exp: usize,
    pub jti: String,
}

/// Refresh tokens carry only the account id and have no expiry set.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub id: u64,
}

#[derive(Deserialize)]
pub struct RegisterReq {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{AccessClaims, RefreshClaims};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

/// Expiry is the only verification failure the renewal middleware treats
/// differently, so it gets its own variant.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    Invalid,
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0) as usize
}

pub fn generate_access_token(
    id: u64,
    is_admin: bool,
    secret: &str,
    ttl: usize,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AccessClaims {
        id,
        is_admin,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Refresh tokens carry only the account id, with no expiry claim.
pub fn generate_refresh_token(
    id: u64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = RefreshClaims { id };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<AccessClaims, TokenError> {
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

pub fn verify_refresh_token(token: &str, secret: &str) -> Result<RefreshClaims, TokenError> {
    let mut validation = Validation::default();
    validation.validate_exp = false;
    validation.required_spec_claims = Default::default();

    decode::<RefreshClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
}

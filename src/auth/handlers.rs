use crate::{
    auth::{
        jwt::{generate_access_token, generate_refresh_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    error::ApiError,
    model::account::{ApprovalStatus, NewAccount},
    models::{LoginReq, RegisterReq},
    store::AccountStore,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, info, instrument};

fn validate_name(value: &str, field: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{field} must be specified.")));
    }
    if !value.chars().all(char::is_alphabetic) {
        return Err(ApiError::Validation(format!(
            "{field} has non-alphabetical characters."
        )));
    }
    Ok(value.to_string())
}

fn validate_email(value: &str) -> Result<String, ApiError> {
    let value = value.trim().to_lowercase();
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !well_formed {
        return Err(ApiError::Validation("Email invalid.".into()));
    }
    Ok(value)
}

/// Registration: the account is created pending and stays unusable until
/// an admin approves it.
pub async fn register(
    body: web::Json<RegisterReq>,
    accounts: web::Data<dyn AccountStore>,
) -> Result<HttpResponse, ApiError> {
    let first_name = validate_name(&body.first_name, "First name")?;
    let last_name = validate_name(&body.last_name, "Last name")?;
    let email = validate_email(&body.email)?;
    if body.password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be more than 8 character length.".into(),
        ));
    }

    if accounts.find_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict("Email already in use.".into()));
    }

    let password = hash_password(&body.password)?;
    // The store re-checks email uniqueness; a raced duplicate still
    // surfaces as a conflict.
    let id = accounts
        .insert(NewAccount {
            first_name,
            last_name,
            email,
            password,
            is_admin: false,
            status: ApprovalStatus::Pending,
        })
        .await?;

    info!(account_id = id, "account registered, awaiting approval");
    Ok(HttpResponse::Created().json(json!({
        "message": "Account registered successfully. Waiting for admin approval."
    })))
}

#[instrument(name = "auth_login", skip(body, accounts, config), fields(email = %body.email))]
pub async fn login(
    body: web::Json<LoginReq>,
    accounts: web::Data<dyn AccountStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::Validation("Email and password required.".into()));
    }

    debug!("fetching account");
    let account = accounts
        .find_by_email(&body.email.trim().to_lowercase())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials.".into()))?;

    verify_password(&body.password, &account.password)?;

    if account.status != ApprovalStatus::Approved {
        return Err(ApiError::Forbidden(
            "Account has not been approved by an admin.".into(),
        ));
    }

    let access_token = generate_access_token(
        account.id,
        account.is_admin,
        &config.access_token_secret,
        config.access_token_ttl,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;
    let refresh_token = generate_refresh_token(account.id, &config.refresh_token_secret)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(account_id = account.id, "login successful");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful.",
        "data": {
            "access_token": access_token,
            "refresh_token": refresh_token,
            "account": {
                "id": account.id,
                "first_name": account.first_name,
                "last_name": account.last_name,
                "email": account.email,
                "is_admin": account.is_admin,
            }
        }
    })))
}

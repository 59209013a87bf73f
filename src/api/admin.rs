use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::account::{AccountSummary, ApprovalStatus};
use crate::model::attendance::{AbsenceReason, Location, NewAttendance};
use crate::service::status::AttendanceService;
use crate::store::AccountStore;
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

/// Non-admin accounts with their approval status
#[utoipa::path(
    get,
    path = "/api/v1/admin/accounts",
    responses(
        (status = 200, description = "Account list", body = [AccountSummary]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_accounts(
    auth: AuthUser,
    accounts: web::Data<dyn AccountStore>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;
    let list = accounts.find_non_admin().await?;
    let results: Vec<AccountSummary> = list.iter().map(AccountSummary::from).collect();
    Ok(HttpResponse::Ok().json(json!({
        "message": "List of user retrieved successfully.",
        "results": results,
    })))
}

async fn set_status(
    auth: AuthUser,
    accounts: &dyn AccountStore,
    id: u64,
    status: ApprovalStatus,
    message: &str,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;
    if !accounts.set_status(id, status).await? {
        return Err(ApiError::NotFound("Account not found.".into()));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

/// Approve a pending account
#[utoipa::path(
    put,
    path = "/api/v1/admin/accounts/{id}/approve",
    params(("id" = u64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account approved"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn approve_account(
    auth: AuthUser,
    path: web::Path<u64>,
    accounts: web::Data<dyn AccountStore>,
) -> Result<HttpResponse, ApiError> {
    set_status(
        auth,
        accounts.as_ref(),
        path.into_inner(),
        ApprovalStatus::Approved,
        "Account approved successfully.",
    )
    .await
}

/// Reject a pending account
#[utoipa::path(
    put,
    path = "/api/v1/admin/accounts/{id}/reject",
    params(("id" = u64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account rejected"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reject_account(
    auth: AuthUser,
    path: web::Path<u64>,
    accounts: web::Data<dyn AccountStore>,
) -> Result<HttpResponse, ApiError> {
    set_status(
        auth,
        accounts.as_ref(),
        path.into_inner(),
        ApprovalStatus::Rejected,
        "Account rejected successfully.",
    )
    .await
}

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({
    "account_id": 3,
    "in_time": "2026-05-04T01:00:00Z",
    "in_location": { "lat": -6.175, "long": 106.8286 },
    "out_time": "2026-05-04T10:00:00Z",
    "out_location": { "lat": -6.175, "long": 106.8286 },
    "reason": "sick",
    "description": "Half day, doctor's note on file"
}))]
pub struct CorrectionReq {
    pub account_id: u64,
    #[schema(value_type = String, format = "date-time")]
    pub in_time: DateTime<Utc>,
    pub in_location: Location,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub out_time: Option<DateTime<Utc>>,
    pub out_location: Option<Location>,
    pub reason: Option<AbsenceReason>,
    pub description: Option<String>,
}

/// Admin-entered attendance correction; bypasses geofence and status checks
#[utoipa::path(
    post,
    path = "/api/v1/admin/attendance",
    request_body = CorrectionReq,
    responses(
        (status = 201, description = "Correction recorded"),
        (status = 400, description = "Unpaired out fields or inverted times"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_correction(
    auth: AuthUser,
    body: web::Json<CorrectionReq>,
    accounts: web::Data<dyn AccountStore>,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;
    let body = body.into_inner();

    if accounts.find_by_id(body.account_id).await?.is_none() {
        return Err(ApiError::NotFound("Account not found.".into()));
    }

    let id = service
        .record_correction(NewAttendance {
            account_id: body.account_id,
            in_time: body.in_time,
            in_location: body.in_location,
            out_time: body.out_time,
            out_location: body.out_location,
            reason: body.reason,
            description: body.description,
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Attendance correction recorded successfully.",
        "data": { "id": id },
    })))
}

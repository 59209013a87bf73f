use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::attendance::{AbsenceReason, AttendanceRecord, Location};
use crate::service::status::{AttendanceService, AttendanceStatus};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({ "lat": -6.175, "long": 106.8286 }))]
pub struct CheckReq {
    pub lat: f64,
    pub long: f64,
}

/// Serialized shape of a record wherever one is surfaced; the duration is
/// derived here, never read from storage.
#[derive(Serialize, ToSchema)]
pub struct AttendanceRecordView {
    pub id: u64,
    pub account_id: u64,
    #[schema(value_type = String, format = "date-time")]
    pub in_time: DateTime<Utc>,
    pub in_location: Location,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub out_time: Option<DateTime<Utc>>,
    pub out_location: Option<Location>,
    pub reason: Option<AbsenceReason>,
    pub description: Option<String>,
    #[schema(example = 545)]
    pub work_duration_minutes: Option<i64>,
}

impl From<&AttendanceRecord> for AttendanceRecordView {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            id: record.id,
            account_id: record.account_id,
            in_time: record.in_time,
            in_location: record.in_location(),
            out_time: record.out_time,
            out_location: record.out_location(),
            reason: record.reason,
            description: record.description.clone(),
            work_duration_minutes: record.work_duration_minutes(),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "can_check_in": false,
    "can_check_out": true,
    "last_record": null
}))]
pub struct AttendanceStatusView {
    pub can_check_in: bool,
    pub can_check_out: bool,
    pub last_record: Option<AttendanceRecordView>,
}

impl From<&AttendanceStatus> for AttendanceStatusView {
    fn from(status: &AttendanceStatus) -> Self {
        Self {
            can_check_in: status.can_check_in,
            can_check_out: status.can_check_out,
            last_record: status.last_record.as_ref().map(AttendanceRecordView::from),
        }
    }
}

/// Current check-in/check-out eligibility for the caller
#[utoipa::path(
    get,
    path = "/api/v1/attendance/status",
    responses(
        (status = 200, description = "Attendance status", body = AttendanceStatusView),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_status(
    auth: AuthUser,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, ApiError> {
    let status = service.status(auth.id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance status retrieved successfully.",
        "data": AttendanceStatusView::from(&status),
    })))
}

/// Check-in from within the office geofence
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    request_body = CheckReq,
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully."
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Already checked in, or location rejected"),
        (status = 409, description = "An open record already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    body: web::Json<CheckReq>,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, ApiError> {
    let location = Location {
        lat: body.lat,
        long: body.long,
    };
    service.check_in(auth.id, location).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Checked in successfully." })))
}

/// Check-out, completing today's (or an earlier forgotten) open session
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-out",
    request_body = CheckReq,
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully."
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No open record, or location rejected"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    body: web::Json<CheckReq>,
    service: web::Data<AttendanceService>,
) -> Result<HttpResponse, ApiError> {
    let location = Location {
        lat: body.lat,
        long: body.long,
    };
    let record = service.check_out(auth.id, location).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Checked out successfully.",
        "data": AttendanceRecordView::from(&record),
    })))
}

use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::report::{AbsenceReport, MonthlyReportRow};
use crate::service::report::ReportService;
use crate::utils::calendar::org_today;
use actix_web::{HttpResponse, web};
use chrono::Datelike;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
pub struct PeriodQuery {
    /// Report year, defaults to the current year (org timezone)
    pub year: Option<i32>,
    /// Report month 1-12, defaults to the current month (org timezone)
    pub month: Option<u32>,
}

impl PeriodQuery {
    /// Range-checks before any store access; missing parts default to the
    /// current organizational-timezone period.
    pub fn resolve(&self) -> Result<(i32, u32), ApiError> {
        let today = org_today();
        let year = self.year.unwrap_or_else(|| today.year());
        let month = self.month.unwrap_or_else(|| today.month());
        if !(1..=10000).contains(&year) {
            return Err(ApiError::Validation("year must be between 1 and 10000.".into()));
        }
        if !(1..=12).contains(&month) {
            return Err(ApiError::Validation("month must be between 1 and 12.".into()));
        }
        Ok((year, month))
    }
}

/// Monthly attendance report: one row per (approved employee, business day)
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Report rows", body = [MonthlyReportRow]),
        (status = 400, description = "Invalid or future period"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn monthly_report(
    auth: AuthUser,
    query: web::Query<PeriodQuery>,
    service: web::Data<ReportService>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;
    let (year, month) = query.resolve()?;
    let rows = service.monthly_report(year, month).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Monthly report retrieved successfully.",
        "results": &*rows,
    })))
}

/// Employees below the attendance tolerance, with their absent days
#[utoipa::path(
    get,
    path = "/api/v1/reports/absences",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Absence reports", body = [AbsenceReport]),
        (status = 400, description = "Invalid or future period"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn absences(
    auth: AuthUser,
    query: web::Query<PeriodQuery>,
    service: web::Data<ReportService>,
) -> Result<HttpResponse, ApiError> {
    auth.require_admin()?;
    let (year, month) = query.resolve()?;
    let reports = service.absences(year, month).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Absence report retrieved successfully.",
        "results": reports,
    })))
}

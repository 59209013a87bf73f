use crate::api::admin::CorrectionReq;
use crate::api::attendance::{AttendanceRecordView, AttendanceStatusView, CheckReq};
use crate::model::account::{AccountSummary, ApprovalStatus};
use crate::model::attendance::{AbsenceReason, Location};
use crate::model::report::{AbsenceReport, MonthlyReportRow};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Presensi API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Service

Registered employees check in and out from within the office geofence;
admins approve accounts and review monthly attendance and absences.

### Key Features
- **Attendance** — geofenced check-in/check-out with per-day session rules
- **Reports** — monthly per-employee, per-business-day report with caching
- **Absences** — below-tolerance employees with their missed days
- **Accounts** — registration, admin approval, corrections

### Security
Protected endpoints use **JWT Bearer authentication**. When the access
token has expired, send the refresh token in the `refresh_token` header;
a replacement access token is returned in the `new_access_token` response
header.

### Response Format
JSON envelopes: `{"message", "data"}` for single objects,
`{"message", "results"}` for lists.
"#,
    ),
    paths(
        crate::api::attendance::get_status,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,

        crate::api::report::monthly_report,
        crate::api::report::absences,

        crate::api::admin::list_accounts,
        crate::api::admin::approve_account,
        crate::api::admin::reject_account,
        crate::api::admin::create_correction,
    ),
    components(
        schemas(
            CheckReq,
            AttendanceRecordView,
            AttendanceStatusView,
            MonthlyReportRow,
            AbsenceReport,
            AccountSummary,
            ApprovalStatus,
            AbsenceReason,
            Location,
            CorrectionReq,
        )
    ),
    tags(
        (name = "Attendance", description = "Check-in / check-out APIs"),
        (name = "Reports", description = "Monthly report and absence APIs"),
        (name = "Admin", description = "Account approval and correction APIs"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use common::{OFFICE, TestApp, bearer, get, post};
use presensi::model::account::ApprovalStatus;

// May 2026 has 21 business days and is safely in the past for these tests.
const MAY: &str = "/api/v1/reports/monthly?year=2026&month=5";

#[actix_web::test]
async fn reports_are_admin_only() {
    let state = TestApp::new();
    let id = state
        .seed_account("plain", false, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;
    let token = state.access_token(id, false);

    for uri in [MAY, "/api/v1/reports/absences?year=2026&month=5"] {
        let resp = test::call_service(&app, bearer(get(uri), &token).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "This user doesn't have admin privilege.");
    }
}

#[actix_web::test]
async fn monthly_report_has_one_row_per_employee_and_business_day() {
    let state = TestApp::new();
    let admin_id = state
        .seed_account("chief", true, ApprovalStatus::Approved)
        .await;
    state
        .seed_account("alpha", false, ApprovalStatus::Approved)
        .await;
    state
        .seed_account("beta", false, ApprovalStatus::Approved)
        .await;
    // Neither pending accounts nor admins belong in the roster.
    state
        .seed_account("waiting", false, ApprovalStatus::Pending)
        .await;
    let app = test::init_service(state.app()).await;
    let token = state.access_token(admin_id, true);

    let resp = test::call_service(&app, bearer(get(MAY), &token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let rows = body["results"].as_array().unwrap();
    assert_eq!(rows.len(), 2 * 21);
    assert_eq!(rows[0]["date"], "2026-05-01");
    assert!(rows[0]["in_time"].is_null());
    assert!(rows[0]["work_duration_minutes"].is_null());
}

#[actix_web::test]
async fn correction_shows_up_in_the_monthly_report() {
    let state = TestApp::new();
    let admin_id = state
        .seed_account("chief", true, ApprovalStatus::Approved)
        .await;
    let worker_id = state
        .seed_account("gamma", false, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;
    let token = state.access_token(admin_id, true);

    // 02:00Z..11:00Z is a 9h session on Monday 2026-05-04 office time.
    let resp = test::call_service(
        &app,
        bearer(post("/api/v1/admin/attendance"), &token)
            .set_json(json!({
                "account_id": worker_id,
                "in_time": "2026-05-04T02:00:00Z",
                "in_location": { "lat": OFFICE.lat, "long": OFFICE.long },
                "out_time": "2026-05-04T11:00:00Z",
                "out_location": { "lat": OFFICE.lat, "long": OFFICE.long },
                "description": "Forgot to check in",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, bearer(get(MAY), &token).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let rows = body["results"].as_array().unwrap();
    assert_eq!(rows.len(), 21);

    let matched = rows
        .iter()
        .find(|r| r["date"] == "2026-05-04")
        .expect("row for the corrected day");
    assert_eq!(matched["in_time"], "2026-05-04T02:00:00Z");
    assert_eq!(matched["work_duration_minutes"], 540);

    let unmatched = rows
        .iter()
        .find(|r| r["date"] == "2026-05-05")
        .expect("row for an ordinary day");
    assert!(unmatched["in_time"].is_null());
    assert!(unmatched["work_duration_minutes"].is_null());
}

#[actix_web::test]
async fn absences_list_employees_below_tolerance() {
    let state = TestApp::new();
    let admin_id = state
        .seed_account("chief", true, ApprovalStatus::Approved)
        .await;
    let absent_id = state
        .seed_account("ghost", false, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;
    let token = state.access_token(admin_id, true);

    let resp = test::call_service(
        &app,
        bearer(get("/api/v1/reports/absences?year=2026&month=5"), &token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let reports = body["results"].as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["account_id"], absent_id);
    assert_eq!(reports[0]["business_days"], 21);
    assert_eq!(reports[0]["attended_days"], 0);
    assert_eq!(reports[0]["absent_days"].as_array().unwrap().len(), 21);
}

#[actix_web::test]
async fn future_period_is_rejected() {
    let state = TestApp::new();
    let admin_id = state
        .seed_account("chief", true, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;
    let token = state.access_token(admin_id, true);

    let resp = test::call_service(
        &app,
        bearer(get("/api/v1/reports/monthly?year=9999&month=1"), &token).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Requested date not applicable.");
}

#[actix_web::test]
async fn out_of_range_period_params_are_rejected() {
    let state = TestApp::new();
    let admin_id = state
        .seed_account("chief", true, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;
    let token = state.access_token(admin_id, true);

    for uri in [
        "/api/v1/reports/monthly?year=2026&month=13",
        "/api/v1/reports/monthly?year=0&month=5",
        "/api/v1/reports/monthly?year=2026&month=0",
    ] {
        let resp = test::call_service(&app, bearer(get(uri), &token).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use common::{TestApp, bearer, get};
use presensi::auth::jwt::verify_access_token;
use presensi::auth::middleware::{NEW_ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use presensi::model::account::ApprovalStatus;

#[actix_web::test]
async fn missing_authorization_header_is_rejected() {
    let state = TestApp::new();
    let app = test::init_service(state.app()).await;

    let resp = test::call_service(&app, get("/api/v1/attendance/status").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "'Authorization' header not found.");
}

#[actix_web::test]
async fn malformed_authorization_header_is_rejected() {
    let state = TestApp::new();
    let app = test::init_service(state.app()).await;

    let req = get("/api/v1/attendance/status")
        .insert_header(("Authorization", "Token abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "'Authorization' header not found.");
}

#[actix_web::test]
async fn garbage_access_token_is_rejected() {
    let state = TestApp::new();
    let app = test::init_service(state.app()).await;

    let req = bearer(get("/api/v1/attendance/status"), "not.a.jwt").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid access token.");
}

#[actix_web::test]
async fn valid_access_token_passes_through() {
    let state = TestApp::new();
    let id = state
        .seed_account("valid", false, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;

    let token = state.access_token(id, false);
    let req = bearer(get("/api/v1/attendance/status"), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key(NEW_ACCESS_TOKEN_HEADER));
}

#[actix_web::test]
async fn expired_token_without_refresh_header_is_rejected() {
    let state = TestApp::new();
    let id = state
        .seed_account("norefresh", false, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;

    let token = state.expired_access_token(id, false);
    let req = bearer(get("/api/v1/attendance/status"), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Access token expired. Refresh token not found inside the headers."
    );
}

#[actix_web::test]
async fn expired_token_with_bad_refresh_token_is_rejected() {
    let state = TestApp::new();
    let id = state
        .seed_account("badrefresh", false, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;

    let token = state.expired_access_token(id, false);
    let req = bearer(get("/api/v1/attendance/status"), &token)
        .insert_header((REFRESH_TOKEN_HEADER, "not-a-refresh-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Access token expired. refreshing access token failed."
    );
}

#[actix_web::test]
async fn expired_token_is_renewed_via_refresh_token() {
    let state = TestApp::new();
    // Seeded as admin, but the expired token still claims is_admin=false:
    // the renewed token must carry the store's current flag.
    let id = state
        .seed_account("renewed", true, ApprovalStatus::Approved)
        .await;
    let app = test::init_service(state.app()).await;

    let expired = state.expired_access_token(id, false);
    let refresh = state.refresh_token(id);
    let req = bearer(get("/api/v1/attendance/status"), &expired)
        .insert_header((REFRESH_TOKEN_HEADER, refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let renewed = resp
        .headers()
        .get(NEW_ACCESS_TOKEN_HEADER)
        .expect("renewed token header")
        .to_str()
        .unwrap();
    let claims = verify_access_token(renewed, &state.config.access_token_secret)
        .expect("renewed token should verify");
    assert_eq!(claims.id, id);
    assert!(claims.is_admin);
}

#[actix_web::test]
async fn refresh_token_for_missing_account_is_gone() {
    let state = TestApp::new();
    let app = test::init_service(state.app()).await;

    let expired = state.expired_access_token(999, false);
    let refresh = state.refresh_token(999);
    let req = bearer(get("/api/v1/attendance/status"), &expired)
        .insert_header((REFRESH_TOKEN_HEADER, refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Account is no longer exist in the database.");
}

// Not every test binary uses every helper.
#![allow(dead_code)]

use actix_web::web::Data;
use actix_web::{
    App,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    test::TestRequest,
};
use std::net::SocketAddr;
use std::sync::Arc;

use presensi::auth::jwt::generate_access_token;
use presensi::auth::password::hash_password;
use presensi::config::Config;
use presensi::model::account::{ApprovalStatus, NewAccount};
use presensi::model::attendance::Location;
use presensi::routes;
use presensi::service::report::ReportService;
use presensi::service::status::AttendanceService;
use presensi::store::memory::{MemoryAccountStore, MemoryAttendanceStore};
use presensi::store::{AccountStore, AttendanceStore};
use presensi::utils::report_cache::ReportCache;

pub const OFFICE: Location = Location {
    lat: -6.175,
    long: 106.8286,
};

pub const TEST_PASSWORD: &str = "hunter2hunter2";

/// Full application over in-memory stores; each test gets its own.
pub struct TestApp {
    pub config: Config,
    pub accounts: Arc<MemoryAccountStore>,
    pub attendance: Arc<MemoryAttendanceStore>,
    pub cache: ReportCache,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config {
            database_url: String::new(),
            server_addr: "127.0.0.1:0".to_string(),
            access_token_secret: "access-test-secret".to_string(),
            refresh_token_secret: "refresh-test-secret".to_string(),
            access_token_ttl: 86400,
            office_lat: OFFICE.lat,
            office_long: OFFICE.long,
            geofence_radius_m: 100.0,
            report_cache_ttl: 3600,
            absence_tolerance_days: 3,
            rate_login_per_min: 1000,
            rate_register_per_min: 1000,
            rate_protected_per_min: 1000,
            api_prefix: "/api/v1".to_string(),
        };
        Self {
            config,
            accounts: Arc::new(MemoryAccountStore::new()),
            attendance: Arc::new(MemoryAttendanceStore::new()),
            cache: ReportCache::new(3600),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let accounts: Arc<dyn AccountStore> = self.accounts.clone();
        let attendance: Arc<dyn AttendanceStore> = self.attendance.clone();
        let attendance_service = AttendanceService::new(
            attendance.clone(),
            self.cache.clone(),
            OFFICE,
            self.config.geofence_radius_m,
        );
        let report_service = ReportService::new(
            accounts.clone(),
            attendance,
            self.cache.clone(),
            self.config.absence_tolerance_days,
        );

        App::new()
            .app_data(Data::new(self.config.clone()))
            .app_data(Data::from(accounts))
            .app_data(Data::new(attendance_service))
            .app_data(Data::new(report_service))
            .configure(|cfg| routes::configure(cfg, self.config.clone()))
    }

    pub async fn seed_account(
        &self,
        name: &str,
        is_admin: bool,
        status: ApprovalStatus,
    ) -> u64 {
        self.accounts
            .insert(NewAccount {
                first_name: name.to_string(),
                last_name: "Tester".to_string(),
                email: format!("{name}@example.com"),
                password: hash_password(TEST_PASSWORD).expect("hashing test password"),
                is_admin,
                status,
            })
            .await
            .expect("seeding account")
    }

    pub fn access_token(&self, id: u64, is_admin: bool) -> String {
        generate_access_token(id, is_admin, &self.config.access_token_secret, 86400)
            .expect("signing test token")
    }

    /// Token that expired an hour ago, past the verifier's leeway.
    pub fn expired_access_token(&self, id: u64, is_admin: bool) -> String {
        use jsonwebtoken::{EncodingKey, Header, encode};
        use serde_json::json;
        use std::time::{SystemTime, UNIX_EPOCH};

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = json!({
            "id": id,
            "is_admin": is_admin,
            "exp": now - 3600,
            "jti": "expired-test-token",
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.access_token_secret.as_bytes()),
        )
        .expect("signing expired test token")
    }

    pub fn refresh_token(&self, id: u64) -> String {
        presensi::auth::jwt::generate_refresh_token(id, &self.config.refresh_token_secret)
            .expect("signing test refresh token")
    }
}

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

/// The rate limiter keys on peer IP, so every test request needs one.
pub fn get(path: &str) -> TestRequest {
    TestRequest::get().uri(path).peer_addr(peer())
}

pub fn post(path: &str) -> TestRequest {
    TestRequest::post().uri(path).peer_addr(peer())
}

pub fn put(path: &str) -> TestRequest {
    TestRequest::put().uri(path).peer_addr(peer())
}

pub fn bearer(req: TestRequest, token: &str) -> TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}

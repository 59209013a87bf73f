use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use std::sync::Arc;

use presensi::config::Config;
use presensi::db::init_db;
use presensi::docs::ApiDoc;
use presensi::model::attendance::Location;
use presensi::routes;
use presensi::service::report::ReportService;
use presensi::service::status::AttendanceService;
use presensi::store::{AccountStore, AttendanceStore, MySqlAccountStore, MySqlAttendanceStore};
use presensi::utils::report_cache::ReportCache;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Presensi attendance service"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await;

    let accounts: Arc<dyn AccountStore> = Arc::new(MySqlAccountStore::new(pool.clone()));
    let attendance: Arc<dyn AttendanceStore> = Arc::new(MySqlAttendanceStore::new(pool));

    let office = Location {
        lat: config.office_lat,
        long: config.office_long,
    };
    let report_cache = ReportCache::new(config.report_cache_ttl);
    let attendance_service = AttendanceService::new(
        attendance.clone(),
        report_cache.clone(),
        office,
        config.geofence_radius_m,
    );
    let report_service = ReportService::new(
        accounts.clone(),
        attendance,
        report_cache,
        config.absence_tolerance_days,
    );

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(config.clone()))
            .app_data(Data::from(accounts.clone()))
            .app_data(Data::new(attendance_service.clone()))
            .app_data(Data::new(report_service.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}

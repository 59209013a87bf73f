use crate::{
    api::{admin, attendance, report},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/v1/accounts")
            .service(
                web::resource("")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/auth")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            ),
    );

    // Protected routes: token renewal middleware, then rate limiting
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/status").route(web::get().to(attendance::get_status)),
                    )
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/check-out").route(web::post().to(attendance::check_out)),
                    ),
            )
            .service(
                web::scope("/reports")
                    .service(
                        web::resource("/monthly").route(web::get().to(report::monthly_report)),
                    )
                    .service(web::resource("/absences").route(web::get().to(report::absences))),
            )
            .service(
                web::scope("/admin")
                    .service(
                        web::resource("/accounts").route(web::get().to(admin::list_accounts)),
                    )
                    .service(
                        web::resource("/accounts/{id}/approve")
                            .route(web::put().to(admin::approve_account)),
                    )
                    .service(
                        web::resource("/accounts/{id}/reject")
                            .route(web::put().to(admin::reject_account)),
                    )
                    .service(
                        web::resource("/attendance")
                            .route(web::post().to(admin::create_correction)),
                    ),
            ),
    );
}

// LOGIN
//  ├─ access_token (1 day, {id, is_admin})
//  └─ refresh_token (no expiry, {id})

// API REQUEST
//  └─ Authorization: Bearer access_token
//     (refresh_token header alongside, used only when access expired)

// ACCESS EXPIRED
//  └─ middleware verifies refresh_token, re-reads is_admin from the store,
//     and returns the replacement token in the new_access_token header

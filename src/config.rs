use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    pub access_token_secret: String,
    pub refresh_token_secret: String,
    /// Access token lifetime in seconds; refresh tokens never expire.
    pub access_token_ttl: usize,

    // Geofence policy
    pub office_lat: f64,
    pub office_long: f64,
    pub geofence_radius_m: f64,

    // Report policy
    pub report_cache_ttl: u64,
    pub absence_tolerance_days: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: &str) -> T
where
    T::Err: std::fmt::Debug,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|e| panic!("{key} must parse: {e:?}"))
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            access_token_secret: env::var("ACCESS_TOKEN_SECRET")
                .expect("ACCESS_TOKEN_SECRET must be set"),
            refresh_token_secret: env::var("REFRESH_TOKEN_SECRET")
                .expect("REFRESH_TOKEN_SECRET must be set"),
            access_token_ttl: env_or("ACCESS_TOKEN_TTL", "86400"), // 1 day

            office_lat: env_or("OFFICE_LAT", "-6.175"),
            office_long: env_or("OFFICE_LONG", "106.8286"),
            geofence_radius_m: env_or("GEOFENCE_RADIUS_M", "100"),

            report_cache_ttl: env_or("REPORT_CACHE_TTL", "3600"),
            absence_tolerance_days: env_or("ABSENCE_TOLERANCE_DAYS", "3"),

            rate_login_per_min: env_or("RATE_LOGIN_PER_MIN", "60"),
            rate_register_per_min: env_or("RATE_REGISTER_PER_MIN", "30"),
            rate_protected_per_min: env_or("RATE_PROTECTED_PER_MIN", "1000"),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
        }
    }
}

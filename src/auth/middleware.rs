use crate::auth::auth::AuthUser;
use crate::auth::jwt::{TokenError, generate_access_token, verify_access_token, verify_refresh_token};
use crate::config::Config;
use crate::store::AccountStore;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;

/// Response header carrying a re-issued access token after a refresh.
pub const NEW_ACCESS_TOKEN_HEADER: &str = "new_access_token";
/// Request header the client sends its refresh token in.
pub const REFRESH_TOKEN_HEADER: &str = "refresh_token";

fn unauthorized(req: ServiceRequest, message: &str) -> Result<ServiceResponse<BoxBody>, Error> {
    let resp = HttpResponse::Unauthorized().json(json!({ "message": message }));
    Ok(req.into_response(resp.map_into_boxed_body()))
}

/// Two-phase authentication: verify the access token, and when it failed
/// specifically due to expiry, fall back to the refresh token and re-issue
/// a fresh access token on the response. The re-issued token carries the
/// account's current admin flag from the store, not the stale claim.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?
        .clone();

    let header_value = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return unauthorized(req, "'Authorization' header not found."),
    };

    let access_token = match header_value.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return unauthorized(req, "'Authorization' header not found."),
    };

    match verify_access_token(access_token, &config.access_token_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser {
                id: claims.id,
                is_admin: claims.is_admin,
            });
            next.call(req).await
        }
        Err(TokenError::Invalid) => unauthorized(req, "Invalid access token."),
        Err(TokenError::Expired) => refresh_and_continue(req, next, &config).await,
    }
}

async fn refresh_and_continue(
    req: ServiceRequest,
    next: Next<BoxBody>,
    config: &Config,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let refresh_token = match req
        .headers()
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        Some(t) => t.to_owned(),
        None => {
            return unauthorized(
                req,
                "Access token expired. Refresh token not found inside the headers.",
            );
        }
    };

    let claims = match verify_refresh_token(&refresh_token, &config.refresh_token_secret) {
        Ok(c) => c,
        Err(_) => {
            return unauthorized(req, "Access token expired. refreshing access token failed.");
        }
    };

    let accounts = req
        .app_data::<Data<dyn AccountStore>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Account store missing"))?
        .clone();

    // The refresh token may outlive the account it references.
    let account = match accounts.find_by_id(claims.id).await? {
        Some(account) => account,
        None => {
            let resp = HttpResponse::Gone()
                .json(json!({ "message": "Account is no longer exist in the database." }));
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    let new_access_token = generate_access_token(
        account.id,
        account.is_admin,
        &config.access_token_secret,
        config.access_token_ttl,
    )
    .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;

    req.extensions_mut().insert(AuthUser {
        id: account.id,
        is_admin: account.is_admin,
    });

    let mut res = next.call(req).await?;
    let header_value = HeaderValue::from_str(&new_access_token)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;
    res.headers_mut()
        .insert(HeaderName::from_static(NEW_ACCESS_TOKEN_HEADER), header_value);
    Ok(res)
}

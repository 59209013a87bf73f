use crate::error::ApiError;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

/// Authenticated identity, inserted into request extensions by the token
/// renewal middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: u64,
    pub is_admin: bool,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthUser>().copied();
        ready(match user {
            Some(user) => Ok(user),
            // Only reachable when a handler is mounted outside the
            // authenticated scope.
            None => Err(ApiError::Unauthorized("Missing authentication.".into()).into()),
        })
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "This user doesn't have admin privilege.".into(),
            ))
        }
    }
}

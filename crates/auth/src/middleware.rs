use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use sgs_core::ID;
use sgs_dto::ApiError;

/// Extractor for authenticated requests (the access-control gate).
///
/// Pulls the bearer token from the `Authorization` header and validates
/// signature and expiry. Verification is stateless — no store lookup —
/// so downstream handlers trust the attached identity as-is.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn user(&self) -> ID<Account> {
        self.0.user()
    }
}

fn authenticate(req: &HttpRequest) -> Result<Auth, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::NoToken)?;
    let token = header.strip_prefix("Bearer ").ok_or(ApiError::NoToken)?;
    let crypto = req
        .app_data::<web::Data<Crypto>>()
        .ok_or(ApiError::Internal("token service not configured"))?;
    let claims = crypto.decode(token).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::TokenExpired,
        _ => ApiError::InvalidToken,
    })?;
    Ok(Auth(claims))
}

impl FromRequest for Auth {
    type Error = ApiError;
    type Future = std::future::Ready<Result<Self, ApiError>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(authenticate(req))
    }
}

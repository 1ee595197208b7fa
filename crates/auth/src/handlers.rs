use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use sgs_core::ID;
use sgs_core::Unique;
use sgs_dto::ApiError;
use sgs_dto::Envelope;
use std::sync::Arc;
use tokio_postgres::Client;

/// POST /api/auth/signup
///
/// The pre-check on email existence gives the friendly conflict answer;
/// the unique constraint on the column settles concurrent races, with the
/// loser mapped to the same conflict.
pub async fn signup(
    db: web::Data<Arc<Client>>,
    tokens: web::Data<Crypto>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let signup = req.validate().map_err(ApiError::Validation)?;
    if db.exists(&signup.email).await? {
        return Err(ApiError::UserExists);
    }
    let hashword =
        password::hash(&signup.password).map_err(|_| ApiError::Internal("password hashing"))?;
    let account = Account::new(ID::default(), signup.name, signup.email, signup.age_group);
    db.create(&account, &hashword).await.map_err(|e| {
        if ApiError::is_unique_violation(&e) {
            ApiError::UserExists
        } else {
            ApiError::from(e)
        }
    })?;
    let token = tokens
        .encode(&Claims::new(account.id()))
        .map_err(|_| ApiError::Internal("token encoding"))?;
    log::info!("new account registered: {}", account.id());
    Ok(HttpResponse::Created().json(
        Envelope::data(AuthResponse {
            token,
            user: UserView::from(&account),
        })
        .message("User registered successfully"),
    ))
}

/// POST /api/auth/signin
///
/// Unknown email and wrong password produce byte-identical failures so
/// account existence cannot be probed.
pub async fn signin(
    db: web::Data<Arc<Client>>,
    tokens: web::Data<Crypto>,
    req: web::Json<SigninRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = req.validate().map_err(ApiError::Validation)?;
    let (account, hashword) = db
        .lookup(&email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;
    if !password::verify(&req.password, &hashword) {
        return Err(ApiError::InvalidCredentials);
    }
    let account = account.touched();
    db.touch(account.id()).await?;
    let token = tokens
        .encode(&Claims::new(account.id()))
        .map_err(|_| ApiError::Internal("token encoding"))?;
    Ok(HttpResponse::Ok().json(
        Envelope::data(AuthResponse {
            token,
            user: UserView::from(&account),
        })
        .message("Login successful"),
    ))
}

/// GET /api/auth/verify
///
/// A signature-valid token whose subject no longer resolves is reported
/// as an invalid token, not a missing resource.
pub async fn verify(
    db: web::Data<Arc<Client>>,
    auth: Auth,
) -> Result<HttpResponse, ApiError> {
    let account = db
        .load(auth.user())
        .await?
        .ok_or(ApiError::InvalidToken)?;
    Ok(HttpResponse::Ok().json(
        Envelope::data(serde_json::json!({ "user": UserView::from(&account) }))
            .message("Token is valid"),
    ))
}

use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use chrono::Utc;
use sgs_auth::Auth;
use sgs_core::Level;
use sgs_dto::ApiError;
use sgs_dto::Envelope;
use sgs_records::ProgressRecord;
use std::sync::Arc;
use tokio_postgres::Client;

/// GET /api/progress
pub async fn all(db: web::Data<Arc<Client>>, auth: Auth) -> Result<HttpResponse, ApiError> {
    let records = db.all(auth.user()).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(records)))
}

/// PUT /api/progress/{lesson}/{level}
///
/// Whole-row overwrite keyed by the path; the caller's identity comes
/// from the token, never the body.
pub async fn save(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<(String, String)>,
    req: web::Json<SaveProgressRequest>,
) -> Result<HttpResponse, ApiError> {
    let (lesson, level) = path.into_inner();
    let level: Level = level.parse().map_err(|_| ApiError::InvalidLevel)?;
    let update = req.validate().map_err(ApiError::Validation)?;
    let record = ProgressRecord::new(
        auth.user(),
        lesson,
        level,
        update.signs,
        update.total_score,
        update.time_spent,
        Utc::now(),
    );
    db.upsert(&record).await?;
    db.bump(
        auth.user(),
        record.signs().len() as i32,
        record.time_spent(),
    )
    .await?;
    log::info!(
        "progress saved: user {} lesson {} at {}",
        auth.user(),
        record.lesson(),
        record.level(),
    );
    Ok(HttpResponse::Ok().json(Envelope::data(record).message("Progress saved successfully")))
}

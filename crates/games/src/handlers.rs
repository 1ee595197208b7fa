use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use chrono::Utc;
use sgs_auth::Auth;
use sgs_core::ID;
use sgs_dto::ApiError;
use sgs_dto::Envelope;
use sgs_dto::Pager;
use sgs_dto::Pagination;
use std::sync::Arc;
use tokio_postgres::Client;

/// POST /api/games/scores
///
/// The event insert is the source of truth; the two aggregate upserts
/// that follow are each atomic but not transactional with it.
pub async fn submit(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    req: web::Json<SubmitScoreRequest>,
) -> Result<HttpResponse, ApiError> {
    let submission = req.validate().map_err(ApiError::Validation)?;
    let record = sgs_records::ScoreRecord::new(
        ID::default(),
        auth.user(),
        submission.game_type,
        submission.score,
        submission.level,
        submission.time_taken,
        submission.accuracy,
        submission.metadata,
        Utc::now(),
    );
    db.create(&record).await?;
    let tally = db
        .add(auth.user(), record.game_type(), record.score() as i64)
        .await?;
    let best = db
        .raise(auth.user(), record.game_type(), record.level(), record.score())
        .await?;
    log::info!(
        "score recorded: user {} scored {} at {} {}",
        auth.user(),
        record.score(),
        record.game_type(),
        record.level(),
    );
    Ok(HttpResponse::Created().json(
        Envelope::data(record)
            .message("Score submitted successfully")
            .meta(serde_json::json!({
                "totalScore": tally.total(),
                "highScore": best.high(),
            })),
    ))
}

/// GET /api/games/scores
///
/// The caller only ever sees their own history. Limit ceiling is 50.
pub async fn history(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.validate().map_err(ApiError::Validation)?;
    let pager = Pager::clamped(query.page, query.limit, 50);
    let total = db.count(auth.user(), &filter).await?;
    let records = db
        .history(auth.user(), &filter, pager.limit, pager.offset())
        .await?;
    Ok(HttpResponse::Ok().json(
        Envelope::data(records).meta(Pagination::new(pager, total).meta(serde_json::json!({
            "gameType": filter.game_type.map(|g| g.as_str()).unwrap_or("all"),
            "level": filter.level.map(|l| l.as_str()).unwrap_or("all"),
        }))),
    ))
}

/// GET /api/games/leaderboard
///
/// Public. Rows come back in store order; the comparator re-asserts the
/// canonical order and positions become 1-based ranks. Limit ceiling
/// is 100.
pub async fn leaderboard(
    db: web::Data<Arc<Client>>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.validate().map_err(ApiError::Validation)?;
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let mut entries = db.leaderboard(&filter, limit).await?;
    entries.sort_by(rank);
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.rank = position as i64 + 1;
    }
    Ok(HttpResponse::Ok().json(
        Envelope::data(entries).meta(serde_json::json!({
            "gameType": filter.game_type.as_str(),
            "level": filter.level.map(|l| l.as_str()).unwrap_or("all"),
            "limit": limit,
        })),
    ))
}

use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use chrono::Utc;
use sgs_auth::Auth;
use sgs_core::ID;
use sgs_core::Level;
use sgs_core::Unique;
use sgs_dto::ApiError;
use sgs_dto::Envelope;
use sgs_dto::Pager;
use sgs_dto::Pagination;
use sgs_records::Lesson;
use std::sync::Arc;
use tokio_postgres::Client;

fn lesson_id(raw: &str) -> Result<ID<Lesson>, ApiError> {
    uuid::Uuid::parse_str(raw)
        .map(ID::from)
        .map_err(|_| ApiError::InvalidId("lesson"))
}

/// GET /api/lessons
pub async fn list(
    db: web::Data<Arc<Client>>,
    query: web::Query<ListLessonsQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.validate().map_err(ApiError::Validation)?;
    let pager = Pager::clamped(query.page, query.limit, 100);
    let total = db.count(&filter).await?;
    let lessons = db.list(&filter, pager.limit, pager.offset()).await?;
    Ok(HttpResponse::Ok().json(
        Envelope::data(lessons).meta(Pagination::new(pager, total).meta(serde_json::json!({
            "level": filter.level.map(|l| l.as_str()).unwrap_or("all"),
            "category": filter.category.map(|c| c.as_str()).unwrap_or("all"),
        }))),
    ))
}

/// GET /api/lessons/{id}
pub async fn get(
    db: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = lesson_id(&path)?;
    let lesson = db.load(id).await?.ok_or(ApiError::LessonNotFound)?;
    Ok(HttpResponse::Ok().json(Envelope::data(lesson)))
}

/// POST /api/lessons
///
/// The pre-check on `(level, order)` gives the friendly conflict answer;
/// the unique constraint settles concurrent races, with the loser mapped
/// to the same conflict.
pub async fn create(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    req: web::Json<CreateLessonRequest>,
) -> Result<HttpResponse, ApiError> {
    let draft = req.validate().map_err(ApiError::Validation)?;
    if db.occupied(draft.level, draft.order, None).await? {
        return Err(ApiError::DuplicateOrder);
    }
    let lesson = Lesson::new(
        ID::default(),
        draft.title,
        draft.description,
        draft.level,
        draft.category,
        draft.signs,
        draft.order,
        draft.estimated_time,
        Utc::now(),
    );
    db.create(&lesson).await.map_err(|e| {
        if ApiError::is_unique_violation(&e) {
            ApiError::DuplicateOrder
        } else {
            ApiError::from(e)
        }
    })?;
    log::info!(
        "lesson created by {}: {} ({} #{})",
        auth.user(),
        lesson.id(),
        lesson.level(),
        lesson.order(),
    );
    Ok(HttpResponse::Created()
        .json(Envelope::data(lesson).message("Lesson created successfully")))
}

/// PUT /api/lessons/{id}
///
/// The conflict check runs against the slot the lesson would occupy
/// after the patch, skipping the lesson's own row.
pub async fn update(
    db: web::Data<Arc<Client>>,
    _auth: Auth,
    path: web::Path<String>,
    req: web::Json<UpdateLessonRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = lesson_id(&path)?;
    let patch = req.validate().map_err(ApiError::Validation)?;
    let existing = db.load(id).await?.ok_or(ApiError::LessonNotFound)?;
    let level = patch.level.unwrap_or(existing.level());
    let order = patch.order.unwrap_or(existing.order());
    if db.occupied(level, order, Some(id)).await? {
        return Err(ApiError::DuplicateOrder);
    }
    let updated = db.update(id, &patch).await.map_err(|e| {
        if ApiError::is_unique_violation(&e) {
            ApiError::DuplicateOrder
        } else {
            ApiError::from(e)
        }
    })?;
    let lesson = updated.ok_or(ApiError::LessonNotFound)?;
    Ok(HttpResponse::Ok().json(Envelope::data(lesson).message("Lesson updated successfully")))
}

/// DELETE /api/lessons/{id}
pub async fn delete(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = lesson_id(&path)?;
    let lesson = db.delete(id).await?.ok_or(ApiError::LessonNotFound)?;
    log::info!("lesson deleted by {}: {}", auth.user(), lesson.id());
    Ok(HttpResponse::Ok().json(
        Envelope::data(serde_json::json!({
            "id": lesson.id(),
            "title": lesson.title(),
            "level": lesson.level(),
        }))
        .message("Lesson deleted successfully"),
    ))
}

/// GET /api/lessons/level/{level}
///
/// The path fixes the level; a level in the query string is ignored. An
/// empty page is a miss, not an empty list.
pub async fn by_level(
    db: web::Data<Arc<Client>>,
    path: web::Path<String>,
    query: web::Query<ListLessonsQuery>,
) -> Result<HttpResponse, ApiError> {
    let level: Level = path.parse().map_err(|_| ApiError::InvalidLevel)?;
    let category = match query.category.as_deref() {
        None => None,
        Some(raw) => Some(raw.parse().map_err(|_| ApiError::Validation(vec![
            sgs_core::FieldError::new("category", format!("invalid category: {raw}")),
        ]))?),
    };
    let filter = LessonFilter {
        level: Some(level),
        category,
    };
    let pager = Pager::clamped(query.page, query.limit, 100);
    let total = db.count(&filter).await?;
    let lessons = db.list(&filter, pager.limit, pager.offset()).await?;
    if lessons.is_empty() {
        return Err(ApiError::NoLessonsFound(level.to_string()));
    }
    Ok(HttpResponse::Ok().json(
        Envelope::data(lessons).meta(Pagination::new(pager, total).meta(serde_json::json!({
            "level": level.as_str(),
            "category": filter.category.map(|c| c.as_str()).unwrap_or("all"),
        }))),
    ))
}

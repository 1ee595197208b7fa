use super::*;
use sgs_core::ID;
use sgs_core::Level;
use sgs_core::Unique;
use sgs_database::*;
use sgs_records::Lesson;
use sgs_records::Sign;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Repository trait for lesson storage.
/// Abstracts SQL from the lesson handlers.
#[allow(async_fn_in_trait)]
pub trait LessonRepository {
    async fn list(
        &self,
        filter: &LessonFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lesson>, PgErr>;
    async fn count(&self, filter: &LessonFilter) -> Result<i64, PgErr>;
    async fn load(&self, id: ID<Lesson>) -> Result<Option<Lesson>, PgErr>;
    async fn occupied(
        &self,
        level: Level,
        order: i32,
        except: Option<ID<Lesson>>,
    ) -> Result<bool, PgErr>;
    async fn create(&self, lesson: &Lesson) -> Result<(), PgErr>;
    async fn update(&self, id: ID<Lesson>, patch: &LessonPatch) -> Result<Option<Lesson>, PgErr>;
    async fn delete(&self, id: ID<Lesson>) -> Result<Option<Lesson>, PgErr>;
}

const COLUMNS: &str = "id, title, description, level, category, signs, ord, estimated_time, \
                       created_at";

/// Hydrate a [`Lesson`] from a row selected with [`COLUMNS`].
fn lesson(row: &Row) -> Lesson {
    Lesson::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get(1),
        row.get(2),
        row.get::<_, String>(3).parse().expect("level column"),
        row.get::<_, String>(4).parse().expect("category column"),
        serde_json::from_value::<Vec<Sign>>(row.get(5)).expect("signs column"),
        row.get(6),
        row.get(7),
        row.get(8),
    )
}

impl LessonRepository for Arc<Client> {
    async fn list(
        &self,
        filter: &LessonFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lesson>, PgErr> {
        let level: Option<&str> = filter.level.map(|l| l.as_str());
        let category: Option<&str> = filter.category.map(|c| c.as_str());
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                LESSONS,
                " WHERE ($1::TEXT IS NULL OR level = $1)
                    AND ($2::TEXT IS NULL OR category = $2)
                  ORDER BY ord ASC, created_at DESC
                  LIMIT $3 OFFSET $4"
            ),
            &[&level, &category, &limit, &offset],
        )
        .await
        .map(|rows| rows.iter().map(lesson).collect())
    }

    async fn count(&self, filter: &LessonFilter) -> Result<i64, PgErr> {
        let level: Option<&str> = filter.level.map(|l| l.as_str());
        let category: Option<&str> = filter.category.map(|c| c.as_str());
        self.query_one(
            const_format::concatcp!(
                "SELECT COUNT(*) FROM ",
                LESSONS,
                " WHERE ($1::TEXT IS NULL OR level = $1)
                    AND ($2::TEXT IS NULL OR category = $2)"
            ),
            &[&level, &category],
        )
        .await
        .map(|row| row.get(0))
    }

    async fn load(&self, id: ID<Lesson>) -> Result<Option<Lesson>, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", LESSONS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.map(|row| lesson(&row)))
    }

    async fn occupied(
        &self,
        level: Level,
        order: i32,
        except: Option<ID<Lesson>>,
    ) -> Result<bool, PgErr> {
        let except: Option<uuid::Uuid> = except.map(|id| id.inner());
        self.query_opt(
            const_format::concatcp!(
                "SELECT 1 FROM ",
                LESSONS,
                " WHERE level = $1 AND ord = $2 AND ($3::UUID IS NULL OR id <> $3)"
            ),
            &[&level.as_str(), &order, &except],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn create(&self, lesson: &Lesson) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                LESSONS,
                " (id, title, description, level, category, signs, ord, estimated_time, created_at)
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
            ),
            &[
                &lesson.id().inner(),
                &lesson.title(),
                &lesson.description(),
                &lesson.level().as_str(),
                &lesson.category().as_str(),
                &serde_json::to_value(lesson.signs()).expect("signs serialize"),
                &lesson.order(),
                &lesson.estimated_time(),
                &lesson.created_at(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn update(&self, id: ID<Lesson>, patch: &LessonPatch) -> Result<Option<Lesson>, PgErr> {
        let level: Option<&str> = patch.level.map(|l| l.as_str());
        let category: Option<&str> = patch.category.map(|c| c.as_str());
        let signs: Option<serde_json::Value> = patch
            .signs
            .as_ref()
            .map(|signs| serde_json::to_value(signs).expect("signs serialize"));
        self.query_opt(
            const_format::concatcp!(
                "UPDATE ",
                LESSONS,
                " SET title          = COALESCE($2::TEXT, title),
                      description    = COALESCE($3::TEXT, description),
                      level          = COALESCE($4::TEXT, level),
                      category       = COALESCE($5::TEXT, category),
                      signs          = COALESCE($6::JSONB, signs),
                      ord            = COALESCE($7::INTEGER, ord),
                      estimated_time = COALESCE($8::INTEGER, estimated_time)
                  WHERE id = $1
                  RETURNING ",
                COLUMNS
            ),
            &[
                &id.inner(),
                &patch.title,
                &patch.description,
                &level,
                &category,
                &signs,
                &patch.order,
                &patch.estimated_time,
            ],
        )
        .await
        .map(|opt| opt.map(|row| lesson(&row)))
    }

    async fn delete(&self, id: ID<Lesson>) -> Result<Option<Lesson>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "DELETE FROM ",
                LESSONS,
                " WHERE id = $1 RETURNING ",
                COLUMNS
            ),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.map(|row| lesson(&row)))
    }
}

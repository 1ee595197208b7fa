use sgs_auth::Account;
use sgs_core::ID;
use sgs_database::*;
use sgs_records::ProgressRecord;
use sgs_records::SignProgress;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Repository trait for progress storage.
/// Abstracts SQL from the progress handlers.
#[allow(async_fn_in_trait)]
pub trait ProgressRepository {
    async fn all(&self, user: ID<Account>) -> Result<Vec<ProgressRecord>, PgErr>;
    async fn upsert(&self, record: &ProgressRecord) -> Result<(), PgErr>;
    async fn bump(&self, user: ID<Account>, signs: i32, minutes: i32) -> Result<(), PgErr>;
}

const COLUMNS: &str = "user_id, lesson, level, signs, total_score, time_spent, updated_at";

/// Hydrate a [`ProgressRecord`] from a row selected with [`COLUMNS`].
fn record(row: &Row) -> ProgressRecord {
    ProgressRecord::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get(1),
        row.get::<_, String>(2).parse().expect("level column"),
        serde_json::from_value::<Vec<SignProgress>>(row.get(3)).expect("signs column"),
        row.get(4),
        row.get(5),
        row.get(6),
    )
}

impl ProgressRepository for Arc<Client> {
    async fn all(&self, user: ID<Account>) -> Result<Vec<ProgressRecord>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                PROGRESS,
                " WHERE user_id = $1 ORDER BY updated_at DESC"
            ),
            &[&user.inner()],
        )
        .await
        .map(|rows| rows.iter().map(record).collect())
    }

    async fn upsert(&self, progress: &ProgressRecord) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                PROGRESS,
                " (user_id, lesson, level, signs, total_score, time_spent, updated_at)
                  VALUES ($1, $2, $3, $4, $5, $6, $7)
                  ON CONFLICT (user_id, lesson, level)
                  DO UPDATE SET signs       = EXCLUDED.signs,
                                total_score = EXCLUDED.total_score,
                                time_spent  = EXCLUDED.time_spent,
                                updated_at  = EXCLUDED.updated_at"
            ),
            &[
                &progress.user().inner(),
                &progress.lesson(),
                &progress.level().as_str(),
                &serde_json::to_value(progress.signs()).expect("signs serialize"),
                &progress.total_score(),
                &progress.time_spent(),
                &progress.updated_at(),
            ],
        )
        .await
        .map(|_| ())
    }

    /// Lifetime counters on the owner move additively; the practiced
    /// level and timestamp just take the latest value.
    async fn bump(&self, user: ID<Account>, signs: i32, minutes: i32) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET signs_learned = signs_learned + $2,
                      practice_time = practice_time + $3,
                      last_active   = now()
                  WHERE id = $1"
            ),
            &[&user.inner(), &signs, &minutes],
        )
        .await
        .map(|_| ())
    }
}

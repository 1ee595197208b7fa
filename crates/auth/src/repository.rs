use super::*;
use sgs_core::ID;
use sgs_core::Unique;
use sgs_database::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Repository trait for account database operations.
/// Abstracts SQL from the auth handlers.
#[allow(async_fn_in_trait)]
pub trait AuthRepository {
    async fn exists(&self, email: &str) -> Result<bool, PgErr>;
    async fn create(&self, account: &Account, hashword: &str) -> Result<(), PgErr>;
    async fn lookup(&self, email: &str) -> Result<Option<(Account, String)>, PgErr>;
    async fn load(&self, id: ID<Account>) -> Result<Option<Account>, PgErr>;
    async fn touch(&self, id: ID<Account>) -> Result<(), PgErr>;
}

const COLUMNS: &str = "id, name, email, age_group, avatar, signs_learned, accuracy_rate, \
                       practice_time, current_level, completed_lessons, streak, last_active, \
                       created_at";

/// Hydrate an [`Account`] from a row selected with [`COLUMNS`].
fn account(row: &Row) -> Account {
    Account::hydrate(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, String>(3).parse().expect("age_group column"),
        row.get::<_, String>(4),
        ProgressSummary {
            signs_learned: row.get::<_, i32>(5),
            accuracy_rate: row.get::<_, f32>(6),
            total_practice_time: row.get::<_, i32>(7),
            current_level: row.get::<_, String>(8).parse().expect("level column"),
            completed_lessons: row.get::<_, Vec<uuid::Uuid>>(9),
            streak: row.get::<_, i32>(10),
        },
        row.get(11),
        row.get(12),
    )
}

impl AuthRepository for Arc<Client> {
    async fn exists(&self, email: &str) -> Result<bool, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT 1 FROM ", USERS, " WHERE email = $1"),
            &[&email],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn create(&self, account: &Account, hashword: &str) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, name, email, hashword, age_group, avatar, last_active, created_at)
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
            ),
            &[
                &account.id().inner(),
                &account.name(),
                &account.email(),
                &hashword,
                &account.age_group().as_str(),
                &account.avatar(),
                &account.last_active(),
                &account.created_at(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn lookup(&self, email: &str) -> Result<Option<(Account, String)>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                ", hashword FROM ",
                USERS,
                " WHERE email = $1"
            ),
            &[&email],
        )
        .await
        .map(|opt| opt.map(|row| (account(&row), row.get::<_, String>(13))))
    }

    async fn load(&self, id: ID<Account>) -> Result<Option<Account>, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", USERS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.map(|row| account(&row)))
    }

    async fn touch(&self, id: ID<Account>) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET last_active = now() WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|_| ())
    }
}

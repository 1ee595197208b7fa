//! PostgreSQL connectivity and schema metadata.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from `DB_URL`
//!
//! ## Schema
//!
//! - [`Schema`] — Table metadata and DDL generation
//!
//! ## Table Names
//!
//! Constants for all persistent entities: users, scores, lessons,
//! progress, and the per-user score aggregates.
mod schema;

pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Connects to PostgreSQL using the `DB_URL` environment variable.
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
///
/// # Panics
///
/// Panics if `DB_URL` is not set or if connection fails.
pub async fn db() -> Arc<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let ref url = std::env::var("DB_URL").expect("DB_URL must be set");
    let (client, connection) = tokio_postgres::connect(url, tls)
        .await
        .expect("database connection failed");
    tokio::spawn(connection);
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await
        .expect("set client_min_messages");
    Arc::new(client)
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts and their denormalized aggregates.
#[rustfmt::skip]
pub const USERS:        &str = "users";
/// Table for immutable game score events.
#[rustfmt::skip]
pub const SCORES:       &str = "scores";
/// Table for lesson content.
#[rustfmt::skip]
pub const LESSONS:      &str = "lessons";
/// Table for per-(user, lesson, level) practice progress.
#[rustfmt::skip]
pub const PROGRESS:     &str = "progress";
/// Table for cumulative per-game-type score totals.
#[rustfmt::skip]
pub const SCORE_TOTALS: &str = "score_totals";
/// Table for per-(game-type, level) personal bests.
#[rustfmt::skip]
pub const HIGH_SCORES:  &str = "high_scores";

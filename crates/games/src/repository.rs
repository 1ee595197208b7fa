use super::*;
use sgs_auth::Account;
use sgs_core::GameType;
use sgs_core::ID;
use sgs_core::Level;
use sgs_core::Unique;
use sgs_database::*;
use sgs_records::ScoreRecord;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Repository trait for score events and their aggregates.
/// Abstracts SQL from the game handlers.
#[allow(async_fn_in_trait)]
pub trait ScoreRepository {
    async fn create(&self, record: &ScoreRecord) -> Result<(), PgErr>;
    async fn add(&self, user: ID<Account>, game: GameType, points: i64) -> Result<Tally, PgErr>;
    async fn raise(
        &self,
        user: ID<Account>,
        game: GameType,
        level: Level,
        score: i32,
    ) -> Result<Best, PgErr>;
    async fn history(
        &self,
        user: ID<Account>,
        filter: &HistoryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScoreRecord>, PgErr>;
    async fn count(&self, user: ID<Account>, filter: &HistoryFilter) -> Result<i64, PgErr>;
    async fn leaderboard(
        &self,
        filter: &LeaderboardFilter,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, PgErr>;
}

const COLUMNS: &str =
    "id, user_id, game_type, score, level, time_taken, accuracy, metadata, created_at";

/// Hydrate a [`ScoreRecord`] from a row selected with [`COLUMNS`].
fn record(row: &Row) -> ScoreRecord {
    ScoreRecord::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        ID::from(row.get::<_, uuid::Uuid>(1)),
        row.get::<_, String>(2).parse().expect("game_type column"),
        row.get(3),
        row.get::<_, String>(4).parse().expect("level column"),
        row.get(5),
        row.get(6),
        row.get(7),
        row.get(8),
    )
}

impl ScoreRepository for Arc<Client> {
    async fn create(&self, record: &ScoreRecord) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                SCORES,
                " (id, user_id, game_type, score, level, time_taken, accuracy, metadata, created_at)
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
            ),
            &[
                &record.id().inner(),
                &record.user().inner(),
                &record.game_type().as_str(),
                &record.score(),
                &record.level().as_str(),
                &record.time_taken(),
                &record.accuracy(),
                &record.metadata(),
                &record.created_at(),
            ],
        )
        .await
        .map(|_| ())
    }

    async fn add(&self, user: ID<Account>, game: GameType, points: i64) -> Result<Tally, PgErr> {
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                SCORE_TOTALS,
                " (user_id, game_type, total) VALUES ($1, $2, $3)
                  ON CONFLICT (user_id, game_type)
                  DO UPDATE SET total = ",
                SCORE_TOTALS,
                ".total + EXCLUDED.total
                  RETURNING total"
            ),
            &[&user.inner(), &game.as_str(), &points],
        )
        .await
        .map(|row| Tally::new(user, game, row.get(0)))
    }

    async fn raise(
        &self,
        user: ID<Account>,
        game: GameType,
        level: Level,
        score: i32,
    ) -> Result<Best, PgErr> {
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                HIGH_SCORES,
                " (user_id, game_type, level, high) VALUES ($1, $2, $3, $4)
                  ON CONFLICT (user_id, game_type, level)
                  DO UPDATE SET high = GREATEST(",
                HIGH_SCORES,
                ".high, EXCLUDED.high)
                  RETURNING high"
            ),
            &[&user.inner(), &game.as_str(), &level.as_str(), &score],
        )
        .await
        .map(|row| Best::new(user, game, level, row.get(0)))
    }

    async fn history(
        &self,
        user: ID<Account>,
        filter: &HistoryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ScoreRecord>, PgErr> {
        let game: Option<&str> = filter.game_type.map(|g| g.as_str());
        let level: Option<&str> = filter.level.map(|l| l.as_str());
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                SCORES,
                " WHERE user_id = $1
                    AND ($2::TEXT IS NULL OR game_type = $2)
                    AND ($3::TEXT IS NULL OR level = $3)
                  ORDER BY score DESC, created_at DESC
                  LIMIT $4 OFFSET $5"
            ),
            &[&user.inner(), &game, &level, &limit, &offset],
        )
        .await
        .map(|rows| rows.iter().map(record).collect())
    }

    async fn count(&self, user: ID<Account>, filter: &HistoryFilter) -> Result<i64, PgErr> {
        let game: Option<&str> = filter.game_type.map(|g| g.as_str());
        let level: Option<&str> = filter.level.map(|l| l.as_str());
        self.query_one(
            const_format::concatcp!(
                "SELECT COUNT(*) FROM ",
                SCORES,
                " WHERE user_id = $1
                    AND ($2::TEXT IS NULL OR game_type = $2)
                    AND ($3::TEXT IS NULL OR level = $3)"
            ),
            &[&user.inner(), &game, &level],
        )
        .await
        .map(|row| row.get(0))
    }

    async fn leaderboard(
        &self,
        filter: &LeaderboardFilter,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>, PgErr> {
        let level: Option<&str> = filter.level.map(|l| l.as_str());
        self.query(
            const_format::concatcp!(
                "SELECT u.id, u.name, u.avatar, s.score, s.time_taken, s.accuracy, s.created_at
                   FROM ",
                SCORES,
                " s JOIN ",
                USERS,
                " u ON u.id = s.user_id
                  WHERE s.game_type = $1
                    AND ($2::TEXT IS NULL OR s.level = $2)
                  ORDER BY s.score DESC, s.time_taken ASC NULLS LAST, s.created_at DESC
                  LIMIT $3"
            ),
            &[&filter.game_type.as_str(), &level, &limit],
        )
        .await
        .map(|rows| {
            rows.iter()
                .map(|row| LeaderboardEntry {
                    rank: 0,
                    user: PlayerView {
                        id: ID::from(row.get::<_, uuid::Uuid>(0)),
                        name: row.get(1),
                        avatar: row.get(2),
                    },
                    score: row.get(3),
                    time_taken: row.get(4),
                    accuracy: row.get(5),
                    created_at: row.get(6),
                })
                .collect()
        })
    }
}

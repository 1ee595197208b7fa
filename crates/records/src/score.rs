use chrono::DateTime;
use chrono::Utc;
use sgs_auth::Account;
use sgs_core::GameType;
use sgs_core::ID;
use sgs_core::Level;
use sgs_core::Unique;

/// Immutable record of one completed game attempt.
///
/// Created on submission, read by the leaderboard and history queries,
/// never updated or deleted. Aggregation happens on the owning account,
/// not here.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    id: ID<Self>,
    user: ID<Account>,
    game_type: GameType,
    score: i32,
    level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_taken: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accuracy: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl ScoreRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ID<Self>,
        user: ID<Account>,
        game_type: GameType,
        score: i32,
        level: Level,
        time_taken: Option<i32>,
        accuracy: Option<f32>,
        metadata: Option<serde_json::Value>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            game_type,
            score,
            level,
            time_taken,
            accuracy,
            metadata,
            created_at,
        }
    }
    pub fn user(&self) -> ID<Account> {
        self.user
    }
    pub fn game_type(&self) -> GameType {
        self.game_type
    }
    pub fn score(&self) -> i32 {
        self.score
    }
    pub fn level(&self) -> Level {
        self.level
    }
    pub fn time_taken(&self) -> Option<i32> {
        self.time_taken
    }
    pub fn accuracy(&self) -> Option<f32> {
        self.accuracy
    }
    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Unique for ScoreRecord {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use sgs_database::*;

    impl Schema for ScoreRecord {
        fn name() -> &'static str {
            SCORES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                SCORES,
                " (
                    id          UUID PRIMARY KEY,
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id),
                    game_type   TEXT NOT NULL,
                    score       INTEGER NOT NULL CHECK (score >= 0),
                    level       TEXT NOT NULL,
                    time_taken  INTEGER CHECK (time_taken >= 0),
                    accuracy    REAL CHECK (accuracy BETWEEN 0 AND 100),
                    metadata    JSONB,
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_scores_user ON ",
                SCORES,
                " (user_id, game_type, level);
                 CREATE INDEX IF NOT EXISTS idx_scores_rank ON ",
                SCORES,
                " (game_type, level, score DESC);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_and_omits_absent_options() {
        let record = ScoreRecord::new(
            ID::default(),
            ID::default(),
            GameType::Quiz,
            90,
            Level::Beginner,
            None,
            None,
            None,
            Utc::now(),
        );
        let json = serde_json::to_value(&record).expect("json");
        assert_eq!(json["gameType"], "quiz");
        assert_eq!(json["score"], 90);
        assert!(json.get("timeTaken").is_none());
        assert!(json.get("accuracy").is_none());
        assert!(json.get("createdAt").is_some());
    }
}

use chrono::DateTime;
use chrono::Utc;
use sgs_auth::Account;
use sgs_core::ID;
use sgs_core::Level;

/// Practice state for one sign within a progress record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignProgress {
    pub sign_id: String,
    pub accuracy: f32,
    pub attempts: i32,
    pub best_accuracy: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_practiced: Option<DateTime<Utc>>,
}

/// Per-(user, lesson, level) practice state.
///
/// Unlike score events this is not append-only: each submission for the
/// same triple overwrites the previous state (upsert semantics).
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    user: ID<Account>,
    lesson: String,
    level: Level,
    #[serde(rename = "signsCompleted")]
    signs: Vec<SignProgress>,
    total_score: i32,
    time_spent: i32,
    updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(
        user: ID<Account>,
        lesson: String,
        level: Level,
        signs: Vec<SignProgress>,
        total_score: i32,
        time_spent: i32,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user,
            lesson,
            level,
            signs,
            total_score,
            time_spent,
            updated_at,
        }
    }
    pub fn user(&self) -> ID<Account> {
        self.user
    }
    pub fn lesson(&self) -> &str {
        &self.lesson
    }
    pub fn level(&self) -> Level {
        self.level
    }
    pub fn signs(&self) -> &[SignProgress] {
        &self.signs
    }
    pub fn total_score(&self) -> i32 {
        self.total_score
    }
    pub fn time_spent(&self) -> i32 {
        self.time_spent
    }
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use sgs_database::*;

    impl Schema for ProgressRecord {
        fn name() -> &'static str {
            PROGRESS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                PROGRESS,
                " (
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    lesson      TEXT NOT NULL,
                    level       TEXT NOT NULL,
                    signs       JSONB NOT NULL DEFAULT '[]',
                    total_score INTEGER NOT NULL DEFAULT 0 CHECK (total_score >= 0),
                    time_spent  INTEGER NOT NULL DEFAULT 0 CHECK (time_spent >= 0),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    PRIMARY KEY (user_id, lesson, level)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_progress_user ON ",
                PROGRESS,
                " (user_id);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_signs_under_legacy_key() {
        let record = ProgressRecord::new(
            ID::default(),
            "alphabet-1".into(),
            Level::Beginner,
            vec![SignProgress {
                sign_id: "A".into(),
                accuracy: 80.0,
                attempts: 3,
                best_accuracy: 95.0,
                last_practiced: None,
            }],
            120,
            300,
            Utc::now(),
        );
        let json = serde_json::to_value(&record).expect("json");
        assert_eq!(json["signsCompleted"][0]["signId"], "A");
        assert_eq!(json["signsCompleted"][0]["bestAccuracy"], 95.0);
        assert_eq!(json["totalScore"], 120);
    }
}

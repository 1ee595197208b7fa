use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use sgs_auth::Account;
use sgs_core::FieldError;
use sgs_core::GameType;
use sgs_core::ID;
use sgs_core::Level;
use sgs_core::Violations;

/// Raw score submission body. Enum fields arrive as plain strings so a
/// bad value becomes a field error in the envelope rather than a serde
/// rejection of the whole body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub game_type: Option<String>,
    pub score: Option<i32>,
    pub level: Option<String>,
    pub time_taken: Option<i32>,
    pub accuracy: Option<f32>,
    pub metadata: Option<Value>,
}

/// A submission that passed validation.
#[derive(Debug, PartialEq)]
pub struct Submission {
    pub game_type: GameType,
    pub score: i32,
    pub level: Level,
    pub time_taken: Option<i32>,
    pub accuracy: Option<f32>,
    pub metadata: Option<Value>,
}

impl SubmitScoreRequest {
    pub fn validate(&self) -> Result<Submission, Vec<FieldError>> {
        let mut violations = Violations::new();
        let game_type = match self.game_type.as_deref() {
            None => {
                violations.push("gameType", "gameType is required");
                GameType::Quiz
            }
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                violations.push("gameType", format!("unknown game type: {raw}"));
                GameType::Quiz
            }),
        };
        let score = match self.score {
            None => {
                violations.push("score", "score is required");
                0
            }
            Some(score) if score < 0 => {
                violations.push("score", "score must be non-negative");
                0
            }
            Some(score) => score,
        };
        let level = match self.level.as_deref() {
            None => {
                violations.push("level", "level is required");
                Level::default()
            }
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                violations.push("level", format!("unknown level: {raw}"));
                Level::default()
            }),
        };
        if self.time_taken.is_some_and(|t| t < 0) {
            violations.push("timeTaken", "timeTaken must be non-negative");
        }
        if self.accuracy.is_some_and(|a| !(0.0..=100.0).contains(&a)) {
            violations.push("accuracy", "accuracy must be between 0 and 100");
        }
        if self.metadata.as_ref().is_some_and(|m| !m.is_object()) {
            violations.push("metadata", "metadata must be an object");
        }
        violations.into_result(Submission {
            game_type,
            score,
            level,
            time_taken: self.time_taken,
            accuracy: self.accuracy,
            metadata: self.metadata.clone(),
        })
    }
}

/// Query string for the caller's own score history.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub game_type: Option<String>,
    pub level: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Parsed history filters. `None` means the dimension is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFilter {
    pub game_type: Option<GameType>,
    pub level: Option<Level>,
}

impl HistoryQuery {
    pub fn validate(&self) -> Result<HistoryFilter, Vec<FieldError>> {
        let mut violations = Violations::new();
        let game_type = parse_filter(self.game_type.as_deref(), "gameType", &mut violations);
        let level = parse_filter(self.level.as_deref(), "level", &mut violations);
        violations.into_result(HistoryFilter { game_type, level })
    }
}

/// Query string for the public leaderboard.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub game_type: Option<String>,
    pub level: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardFilter {
    pub game_type: GameType,
    pub level: Option<Level>,
}

impl LeaderboardQuery {
    pub fn validate(&self) -> Result<LeaderboardFilter, Vec<FieldError>> {
        let mut violations = Violations::new();
        let game_type = match self.game_type.as_deref() {
            None => {
                violations.push("gameType", "gameType is required");
                GameType::Quiz
            }
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                violations.push("gameType", format!("unknown game type: {raw}"));
                GameType::Quiz
            }),
        };
        let level = parse_filter(self.level.as_deref(), "level", &mut violations);
        violations.into_result(LeaderboardFilter { game_type, level })
    }
}

fn parse_filter<T: std::str::FromStr>(
    raw: Option<&str>,
    field: &'static str,
    violations: &mut Violations,
) -> Option<T> {
    match raw {
        None => None,
        Some(raw) => match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                violations.push(field, format!("invalid {field}: {raw}"));
                None
            }
        },
    }
}

/// Public projection of a score's owner. Never carries the email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: ID<Account>,
    pub name: String,
    pub avatar: String,
}

/// One row of the leaderboard, enriched with its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user: PlayerView,
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f32>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> SubmitScoreRequest {
        serde_json::from_value(json).expect("request")
    }

    #[test]
    fn accepts_minimal_submission() {
        let submission = body(serde_json::json!({
            "gameType": "memory",
            "score": 40,
            "level": "beginner",
        }))
        .validate()
        .expect("valid");
        assert_eq!(submission.game_type, GameType::Memory);
        assert_eq!(submission.level, Level::Beginner);
        assert_eq!(submission.time_taken, None);
    }

    #[test]
    fn collects_every_violation() {
        let errors = body(serde_json::json!({
            "gameType": "chess",
            "score": -1,
            "level": "grandmaster",
            "timeTaken": -5,
            "accuracy": 150.0,
        }))
        .validate()
        .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["gameType", "score", "level", "timeTaken", "accuracy"]
        );
    }

    #[test]
    fn requires_game_type_score_and_level() {
        let errors = body(serde_json::json!({})).validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["gameType", "score", "level"]);
    }

    #[test]
    fn missing_level_is_a_violation_not_a_default() {
        let errors = body(serde_json::json!({"gameType": "memory", "score": 40}))
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "level");
    }

    #[test]
    fn rejects_non_object_metadata() {
        let errors = body(serde_json::json!({
            "gameType": "quiz",
            "score": 10,
            "level": "beginner",
            "metadata": [1, 2],
        }))
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "metadata");
    }

    #[test]
    fn history_filters_parse_or_fail_loudly() {
        let query = HistoryQuery {
            game_type: Some("spelling".into()),
            level: None,
            page: None,
            limit: None,
        };
        let filter = query.validate().expect("valid");
        assert_eq!(filter.game_type, Some(GameType::Spelling));
        assert_eq!(filter.level, None);

        let query = HistoryQuery {
            game_type: Some("checkers".into()),
            level: Some("expert".into()),
            page: None,
            limit: None,
        };
        let errors = query.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "gameType");
    }

    #[test]
    fn leaderboard_requires_game_type() {
        let query = LeaderboardQuery {
            game_type: None,
            level: None,
            limit: None,
        };
        let errors = query.validate().unwrap_err();
        assert_eq!(errors[0].field, "gameType");
    }
}

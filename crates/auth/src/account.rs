use chrono::DateTime;
use chrono::Utc;
use sgs_core::AgeGroup;
use sgs_core::ID;
use sgs_core::Level;
use sgs_core::Unique;

/// Registered user with profile and denormalized learning aggregates.
///
/// The password digest is deliberately not part of this type — it exists
/// only as a database column, so no code path can serialize it.
#[derive(Debug, Clone)]
pub struct Account {
    id: ID<Self>,
    name: String,
    email: String,
    age_group: AgeGroup,
    avatar: String,
    progress: ProgressSummary,
    last_active: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl Account {
    /// New account from validated signup data. The avatar glyph is the
    /// first letter of the name, uppercased.
    pub fn new(id: ID<Self>, name: String, email: String, age_group: AgeGroup) -> Self {
        let avatar = avatar(&name);
        Self {
            id,
            name,
            email,
            age_group,
            avatar,
            progress: ProgressSummary::default(),
            last_active: Utc::now(),
            created_at: Utc::now(),
        }
    }
    /// Rebuild from persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn hydrate(
        id: ID<Self>,
        name: String,
        email: String,
        age_group: AgeGroup,
        avatar: String,
        progress: ProgressSummary,
        last_active: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            age_group,
            avatar,
            progress,
            last_active,
            created_at,
        }
    }
    /// Mark the account active now; mirrors the store-side `touch` so
    /// responses built from this value agree with the persisted row.
    pub fn touched(mut self) -> Self {
        self.last_active = Utc::now();
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }
    pub fn avatar(&self) -> &str {
        &self.avatar
    }
    pub fn progress(&self) -> &ProgressSummary {
        &self.progress
    }
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Unique for Account {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// Avatar glyph: uppercased first letter of the display name, `U` when
/// the name is empty (validation prevents that upstream).
fn avatar(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| String::from("U"))
}

/// Denormalized learning aggregates maintained on the account record.
/// Progress writes bump these alongside the authoritative progress rows.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub signs_learned: i32,
    pub accuracy_rate: f32,
    pub total_practice_time: i32,
    pub current_level: Level,
    pub completed_lessons: Vec<uuid::Uuid>,
    pub streak: i32,
}

impl Default for ProgressSummary {
    fn default() -> Self {
        Self {
            signs_learned: 0,
            accuracy_rate: 0.0,
            total_practice_time: 0,
            current_level: Level::Beginner,
            completed_lessons: Vec::new(),
            streak: 0,
        }
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use sgs_database::*;

    /// Schema for the users table. `hashword` is a database-only column,
    /// not part of the Account domain type.
    impl Schema for Account {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id                UUID PRIMARY KEY,
                    name              VARCHAR(50) NOT NULL,
                    email             VARCHAR(255) UNIQUE NOT NULL,
                    hashword          TEXT NOT NULL,
                    age_group         TEXT NOT NULL DEFAULT 'adult',
                    avatar            TEXT NOT NULL DEFAULT 'U',
                    signs_learned     INTEGER NOT NULL DEFAULT 0 CHECK (signs_learned >= 0),
                    accuracy_rate     REAL NOT NULL DEFAULT 0 CHECK (accuracy_rate BETWEEN 0 AND 100),
                    practice_time     INTEGER NOT NULL DEFAULT 0 CHECK (practice_time >= 0),
                    current_level     TEXT NOT NULL DEFAULT 'beginner',
                    completed_lessons UUID[] NOT NULL DEFAULT '{}',
                    streak            INTEGER NOT NULL DEFAULT 0 CHECK (streak >= 0),
                    last_active       TIMESTAMPTZ NOT NULL DEFAULT now(),
                    created_at        TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_is_uppercased_first_letter() {
        let account = Account::new(
            ID::default(),
            "ann".into(),
            "ann@x.com".into(),
            AgeGroup::Adult,
        );
        assert_eq!(account.avatar(), "A");
    }

    #[test]
    fn avatar_handles_multibyte_names() {
        let account = Account::new(
            ID::default(),
            "émile".into(),
            "emile@x.com".into(),
            AgeGroup::Teen,
        );
        assert_eq!(account.avatar(), "É");
    }

    #[test]
    fn touched_bumps_last_active() {
        let long_ago = Utc::now() - chrono::Duration::days(7);
        let account = Account::hydrate(
            ID::default(),
            "Ann".into(),
            "ann@x.com".into(),
            AgeGroup::Adult,
            "A".into(),
            ProgressSummary::default(),
            long_ago,
            long_ago,
        );
        let account = account.touched();
        assert!(account.last_active() > long_ago);
        assert_eq!(account.created_at(), long_ago);
    }

    #[test]
    fn fresh_account_starts_at_zero() {
        let account = Account::new(
            ID::default(),
            "Bo".into(),
            "bo@x.com".into(),
            AgeGroup::Child,
        );
        assert_eq!(account.progress(), &ProgressSummary::default());
        assert_eq!(account.progress().current_level, Level::Beginner);
    }
}

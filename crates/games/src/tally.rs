use sgs_auth::Account;
use sgs_core::GameType;
use sgs_core::ID;
use sgs_core::Level;

/// Cumulative score across every attempt at one game type. Written with
/// an additive single-row upsert; the returned row reflects the value
/// after this submission was folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    user: ID<Account>,
    game_type: GameType,
    total: i64,
}

impl Tally {
    pub fn new(user: ID<Account>, game_type: GameType, total: i64) -> Self {
        Self {
            user,
            game_type,
            total,
        }
    }
    pub fn user(&self) -> ID<Account> {
        self.user
    }
    pub fn game_type(&self) -> GameType {
        self.game_type
    }
    pub fn total(&self) -> i64 {
        self.total
    }
}

/// Personal best for one (game type, level) pair. Monotonic: the upsert
/// takes the `GREATEST` of the stored and submitted scores, so the value
/// never goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Best {
    user: ID<Account>,
    game_type: GameType,
    level: Level,
    high: i32,
}

impl Best {
    pub fn new(user: ID<Account>, game_type: GameType, level: Level, high: i32) -> Self {
        Self {
            user,
            game_type,
            level,
            high,
        }
    }
    pub fn user(&self) -> ID<Account> {
        self.user
    }
    pub fn game_type(&self) -> GameType {
        self.game_type
    }
    pub fn level(&self) -> Level {
        self.level
    }
    pub fn high(&self) -> i32 {
        self.high
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use sgs_database::*;

    impl Schema for Tally {
        fn name() -> &'static str {
            SCORE_TOTALS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                SCORE_TOTALS,
                " (
                    user_id   UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    game_type TEXT NOT NULL,
                    total     BIGINT NOT NULL DEFAULT 0 CHECK (total >= 0),
                    PRIMARY KEY (user_id, game_type)
                );"
            )
        }
        fn indices() -> &'static str {
            ""
        }
    }

    impl Schema for Best {
        fn name() -> &'static str {
            HIGH_SCORES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                HIGH_SCORES,
                " (
                    user_id   UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    game_type TEXT NOT NULL,
                    level     TEXT NOT NULL,
                    high      INTEGER NOT NULL DEFAULT 0 CHECK (high >= 0),
                    PRIMARY KEY (user_id, game_type, level)
                );"
            )
        }
        fn indices() -> &'static str {
            ""
        }
    }
}

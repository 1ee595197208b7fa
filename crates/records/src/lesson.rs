use chrono::DateTime;
use chrono::Utc;
use sgs_core::Category;
use sgs_core::ID;
use sgs_core::Level;
use sgs_core::Unique;

/// Per-sign difficulty within a lesson.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(()),
        }
    }
}

/// One sign taught by a lesson.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sign {
    pub name: String,
    pub icon: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Authored lesson content.
///
/// `order` positions the lesson within its level; the `(level, order)`
/// pair is unique so two lessons never compete for the same slot.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    id: ID<Self>,
    title: String,
    description: String,
    level: Level,
    category: Category,
    signs: Vec<Sign>,
    order: i32,
    estimated_time: i32,
    created_at: DateTime<Utc>,
}

impl Lesson {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ID<Self>,
        title: String,
        description: String,
        level: Level,
        category: Category,
        signs: Vec<Sign>,
        order: i32,
        estimated_time: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            level,
            category,
            signs,
            order,
            estimated_time,
            created_at,
        }
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn level(&self) -> Level {
        self.level
    }
    pub fn category(&self) -> Category {
        self.category
    }
    pub fn signs(&self) -> &[Sign] {
        &self.signs
    }
    pub fn order(&self) -> i32 {
        self.order
    }
    pub fn estimated_time(&self) -> i32 {
        self.estimated_time
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Unique for Lesson {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use sgs_database::*;

    /// The order column is named `ord` (ORDER is reserved in SQL); the
    /// JSON field stays `order`.
    impl Schema for Lesson {
        fn name() -> &'static str {
            LESSONS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                LESSONS,
                " (
                    id             UUID PRIMARY KEY,
                    title          TEXT NOT NULL,
                    description    TEXT NOT NULL,
                    level          TEXT NOT NULL,
                    category       TEXT NOT NULL,
                    signs          JSONB NOT NULL DEFAULT '[]',
                    ord            INTEGER NOT NULL CHECK (ord >= 1),
                    estimated_time INTEGER NOT NULL DEFAULT 10,
                    created_at     TIMESTAMPTZ NOT NULL DEFAULT now(),
                    UNIQUE (level, ord)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_lessons_level ON ",
                LESSONS,
                " (level, ord);
                 CREATE INDEX IF NOT EXISTS idx_lessons_category ON ",
                LESSONS,
                " (category);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_difficulty_defaults_to_easy() {
        let sign: Sign = serde_json::from_str(
            r#"{"name":"A","icon":"✋","description":"the letter A"}"#,
        )
        .expect("sign");
        assert_eq!(sign.difficulty, Difficulty::Easy);
        assert!(sign.video_url.is_none());
    }

    #[test]
    fn lesson_serializes_order_field() {
        let lesson = Lesson::new(
            ID::default(),
            "Alphabet I".into(),
            "A through F".into(),
            Level::Beginner,
            Category::Alphabet,
            vec![],
            1,
            10,
            Utc::now(),
        );
        let json = serde_json::to_value(&lesson).expect("json");
        assert_eq!(json["order"], 1);
        assert_eq!(json["category"], "alphabet");
        assert_eq!(json["estimatedTime"], 10);
    }
}

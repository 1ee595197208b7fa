use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// Difficulty tier shared by lessons, progress, and game scores.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Beginner,
        Level::Intermediate,
        Level::Advanced,
        Level::Expert,
    ];
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
            Level::Expert => "expert",
        }
    }
}

impl FromStr for Level {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            "expert" => Ok(Level::Expert),
            _ => Err(()),
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three mini-games that produce score events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Memory,
    Quiz,
    Spelling,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Memory => "memory",
            GameType::Quiz => "quiz",
            GameType::Spelling => "spelling",
        }
    }
}

impl FromStr for GameType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(GameType::Memory),
            "quiz" => Ok(GameType::Quiz),
            "spelling" => Ok(GameType::Spelling),
            _ => Err(()),
        }
    }
}

impl Display for GameType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audience bracket chosen at signup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Teen,
    #[default]
    Adult,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Child => "child",
            AgeGroup::Teen => "teen",
            AgeGroup::Adult => "adult",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "child" => Ok(AgeGroup::Child),
            "teen" => Ok(AgeGroup::Teen),
            "adult" => Ok(AgeGroup::Adult),
            _ => Err(()),
        }
    }
}

impl Display for AgeGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lesson subject grouping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Alphabet,
    Numbers,
    Greetings,
    Basics,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alphabet => "alphabet",
            Category::Numbers => "numbers",
            Category::Greetings => "greetings",
            Category::Basics => "basics",
        }
    }
}

impl FromStr for Category {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabet" => Ok(Category::Alphabet),
            "numbers" => Ok(Category::Numbers),
            "greetings" => Ok(Category::Greetings),
            "basics" => Ok(Category::Basics),
            _ => Err(()),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_str_round_trip() {
        for level in Level::ALL {
            assert_eq!(level, level.as_str().parse().expect("level"));
        }
    }

    #[test]
    fn game_type_rejects_unknown() {
        assert!("chess".parse::<GameType>().is_err());
        assert_eq!("quiz".parse::<GameType>(), Ok(GameType::Quiz));
    }

    #[test]
    fn age_group_defaults_to_adult() {
        assert_eq!(AgeGroup::default(), AgeGroup::Adult);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&Level::Intermediate).expect("json"),
            "\"intermediate\""
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"basics\"").expect("json"),
            Category::Basics
        );
    }
}

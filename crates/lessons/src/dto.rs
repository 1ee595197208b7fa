use serde::Deserialize;
use sgs_core::Category;
use sgs_core::FieldError;
use sgs_core::Level;
use sgs_core::Violations;
use sgs_records::Difficulty;
use sgs_records::Sign;

/// One sign as submitted by an author.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInput {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub difficulty: Option<String>,
}

impl SignInput {
    /// Field errors carry the sign's 1-based position in the message
    /// since the `field` key is always the `signs` array itself.
    fn validate(&self, position: usize, violations: &mut Violations) -> Option<Sign> {
        let name = required_text(self.name.as_deref());
        if name.is_none() {
            violations.push("signs", format!("sign {position}: name is required"));
        }
        let icon = required_text(self.icon.as_deref());
        if icon.is_none() {
            violations.push("signs", format!("sign {position}: icon is required"));
        }
        let description = required_text(self.description.as_deref());
        if description.is_none() {
            violations.push("signs", format!("sign {position}: description is required"));
        }
        let difficulty = match self.difficulty.as_deref() {
            None => Difficulty::default(),
            Some(raw) => match raw.parse() {
                Ok(difficulty) => difficulty,
                Err(_) => {
                    violations
                        .push("signs", format!("sign {position}: unknown difficulty: {raw}"));
                    Difficulty::default()
                }
            },
        };
        Some(Sign {
            name: name?,
            icon: icon?,
            description: description?,
            video_url: self.video_url.clone(),
            difficulty,
        })
    }
}

/// Body of `POST /api/lessons`, raw form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub signs: Option<Vec<SignInput>>,
    pub order: Option<i32>,
    pub estimated_time: Option<i32>,
}

/// A lesson draft that passed validation; the handler supplies identity
/// and timestamps.
#[derive(Debug)]
pub struct LessonDraft {
    pub title: String,
    pub description: String,
    pub level: Level,
    pub category: Category,
    pub signs: Vec<Sign>,
    pub order: i32,
    pub estimated_time: i32,
}

impl CreateLessonRequest {
    pub fn validate(&self) -> Result<LessonDraft, Vec<FieldError>> {
        let mut violations = Violations::new();
        let title = required_text(self.title.as_deref()).unwrap_or_else(|| {
            violations.push("title", "title is required");
            String::new()
        });
        let description = required_text(self.description.as_deref()).unwrap_or_else(|| {
            violations.push("description", "description is required");
            String::new()
        });
        let level = parse_required(self.level.as_deref(), "level", &mut violations);
        let category = parse_required(self.category.as_deref(), "category", &mut violations);
        let order = match self.order {
            None => {
                violations.push("order", "order is required");
                1
            }
            Some(order) if order < 1 => {
                violations.push("order", "order must be at least 1");
                1
            }
            Some(order) => order,
        };
        let estimated_time = match self.estimated_time {
            None => 10,
            Some(minutes) if minutes < 1 => {
                violations.push("estimatedTime", "estimatedTime must be at least 1");
                10
            }
            Some(minutes) => minutes,
        };
        let signs = match self.signs.as_deref() {
            None | Some([]) => {
                violations.push("signs", "at least one sign is required");
                vec![]
            }
            Some(inputs) => inputs
                .iter()
                .enumerate()
                .filter_map(|(i, input)| input.validate(i + 1, &mut violations))
                .collect(),
        };
        violations.into_result(LessonDraft {
            title,
            description,
            level,
            category,
            signs,
            order,
            estimated_time,
        })
    }
}

/// Body of `PUT /api/lessons/{id}`: every field optional, absent fields
/// keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
    pub signs: Option<Vec<SignInput>>,
    pub order: Option<i32>,
    pub estimated_time: Option<i32>,
}

/// A typed partial update.
#[derive(Debug, Default)]
pub struct LessonPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<Level>,
    pub category: Option<Category>,
    pub signs: Option<Vec<Sign>>,
    pub order: Option<i32>,
    pub estimated_time: Option<i32>,
}

impl UpdateLessonRequest {
    pub fn validate(&self) -> Result<LessonPatch, Vec<FieldError>> {
        let mut violations = Violations::new();
        let title = match self.title.as_deref() {
            None => None,
            Some(raw) => match required_text(Some(raw)) {
                Some(title) => Some(title),
                None => {
                    violations.push("title", "title must not be empty");
                    None
                }
            },
        };
        let description = match self.description.as_deref() {
            None => None,
            Some(raw) => match required_text(Some(raw)) {
                Some(description) => Some(description),
                None => {
                    violations.push("description", "description must not be empty");
                    None
                }
            },
        };
        let level = parse_optional(self.level.as_deref(), "level", &mut violations);
        let category = parse_optional(self.category.as_deref(), "category", &mut violations);
        if self.order.is_some_and(|o| o < 1) {
            violations.push("order", "order must be at least 1");
        }
        if self.estimated_time.is_some_and(|t| t < 1) {
            violations.push("estimatedTime", "estimatedTime must be at least 1");
        }
        let signs = match self.signs.as_deref() {
            None => None,
            Some([]) => {
                violations.push("signs", "at least one sign is required");
                None
            }
            Some(inputs) => Some(
                inputs
                    .iter()
                    .enumerate()
                    .filter_map(|(i, input)| input.validate(i + 1, &mut violations))
                    .collect(),
            ),
        };
        violations.into_result(LessonPatch {
            title,
            description,
            level,
            category,
            signs,
            order: self.order,
            estimated_time: self.estimated_time,
        })
    }
}

/// Query string for lesson listing, both the root list and the per-level
/// route (which fixes the level from the path).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLessonsQuery {
    pub level: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LessonFilter {
    pub level: Option<Level>,
    pub category: Option<Category>,
}

impl ListLessonsQuery {
    pub fn validate(&self) -> Result<LessonFilter, Vec<FieldError>> {
        let mut violations = Violations::new();
        let level = parse_optional(self.level.as_deref(), "level", &mut violations);
        let category = parse_optional(self.category.as_deref(), "category", &mut violations);
        violations.into_result(LessonFilter { level, category })
    }
}

fn required_text(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_required<T: std::str::FromStr + Default>(
    raw: Option<&str>,
    field: &'static str,
    violations: &mut Violations,
) -> T {
    match raw {
        None => {
            violations.push(field, format!("{field} is required"));
            T::default()
        }
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            violations.push(field, format!("invalid {field}: {raw}"));
            T::default()
        }),
    }
}

fn parse_optional<T: std::str::FromStr>(
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

#[cfg(test)]
mod tests {
    use super::*;

    fn create(json: serde_json::Value) -> CreateLessonRequest {
        serde_json::from_value(json).expect("request")
    }

    #[test]
    fn accepts_complete_lesson() {
        let draft = create(serde_json::json!({
            "title": "  Alphabet I ",
            "description": "A through F",
            "level": "beginner",
            "category": "alphabet",
            "order": 1,
            "signs": [{"name": "A", "icon": "✋", "description": "the letter A"}],
        }))
        .validate()
        .expect("valid");
        assert_eq!(draft.title, "Alphabet I");
        assert_eq!(draft.level, Level::Beginner);
        assert_eq!(draft.estimated_time, 10);
        assert_eq!(draft.signs[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn collects_missing_fields() {
        let errors = create(serde_json::json!({})).validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["title", "description", "level", "category", "order", "signs"]
        );
    }

    #[test]
    fn flags_each_incomplete_sign() {
        let errors = create(serde_json::json!({
            "title": "T",
            "description": "D",
            "level": "beginner",
            "category": "basics",
            "order": 2,
            "signs": [
                {"name": "A", "icon": "✋", "description": "ok"},
                {"icon": "✌", "description": "no name"},
                {"name": "C"},
            ],
        }))
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].message.starts_with("sign 2:"));
        assert!(errors.iter().all(|e| e.field == "signs"));
    }

    #[test]
    fn patch_keeps_absent_fields_unset() {
        let request: UpdateLessonRequest =
            serde_json::from_value(serde_json::json!({"order": 3})).expect("request");
        let patch = request.validate().expect("valid");
        assert_eq!(patch.order, Some(3));
        assert!(patch.title.is_none());
        assert!(patch.signs.is_none());
    }

    #[test]
    fn patch_rejects_blank_title_and_bad_level() {
        let request: UpdateLessonRequest = serde_json::from_value(
            serde_json::json!({"title": "   ", "level": "wizard"}),
        )
        .expect("request");
        let errors = request.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "level"]);
    }

    #[test]
    fn list_query_rejects_unknown_category() {
        let query = ListLessonsQuery {
            level: Some("beginner".into()),
            category: Some("cooking".into()),
            page: None,
            limit: None,
        };
        let errors = query.validate().unwrap_err();
        assert_eq!(errors[0].field, "category");
    }
}

use serde::Deserialize;
use sgs_core::FieldError;
use sgs_core::Violations;
use sgs_records::SignProgress;

/// Body of `PUT /api/progress/{lesson}/{level}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressRequest {
    #[serde(default, rename = "signsCompleted")]
    pub signs: Vec<SignProgress>,
    pub total_score: Option<i32>,
    pub time_spent: Option<i32>,
}

/// A progress submission that passed validation.
#[derive(Debug)]
pub struct ProgressUpdate {
    pub signs: Vec<SignProgress>,
    pub total_score: i32,
    pub time_spent: i32,
}

impl SaveProgressRequest {
    pub fn validate(&self) -> Result<ProgressUpdate, Vec<FieldError>> {
        let mut violations = Violations::new();
        let total_score = self.total_score.unwrap_or(0);
        if total_score < 0 {
            violations.push("totalScore", "totalScore must be non-negative");
        }
        let time_spent = self.time_spent.unwrap_or(0);
        if time_spent < 0 {
            violations.push("timeSpent", "timeSpent must be non-negative");
        }
        for (i, sign) in self.signs.iter().enumerate() {
            let position = i + 1;
            if sign.sign_id.trim().is_empty() {
                violations.push(
                    "signsCompleted",
                    format!("sign {position}: signId is required"),
                );
            }
            if !(0.0..=100.0).contains(&sign.accuracy) {
                violations.push(
                    "signsCompleted",
                    format!("sign {position}: accuracy must be between 0 and 100"),
                );
            }
            if !(0.0..=100.0).contains(&sign.best_accuracy) {
                violations.push(
                    "signsCompleted",
                    format!("sign {position}: bestAccuracy must be between 0 and 100"),
                );
            }
            if sign.attempts < 0 {
                violations.push(
                    "signsCompleted",
                    format!("sign {position}: attempts must be non-negative"),
                );
            }
        }
        violations.into_result(ProgressUpdate {
            signs: self.signs.clone(),
            total_score,
            time_spent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> SaveProgressRequest {
        serde_json::from_value(json).expect("request")
    }

    #[test]
    fn empty_body_defaults_to_zeroes() {
        let update = body(serde_json::json!({})).validate().expect("valid");
        assert!(update.signs.is_empty());
        assert_eq!(update.total_score, 0);
        assert_eq!(update.time_spent, 0);
    }

    #[test]
    fn accepts_complete_submission() {
        let update = body(serde_json::json!({
            "signsCompleted": [
                {"signId": "A", "accuracy": 80.0, "attempts": 3, "bestAccuracy": 95.0},
            ],
            "totalScore": 120,
            "timeSpent": 300,
        }))
        .validate()
        .expect("valid");
        assert_eq!(update.signs.len(), 1);
        assert_eq!(update.total_score, 120);
    }

    #[test]
    fn collects_counter_and_sign_violations() {
        let errors = body(serde_json::json!({
            "signsCompleted": [
                {"signId": "", "accuracy": 120.0, "attempts": -1, "bestAccuracy": 50.0},
            ],
            "totalScore": -5,
            "timeSpent": -1,
        }))
        .validate()
        .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "totalScore",
                "timeSpent",
                "signsCompleted",
                "signsCompleted",
                "signsCompleted",
            ]
        );
    }
}

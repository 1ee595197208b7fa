use super::*;
use sgs_core::AgeGroup;
use sgs_core::FieldError;
use sgs_core::Unique;
use sgs_core::Violations;
use sgs_core::is_email;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age_group: Option<String>,
}

/// Signup fields after boundary validation: name trimmed, email trimmed
/// and lowercased, age group parsed.
#[derive(Debug, PartialEq, Eq)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age_group: AgeGroup,
}

impl SignupRequest {
    /// Checks every field and reports every violation, not just the first.
    pub fn validate(&self) -> Result<Signup, Vec<FieldError>> {
        let mut violations = Violations::new();
        let name = self.name.trim();
        if name.chars().count() < 2 || name.chars().count() > 50 {
            violations.push("name", "Name must be between 2 and 50 characters");
        }
        let email = self.email.trim().to_lowercase();
        if !is_email(&email) {
            violations.push("email", "Please provide a valid email");
        }
        if self.password.chars().count() < 6 {
            violations.push("password", "Password must be at least 6 characters long");
        }
        let age_group = match self.age_group.as_deref() {
            None => AgeGroup::default(),
            Some(s) => s.parse().unwrap_or_else(|_| {
                violations.push("ageGroup", "Invalid age group");
                AgeGroup::default()
            }),
        };
        violations.into_result(Signup {
            name: name.to_string(),
            email,
            password: self.password.clone(),
            age_group,
        })
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    /// Normalized email for lookup. Shape problems are validation errors;
    /// a well-formed email that doesn't match stays indistinguishable
    /// from a wrong password.
    pub fn validate(&self) -> Result<String, Vec<FieldError>> {
        let mut violations = Violations::new();
        let email = self.email.trim().to_lowercase();
        if !is_email(&email) {
            violations.push("email", "Please provide a valid email");
        }
        if self.password.is_empty() {
            violations.push("password", "Password is required");
        }
        violations.into_result(email)
    }
}

/// Public projection of an account. Never contains the password digest.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub age_group: AgeGroup,
    pub progress: ProgressSummary,
    pub last_active: chrono::DateTime<chrono::Utc>,
}

impl From<&Account> for UserView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            name: account.name().to_string(),
            email: account.email().to_string(),
            avatar: account.avatar().to_string(),
            age_group: account.age_group(),
            progress: account.progress().clone(),
            last_active: account.last_active(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgs_core::ID;

    fn signup(name: &str, email: &str, password: &str, age: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            age_group: age.map(String::from),
        }
    }

    #[test]
    fn valid_signup_normalizes() {
        let parsed = signup("  Ann ", " Ann@X.Com", "secret1", Some("teen"))
            .validate()
            .expect("valid");
        assert_eq!(parsed.name, "Ann");
        assert_eq!(parsed.email, "ann@x.com");
        assert_eq!(parsed.age_group, AgeGroup::Teen);
    }

    #[test]
    fn signup_collects_every_violation() {
        let errors = signup("A", "not-an-email", "short", Some("elder"))
            .validate()
            .expect_err("invalid");
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "password", "ageGroup"]);
    }

    #[test]
    fn age_group_defaults_when_absent() {
        let parsed = signup("Ann", "ann@x.com", "secret1", None)
            .validate()
            .expect("valid");
        assert_eq!(parsed.age_group, AgeGroup::Adult);
    }

    #[test]
    fn signin_requires_password() {
        let errors = SigninRequest {
            email: "ann@x.com".into(),
            password: String::new(),
        }
        .validate()
        .expect_err("invalid");
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn user_view_never_leaks_hashword() {
        let account = Account::new(
            ID::default(),
            "Ann".into(),
            "ann@x.com".into(),
            AgeGroup::Adult,
        );
        let json = serde_json::to_value(UserView::from(&account)).expect("json");
        assert!(json.get("password").is_none());
        assert!(json.get("hashword").is_none());
        assert_eq!(json["avatar"], "A");
    }
}

/// One violated constraint on one request field.
///
/// Validation at the API boundary collects every violation before any
/// persistence happens; the full list travels in the error envelope's
/// `details` array.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Accumulator for boundary validation. Check everything, then call
/// [`Violations::into_result`] to either pass the parsed value through or
/// surface the complete list of failures.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn into_result<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0)
        }
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliverability is not our problem.
pub fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_email("ann@x.com"));
        assert!(is_email("a.b+c@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_email("annx.com"));
        assert!(!is_email("@x.com"));
        assert!(!is_email("ann@xcom"));
        assert!(!is_email("ann@.com"));
        assert!(!is_email("ann@x.com "));
    }

    #[test]
    fn violations_collects_every_field() {
        let mut violations = Violations::new();
        violations.push("name", "too short");
        violations.push("email", "not an email");
        let errors = violations.into_result(()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "email");
    }

    #[test]
    fn empty_violations_pass_through() {
        assert_eq!(Violations::new().into_result(7), Ok(7));
    }
}

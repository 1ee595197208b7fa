use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use serde::Serialize;
use sgs_core::FieldError;

/// Stable machine-readable error codes surfaced in the `code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    UserExists,
    DuplicateOrder,
    DuplicateEntry,
    InvalidCredentials,
    NoToken,
    InvalidToken,
    TokenExpired,
    InvalidId,
    InvalidLevel,
    LessonNotFound,
    NoLessonsFound,
    ResourceNotFound,
    ServerError,
}

/// The complete error taxonomy for the API.
///
/// Every failure a handler can produce maps to exactly one variant; the
/// `ResponseError` impl is the single translator from variant to HTTP
/// status, envelope body, and log line. Client-visible messages are the
/// `Display` strings — raw store errors are logged, never serialized.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("User with this email already exists")]
    UserExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("No token provided")]
    NoToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid {0} ID format")]
    InvalidId(&'static str),
    #[error("Invalid level parameter")]
    InvalidLevel,
    #[error("Lesson not found")]
    LessonNotFound,
    #[error("No lessons found for level: {0}")]
    NoLessonsFound(String),
    #[error("Another lesson with this order already exists for the specified level")]
    DuplicateOrder,
    #[error("Duplicate field value entered")]
    DuplicateEntry,
    #[error("Resource not found")]
    NotFound,
    #[error("Internal server error")]
    Database(#[source] tokio_postgres::Error),
    #[error("Internal server error")]
    Internal(&'static str),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationError,
            Self::UserExists => ErrorCode::UserExists,
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
            Self::NoToken => ErrorCode::NoToken,
            Self::InvalidToken => ErrorCode::InvalidToken,
            Self::TokenExpired => ErrorCode::TokenExpired,
            Self::InvalidId(_) => ErrorCode::InvalidId,
            Self::InvalidLevel => ErrorCode::InvalidLevel,
            Self::LessonNotFound => ErrorCode::LessonNotFound,
            Self::NoLessonsFound(_) => ErrorCode::NoLessonsFound,
            Self::DuplicateOrder => ErrorCode::DuplicateOrder,
            Self::DuplicateEntry => ErrorCode::DuplicateEntry,
            Self::NotFound => ErrorCode::ResourceNotFound,
            Self::Database(_) | Self::Internal(_) => ErrorCode::ServerError,
        }
    }
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation(errors) => {
                Some(serde_json::to_value(errors).expect("field errors serialize"))
            }
            _ => None,
        }
    }
    /// True when the underlying store reported a unique-constraint race.
    /// Callers translate this into the domain conflict (`UserExists`,
    /// `DuplicateOrder`) when they know which constraint was hit.
    pub fn is_unique_violation(e: &tokio_postgres::Error) -> bool {
        e.code() == Some(&tokio_postgres::error::SqlState::UNIQUE_VIOLATION)
    }
}

/// Duplicate-key conflicts are uniformly 409; unknown store failures are 500.
impl From<tokio_postgres::Error> for ApiError {
    fn from(e: tokio_postgres::Error) -> Self {
        if Self::is_unique_violation(&e) {
            Self::DuplicateEntry
        } else {
            Self::Database(e)
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId(_) | Self::InvalidLevel => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials
            | Self::NoToken
            | Self::InvalidToken
            | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::LessonNotFound | Self::NoLessonsFound(_) | Self::NotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UserExists | Self::DuplicateOrder | Self::DuplicateEntry => {
                StatusCode::CONFLICT
            }
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Database(e) => log::error!("database error: {}", e),
            Self::Internal(what) => log::error!("internal error: {}", what),
            _ => log::debug!("request failed: {}", self),
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: self.to_string(),
            code: self.code(),
            details: self.details(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::ValidationError).expect("json"),
            "\"VALIDATION_ERROR\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::TokenExpired).expect("json"),
            "\"TOKEN_EXPIRED\""
        );
    }

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(ApiError::Validation(vec![]).status_code(), 400);
        assert_eq!(ApiError::InvalidCredentials.status_code(), 401);
        assert_eq!(ApiError::NoToken.status_code(), 401);
        assert_eq!(ApiError::LessonNotFound.status_code(), 404);
        assert_eq!(ApiError::UserExists.status_code(), 409);
        assert_eq!(ApiError::DuplicateOrder.status_code(), 409);
        assert_eq!(ApiError::Internal("boom").status_code(), 500);
    }

    #[test]
    fn validation_details_list_every_field() {
        let err = ApiError::Validation(vec![
            FieldError::new("name", "too short"),
            FieldError::new("email", "not an email"),
        ]);
        let details = err.details().expect("details");
        assert_eq!(details.as_array().map(Vec::len), Some(2));
        assert_eq!(details[1]["field"], "email");
    }

    #[test]
    fn server_errors_hide_internals() {
        assert_eq!(ApiError::Internal("secret detail").to_string(), "Internal server error");
    }
}

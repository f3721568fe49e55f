use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(Cow<'static, str>),
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn payload_too_large(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::PayloadTooLarge(msg.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        match self {
            // Has Message
            Error::NotFound(msg)
            | Error::Conflict(msg)
            | Error::BadRequest(msg)
            | Error::PayloadTooLarge(msg) => res.json(ErrorBody { message: msg.clone() }),
            // No Message
            Error::InternalServer => {
                res.json(ErrorBody { message: "Internal Server Error".into() })
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // argon2 errors
    #[error("Hash Error")]
    HashError(#[from] argon2::password_hash::Error),
    // sqlx errors
    #[error("Database Error : {0}")]
    DatabaseError(Cow<'static, str>),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
    // filesystem errors
    #[error("Storage Error: {0}")]
    Storage(#[from] std::io::Error),
    // Custom Errors
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Database Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Database Conflict: {0:?}")]
    Conflict(Option<DbErrorMeta>),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

fn conflict_message(meta: &Option<DbErrorMeta>) -> Cow<'static, str> {
    let Some(m) = meta else {
        return "Resource was modified concurrently, retry the request".into();
    };

    if m.code.as_deref() == Some("23503") {
        return "Resource is still referenced by other records".into();
    }

    let Some(constraint) = &m.constraint else {
        return "Duplicate value".into();
    };

    // constraint names follow `<table>_<column>_key`
    let field = constraint
        .trim_end_matches("_key")
        .split('_')
        .next_back()
        .unwrap_or("value");

    let mut chars = field.chars();
    let field = match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Value".to_string(),
    };

    format!("{field} already exists").into()
}

#[derive(Debug)]
pub struct DbErrorMeta {
    pub code: Option<String>,
    pub constraint: Option<String>,
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::Conflict(meta) => Error::Conflict(conflict_message(&meta)),
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("{:?}", err);
        if let sqlx::Error::Database(db_err) = &err {
            return from_db_error(
                db_err.code().as_deref(),
                db_err.constraint(),
                db_err.message(),
            );
        }
        SystemError::InternalError(Box::new(err))
    }
}

/// Maps a PostgreSQL error by its SQLSTATE code.
fn from_db_error(code: Option<&str>, constraint: Option<&str>, message: &str) -> SystemError {
    match code {
        Some("23505") | Some("23503") => SystemError::Conflict(Some(DbErrorMeta {
            code: code.map(str::to_string),
            constraint: constraint.map(str::to_string),
        })),
        // check_violation
        Some("23514") => match constraint {
            Some("customers_period_check") => {
                SystemError::bad_request("End date must not be before start date")
            }
            Some(name) => SystemError::bad_request(format!("Value rejected by rule {}", name)),
            None => SystemError::bad_request("Value rejected by a data rule"),
        },
        Some("42P01") => SystemError::NotFound("Resource not found".into()),
        _ => {
            log::error!("Unhandled DB error: {:?} {}", code, message);
            SystemError::DatabaseError(message.to_string().into())
        }
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Stale version detected by the persistence layer.
    pub fn stale_version() -> Self {
        Self::Conflict(None)
    }

    /// Whether repeating the whole operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SystemError::Storage(_) | SystemError::Conflict(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(code: &str, constraint: Option<&str>) -> Option<DbErrorMeta> {
        Some(DbErrorMeta {
            code: Some(code.to_string()),
            constraint: constraint.map(str::to_string),
        })
    }

    #[test]
    fn conflict_message_names_unique_column() {
        assert_eq!(
            conflict_message(&meta("23505", Some("users_email_key"))),
            "Email already exists"
        );
    }

    #[test]
    fn conflict_message_reports_foreign_key_violation() {
        assert_eq!(
            conflict_message(&meta("23503", Some("customers_user_id_fkey"))),
            "Resource is still referenced by other records"
        );
    }

    #[test]
    fn check_violation_is_a_bad_request() {
        let err = from_db_error(Some("23514"), Some("customers_period_check"), "violates check");
        assert!(matches!(err, SystemError::BadRequest(msg) if msg.contains("End date")));

        let err: Error = from_db_error(Some("23514"), None, "violates check").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unique_and_foreign_key_violations_are_conflicts() {
        let err = from_db_error(Some("23505"), Some("users_user_name_key"), "duplicate key");
        assert!(matches!(
            &err,
            SystemError::Conflict(Some(m)) if m.code.as_deref() == Some("23505")
        ));
        assert!(!err.is_retryable());
        let err = from_db_error(Some("23503"), None, "fk");
        assert!(matches!(err, SystemError::Conflict(Some(_))));
        let err = from_db_error(Some("XX000"), None, "boom");
        assert!(matches!(err, SystemError::DatabaseError(_)));
    }

    #[test]
    fn stale_version_is_retryable_but_constraint_conflict_is_not() {
        assert!(SystemError::stale_version().is_retryable());
        assert!(SystemError::Storage(std::io::Error::other("disk")).is_retryable());
        assert!(!SystemError::Conflict(meta("23505", None)).is_retryable());
        assert!(!SystemError::bad_request("nope").is_retryable());
        assert!(!SystemError::not_found("gone").is_retryable());
    }

    #[test]
    fn internal_errors_hide_details() {
        let err: Error = SystemError::Storage(std::io::Error::other("disk full")).into();
        assert!(matches!(err, Error::InternalServer));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: Error = SystemError::not_found("Photo not found").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: Error = SystemError::stale_version().into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}

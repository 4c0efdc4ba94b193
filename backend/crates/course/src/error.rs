//! Course Error Types

use auth::AuthError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Course-specific result type alias
pub type CourseResult<T> = Result<T, CourseError>;

/// Course-specific error variants
#[derive(Debug, Error)]
pub enum CourseError {
    /// A course with the same name and author exists
    #[error("course with such name and author already created")]
    CourseAlreadyCreated,

    /// The caller's user record does not exist
    #[error("user not found")]
    UserNotFound,

    /// Only teachers may perform this action
    #[error("user must be a teacher")]
    TeacherRoleRequired,

    /// No course with the given id
    #[error("course not found")]
    CourseNotFound,

    /// Listing another teacher's courses
    #[error("teacher access denied")]
    TeacherAccessDenied,

    /// Uniqueness constraint rejected a write at the storage boundary
    #[error("duplicate course record")]
    Duplicate,

    /// User storage failed
    #[error("User lookup failed: {0}")]
    UserLookup(#[source] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CourseError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CourseError::CourseAlreadyCreated => ErrorKind::Conflict,
            CourseError::UserNotFound | CourseError::CourseNotFound => ErrorKind::NotFound,
            CourseError::TeacherRoleRequired | CourseError::TeacherAccessDenied => {
                ErrorKind::Forbidden
            }
            CourseError::Duplicate
            | CourseError::UserLookup(_)
            | CourseError::Database(_)
            | CourseError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable code for errors the caller is expected to handle
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CourseError::CourseAlreadyCreated => Some("course_already_created"),
            CourseError::UserNotFound => Some("user_not_found"),
            CourseError::TeacherRoleRequired => Some("teacher_role_required"),
            CourseError::CourseNotFound => Some("course_not_found"),
            CourseError::TeacherAccessDenied => Some("teacher_access_denied"),
            _ => None,
        }
    }
}

impl From<AuthError> for CourseError {
    fn from(err: AuthError) -> Self {
        CourseError::UserLookup(err)
    }
}

impl From<CourseError> for AppError {
    fn from(err: CourseError) -> Self {
        let kind = err.kind();
        match err.code() {
            Some(code) => AppError::expected(kind, err.to_string(), code),
            None => {
                let message = err.to_string();
                AppError::new(kind, message).with_source(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_errors() {
        let cases = [
            (CourseError::CourseAlreadyCreated, 409, "course_already_created"),
            (CourseError::UserNotFound, 404, "user_not_found"),
            (CourseError::TeacherRoleRequired, 403, "teacher_role_required"),
            (CourseError::CourseNotFound, 404, "course_not_found"),
            (CourseError::TeacherAccessDenied, 403, "teacher_access_denied"),
        ];
        for (err, status, code) in cases {
            let app: AppError = err.into();
            assert_eq!(app.status_code(), status);
            assert_eq!(app.code(), Some(code));
            assert!(app.is_client_error());
        }
    }

    #[test]
    fn test_duplicate_is_incidental() {
        let app: AppError = CourseError::Duplicate.into();
        assert!(!app.is_expected());
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.public_message(), "internal server error");
    }
}

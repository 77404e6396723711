use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use super::render;
use crate::services::{AuthError, BlogError, CourseError};

#[derive(Debug)]
pub enum WebError {
    NotFound(String),

    BadRequest(String),

    Forbidden(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "The page you requested does not exist.")
            }
            Self::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "The request could not be processed.")
            }
            Self::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "You do not have access to this page.")
            }
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "A database error occurred.")
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred.")
            }
        };

        (status, Html(render::error_page(status, message))).into_response()
    }
}

impl From<anyhow::Error> for WebError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for WebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::InternalError(format!("Session error: {err}"))
    }
}

impl From<CourseError> for WebError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::CourseNotFound(_) | CourseError::LessonNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            CourseError::AccessDenied { .. } => Self::Forbidden(err.to_string()),
            CourseError::Database(msg) => Self::DatabaseError(msg),
            CourseError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::UsernameTaken(_)
            | AuthError::Validation(_) => Self::BadRequest(err.to_string()),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<BlogError> for WebError {
    fn from(err: BlogError) -> Self {
        match err {
            BlogError::PostNotFound(_) => Self::NotFound(err.to_string()),
            BlogError::SlugTaken(_) | BlogError::Validation(_) => {
                Self::BadRequest(err.to_string())
            }
            BlogError::Database(msg) => Self::DatabaseError(msg),
            BlogError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl WebError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_errors_map_to_status() {
        let cases = [
            (
                CourseError::CourseNotFound("rust".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                CourseError::LessonNotFound {
                    course_slug: "rust".into(),
                    lesson_slug: "intro".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                CourseError::AccessDenied {
                    course_slug: "rust".into(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                CourseError::Database("locked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = WebError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = WebError::InternalError("secret connection string".into());
        assert_eq!(err.to_string(), "Internal error: secret connection string");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

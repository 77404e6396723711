//! Domain service for course browsing, enrollment and lesson progress.
//!
//! Every operation takes the caller explicitly; none of them know about
//! sessions or HTTP.

use serde::Serialize;
use thiserror::Error;

use crate::domain::UserId;
use crate::models::course::{Course, Lesson, Module, ModuleOutline};

/// Errors specific to course operations.
#[derive(Debug, Error)]
pub enum CourseError {
    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Lesson not found: {course_slug}/{lesson_slug}")]
    LessonNotFound {
        course_slug: String,
        lesson_slug: String,
    },

    /// The caller is not enrolled and the lesson is not a free preview.
    #[error("Enrollment required for course {course_slug}")]
    AccessDenied { course_slug: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CourseError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CourseError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Course page data.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    pub course: Course,
    pub instructor: Option<String>,
    pub modules: Vec<ModuleOutline>,
    /// False for anonymous callers.
    pub is_enrolled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnrollOutcome {
    Enrolled,
    AlreadyEnrolled,
}

#[derive(Debug, Clone, Serialize)]
pub struct Enrollment {
    pub course: Course,
    pub outcome: EnrollOutcome,
}

/// Lesson page data including navigation and course progress.
#[derive(Debug, Clone, Serialize)]
pub struct LessonPage {
    pub course: Course,
    pub module: Module,
    pub lesson: Lesson,
    /// Every lesson of the course in (module order, lesson order).
    pub lessons: Vec<Lesson>,
    pub total_lessons: usize,
    pub completed_lesson_ids: Vec<i32>,
    pub progress_percent: u8,
    pub is_completed: bool,
    pub is_enrolled: bool,
    pub prev_lesson: Option<Lesson>,
    pub next_lesson: Option<Lesson>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToggleOutcome {
    Completed,
    Uncompleted,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleResult {
    pub course: Course,
    pub lesson: Lesson,
    pub outcome: ToggleOutcome,
}

/// Domain service trait for courses.
#[async_trait::async_trait]
pub trait CourseService: Send + Sync {
    /// Lists published courses only.
    async fn list_courses(&self) -> Result<Vec<Course>, CourseError>;

    /// Loads a course by slug with the viewer's enrollment state.
    ///
    /// # Errors
    ///
    /// Returns [`CourseError::CourseNotFound`] if no course has the slug.
    async fn course_detail(
        &self,
        slug: &str,
        viewer: Option<UserId>,
    ) -> Result<CourseDetail, CourseError>;

    /// Enrolls the user. Enrolling twice is not an error.
    async fn enroll(&self, user: UserId, slug: &str) -> Result<Enrollment, CourseError>;

    /// Resolves a lesson by (course slug, lesson slug) without any access check.
    async fn find_lesson(
        &self,
        course_slug: &str,
        lesson_slug: &str,
    ) -> Result<(Course, Lesson), CourseError>;

    /// Builds the lesson page for an enrolled user or a free preview.
    ///
    /// # Errors
    ///
    /// Returns [`CourseError::AccessDenied`] when the gate refuses the user.
    async fn lesson_detail(
        &self,
        user: UserId,
        course_slug: &str,
        lesson_slug: &str,
    ) -> Result<LessonPage, CourseError>;

    /// Flips the user's completion marker for a lesson, behind the same gate.
    async fn toggle_completion(
        &self,
        user: UserId,
        course_slug: &str,
        lesson_slug: &str,
    ) -> Result<ToggleResult, CourseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_error_display() {
        let err = CourseError::CourseNotFound("rust-101".to_string());
        assert_eq!(err.to_string(), "Course not found: rust-101");

        let err = CourseError::LessonNotFound {
            course_slug: "rust-101".to_string(),
            lesson_slug: "traits".to_string(),
        };
        assert_eq!(err.to_string(), "Lesson not found: rust-101/traits");
    }

    #[test]
    fn error_conversions_work() {
        let db_err = sea_orm::DbErr::Custom("test".to_string());
        let err: CourseError = db_err.into();
        assert!(matches!(err, CourseError::Database(_)));

        let err: CourseError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, CourseError::Internal(_)));
    }
}

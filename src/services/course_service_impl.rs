//! `SeaORM` implementation of the `CourseService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::domain::{CourseProgress, LessonAccess, UserId};
use crate::models::course::{Course, Lesson};
use crate::services::course_service::{
    CourseDetail, CourseError, CourseService, EnrollOutcome, Enrollment, LessonPage,
    ToggleOutcome, ToggleResult,
};

pub struct SeaOrmCourseService {
    store: Store,
}

impl SeaOrmCourseService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn course_by_slug(&self, slug: &str) -> Result<Course, CourseError> {
        self.store
            .get_course_by_slug(slug)
            .await?
            .ok_or_else(|| CourseError::CourseNotFound(slug.to_string()))
    }

    /// Resolves the lesson and applies the enrollment / free-preview gate.
    async fn gated_lesson(
        &self,
        user: UserId,
        course_slug: &str,
        lesson_slug: &str,
    ) -> Result<(Course, Lesson, bool), CourseError> {
        let (course, lesson) = self.find_lesson(course_slug, lesson_slug).await?;
        let is_enrolled = self.store.is_enrolled(user.value(), course.id).await?;

        if !LessonAccess::evaluate(is_enrolled, lesson.is_free_preview).is_granted() {
            debug!(
                user = %user,
                course = %course.slug,
                lesson = %lesson.slug,
                "Lesson access denied"
            );
            return Err(CourseError::AccessDenied {
                course_slug: course.slug,
            });
        }

        Ok((course, lesson, is_enrolled))
    }
}

#[async_trait]
impl CourseService for SeaOrmCourseService {
    async fn list_courses(&self) -> Result<Vec<Course>, CourseError> {
        Ok(self.store.list_published_courses().await?)
    }

    async fn course_detail(
        &self,
        slug: &str,
        viewer: Option<UserId>,
    ) -> Result<CourseDetail, CourseError> {
        let course = self.course_by_slug(slug).await?;

        let is_enrolled = match viewer {
            Some(user) => self.store.is_enrolled(user.value(), course.id).await?,
            None => false,
        };

        let instructor = self
            .store
            .get_user(course.instructor_id)
            .await?
            .map(|u| u.username);
        let modules = self.store.course_outline(course.id).await?;

        Ok(CourseDetail {
            course,
            instructor,
            modules,
            is_enrolled,
        })
    }

    async fn enroll(&self, user: UserId, slug: &str) -> Result<Enrollment, CourseError> {
        let course = self.course_by_slug(slug).await?;

        // No payment step: every course is open for enrollment.
        let created = self.store.enroll(user.value(), course.id).await?;
        let outcome = if created {
            info!(user = %user, course = %course.slug, "Enrolled in course");
            EnrollOutcome::Enrolled
        } else {
            EnrollOutcome::AlreadyEnrolled
        };

        Ok(Enrollment { course, outcome })
    }

    async fn find_lesson(
        &self,
        course_slug: &str,
        lesson_slug: &str,
    ) -> Result<(Course, Lesson), CourseError> {
        let not_found = || CourseError::LessonNotFound {
            course_slug: course_slug.to_string(),
            lesson_slug: lesson_slug.to_string(),
        };

        let course = self
            .store
            .get_course_by_slug(course_slug)
            .await?
            .ok_or_else(not_found)?;
        let lesson = self
            .store
            .find_lesson(course.id, lesson_slug)
            .await?
            .ok_or_else(not_found)?;

        Ok((course, lesson))
    }

    async fn lesson_detail(
        &self,
        user: UserId,
        course_slug: &str,
        lesson_slug: &str,
    ) -> Result<LessonPage, CourseError> {
        let (course, lesson, is_enrolled) =
            self.gated_lesson(user, course_slug, lesson_slug).await?;

        let module = self
            .store
            .get_module(lesson.module_id)
            .await?
            .ok_or_else(|| {
                CourseError::Internal(format!("Module {} not found", lesson.module_id))
            })?;

        let lessons = self.store.ordered_lessons(course.id).await?;
        let completed = self
            .store
            .completed_lesson_ids(user.value(), course.id)
            .await?;

        let progress = CourseProgress::new(lessons.iter().map(|l| l.id).collect(), completed);
        let (prev_id, next_id) = progress.neighbors(lesson.id);
        let find = |id: Option<i32>| {
            id.and_then(|id| lessons.iter().find(|l| l.id == id).cloned())
        };

        Ok(LessonPage {
            prev_lesson: find(prev_id),
            next_lesson: find(next_id),
            total_lessons: progress.total(),
            completed_lesson_ids: progress.completed_ids().iter().copied().collect(),
            progress_percent: progress.percent(),
            is_completed: progress.is_completed(lesson.id),
            is_enrolled,
            course,
            module,
            lesson,
            lessons,
        })
    }

    async fn toggle_completion(
        &self,
        user: UserId,
        course_slug: &str,
        lesson_slug: &str,
    ) -> Result<ToggleResult, CourseError> {
        let (course, lesson, _) = self.gated_lesson(user, course_slug, lesson_slug).await?;

        let completed = self
            .store
            .toggle_lesson_progress(user.value(), lesson.id)
            .await?;
        let outcome = if completed {
            ToggleOutcome::Completed
        } else {
            ToggleOutcome::Uncompleted
        };

        info!(
            user = %user,
            course = %course.slug,
            lesson = %lesson.slug,
            outcome = ?outcome,
            "Lesson completion toggled"
        );

        Ok(ToggleResult {
            course,
            lesson,
            outcome,
        })
    }
}

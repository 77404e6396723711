use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    RelationTrait, Set, sea_query::JoinType, sea_query::OnConflict,
};

use crate::entities::{course_modules, lessons, prelude::*, user_lesson_progress};

/// Repository for per-lesson completion markers.
///
/// A row means "completed"; deleting it means "not completed".
pub struct ProgressRepository {
    conn: DatabaseConnection,
}

impl ProgressRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Ids of the lessons in `course_id` that the user has completed.
    pub async fn completed_lesson_ids(&self, user_id: i32, course_id: i32) -> Result<Vec<i32>> {
        let ids = UserLessonProgress::find()
            .select_only()
            .column(user_lesson_progress::Column::LessonId)
            .join(JoinType::InnerJoin, user_lesson_progress::Relation::Lesson.def())
            .join(JoinType::InnerJoin, lessons::Relation::Module.def())
            .filter(user_lesson_progress::Column::UserId.eq(user_id))
            .filter(course_modules::Column::CourseId.eq(course_id))
            .into_tuple::<i32>()
            .all(&self.conn)
            .await
            .context("Failed to query completed lessons")?;

        Ok(ids)
    }

    pub async fn is_completed(&self, user_id: i32, lesson_id: i32) -> Result<bool> {
        let count = UserLessonProgress::find()
            .filter(user_lesson_progress::Column::UserId.eq(user_id))
            .filter(user_lesson_progress::Column::LessonId.eq(lesson_id))
            .count(&self.conn)
            .await
            .context("Failed to query lesson progress")?;

        Ok(count > 0)
    }

    /// Flip the completion marker. Returns `true` if the lesson is now completed.
    pub async fn toggle(&self, user_id: i32, lesson_id: i32) -> Result<bool> {
        let deleted = UserLessonProgress::delete_many()
            .filter(user_lesson_progress::Column::UserId.eq(user_id))
            .filter(user_lesson_progress::Column::LessonId.eq(lesson_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete lesson progress")?;

        if deleted.rows_affected > 0 {
            return Ok(false);
        }

        let active = user_lesson_progress::ActiveModel {
            user_id: Set(user_id),
            lesson_id: Set(lesson_id),
            completed_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        // A concurrent toggle may have inserted first; either way the row now exists.
        UserLessonProgress::insert(active)
            .on_conflict(
                OnConflict::columns([
                    user_lesson_progress::Column::UserId,
                    user_lesson_progress::Column::LessonId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert lesson progress")?;

        Ok(true)
    }

    pub async fn count_for_user(&self, user_id: i32) -> Result<u64> {
        let count = UserLessonProgress::find()
            .filter(user_lesson_progress::Column::UserId.eq(user_id))
            .count(&self.conn)
            .await
            .context("Failed to count lesson progress")?;

        Ok(count)
    }
}

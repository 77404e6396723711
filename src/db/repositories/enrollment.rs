use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
    sea_query::OnConflict,
};
use tracing::info;

use crate::entities::{prelude::*, user_course_access};

/// Repository for course enrollments
pub struct EnrollmentRepository {
    conn: DatabaseConnection,
}

impl EnrollmentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn is_enrolled(&self, user_id: i32, course_id: i32) -> Result<bool> {
        let count = UserCourseAccess::find()
            .filter(user_course_access::Column::UserId.eq(user_id))
            .filter(user_course_access::Column::CourseId.eq(course_id))
            .count(&self.conn)
            .await
            .context("Failed to query enrollment")?;

        Ok(count > 0)
    }

    /// Insert the (user, course) row unless it exists. Returns `true` if a row was created.
    ///
    /// The unique index decides between concurrent identical requests.
    pub async fn enroll(&self, user_id: i32, course_id: i32) -> Result<bool> {
        let active = user_course_access::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            enrolled_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let inserted = UserCourseAccess::insert(active)
            .on_conflict(
                OnConflict::columns([
                    user_course_access::Column::UserId,
                    user_course_access::Column::CourseId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert enrollment")?;

        if inserted > 0 {
            info!("User {} enrolled in course {}", user_id, course_id);
        }

        Ok(inserted > 0)
    }

    pub async fn count_for_course(&self, course_id: i32) -> Result<u64> {
        let count = UserCourseAccess::find()
            .filter(user_course_access::Column::CourseId.eq(course_id))
            .count(&self.conn)
            .await
            .context("Failed to count enrollments")?;

        Ok(count)
    }
}

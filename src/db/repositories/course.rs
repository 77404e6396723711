use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, sea_query::JoinType,
};
use tracing::info;

use crate::domain::{is_reserved_course_slug, slugify};
use crate::entities::{course_modules, courses, lessons, prelude::*};
use crate::models::course::{
    Course, Lesson, Module, ModuleOutline, NewCourse, NewLesson, NewModule,
};

/// Repository for courses and their module/lesson tree
pub struct CourseRepository {
    conn: DatabaseConnection,
}

impl CourseRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Courses
    // ========================================================================

    pub async fn list_published(&self) -> Result<Vec<Course>> {
        let rows = Courses::find()
            .filter(courses::Column::IsPublished.eq(true))
            .order_by_asc(courses::Column::CreatedAt)
            .order_by_asc(courses::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list published courses")?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    /// Every course, hidden ones included, in creation order.
    pub async fn list_all(&self) -> Result<Vec<Course>> {
        let rows = Courses::find()
            .order_by_asc(courses::Column::CreatedAt)
            .order_by_asc(courses::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list courses")?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Course>> {
        let row = Courses::find()
            .filter(courses::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query course by slug")?;

        Ok(row.map(Course::from))
    }

    pub async fn create(&self, input: NewCourse) -> Result<Course> {
        let slug = if input.slug.is_empty() {
            slugify(&input.title)
        } else {
            input.slug
        };
        if is_reserved_course_slug(&slug) {
            anyhow::bail!("Course slug '{slug}' is reserved by a fixed route");
        }
        let now = chrono::Utc::now().to_rfc3339();

        let active = courses::ActiveModel {
            title: Set(input.title),
            slug: Set(slug.clone()),
            description: Set(input.description),
            instructor_id: Set(input.instructor_id),
            price_cents: Set(input.price.cents()),
            is_published: Set(input.is_published),
            image: Set(input.image),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create course {slug}"))?;
        info!("Created course {} ({})", model.title, model.slug);

        Ok(Course::from(model))
    }

    pub async fn set_published(&self, course_id: i32, is_published: bool) -> Result<bool> {
        let result = Courses::update_many()
            .col_expr(
                courses::Column::IsPublished,
                sea_orm::sea_query::Expr::value(is_published),
            )
            .col_expr(
                courses::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(courses::Column::Id.eq(course_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Modules & Lessons
    // ========================================================================

    pub async fn create_module(&self, input: NewModule) -> Result<Module> {
        let active = course_modules::ActiveModel {
            course_id: Set(input.course_id),
            title: Set(input.title),
            order: Set(i32::try_from(input.order).context("Module order out of range")?),
            description: Set(input.description),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create module")?;

        Ok(Module::from(model))
    }

    pub async fn create_lesson(&self, input: NewLesson) -> Result<Lesson> {
        let slug = if input.slug.is_empty() {
            slugify(&input.title)
        } else {
            input.slug
        };

        let active = lessons::ActiveModel {
            module_id: Set(input.module_id),
            title: Set(input.title),
            slug: Set(slug.clone()),
            content: Set(input.content),
            video_url: Set(input.video_url),
            order: Set(i32::try_from(input.order).context("Lesson order out of range")?),
            is_free_preview: Set(input.is_free_preview),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create lesson {slug}"))?;

        Ok(Lesson::from(model))
    }

    pub async fn get_module(&self, module_id: i32) -> Result<Option<Module>> {
        let row = CourseModules::find_by_id(module_id)
            .one(&self.conn)
            .await
            .context("Failed to query module")?;

        Ok(row.map(Module::from))
    }

    /// Modules of a course with their lessons, both in display order.
    pub async fn outline(&self, course_id: i32) -> Result<Vec<ModuleOutline>> {
        let modules = CourseModules::find()
            .filter(course_modules::Column::CourseId.eq(course_id))
            .order_by_asc(course_modules::Column::Order)
            .order_by_asc(course_modules::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list course modules")?;

        let lessons = self.ordered_lessons(course_id).await?;

        let outline = modules
            .into_iter()
            .map(Module::from)
            .map(|module| {
                let lessons = lessons
                    .iter()
                    .filter(|l| l.module_id == module.id)
                    .cloned()
                    .collect();
                ModuleOutline { module, lessons }
            })
            .collect();

        Ok(outline)
    }

    /// All lessons of a course ordered by module order, then lesson order.
    pub async fn ordered_lessons(&self, course_id: i32) -> Result<Vec<Lesson>> {
        let rows = Lessons::find()
            .join(JoinType::InnerJoin, lessons::Relation::Module.def())
            .filter(course_modules::Column::CourseId.eq(course_id))
            .order_by_asc(course_modules::Column::Order)
            .order_by_asc(course_modules::Column::Id)
            .order_by_asc(lessons::Column::Order)
            .order_by_asc(lessons::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list course lessons")?;

        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    /// Lesson with `lesson_slug` inside any module of the course.
    ///
    /// Lesson slugs are only unique per module, so the course is part of the key.
    /// If two modules reuse a slug the earliest one in course order wins.
    pub async fn find_lesson(&self, course_id: i32, lesson_slug: &str) -> Result<Option<Lesson>> {
        let row = Lessons::find()
            .join(JoinType::InnerJoin, lessons::Relation::Module.def())
            .filter(course_modules::Column::CourseId.eq(course_id))
            .filter(lessons::Column::Slug.eq(lesson_slug))
            .order_by_asc(course_modules::Column::Order)
            .order_by_asc(course_modules::Column::Id)
            .order_by_asc(lessons::Column::Order)
            .one(&self.conn)
            .await
            .context("Failed to query lesson")?;

        Ok(row.map(Lesson::from))
    }
}

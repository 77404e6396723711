use crate::config::{GeneralConfig, SecurityConfig};
use crate::models::blog::{Category, NewPost, Post, Tag};
use crate::models::course::{
    Course, Lesson, Module, ModuleOutline, NewCourse, NewLesson, NewModule,
};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn from_config(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn course_repo(&self) -> repositories::course::CourseRepository {
        repositories::course::CourseRepository::new(self.conn.clone())
    }

    fn enrollment_repo(&self) -> repositories::enrollment::EnrollmentRepository {
        repositories::enrollment::EnrollmentRepository::new(self.conn.clone())
    }

    fn progress_repo(&self) -> repositories::progress::ProgressRepository {
        repositories::progress::ProgressRepository::new(self.conn.clone())
    }

    fn blog_repo(&self) -> repositories::blog::BlogRepository {
        repositories::blog::BlogRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        is_staff: bool,
        bio: &str,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo()
            .create(username, password, is_staff, bio, security)
            .await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn update_user_bio(&self, id: i32, bio: &str) -> Result<()> {
        self.user_repo().update_bio(id, bio).await
    }

    // ========================================================================
    // Courses
    // ========================================================================

    pub async fn list_published_courses(&self) -> Result<Vec<Course>> {
        self.course_repo().list_published().await
    }

    pub async fn list_all_courses(&self) -> Result<Vec<Course>> {
        self.course_repo().list_all().await
    }

    pub async fn get_course_by_slug(&self, slug: &str) -> Result<Option<Course>> {
        self.course_repo().get_by_slug(slug).await
    }

    pub async fn create_course(&self, input: NewCourse) -> Result<Course> {
        self.course_repo().create(input).await
    }

    pub async fn set_course_published(&self, course_id: i32, is_published: bool) -> Result<bool> {
        self.course_repo().set_published(course_id, is_published).await
    }

    pub async fn create_module(&self, input: NewModule) -> Result<Module> {
        self.course_repo().create_module(input).await
    }

    pub async fn get_module(&self, module_id: i32) -> Result<Option<Module>> {
        self.course_repo().get_module(module_id).await
    }

    pub async fn create_lesson(&self, input: NewLesson) -> Result<Lesson> {
        self.course_repo().create_lesson(input).await
    }

    pub async fn course_outline(&self, course_id: i32) -> Result<Vec<ModuleOutline>> {
        self.course_repo().outline(course_id).await
    }

    pub async fn ordered_lessons(&self, course_id: i32) -> Result<Vec<Lesson>> {
        self.course_repo().ordered_lessons(course_id).await
    }

    pub async fn find_lesson(&self, course_id: i32, lesson_slug: &str) -> Result<Option<Lesson>> {
        self.course_repo().find_lesson(course_id, lesson_slug).await
    }

    // ========================================================================
    // Enrollment & Progress
    // ========================================================================

    pub async fn is_enrolled(&self, user_id: i32, course_id: i32) -> Result<bool> {
        self.enrollment_repo().is_enrolled(user_id, course_id).await
    }

    pub async fn enroll(&self, user_id: i32, course_id: i32) -> Result<bool> {
        self.enrollment_repo().enroll(user_id, course_id).await
    }

    pub async fn count_enrollments(&self, course_id: i32) -> Result<u64> {
        self.enrollment_repo().count_for_course(course_id).await
    }

    pub async fn completed_lesson_ids(&self, user_id: i32, course_id: i32) -> Result<Vec<i32>> {
        self.progress_repo()
            .completed_lesson_ids(user_id, course_id)
            .await
    }

    pub async fn is_lesson_completed(&self, user_id: i32, lesson_id: i32) -> Result<bool> {
        self.progress_repo().is_completed(user_id, lesson_id).await
    }

    pub async fn toggle_lesson_progress(&self, user_id: i32, lesson_id: i32) -> Result<bool> {
        self.progress_repo().toggle(user_id, lesson_id).await
    }

    pub async fn count_progress_for_user(&self, user_id: i32) -> Result<u64> {
        self.progress_repo().count_for_user(user_id).await
    }

    // ========================================================================
    // Blog
    // ========================================================================

    pub async fn create_category(&self, name: &str, slug: String) -> Result<Category> {
        self.blog_repo().create_category(name, slug).await
    }

    pub async fn create_tag(&self, name: &str, slug: String) -> Result<Tag> {
        self.blog_repo().create_tag(name, slug).await
    }

    pub async fn create_post(&self, input: NewPost) -> Result<Post> {
        self.blog_repo().create_post(input).await
    }

    pub async fn publish_post(&self, post_id: i32) -> Result<Option<Post>> {
        self.blog_repo().publish_post(post_id).await
    }

    pub async fn tag_post(&self, post_id: i32, tag_id: i32) -> Result<()> {
        self.blog_repo().tag_post(post_id, tag_id).await
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        self.blog_repo().get_post_by_slug(slug).await
    }

    pub async fn tags_for_post(&self, post_id: i32) -> Result<Vec<Tag>> {
        self.blog_repo().tags_for_post(post_id).await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.blog_repo().list_posts().await
    }
}

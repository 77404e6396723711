//! Domain service for the blog: categories, tags and posts.

use serde::Serialize;
use thiserror::Error;

use crate::models::blog::{Category, NewPost, Post, Tag};

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for BlogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for BlogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A post with its tags, as shown in listings.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub post: Post,
    pub tags: Vec<Tag>,
}

#[async_trait::async_trait]
pub trait BlogService: Send + Sync {
    async fn create_category(&self, name: &str, slug: &str) -> Result<Category, BlogError>;

    async fn create_tag(&self, name: &str, slug: &str) -> Result<Tag, BlogError>;

    /// Creates a post. An empty slug is prepopulated from the title.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::SlugTaken`] if another post already uses the slug.
    async fn create_post(&self, post: NewPost, tag_ids: &[i32]) -> Result<Post, BlogError>;

    async fn publish(&self, slug: &str) -> Result<Post, BlogError>;

    /// Posts in admin order with their tags.
    async fn list_posts(&self) -> Result<Vec<PostSummary>, BlogError>;
}

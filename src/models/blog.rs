use serde::Serialize;

pub use crate::entities::posts::PostStatus;
use crate::entities::{categories, posts, tags};

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<tags::Model> for Tag {
    fn from(model: tags::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub author_id: i32,
    pub category_id: Option<i32>,
    pub content: String,
    pub status: &'static str,
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<posts::Model> for Post {
    fn from(model: posts::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            author_id: model.author_id,
            category_id: model.category_id,
            content: model.content,
            status: status_label(model.status),
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[must_use]
pub const fn status_label(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Draft => "draft",
        PostStatus::Published => "published",
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    /// Prepopulated from the title when empty.
    pub slug: String,
    pub author_id: i32,
    pub category_id: Option<i32>,
    pub content: String,
    pub status: PostStatus,
}

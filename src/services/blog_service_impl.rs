//! `SeaORM` implementation of the `BlogService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::domain::{is_valid_slug, slugify};
use crate::models::blog::{Category, NewPost, Post, Tag};
use crate::services::blog_service::{BlogError, BlogService, PostSummary};

pub struct SeaOrmBlogService {
    store: Store,
}

impl SeaOrmBlogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn prepopulated_slug(slug: &str, source: &str) -> Result<String, BlogError> {
    if source.trim().is_empty() {
        return Err(BlogError::Validation("Name cannot be empty".to_string()));
    }

    let slug = if slug.is_empty() {
        slugify(source)
    } else {
        slug.to_string()
    };

    if !is_valid_slug(&slug) {
        return Err(BlogError::Validation(format!(
            "Cannot derive a valid slug from '{source}'"
        )));
    }

    Ok(slug)
}

#[async_trait]
impl BlogService for SeaOrmBlogService {
    async fn create_category(&self, name: &str, slug: &str) -> Result<Category, BlogError> {
        let slug = prepopulated_slug(slug, name)?;
        Ok(self.store.create_category(name, slug).await?)
    }

    async fn create_tag(&self, name: &str, slug: &str) -> Result<Tag, BlogError> {
        let slug = prepopulated_slug(slug, name)?;
        Ok(self.store.create_tag(name, slug).await?)
    }

    async fn create_post(&self, mut post: NewPost, tag_ids: &[i32]) -> Result<Post, BlogError> {
        post.slug = prepopulated_slug(&post.slug, &post.title)?;

        if self.store.get_post_by_slug(&post.slug).await?.is_some() {
            return Err(BlogError::SlugTaken(post.slug));
        }

        let created = self.store.create_post(post).await?;
        for tag_id in tag_ids {
            self.store.tag_post(created.id, *tag_id).await?;
        }

        tracing::info!(post = %created.slug, status = created.status, "Created post");
        Ok(created)
    }

    async fn publish(&self, slug: &str) -> Result<Post, BlogError> {
        let post = self
            .store
            .get_post_by_slug(slug)
            .await?
            .ok_or_else(|| BlogError::PostNotFound(slug.to_string()))?;

        self.store
            .publish_post(post.id)
            .await?
            .ok_or_else(|| BlogError::PostNotFound(slug.to_string()))
    }

    async fn list_posts(&self) -> Result<Vec<PostSummary>, BlogError> {
        let posts = self.store.list_posts().await?;

        let mut summaries = Vec::with_capacity(posts.len());
        for post in posts {
            let tags = self.store.tags_for_post(post.id).await?;
            summaries.push(PostSummary { post, tags });
        }

        Ok(summaries)
    }
}

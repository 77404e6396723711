use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, sea_query::OnConflict,
};

use crate::domain::slugify;
use crate::entities::{categories, post_tags, posts, prelude::*, tags};
use crate::models::blog::{Category, NewPost, Post, PostStatus, Tag};

/// Repository for blog categories, tags and posts
pub struct BlogRepository {
    conn: DatabaseConnection,
}

fn slug_or_from(slug: String, source: &str) -> String {
    if slug.is_empty() { slugify(source) } else { slug }
}

impl BlogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create_category(&self, name: &str, slug: String) -> Result<Category> {
        let active = categories::ActiveModel {
            name: Set(name.to_string()),
            slug: Set(slug_or_from(slug, name)),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create category {name}"))?;

        Ok(Category::from(model))
    }

    pub async fn create_tag(&self, name: &str, slug: String) -> Result<Tag> {
        let active = tags::ActiveModel {
            name: Set(name.to_string()),
            slug: Set(slug_or_from(slug, name)),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create tag {name}"))?;

        Ok(Tag::from(model))
    }

    pub async fn create_post(&self, input: NewPost) -> Result<Post> {
        let now = chrono::Utc::now().to_rfc3339();
        let published_at = (input.status == PostStatus::Published).then(|| now.clone());

        let active = posts::ActiveModel {
            slug: Set(slug_or_from(input.slug, &input.title)),
            title: Set(input.title),
            author_id: Set(input.author_id),
            category_id: Set(input.category_id),
            content: Set(input.content),
            status: Set(input.status),
            published_at: Set(published_at),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to create post")?;

        Ok(Post::from(model))
    }

    /// Move a post to `published`, stamping `published_at` the first time.
    pub async fn publish_post(&self, post_id: i32) -> Result<Option<Post>> {
        let Some(post) = Posts::find_by_id(post_id)
            .one(&self.conn)
            .await
            .context("Failed to query post")?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().to_rfc3339();
        let published_at = post.published_at.clone().unwrap_or_else(|| now.clone());

        let mut active: posts::ActiveModel = post.into();
        active.status = Set(PostStatus::Published);
        active.published_at = Set(Some(published_at));
        active.updated_at = Set(now);
        let model = active.update(&self.conn).await?;

        Ok(Some(Post::from(model)))
    }

    pub async fn tag_post(&self, post_id: i32, tag_id: i32) -> Result<()> {
        let active = post_tags::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag_id),
        };

        PostTags::insert(active)
            .on_conflict(
                OnConflict::columns([post_tags::Column::PostId, post_tags::Column::TagId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to tag post")?;

        Ok(())
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let row = Posts::find()
            .filter(posts::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query post by slug")?;

        Ok(row.map(Post::from))
    }

    pub async fn tags_for_post(&self, post_id: i32) -> Result<Vec<Tag>> {
        let Some(post) = Posts::find_by_id(post_id).one(&self.conn).await? else {
            return Ok(Vec::new());
        };

        let rows = post
            .find_related(Tags)
            .order_by_asc(tags::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to query post tags")?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    /// Posts in admin listing order: status, then newest publication first.
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let rows = Posts::find()
            .order_by_asc(posts::Column::Status)
            .order_by_desc(posts::Column::PublishedAt)
            .order_by_desc(posts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list posts")?;

        Ok(rows.into_iter().map(Post::from).collect())
    }
}

use serde::Serialize;

use crate::domain::Price;
use crate::entities::{course_modules, courses, lessons};

#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub instructor_id: i32,
    #[serde(serialize_with = "serialize_price")]
    pub price: Price,
    pub is_published: bool,
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn serialize_price<S: serde::Serializer>(price: &Price, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(price.cents())
}

impl From<courses::Model> for Course {
    fn from(model: courses::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            description: model.description,
            instructor_id: model.instructor_id,
            // Negative prices are rejected on write; clamp anything legacy to free.
            price: Price::from_cents(model.price_cents).unwrap_or(Price::FREE),
            is_published: model.is_published,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub order: i32,
    pub description: String,
}

impl From<course_modules::Model> for Module {
    fn from(model: course_modules::Model) -> Self {
        Self {
            id: model.id,
            course_id: model.course_id,
            title: model.title,
            order: model.order,
            description: model.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub id: i32,
    pub module_id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub video_url: Option<String>,
    pub order: i32,
    pub is_free_preview: bool,
}

impl From<lessons::Model> for Lesson {
    fn from(model: lessons::Model) -> Self {
        Self {
            id: model.id,
            module_id: model.module_id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            video_url: model.video_url.filter(|url| !url.is_empty()),
            order: model.order,
            is_free_preview: model.is_free_preview,
        }
    }
}

/// A module together with its lessons in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleOutline {
    pub module: Module,
    pub lessons: Vec<Lesson>,
}

/// Input for creating a course.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    /// Prepopulated from the title when empty.
    pub slug: String,
    pub description: String,
    pub instructor_id: i32,
    pub price: Price,
    pub is_published: bool,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewModule {
    pub course_id: i32,
    pub title: String,
    pub order: u32,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub module_id: i32,
    pub title: String,
    /// Prepopulated from the title when empty.
    pub slug: String,
    pub content: String,
    pub video_url: Option<String>,
    pub order: u32,
    pub is_free_preview: bool,
}

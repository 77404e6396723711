//! Domain primitives for the course platform.
//!
//! Newtype identifiers, pricing, slugs and the lesson access rule live here so
//! the web layer and the services agree on them without touching the database.

pub mod navigation;

pub use navigation::{CourseProgress, progress_percent};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a registered user.
///
/// # Examples
///
/// ```rust
/// use lectern::domain::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Course price held as whole cents so it stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    pub const FREE: Self = Self(0);

    /// Returns `None` for negative amounts.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Option<Self> {
        if cents < 0 { None } else { Some(Self(cents)) }
    }

    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            write!(f, "Free")
        } else {
            write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
        }
    }
}

/// Outcome of the enrollment / free-preview rule for a single lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonAccess {
    Granted,
    Denied,
}

impl LessonAccess {
    /// Enrolled callers see everything; everyone else only sees previews.
    #[must_use]
    pub const fn evaluate(is_enrolled: bool, is_free_preview: bool) -> Self {
        if is_enrolled || is_free_preview {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Builds a URL slug from a title: lowercase ASCII alphanumerics separated by
/// single hyphens.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c == '_' || c == '-' || c.is_whitespace() || c.is_ascii_punctuation() {
            pending_dash = true;
        }
    }

    slug
}

/// Returns `true` if `value` would be accepted by the slug path segments.
#[must_use]
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// First path segments owned by fixed routes; a course with one of these
/// slugs would be shadowed by them.
pub const RESERVED_COURSE_SLUGS: &[&str] = &["accounts", "media", "metrics", "static"];

#[must_use]
pub fn is_reserved_course_slug(slug: &str) -> bool {
    RESERVED_COURSE_SLUGS.contains(&slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_course_slugs() {
        assert!(is_reserved_course_slug("media"));
        assert!(is_reserved_course_slug("static"));
        assert!(!is_reserved_course_slug("media-literacy"));
        assert!(is_reserved_course_slug(&slugify("Media")));
    }

    #[test]
    fn user_id_conversions() {
        let id = UserId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(UserId::from(42), id);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn price_rejects_negative_amounts() {
        assert!(Price::from_cents(-1).is_none());
        assert_eq!(Price::from_cents(0), Some(Price::FREE));
    }

    #[test]
    fn price_display() {
        assert_eq!(Price::FREE.to_string(), "Free");
        assert_eq!(Price::from_cents(1999).unwrap().to_string(), "$19.99");
        assert_eq!(Price::from_cents(500).unwrap().to_string(), "$5.00");
        assert_eq!(Price::from_cents(7).unwrap().to_string(), "$0.07");
    }

    #[test]
    fn access_rule() {
        assert!(LessonAccess::evaluate(true, false).is_granted());
        assert!(LessonAccess::evaluate(true, true).is_granted());
        assert!(LessonAccess::evaluate(false, true).is_granted());
        assert_eq!(LessonAccess::evaluate(false, false), LessonAccess::Denied);
    }

    #[test]
    fn slugify_titles() {
        assert_eq!(slugify("Intro to Rust"), "intro-to-rust");
        assert_eq!(slugify("  Ownership & Borrowing!  "), "ownership-borrowing");
        assert_eq!(slugify("already-a_slug"), "already-a-slug");
        assert_eq!(slugify("Lección 1"), "leccin-1");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("intro-to-rust"));
        assert!(is_valid_slug("lesson_01"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("has space"));
        assert!(!is_valid_slug("../etc"));
    }
}

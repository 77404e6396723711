//! Administrative configuration: one [`ModelAdmin`] per entity, gathered in an
//! [`AdminSite`]. These structs only describe listing and editing; the only
//! behaviour attached to them is slug prepopulation.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::slugify;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    #[error("Model already registered: {0}")]
    AlreadyRegistered(&'static str),
}

/// `(target field, source fields)`: the target is filled from the sources when left empty.
pub type Prepopulated = (&'static str, &'static [&'static str]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InlineStyle {
    Stacked,
    Tabular,
}

/// Child records edited on the parent's page.
#[derive(Debug, Clone, Serialize)]
pub struct InlineAdmin {
    pub model: &'static str,
    pub style: InlineStyle,
    /// Number of blank forms offered.
    pub extra: u8,
    pub prepopulated_fields: &'static [Prepopulated],
}

#[derive(Debug, Clone, Serialize)]
pub struct Fieldset {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelAdmin {
    pub model: &'static str,
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub prepopulated_fields: &'static [Prepopulated],
    /// Field names; a leading `-` means descending.
    pub ordering: &'static [&'static str],
    pub date_hierarchy: Option<&'static str>,
    pub inlines: Vec<InlineAdmin>,
    /// Extra sections appended to both the change and the add forms.
    pub fieldsets: &'static [Fieldset],
}

impl ModelAdmin {
    /// Registers a model with the default list display (`__str__` only).
    #[must_use]
    pub fn plain(model: &'static str) -> Self {
        Self {
            model,
            list_display: &["__str__"],
            ..Default::default()
        }
    }

    /// Fills `field` from its configured sources unless a value was entered.
    ///
    /// `lookup` returns the current value of a source field. Returns `None`
    /// when `field` is not prepopulated for this model.
    pub fn prepopulate<'a, F>(&self, field: &str, current: &str, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let (_, sources) = self
            .prepopulated_fields
            .iter()
            .find(|(target, _)| *target == field)?;

        if !current.is_empty() {
            return Some(current.to_string());
        }

        let joined = sources
            .iter()
            .filter_map(|source| lookup(source))
            .collect::<Vec<_>>()
            .join(" ");

        Some(slugify(&joined))
    }
}

impl fmt::Display for ModelAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.model)?;
        writeln!(f, "  list_display: {}", self.list_display.join(", "))?;

        if !self.list_filter.is_empty() {
            writeln!(f, "  list_filter: {}", self.list_filter.join(", "))?;
        }
        if !self.search_fields.is_empty() {
            writeln!(f, "  search_fields: {}", self.search_fields.join(", "))?;
        }
        for (target, sources) in self.prepopulated_fields {
            writeln!(f, "  prepopulate: {target} <- {}", sources.join(", "))?;
        }
        if !self.ordering.is_empty() {
            writeln!(f, "  ordering: {}", self.ordering.join(", "))?;
        }
        if let Some(field) = self.date_hierarchy {
            writeln!(f, "  date_hierarchy: {field}")?;
        }
        for inline in &self.inlines {
            writeln!(
                f,
                "  inline: {} ({:?}, extra={})",
                inline.model, inline.style, inline.extra
            )?;
        }
        for fieldset in self.fieldsets {
            writeln!(f, "  fieldset {}: {}", fieldset.name, fieldset.fields.join(", "))?;
        }
        Ok(())
    }
}

/// Registry of every administered model, in registration order.
#[derive(Debug, Clone, Default)]
pub struct AdminSite {
    models: Vec<ModelAdmin>,
}

impl AdminSite {
    #[must_use]
    pub const fn new() -> Self {
        Self { models: Vec::new() }
    }

    pub fn register(&mut self, admin: ModelAdmin) -> Result<(), AdminError> {
        if self.get(admin.model).is_some() {
            return Err(AdminError::AlreadyRegistered(admin.model));
        }
        self.models.push(admin);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, model: &str) -> Option<&ModelAdmin> {
        self.models.iter().find(|admin| admin.model == model)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelAdmin> {
        self.models.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

// ============================================================================
// Registrations
// ============================================================================

const SLUG_FROM_NAME: &[Prepopulated] = &[("slug", &["name"])];
const SLUG_FROM_TITLE: &[Prepopulated] = &[("slug", &["title"])];

fn user_admin() -> ModelAdmin {
    ModelAdmin {
        model: "User",
        list_display: &["username", "is_staff"],
        list_filter: &["is_staff"],
        search_fields: &["username"],
        ordering: &["username"],
        fieldsets: &[Fieldset {
            name: "Profile",
            fields: &["bio"],
        }],
        ..Default::default()
    }
}

fn category_admin() -> ModelAdmin {
    ModelAdmin {
        model: "Category",
        list_display: &["name", "slug"],
        prepopulated_fields: SLUG_FROM_NAME,
        ..Default::default()
    }
}

fn tag_admin() -> ModelAdmin {
    ModelAdmin {
        model: "Tag",
        list_display: &["name", "slug"],
        prepopulated_fields: SLUG_FROM_NAME,
        ..Default::default()
    }
}

fn post_admin() -> ModelAdmin {
    ModelAdmin {
        model: "Post",
        list_display: &["title", "author", "status", "published_at"],
        list_filter: &["status", "created_at", "published_at", "author"],
        search_fields: &["title", "content"],
        prepopulated_fields: SLUG_FROM_TITLE,
        ordering: &["status", "-published_at"],
        date_hierarchy: Some("published_at"),
        ..Default::default()
    }
}

fn course_admin() -> ModelAdmin {
    ModelAdmin {
        model: "Course",
        list_display: &["title", "instructor", "price", "is_published", "created_at"],
        list_filter: &["is_published", "created_at"],
        search_fields: &["title", "description"],
        prepopulated_fields: SLUG_FROM_TITLE,
        inlines: vec![InlineAdmin {
            model: "Module",
            style: InlineStyle::Stacked,
            extra: 1,
            prepopulated_fields: &[],
        }],
        ..Default::default()
    }
}

fn module_admin() -> ModelAdmin {
    ModelAdmin {
        model: "Module",
        list_display: &["title", "course", "order"],
        list_filter: &["course"],
        inlines: vec![InlineAdmin {
            model: "Lesson",
            style: InlineStyle::Stacked,
            extra: 1,
            prepopulated_fields: SLUG_FROM_TITLE,
        }],
        ..Default::default()
    }
}

fn lesson_admin() -> ModelAdmin {
    ModelAdmin {
        model: "Lesson",
        list_display: &["title", "module", "order", "is_free_preview"],
        list_filter: &["module__course", "module"],
        prepopulated_fields: SLUG_FROM_TITLE,
        ..Default::default()
    }
}

/// The site with every model of the application registered.
#[must_use]
pub fn default_site() -> AdminSite {
    let models = [
        user_admin(),
        category_admin(),
        tag_admin(),
        post_admin(),
        course_admin(),
        module_admin(),
        lesson_admin(),
        ModelAdmin::plain("UserCourseAccess"),
        ModelAdmin::plain("UserLessonProgress"),
    ];

    AdminSite {
        models: models.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_site_registers_every_model() {
        let site = default_site();
        assert_eq!(site.len(), 9);
        for model in [
            "User",
            "Category",
            "Tag",
            "Post",
            "Course",
            "Module",
            "Lesson",
            "UserCourseAccess",
            "UserLessonProgress",
        ] {
            assert!(site.get(model).is_some(), "{model} missing");
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut site = AdminSite::new();
        assert!(site.register(ModelAdmin::plain("Tag")).is_ok());
        assert_eq!(
            site.register(ModelAdmin::plain("Tag")),
            Err(AdminError::AlreadyRegistered("Tag"))
        );
        assert_eq!(site.len(), 1);
    }

    #[test]
    fn test_post_admin_listing() {
        let site = default_site();
        let post = site.get("Post").unwrap();
        assert_eq!(post.ordering, &["status", "-published_at"]);
        assert_eq!(post.date_hierarchy, Some("published_at"));
        assert_eq!(post.search_fields, &["title", "content"]);
    }

    #[test]
    fn test_inlines() {
        let site = default_site();
        let course = site.get("Course").unwrap();
        assert_eq!(course.inlines.len(), 1);
        assert_eq!(course.inlines[0].model, "Module");

        let module = site.get("Module").unwrap();
        assert_eq!(module.inlines[0].model, "Lesson");
        assert_eq!(module.inlines[0].prepopulated_fields, SLUG_FROM_TITLE);
        assert_eq!(module.inlines[0].extra, 1);
    }

    #[test]
    fn test_user_profile_fieldset() {
        let site = default_site();
        let user = site.get("User").unwrap();
        assert_eq!(user.fieldsets.len(), 1);
        assert_eq!(user.fieldsets[0].name, "Profile");
        assert_eq!(user.fieldsets[0].fields, &["bio"]);
    }

    #[test]
    fn test_prepopulate() {
        let site = default_site();
        let lesson = site.get("Lesson").unwrap();
        let lookup = |field: &str| (field == "title").then_some("Traits & Generics");

        assert_eq!(
            lesson.prepopulate("slug", "", lookup),
            Some("traits-generics".to_string())
        );
        assert_eq!(
            lesson.prepopulate("slug", "kept", lookup),
            Some("kept".to_string())
        );
        assert_eq!(lesson.prepopulate("title", "", lookup), None);

        let access = site.get("UserCourseAccess").unwrap();
        assert_eq!(access.prepopulate("slug", "", lookup), None);
    }

    #[test]
    fn test_display_lists_fields() {
        let text = default_site().get("Course").unwrap().to_string();
        assert!(text.starts_with("Course\n"));
        assert!(text.contains("search_fields: title, description"));
        assert!(text.contains("inline: Module (Stacked, extra=1)"));
    }
}

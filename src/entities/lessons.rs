use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub module_id: i32,

    pub title: String,

    /// Unique within the parent module only.
    pub slug: String,

    /// Lesson body, rendered as plain paragraphs.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// External video page, linked only when it is an http(s) URL.
    pub video_url: Option<String>,

    pub order: i32,

    pub is_free_preview: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_modules::Entity",
        from = "Column::ModuleId",
        to = "super::course_modules::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Module,
    #[sea_orm(has_many = "super::user_lesson_progress::Entity")]
    UserLessonProgress,
}

impl Related<super::course_modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl Related<super::user_lesson_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLessonProgress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

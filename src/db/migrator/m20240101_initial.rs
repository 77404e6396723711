use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve.
        create(manager, &schema, Users).await?;
        create(manager, &schema, Categories).await?;
        create(manager, &schema, Tags).await?;
        create(manager, &schema, Posts).await?;
        create(manager, &schema, PostTags).await?;
        create(manager, &schema, Courses).await?;
        create(manager, &schema, CourseModules).await?;
        create(manager, &schema, Lessons).await?;
        create(manager, &schema, UserCourseAccess).await?;
        create(manager, &schema, UserLessonProgress).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLessonProgress).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserCourseAccess).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lessons).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseModules).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostTags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}

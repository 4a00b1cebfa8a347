use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityCategory::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityCategory::Id))
                    .col(string(ActivityCategory::Name))
                    .col(text_null(ActivityCategory::Description))
                    .col(string_null(ActivityCategory::IconUrl))
                    .col(boolean(ActivityCategory::IsActive).default(true))
                    .col(integer(ActivityCategory::SortOrder).default(0))
                    .col(timestamp(ActivityCategory::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(ActivityCategory::UpdatedAt).default(Expr::current_timestamp()))
                    .col(boolean(ActivityCategory::IsDeleted).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActivityCategory {
    Table,
    Id,
    Name,
    Description,
    IconUrl,
    IsActive,
    SortOrder,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

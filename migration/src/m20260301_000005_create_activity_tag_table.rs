use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_activity_table::Activity;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityTag::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityTag::Id))
                    .col(integer(ActivityTag::ActivityId))
                    .col(string_len(ActivityTag::TagName, 50))
                    .col(string_len_null(ActivityTag::Color, 7))
                    .col(timestamp(ActivityTag::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(ActivityTag::UpdatedAt).default(Expr::current_timestamp()))
                    .col(boolean(ActivityTag::IsDeleted).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_tag_activity_id")
                            .from(ActivityTag::Table, ActivityTag::ActivityId)
                            .to(Activity::Table, Activity::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActivityTag {
    Table,
    Id,
    ActivityId,
    TagName,
    Color,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

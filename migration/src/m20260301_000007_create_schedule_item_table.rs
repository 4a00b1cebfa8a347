use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260301_000003_create_activity_table::Activity,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduleItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ScheduleItem::Id))
                    .col(integer(ScheduleItem::UserId))
                    .col(string_len(ScheduleItem::Title, 200))
                    .col(text_null(ScheduleItem::Description))
                    .col(string_len_null(ScheduleItem::Location, 200))
                    .col(timestamp(ScheduleItem::StartTime))
                    .col(timestamp(ScheduleItem::EndTime))
                    .col(integer(ScheduleItem::ItemType).default(1))
                    .col(integer(ScheduleItem::Priority).default(2))
                    .col(string_len_null(ScheduleItem::Color, 7))
                    .col(boolean(ScheduleItem::IsCompleted).default(false))
                    .col(string_len_null(ScheduleItem::Note, 500))
                    .col(integer_null(ScheduleItem::ActivityId))
                    .col(timestamp(ScheduleItem::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(ScheduleItem::UpdatedAt).default(Expr::current_timestamp()))
                    .col(boolean(ScheduleItem::IsDeleted).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_item_user_id")
                            .from(ScheduleItem::Table, ScheduleItem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_item_activity_id")
                            .from(ScheduleItem::Table, ScheduleItem::ActivityId)
                            .to(Activity::Table, Activity::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_item_user_start")
                    .table(ScheduleItem::Table)
                    .col(ScheduleItem::UserId)
                    .col(ScheduleItem::StartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduleItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ScheduleItem {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Location,
    StartTime,
    EndTime,
    ItemType,
    Priority,
    Color,
    IsCompleted,
    Note,
    ActivityId,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User,
    m20260301_000002_create_activity_category_table::ActivityCategory,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(pk_auto(Activity::Id))
                    .col(string_len(Activity::Title, 200))
                    .col(text(Activity::Description))
                    .col(string_len(Activity::Location, 200))
                    .col(timestamp(Activity::StartTime))
                    .col(timestamp(Activity::EndTime))
                    .col(timestamp(Activity::RegistrationDeadline))
                    .col(integer(Activity::MaxParticipants))
                    .col(integer(Activity::CurrentParticipants).default(0))
                    .col(string_null(Activity::ImageUrl))
                    .col(integer(Activity::Status).default(1))
                    .col(integer(Activity::CategoryId))
                    .col(integer_null(Activity::CreatedBy))
                    .col(integer_null(Activity::UpdatedBy))
                    .col(timestamp(Activity::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Activity::UpdatedAt).default(Expr::current_timestamp()))
                    .col(boolean(Activity::IsDeleted).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_category_id")
                            .from(Activity::Table, Activity::CategoryId)
                            .to(ActivityCategory::Table, ActivityCategory::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_created_by")
                            .from(Activity::Table, Activity::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_start_time")
                    .table(Activity::Table)
                    .col(Activity::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_status")
                    .table(Activity::Table)
                    .col(Activity::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Activity {
    Table,
    Id,
    Title,
    Description,
    Location,
    StartTime,
    EndTime,
    RegistrationDeadline,
    MaxParticipants,
    CurrentParticipants,
    ImageUrl,
    Status,
    CategoryId,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

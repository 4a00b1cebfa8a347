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
                    .table(ActivityRegistration::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityRegistration::Id))
                    .col(integer(ActivityRegistration::ActivityId))
                    .col(integer(ActivityRegistration::UserId))
                    .col(integer(ActivityRegistration::Status).default(1))
                    .col(string_len_null(ActivityRegistration::Note, 500))
                    .col(
                        timestamp(ActivityRegistration::RegistrationTime)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp(ActivityRegistration::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp(ActivityRegistration::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(boolean(ActivityRegistration::IsDeleted).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_registration_activity_id")
                            .from(ActivityRegistration::Table, ActivityRegistration::ActivityId)
                            .to(Activity::Table, Activity::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_registration_user_id")
                            .from(ActivityRegistration::Table, ActivityRegistration::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_registration_activity_user")
                    .table(ActivityRegistration::Table)
                    .col(ActivityRegistration::ActivityId)
                    .col(ActivityRegistration::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityRegistration::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActivityRegistration {
    Table,
    Id,
    ActivityId,
    UserId,
    Status,
    Note,
    RegistrationTime,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

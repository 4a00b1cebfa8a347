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
                    .table(UserActivityPreference::Table)
                    .if_not_exists()
                    .col(pk_auto(UserActivityPreference::Id))
                    .col(integer(UserActivityPreference::UserId))
                    .col(integer(UserActivityPreference::CategoryId))
                    .col(double(UserActivityPreference::Weight).default(0.0))
                    .col(
                        timestamp(UserActivityPreference::LastUpdated)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp(UserActivityPreference::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp(UserActivityPreference::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(boolean(UserActivityPreference::IsDeleted).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_activity_preference_user_id")
                            .from(UserActivityPreference::Table, UserActivityPreference::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_activity_preference_category_id")
                            .from(
                                UserActivityPreference::Table,
                                UserActivityPreference::CategoryId,
                            )
                            .to(ActivityCategory::Table, ActivityCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_activity_preference_user_category")
                    .table(UserActivityPreference::Table)
                    .col(UserActivityPreference::UserId)
                    .col(UserActivityPreference::CategoryId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserActivityPreference::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserActivityPreference {
    Table,
    Id,
    UserId,
    CategoryId,
    Weight,
    LastUpdated,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

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
                    .table(ActivityRecommendation::Table)
                    .if_not_exists()
                    .col(pk_auto(ActivityRecommendation::Id))
                    .col(integer(ActivityRecommendation::ActivityId))
                    .col(integer(ActivityRecommendation::UserId))
                    .col(double(ActivityRecommendation::Score))
                    .col(string_len_null(ActivityRecommendation::Reason, 500))
                    .col(
                        timestamp(ActivityRecommendation::CalculatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp(ActivityRecommendation::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp(ActivityRecommendation::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(boolean(ActivityRecommendation::IsDeleted).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_recommendation_activity_id")
                            .from(ActivityRecommendation::Table, ActivityRecommendation::ActivityId)
                            .to(Activity::Table, Activity::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_recommendation_user_id")
                            .from(ActivityRecommendation::Table, ActivityRecommendation::UserId)
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
                    .name("idx_activity_recommendation_activity_user")
                    .table(ActivityRecommendation::Table)
                    .col(ActivityRecommendation::ActivityId)
                    .col(ActivityRecommendation::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityRecommendation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActivityRecommendation {
    Table,
    Id,
    ActivityId,
    UserId,
    Score,
    Reason,
    CalculatedAt,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

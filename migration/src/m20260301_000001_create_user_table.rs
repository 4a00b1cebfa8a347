use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_uniq(User::Username))
                    .col(string_uniq(User::Email))
                    .col(string(User::PasswordHash))
                    .col(string(User::FullName))
                    .col(string_null(User::Phone))
                    .col(string_null(User::Avatar))
                    .col(integer(User::Role).default(1))
                    .col(boolean(User::IsActive).default(true))
                    .col(timestamp_null(User::LastLoginAt))
                    .col(string_null(User::StudentId))
                    .col(string_null(User::Major))
                    .col(string_null(User::Grade))
                    .col(string_null(User::EmployeeId))
                    .col(string_null(User::Department))
                    .col(string_null(User::Title))
                    .col(timestamp(User::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(User::UpdatedAt).default(Expr::current_timestamp()))
                    .col(boolean(User::IsDeleted).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FullName,
    Phone,
    Avatar,
    Role,
    IsActive,
    LastLoginAt,
    StudentId,
    Major,
    Grade,
    EmployeeId,
    Department,
    Title,
    CreatedAt,
    UpdatedAt,
    IsDeleted,
}

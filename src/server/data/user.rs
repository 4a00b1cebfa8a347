//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records. Reads skip
//! soft-deleted rows, and the password hash only leaves this module through the
//! dedicated credential lookups.

use chrono::Utc;
use entity::enums::UserRole;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Value,
};
use std::collections::HashMap;

use crate::server::model::user::{CreateUserParams, UpdateProfileParams, User};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new active user.
    ///
    /// # Arguments
    /// - `params` - User fields with an already hashed password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique constraint violations
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            full_name: ActiveValue::Set(params.full_name),
            phone: ActiveValue::Set(params.phone),
            avatar: ActiveValue::Set(None),
            role: ActiveValue::Set(params.role),
            is_active: ActiveValue::Set(true),
            last_login_at: ActiveValue::Set(None),
            student_id: ActiveValue::Set(params.details.student_id),
            major: ActiveValue::Set(params.details.major),
            grade: ActiveValue::Set(params.details.grade),
            employee_id: ActiveValue::Set(params.details.employee_id),
            department: ActiveValue::Set(params.details.department),
            title: ActiveValue::Set(params.details.title),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a visible user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No such user, or the user was soft-deleted
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        Ok(self.find_entity(id).await?.map(User::from_entity))
    }

    /// Finds a user by username together with their password hash.
    ///
    /// Used by login only.
    pub async fn find_with_password_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .filter(entity::user::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?;

        Ok(entity.map(|e| {
            let hash = e.password_hash.clone();
            (User::from_entity(e), hash)
        }))
    }

    /// Returns the stored password hash for a user.
    pub async fn get_password_hash(&self, id: i32) -> Result<Option<String>, DbErr> {
        Ok(self.find_entity(id).await?.map(|e| e.password_hash))
    }

    /// Checks whether a username is taken by any user other than `exclude_id`.
    ///
    /// Soft-deleted users still hold their username because of the unique index.
    pub async fn username_exists(
        &self,
        username: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::User::find().filter(entity::user::Column::Username.eq(username));
        if let Some(id) = exclude_id {
            query = query.filter(entity::user::Column::Id.ne(id));
        }
        Ok(query.count(self.db).await? > 0)
    }

    /// Checks whether an email is taken by any user other than `exclude_id`.
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::User::find().filter(entity::user::Column::Email.eq(email));
        if let Some(id) = exclude_id {
            query = query.filter(entity::user::Column::Id.ne(id));
        }
        Ok(query.count(self.db).await? > 0)
    }

    /// Replaces a user's profile fields.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - User not found
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_profile(
        &self,
        id: i32,
        params: UpdateProfileParams,
    ) -> Result<Option<User>, DbErr> {
        let Some(entity) = self.find_entity(id).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.full_name = ActiveValue::Set(params.full_name);
        active.email = ActiveValue::Set(params.email);
        active.phone = ActiveValue::Set(params.phone);
        active.avatar = ActiveValue::Set(params.avatar);
        active.student_id = ActiveValue::Set(params.details.student_id);
        active.major = ActiveValue::Set(params.details.major);
        active.grade = ActiveValue::Set(params.details.grade);
        active.employee_id = ActiveValue::Set(params.details.employee_id);
        active.department = ActiveValue::Set(params.details.department);
        active.title = ActiveValue::Set(params.details.title);

        let updated = active.update(self.db).await?;
        Ok(Some(User::from_entity(updated)))
    }

    /// Stores a new password hash.
    pub async fn update_password_hash(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        self.update_column(id, entity::user::Column::PasswordHash, password_hash.into())
            .await?;
        Ok(())
    }

    /// Sets `last_login_at` to now.
    pub async fn update_last_login(&self, id: i32) -> Result<(), DbErr> {
        self.update_column(id, entity::user::Column::LastLoginAt, Utc::now().into())
            .await?;
        Ok(())
    }

    /// Enables or disables a user account.
    ///
    /// # Returns
    /// - `Ok(true)` - User updated
    /// - `Ok(false)` - No visible user with that ID
    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<bool, DbErr> {
        self.update_column(id, entity::user::Column::IsActive, is_active.into())
            .await
    }

    /// Changes a user's role.
    ///
    /// # Returns
    /// - `Ok(true)` - User updated
    /// - `Ok(false)` - No visible user with that ID
    pub async fn set_role(&self, id: i32, role: UserRole) -> Result<bool, DbErr> {
        let Some(entity) = self.find_entity(id).await? else {
            return Ok(false);
        };

        let mut active = entity.into_active_model();
        active.role = ActiveValue::Set(role);
        active.update(self.db).await?;

        Ok(true)
    }

    /// Checks if any active admin exists.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(UserRole::Admin))
            .filter(entity::user::Column::IsActive.eq(true))
            .filter(entity::user::Column::IsDeleted.eq(false))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Gets users ordered by username with pagination.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users per page
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the page and total user count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let paginator = entity::prelude::User::find()
            .filter(entity::user::Column::IsDeleted.eq(false))
            .order_by_asc(entity::user::Column::Username)
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect();

        Ok((users, total))
    }

    /// IDs of every active user, ascending.
    pub async fn find_active_ids(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::IsActive.eq(true))
            .filter(entity::user::Column::IsDeleted.eq(false))
            .order_by_asc(entity::user::Column::Id)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Maps user IDs to full names. Deleted users are included so history stays readable.
    pub async fn find_names_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(users.into_iter().map(|u| (u.id, u.full_name)).collect())
    }

    async fn find_entity(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id)
            .filter(entity::user::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    /// Bulk updates skip the save hook, so `updated_at` is set here.
    async fn update_column(
        &self,
        id: i32,
        column: entity::user::Column,
        value: Value,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(column, Expr::value(value))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::user::Column::Id.eq(id))
            .filter(entity::user::Column::IsDeleted.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

//! User service for business logic.
//!
//! This module provides the `UserService` for account registration, credential checks,
//! profile maintenance and admin user management. It works with domain models rather
//! than DTOs and leaves session handling to the controllers.

use chrono::Utc;
use entity::enums::UserRole;
use sea_orm::{DatabaseConnection, DbErr};

use crate::server::{
    data::{registration::RegistrationRepository, schedule::ScheduleRepository, user::UserRepository},
    error::{auth::AuthError, internal::InternalError, is_unique_violation, AppError},
    model::{
        pagination::MAX_PAGE_SIZE,
        schedule::ScheduleStatistics,
        user::{
            CreateUserParams, PaginatedUsers, RegisterUserParams, UpdateProfileParams, User,
            UserContext,
        },
    },
    service::admin::code::AdminCodeService,
    util::{
        password::{hash_password, verify_password},
        validation::{check_email, check_length, check_max_length},
    },
};

/// Number of upcoming schedule items included in the user context.
const CONTEXT_UPCOMING_LIMIT: u64 = 10;

/// Service providing business logic for user accounts.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account from self-registration.
    ///
    /// Validates field lengths and email shape, rejects a self-assigned Admin role and
    /// duplicate usernames or emails, then stores an argon2 hash of the password.
    ///
    /// # Arguments
    /// - `params` - Trimmed registration fields
    ///
    /// # Returns
    /// - `Ok(User)` - The created account
    /// - `Err(AppError::BadRequest)` - Invalid field or Admin role requested
    /// - `Err(AppError::Conflict)` - Username or email already taken
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn register(&self, params: RegisterUserParams) -> Result<User, AppError> {
        check_length("Username", &params.username, 3, 50)?;
        check_length("Password", &params.password, 6, 100)?;
        check_length("Full name", &params.full_name, 1, 100)?;
        check_email(&params.email)?;
        check_max_length("Phone", params.phone.as_deref(), 20)?;

        if params.role == UserRole::Admin {
            return Err(AppError::BadRequest(
                "Admin role cannot be self-assigned".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);

        if user_repo.username_exists(&params.username, None).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }
        if user_repo.email_exists(&params.email, None).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password_hash = hash_password(&params.password).await?;

        let user = user_repo
            .create(CreateUserParams {
                username: params.username,
                email: params.email,
                password_hash,
                full_name: params.full_name,
                phone: params.phone,
                role: params.role,
                details: params.details,
            })
            .await
            .map_err(account_conflict)?;

        tracing::info!("Registered user {} ({})", user.username, user.id);

        Ok(user)
    }

    /// Checks credentials and records the login time.
    ///
    /// Unknown usernames, disabled accounts and wrong passwords all produce the same
    /// error so callers cannot tell which accounts exist.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user with `last_login_at` refreshed
    /// - `Err(AuthError::InvalidCredentials)` - Credentials rejected
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some((mut user, password_hash)) = user_repo
            .find_with_password_by_username(username.trim())
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !user.is_active || !verify_password(password, &password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        user_repo.update_last_login(user.id).await?;
        user.last_login_at = Some(Utc::now());

        Ok(user)
    }

    /// Replaces the user's profile fields.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Invalid field
    /// - `Err(AppError::Conflict)` - Email belongs to another account
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn update_profile(
        &self,
        user_id: i32,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        check_length("Full name", &params.full_name, 1, 100)?;
        check_email(&params.email)?;
        check_max_length("Phone", params.phone.as_deref(), 20)?;
        check_max_length("Avatar", params.avatar.as_deref(), 500)?;

        let user_repo = UserRepository::new(self.db);

        if user_repo.email_exists(&params.email, Some(user_id)).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        user_repo
            .update_profile(user_id, params)
            .await
            .map_err(account_conflict)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Verifies the current password and stores a hash of the new one.
    ///
    /// # Returns
    /// - `Ok(())` - Password changed
    /// - `Err(AppError::BadRequest)` - New password has an invalid length
    /// - `Err(AuthError::InvalidCredentials)` - Current password is wrong
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn change_password(
        &self,
        user_id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        check_length("New password", new_password, 6, 100)?;

        let user_repo = UserRepository::new(self.db);

        let stored_hash = user_repo
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(current_password, &stored_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let password_hash = hash_password(new_password).await?;
        user_repo.update_password_hash(user_id, password_hash).await?;

        Ok(())
    }

    /// Promotes the user to Admin when they present the current admin code.
    ///
    /// The code is consumed on success.
    ///
    /// # Returns
    /// - `Ok(User)` - The promoted user
    /// - `Err(AuthError::InvalidAdminCode)` - Code wrong, used or expired
    /// - `Err(InternalError::MissingAfterWrite)` - User vanished during promotion
    pub async fn claim_admin(
        &self,
        user_id: i32,
        code: &str,
        admin_code_service: &AdminCodeService,
    ) -> Result<User, AppError> {
        if !admin_code_service.validate_and_consume(code.trim()).await {
            return Err(AuthError::InvalidAdminCode.into());
        }

        let user_repo = UserRepository::new(self.db);
        user_repo.set_role(user_id, UserRole::Admin).await?;

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(InternalError::MissingAfterWrite {
                entity: "User",
                id: user_id,
            })?;

        tracing::info!("User {} ({}) claimed admin rights", user.username, user.id);

        Ok(user)
    }

    /// Retrieves all users with pagination.
    ///
    /// Returns users ordered by username. `per_page` is clamped to `[1, 100]`.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Users per page
    ///
    /// # Returns
    /// - `Ok(PaginatedUsers)` - Users for the requested page with pagination metadata
    /// - `Err(AppError::DbErr)` - Database error during pagination query
    pub async fn get_all_users(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, AppError> {
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        let user_repo = UserRepository::new(self.db);

        let (users, total_items) = user_repo.get_all_paginated(page, per_page).await?;

        Ok(PaginatedUsers {
            users,
            total: total_items,
            page,
            per_page,
            total_pages: total_items.div_ceil(per_page),
        })
    }

    /// Enables or disables an account.
    ///
    /// Admins cannot disable their own account.
    ///
    /// # Returns
    /// - `Ok(())` - Status updated
    /// - `Err(AppError::BadRequest)` - Admin tried to disable themselves
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn set_active(
        &self,
        acting_user_id: i32,
        user_id: i32,
        is_active: bool,
    ) -> Result<(), AppError> {
        if acting_user_id == user_id && !is_active {
            return Err(AppError::BadRequest(
                "You cannot disable your own account".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        if !user_repo.set_active(user_id, is_active).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("User {} active set to {}", user_id, is_active);

        Ok(())
    }

    /// Changes an account's role.
    ///
    /// # Returns
    /// - `Ok(())` - Role updated
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn set_role(&self, user_id: i32, role: UserRole) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);
        if !user_repo.set_role(user_id, role).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("User {} role set to {:?}", user_id, role);

        Ok(())
    }

    /// Collects a user's profile, registrations and schedule overview.
    ///
    /// # Returns
    /// - `Ok(UserContext)` - Dashboard data
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn get_user_context(&self, user_id: i32) -> Result<UserContext, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let now = Utc::now();
        let schedule_repo = ScheduleRepository::new(self.db);

        let registrations = RegistrationRepository::new(self.db)
            .find_by_user(user_id)
            .await?;
        let upcoming_schedule = schedule_repo
            .find_upcoming(user_id, now, CONTEXT_UPCOMING_LIMIT)
            .await?;
        let overdue_schedule = schedule_repo.find_overdue(user_id, now).await?;
        let all_items = schedule_repo.find_all_for_user(user_id).await?;

        Ok(UserContext {
            user,
            registrations,
            upcoming_schedule,
            overdue_schedule,
            schedule_statistics: ScheduleStatistics::from_items(&all_items, now),
        })
    }
}

/// Maps a unique index rejection on the user table to the matching conflict.
pub(super) fn account_conflict(err: DbErr) -> AppError {
    if !is_unique_violation(&err) {
        return err.into();
    }

    if err.to_string().contains("email") {
        AppError::Conflict("Email is already registered".to_string())
    } else {
        AppError::Conflict("Username is already taken".to_string())
    }
}

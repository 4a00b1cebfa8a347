use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};
use entity::enums::UserRole;

/// Role requirements checked by `AuthGuard::require`.
pub enum Permission {
    /// Admin role.
    Admin,
    /// Teacher or Admin role.
    Staff,
    /// Student role.
    Student,
}

impl Permission {
    fn allows(&self, user: &User) -> bool {
        match self {
            Permission::Admin => user.role == UserRole::Admin,
            Permission::Staff => user.is_staff(),
            Permission::Student => user.role == UserRole::Student,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Permission::Admin => "admin",
            Permission::Staff => "teacher or admin",
            Permission::Student => "student",
        }
    }
}

/// Resolves the session user and enforces role permissions.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Returns the logged-in user if they satisfy every permission.
    ///
    /// An empty permission list only requires an active, logged-in user.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user meeting all permissions
    /// - `Err(AuthError::UserNotInSession)` - No user in session
    /// - `Err(AuthError::UserNotInDatabase(_))` - Session refers to a missing user
    /// - `Err(AuthError::AccountDisabled(_))` - User has been deactivated
    /// - `Err(AuthError::AccessDenied(_, _))` - A permission is not met
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.is_active {
            return Err(AuthError::AccountDisabled(user_id).into());
        }

        for permission in permissions {
            if !permission.allows(&user) {
                return Err(AuthError::AccessDenied(
                    user_id,
                    format!("User lacks the {} role", permission.describe()),
                )
                .into());
            }
        }

        Ok(user)
    }

    /// Returns the logged-in user, or `None` for anonymous requests.
    ///
    /// Used by public endpoints whose response differs for logged-in users.
    pub async fn optional(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        let user = UserRepository::new(self.db).find_by_id(user_id).await?;
        Ok(user.filter(|u| u.is_active))
    }
}

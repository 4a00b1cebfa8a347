use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParams, ProfileDetails, RegisterUserParams},
    service::{
        admin::code::AdminCodeService,
        user::{account_conflict, UserService},
    },
};
use entity::enums::UserRole;
use test_utils::{builder::TestBuilder, factory};

mod account;
mod login;
mod register;

fn register_params(username: &str) -> RegisterUserParams {
    RegisterUserParams {
        username: username.to_string(),
        email: format!("{}@campus.test", username),
        password: "secret123".to_string(),
        full_name: "Campus Student".to_string(),
        phone: None,
        role: UserRole::Student,
        details: ProfileDetails::default(),
    }
}

use super::*;

/// Tests logging in with correct credentials records the login time.
///
/// Expected: Ok(User) with last_login_at set
#[tokio::test]
async fn logs_in_with_valid_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = UserService::new(db);
    let registered = service.register(register_params("login_ok")).await?;

    let user = service.login("login_ok", "secret123").await?;

    assert_eq!(user.id, registered.id);
    assert!(user.last_login_at.is_some());

    Ok(())
}

/// Tests unknown users, wrong passwords and disabled accounts fail alike.
///
/// Expected: Err(AuthError::InvalidCredentials) in every case
#[tokio::test]
async fn rejects_bad_credentials_uniformly() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = UserService::new(db);
    let user = service.register(register_params("login_bad")).await?;

    let wrong_password = service.login("login_bad", "wrong-password").await;
    assert!(matches!(
        wrong_password,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let unknown = service.login("nobody", "secret123").await;
    assert!(matches!(
        unknown,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    let admin = factory::user::create_user_with_role(db, UserRole::Admin).await?;
    service.set_active(admin.id, user.id, false).await?;
    let disabled = service.login("login_bad", "secret123").await;
    assert!(matches!(
        disabled,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests changing the password swaps which password works.
///
/// Expected: old password rejected, new password accepted
#[tokio::test]
async fn change_password_replaces_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = UserService::new(db);
    let user = service.register(register_params("rotating")).await?;

    let wrong = service
        .change_password(user.id, "not-current", "newsecret")
        .await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    service
        .change_password(user.id, "secret123", "newsecret")
        .await?;

    assert!(service.login("rotating", "secret123").await.is_err());
    assert!(service.login("rotating", "newsecret").await.is_ok());

    Ok(())
}

use super::*;

/// Tests a valid registration creates an active account.
///
/// Expected: Ok(User) with the requested role
#[tokio::test]
async fn registers_new_account() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut params = register_params("new_teacher");
    params.role = UserRole::Teacher;

    let user = UserService::new(db).register(params).await?;

    assert_eq!(user.username, "new_teacher");
    assert_eq!(user.role, UserRole::Teacher);
    assert!(user.is_active);

    Ok(())
}

/// Tests duplicate usernames and emails are rejected.
///
/// Expected: Err(AppError::Conflict) for both
#[tokio::test]
async fn rejects_taken_username_and_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = UserService::new(db);
    service.register(register_params("taken")).await?;

    let result = service.register(register_params("taken")).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let mut params = register_params("different");
    params.email = "taken@campus.test".to_string();
    let result = service.register(params).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests nobody can register directly as an admin.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_admin_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut params = register_params("sneaky");
    params.role = UserRole::Admin;

    let result = UserService::new(db).register(params).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests field validation runs before any write.
///
/// Expected: Err(AppError::BadRequest) for short username, short password, bad email
#[tokio::test]
async fn validates_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = UserService::new(db);

    let mut params = register_params("ab");
    params.email = "ab@campus.test".to_string();
    assert!(matches!(
        service.register(params).await,
        Err(AppError::BadRequest(_))
    ));

    let mut params = register_params("shortpass");
    params.password = "12345".to_string();
    assert!(matches!(
        service.register(params).await,
        Err(AppError::BadRequest(_))
    ));

    let mut params = register_params("bademail");
    params.email = "not-an-email".to_string();
    assert!(matches!(
        service.register(params).await,
        Err(AppError::BadRequest(_))
    ));

    let (_, total) = crate::server::data::user::UserRepository::new(db)
        .get_all_paginated(0, 10)
        .await?;
    assert_eq!(total, 0);

    Ok(())
}

/// Tests a write rejected by the username or email unique index maps to a conflict.
///
/// Expected: Conflict naming the username, then the email
#[tokio::test]
async fn unique_index_rejection_is_conflict() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("raced")
        .email("raced@campus.test")
        .build()
        .await?;
    let repo = UserRepository::new(db);
    let create = |username: &str, email: &str| CreateUserParams {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        full_name: "Campus Student".to_string(),
        phone: None,
        role: UserRole::Student,
        details: ProfileDetails::default(),
    };

    let same_username = repo
        .create(create("raced", "other@campus.test"))
        .await
        .unwrap_err();
    assert!(matches!(
        account_conflict(same_username),
        AppError::Conflict(message) if message.contains("Username")
    ));

    let same_email = repo
        .create(create("someone_else", "raced@campus.test"))
        .await
        .unwrap_err();
    assert!(matches!(
        account_conflict(same_email),
        AppError::Conflict(message) if message.contains("Email")
    ));

    Ok(())
}

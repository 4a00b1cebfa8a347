use super::*;

/// Tests creating a user stores profile details and activates the account.
///
/// Expected: Ok(User) with is_active=true and details preserved
#[tokio::test]
async fn creates_active_user_with_details() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let mut params = create_params("alice");
    params.details.student_id = Some("S1001".to_string());
    params.details.major = Some("Physics".to_string());

    let user = repo.create(params).await?;

    assert!(user.is_active);
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, UserRole::Student);
    assert_eq!(user.student_id.as_deref(), Some("S1001"));
    assert_eq!(user.major.as_deref(), Some("Physics"));
    assert!(user.last_login_at.is_none());

    Ok(())
}

/// Tests the username and email uniqueness checks.
///
/// Verifies that the excluded ID is ignored so a user can keep their own email.
///
/// Expected: true for other users, false when excluding the owner
#[tokio::test]
async fn detects_taken_username_and_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(create_params("bob")).await?;

    assert!(repo.username_exists("bob", None).await?);
    assert!(!repo.username_exists("carol", None).await?);
    assert!(repo.email_exists("bob@campus.test", None).await?);
    assert!(!repo.email_exists("bob@campus.test", Some(user.id)).await?);

    Ok(())
}

/// Tests the credential lookup returns the stored hash.
///
/// Expected: Some((User, hash)) for a known username, None otherwise
#[tokio::test]
async fn finds_password_hash_by_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let created = repo.create(create_params("dave")).await?;

    let (user, hash) = repo
        .find_with_password_by_username("dave")
        .await?
        .expect("user should exist");
    assert_eq!(user.id, created.id);
    assert_eq!(hash, "hash");

    assert!(repo
        .find_with_password_by_username("nobody")
        .await?
        .is_none());

    Ok(())
}

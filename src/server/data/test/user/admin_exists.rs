use super::*;

/// Tests detecting when an active admin exists.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_when_admin_exists() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user_with_role(db, UserRole::Admin).await?;

    assert!(UserRepository::new(db).admin_exists().await?);

    Ok(())
}

/// Tests detecting when no admin users exist (first-time setup).
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_no_admins() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user(db).await?;
    factory::user::create_user_with_role(db, UserRole::Teacher).await?;

    assert!(!UserRepository::new(db).admin_exists().await?);

    Ok(())
}

/// Tests a disabled admin does not count.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_disabled_admin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .role(UserRole::Admin)
        .is_active(false)
        .build()
        .await?;

    assert!(!UserRepository::new(db).admin_exists().await?);

    Ok(())
}

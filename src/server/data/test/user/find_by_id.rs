use super::*;

/// Tests soft-deleted users are invisible to lookups.
///
/// Expected: Ok(None) after the row is flagged deleted
#[tokio::test]
async fn hides_soft_deleted_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserRepository::new(db);
    assert!(repo.find_by_id(user.id).await?.is_some());

    let mut active: entity::user::ActiveModel = user.clone().into();
    active.is_deleted = ActiveValue::Set(true);
    active.update(db).await?;

    assert!(repo.find_by_id(user.id).await?.is_none());
    assert!(!repo.set_active(user.id, false).await?);

    Ok(())
}

/// Tests the login timestamp is recorded.
///
/// Expected: last_login_at is set after update_last_login
#[tokio::test]
async fn records_last_login() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.update_last_login(user.id).await?;

    let reloaded = repo.find_by_id(user.id).await?.unwrap();
    assert!(reloaded.last_login_at.is_some());

    Ok(())
}

use super::*;

/// Tests profile updates replace editable fields and leave the role alone.
///
/// Expected: Ok(Some(User)) with new values
#[tokio::test]
async fn replaces_profile_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user_with_role(db, UserRole::Teacher).await?;
    let repo = UserRepository::new(db);

    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParams {
                full_name: "Dr. Lee".to_string(),
                email: "lee@campus.test".to_string(),
                phone: Some("555-0100".to_string()),
                avatar: None,
                details: ProfileDetails {
                    department: Some("Chemistry".to_string()),
                    ..Default::default()
                },
            },
        )
        .await?
        .expect("user should exist");

    assert_eq!(updated.full_name, "Dr. Lee");
    assert_eq!(updated.email, "lee@campus.test");
    assert_eq!(updated.department.as_deref(), Some("Chemistry"));
    assert_eq!(updated.role, UserRole::Teacher);

    Ok(())
}

/// Tests updating a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update_profile(
            404,
            UpdateProfileParams {
                full_name: "Nobody".to_string(),
                email: "nobody@campus.test".to_string(),
                phone: None,
                avatar: None,
                details: ProfileDetails::default(),
            },
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}

use super::*;

/// Tests teachers satisfy the staff permission.
///
/// Expected: Ok(User) with the Teacher role
#[tokio::test]
async fn grants_access_to_teacher() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let teacher = factory::user::create_user_with_role(db, UserRole::Teacher).await?;
    AuthSession::new(session).set_user_id(teacher.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Staff])
        .await;

    assert_eq!(result?.role, UserRole::Teacher);

    Ok(())
}

/// Tests admins satisfy the staff permission.
///
/// Expected: Ok(User) with the Admin role
#[tokio::test]
async fn grants_access_to_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_user_with_role(db, UserRole::Admin).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Staff])
        .await;

    assert_eq!(result?.role, UserRole::Admin);

    Ok(())
}

/// Tests students are denied the staff permission.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_access_to_student() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let student = factory::user::create_user(db).await?;
    AuthSession::new(session).set_user_id(student.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Staff])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, student.id);
            assert!(message.contains("teacher or admin"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}

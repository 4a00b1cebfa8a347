use super::*;

/// Tests claiming admin with the generated code promotes the user once.
///
/// Expected: Admin role after the first claim, InvalidAdminCode on reuse
#[tokio::test]
async fn claim_admin_consumes_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::user::create_user(db).await?;
    let codes = AdminCodeService::new();
    let code = codes.generate().await;
    let service = UserService::new(db);

    let promoted = service.claim_admin(student.id, &code, &codes).await?;
    assert_eq!(promoted.role, UserRole::Admin);

    let reuse = service.claim_admin(student.id, &code, &codes).await;
    assert!(matches!(
        reuse,
        Err(AppError::AuthErr(AuthError::InvalidAdminCode))
    ));

    Ok(())
}

/// Tests a wrong code leaves the role unchanged.
///
/// Expected: Err(AuthError::InvalidAdminCode) and role still Student
#[tokio::test]
async fn claim_admin_rejects_wrong_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::user::create_user(db).await?;
    let codes = AdminCodeService::new();
    codes.generate().await;
    let service = UserService::new(db);

    let result = service.claim_admin(student.id, "wrong", &codes).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidAdminCode))
    ));

    let user = UserRepository::new(db).find_by_id(student.id).await?.unwrap();
    assert_eq!(user.role, UserRole::Student);

    Ok(())
}

/// Tests admins cannot disable their own account.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn admin_cannot_disable_self() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::create_user_with_role(db, UserRole::Admin).await?;

    let result = UserService::new(db).set_active(admin.id, admin.id, false).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests role changes and missing users.
///
/// Expected: role updated; NotFound for an unknown ID
#[tokio::test]
async fn set_role_updates_or_reports_missing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let service = UserService::new(db);

    service.set_role(user.id, UserRole::Teacher).await?;
    assert_eq!(
        UserRepository::new(db).find_by_id(user.id).await?.unwrap().role,
        UserRole::Teacher
    );

    let missing = service.set_role(9_999, UserRole::Teacher).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests paging metadata for the admin user list.
///
/// Expected: 5 users at 2 per page gives 3 pages
#[tokio::test]
async fn computes_total_pages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::user::create_user(db).await?;
    }

    let page = UserService::new(db).get_all_users(2, 2).await?;

    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 2);
    assert_eq!(page.users.len(), 1);

    Ok(())
}

/// Tests the dashboard context gathers registrations and schedule data.
///
/// Expected: one registration and one upcoming activity item
#[tokio::test]
async fn builds_user_context() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (student, activity, _) = factory::helpers::create_registered_student(db).await?;
    factory::schedule_item::ScheduleItemFactory::new(db, student.id)
        .activity_id(activity.id)
        .between(activity.start_time, activity.end_time)
        .build()
        .await?;

    let context = UserService::new(db).get_user_context(student.id).await?;

    assert_eq!(context.user.id, student.id);
    assert_eq!(context.registrations.len(), 1);
    assert_eq!(context.upcoming_schedule.len(), 1);
    assert!(context.overdue_schedule.is_empty());
    assert_eq!(context.schedule_statistics.total_items, 1);

    Ok(())
}

use super::*;

/// Tests a successful registration takes a place and adds a schedule item.
///
/// Expected: Registered status, participant count 1, one linked schedule item
#[tokio::test]
async fn registers_and_schedules() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;
    let (_, activity) = factory::helpers::create_activity_with_dependencies(db).await?;

    let registration = ActivityService::new(db, &cache)
        .register(activity.id, student.id, Some("Bringing a friend".to_string()))
        .await?;

    assert_eq!(registration.status, RegistrationStatus::Registered);
    assert_eq!(registration.activity_title, activity.title);
    assert_eq!(registration.note.as_deref(), Some("Bringing a friend"));

    let stored = ActivityRepository::new(db)
        .find_entity(activity.id)
        .await?
        .unwrap();
    assert_eq!(stored.current_participants, 1);

    let item = ScheduleRepository::new(db)
        .find_activity_item(student.id, activity.id)
        .await?;
    assert!(item.is_some());

    Ok(())
}

/// Tests a second registration by the same user is refused.
///
/// Expected: Err(RegistrationError::AlreadyRegistered) and count unchanged
#[tokio::test]
async fn rejects_duplicate_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;
    let (_, activity) = factory::helpers::create_activity_with_dependencies(db).await?;
    let service = ActivityService::new(db, &cache);

    service.register(activity.id, student.id, None).await?;
    let result = service.register(activity.id, student.id, None).await;

    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(
            RegistrationError::AlreadyRegistered { .. }
        ))
    ));

    let stored = ActivityRepository::new(db)
        .find_entity(activity.id)
        .await?
        .unwrap();
    assert_eq!(stored.current_participants, 1);

    Ok(())
}

/// Tests registration stops at capacity.
///
/// Expected: Err(RegistrationError::ActivityFull)
#[tokio::test]
async fn rejects_when_full() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let category = factory::category::create_category(db).await?;
    let activity = factory::activity::ActivityFactory::new(db, category.id)
        .max_participants(1)
        .build()
        .await?;
    let first = factory::user::create_user(db).await?;
    let second = factory::user::create_user(db).await?;
    let service = ActivityService::new(db, &cache);

    service.register(activity.id, first.id, None).await?;
    let result = service.register(activity.id, second.id, None).await;

    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(RegistrationError::ActivityFull(id))) if id == activity.id
    ));

    Ok(())
}

/// Tests registration after the deadline.
///
/// Expected: Err(RegistrationError::DeadlinePassed)
#[tokio::test]
async fn rejects_after_deadline() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let category = factory::category::create_category(db).await?;
    let activity = factory::activity::ActivityFactory::new(db, category.id)
        .registration_deadline(Utc::now() - Duration::hours(1))
        .build()
        .await?;
    let student = factory::user::create_user(db).await?;

    let result = ActivityService::new(db, &cache)
        .register(activity.id, student.id, None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(RegistrationError::DeadlinePassed(_)))
    ));

    Ok(())
}

/// Tests registration for an activity that is not published.
///
/// Expected: Err(RegistrationError::NotPublished)
#[tokio::test]
async fn rejects_unpublished_activity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let category = factory::category::create_category(db).await?;
    let activity = factory::activity::ActivityFactory::new(db, category.id)
        .status(ActivityStatus::Draft)
        .build()
        .await?;
    let student = factory::user::create_user(db).await?;

    let result = ActivityService::new(db, &cache)
        .register(activity.id, student.id, None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(RegistrationError::NotPublished(_)))
    ));

    Ok(())
}

/// Tests registration for a missing or deleted activity.
///
/// Expected: Err(AppError::NotFound) for both
#[tokio::test]
async fn rejects_missing_activity() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let category = factory::category::create_category(db).await?;
    let deleted = factory::activity::ActivityFactory::new(db, category.id)
        .deleted()
        .build()
        .await?;
    let student = factory::user::create_user(db).await?;
    let service = ActivityService::new(db, &cache);

    assert!(matches!(
        service.register(9_999, student.id, None).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.register(deleted.id, student.id, None).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests registering again after cancelling reuses the original row.
///
/// Expected: same registration ID, status Registered, count back to 1
#[tokio::test]
async fn reactivates_cancelled_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;
    let (_, activity) = factory::helpers::create_activity_with_dependencies(db).await?;
    let service = ActivityService::new(db, &cache);

    let first = service.register(activity.id, student.id, None).await?;
    service.cancel_registration(activity.id, student.id).await?;
    let second = service.register(activity.id, student.id, None).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.status, RegistrationStatus::Registered);

    let stored = ActivityRepository::new(db)
        .find_entity(activity.id)
        .await?
        .unwrap();
    assert_eq!(stored.current_participants, 1);

    Ok(())
}

/// Tests a registration that ended in attendance is not reopened.
///
/// Expected: Err(AlreadyRegistered), status and participant count unchanged
#[tokio::test]
async fn rejects_reuse_of_attended_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;
    let (_, activity) = factory::helpers::create_activity_with_dependencies(db).await?;
    factory::registration::RegistrationFactory::new(db, activity.id, student.id)
        .status(RegistrationStatus::Attended)
        .build()
        .await?;

    let result = ActivityService::new(db, &cache)
        .register(activity.id, student.id, None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(
            RegistrationError::AlreadyRegistered { .. }
        ))
    ));

    let stored = ActivityRepository::new(db)
        .find_entity(activity.id)
        .await?
        .unwrap();
    assert_eq!(stored.current_participants, 0);

    Ok(())
}

/// Tests an insert rejected by the activity/user unique index reports a conflict.
///
/// A soft-deleted row is invisible to the existence check but still holds the index
/// entry, the same state a concurrent insert leaves behind.
///
/// Expected: Err(AlreadyRegistered) and the participant increment rolled back
#[tokio::test]
async fn unique_index_rejection_is_already_registered() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;
    let (_, activity) = factory::helpers::create_activity_with_dependencies(db).await?;
    factory::registration::RegistrationFactory::new(db, activity.id, student.id)
        .deleted()
        .build()
        .await?;

    let result = ActivityService::new(db, &cache)
        .register(activity.id, student.id, None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(
            RegistrationError::AlreadyRegistered { .. }
        ))
    ));

    let stored = ActivityRepository::new(db)
        .find_entity(activity.id)
        .await?
        .unwrap();
    assert_eq!(stored.current_participants, 0);

    Ok(())
}

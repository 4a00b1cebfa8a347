use super::*;

/// Tests cancelling frees the place and removes the schedule item.
///
/// Expected: count back to 0, no linked item, status Cancelled
#[tokio::test]
async fn cancels_and_unschedules() -> Result<(), AppError> {
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
    service.cancel_registration(activity.id, student.id).await?;

    let stored = ActivityRepository::new(db)
        .find_entity(activity.id)
        .await?
        .unwrap();
    assert_eq!(stored.current_participants, 0);

    let item = ScheduleRepository::new(db)
        .find_activity_item(student.id, activity.id)
        .await?;
    assert!(item.is_none());

    let registrations = service.get_registrations(activity.id).await?;
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].status, RegistrationStatus::Cancelled);

    Ok(())
}

/// Tests cancelling without an active registration.
///
/// Expected: Err(RegistrationError::NotRegistered), also after a prior cancel
#[tokio::test]
async fn rejects_cancel_without_registration() -> Result<(), AppError> {
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

    let result = service.cancel_registration(activity.id, student.id).await;
    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(RegistrationError::NotRegistered { .. }))
    ));

    service.register(activity.id, student.id, None).await?;
    service.cancel_registration(activity.id, student.id).await?;
    let result = service.cancel_registration(activity.id, student.id).await;
    assert!(matches!(
        result,
        Err(AppError::RegistrationErr(RegistrationError::NotRegistered { .. }))
    ));

    Ok(())
}

/// Tests the participant count never drops below zero.
///
/// Expected: count stays 0 when a registration row exists without a counted place
#[tokio::test]
async fn participant_count_floors_at_zero() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    // The factory inserts the registration without touching the counter
    let (student, activity, _) = factory::helpers::create_registered_student(db).await?;

    ActivityService::new(db, &cache)
        .cancel_registration(activity.id, student.id)
        .await?;

    let stored = ActivityRepository::new(db)
        .find_entity(activity.id)
        .await?
        .unwrap();
    assert_eq!(stored.current_participants, 0);

    Ok(())
}

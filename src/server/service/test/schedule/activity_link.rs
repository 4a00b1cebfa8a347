use super::*;

/// Tests adding a registered activity twice returns the same item.
///
/// Expected: identical IDs and an Activity-type item
#[tokio::test]
async fn add_activity_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (student, activity, _) = factory::helpers::create_registered_student(db).await?;
    let service = ScheduleService::new(db);

    let first = service.add_activity(activity.id, student.id).await?;
    let second = service.add_activity(activity.id, student.id).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(first.item_type, ScheduleItemType::Activity);
    assert_eq!(first.activity_id, Some(activity.id));

    Ok(())
}

/// Tests only registered users can add an activity.
///
/// Expected: BadRequest when unregistered, NotFound for a missing activity
#[tokio::test]
async fn add_activity_requires_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::user::create_user(db).await?;
    let (_, activity) = factory::helpers::create_activity_with_dependencies(db).await?;
    let service = ScheduleService::new(db);

    assert!(matches!(
        service.add_activity(activity.id, student.id).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.add_activity(9_999, student.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests removing an activity's items.
///
/// Expected: Ok the first time, NotFound once nothing is left
#[tokio::test]
async fn remove_activity_reports_missing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (student, activity, _) = factory::helpers::create_registered_student(db).await?;
    let service = ScheduleService::new(db);

    service.add_activity(activity.id, student.id).await?;
    service.remove_activity(activity.id, student.id).await?;

    assert!(matches!(
        service.remove_activity(activity.id, student.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

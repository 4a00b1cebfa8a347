use super::*;

/// Tests search and detail flag the current user's registrations.
///
/// Expected: is_registered true only for the joined activity, false when anonymous
#[tokio::test]
async fn marks_registered_activities() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let (student, joined, _) = factory::helpers::create_registered_student(db).await?;
    let (_, other) = factory::helpers::create_activity_with_dependencies(db).await?;
    let service = ActivityService::new(db, &cache);

    let page = service
        .search(ActivitySearchParams::default(), Some(student.id))
        .await?;
    assert_eq!(page.total_count, 2);
    for activity in &page.items {
        assert_eq!(activity.is_registered, activity.id == joined.id);
    }

    assert!(service.get_by_id(joined.id, Some(student.id)).await?.is_registered);
    assert!(!service.get_by_id(other.id, Some(student.id)).await?.is_registered);
    assert!(!service.get_by_id(joined.id, None).await?.is_registered);

    Ok(())
}

/// Tests the registered-activities list for a user.
///
/// Expected: only the activity with an active registration
#[tokio::test]
async fn lists_user_registered_activities() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let (student, joined, _) = factory::helpers::create_registered_student(db).await?;
    let (_, cancelled) = factory::helpers::create_activity_with_dependencies(db).await?;
    factory::registration::RegistrationFactory::new(db, cancelled.id, student.id)
        .status(RegistrationStatus::Cancelled)
        .build()
        .await?;

    let activities = ActivityService::new(db, &cache)
        .get_user_registered_activities(student.id)
        .await?;

    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].id, joined.id);
    assert!(activities[0].is_registered);

    Ok(())
}

/// Tests registration invalidates the cached popular list.
///
/// Expected: second read reflects the new participant count
#[tokio::test]
async fn registration_refreshes_popular_cache() -> Result<(), AppError> {
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

    let before = service.get_popular(10).await?;
    assert_eq!(before[0].current_participants, 0);

    service.register(activity.id, student.id, None).await?;

    let after = service.get_popular(10).await?;
    assert_eq!(after[0].id, activity.id);
    assert_eq!(after[0].current_participants, 1);

    Ok(())
}

/// Tests popular activities are ordered by participant count.
///
/// Expected: busier activity first; zero count clamps to one result
#[tokio::test]
async fn orders_popular_by_participants() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let category = factory::category::create_category(db).await?;
    let quiet = factory::activity::ActivityFactory::new(db, category.id)
        .current_participants(1)
        .build()
        .await?;
    let busy = factory::activity::ActivityFactory::new(db, category.id)
        .current_participants(8)
        .build()
        .await?;
    let service = ActivityService::new(db, &cache);

    let popular = service.get_popular(10).await?;
    let ids: Vec<i32> = popular.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![busy.id, quiet.id]);

    assert_eq!(service.get_popular(0).await?.len(), 1);

    Ok(())
}

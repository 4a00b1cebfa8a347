use super::*;

/// Tests items are invisible to other users.
///
/// Expected: Err(AppError::NotFound) for every operation by a stranger
#[tokio::test]
async fn other_users_cannot_touch_items() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;
    let service = ScheduleService::new(db);

    let item = service.create(params("Revise algebra"), owner.id).await?;

    assert!(matches!(
        service.get_by_id(item.id, stranger.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.update(item.id, params("Hijacked"), stranger.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.toggle_completion(item.id, stranger.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(item.id, stranger.id).await,
        Err(AppError::NotFound(_))
    ));

    assert_eq!(service.get_by_id(item.id, owner.id).await?.title, "Revise algebra");

    Ok(())
}

/// Tests toggling flips completion back and forth.
///
/// Expected: true then false
#[tokio::test]
async fn toggles_completion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let service = ScheduleService::new(db);
    let item = service.create(params("Laundry"), owner.id).await?;

    assert!(service.toggle_completion(item.id, owner.id).await?.is_completed);
    assert!(!service.toggle_completion(item.id, owner.id).await?.is_completed);

    Ok(())
}

/// Tests invalid items and links to missing activities.
///
/// Expected: BadRequest for bad times or color, NotFound for a missing activity
#[tokio::test]
async fn validates_new_items() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let service = ScheduleService::new(db);

    let mut backwards = params("Backwards");
    backwards.end_time = backwards.start_time - Duration::minutes(30);
    assert!(matches!(
        service.create(backwards, owner.id).await,
        Err(AppError::BadRequest(_))
    ));

    let mut bad_color = params("Colorful");
    bad_color.color = Some("red".to_string());
    assert!(matches!(
        service.create(bad_color, owner.id).await,
        Err(AppError::BadRequest(_))
    ));

    let mut dangling = params("Dangling");
    dangling.activity_id = Some(9_999);
    assert!(matches!(
        service.create(dangling, owner.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests statistics split items into completed, pending and overdue.
///
/// Expected: 3 items: 1 completed, 1 pending, 1 overdue
#[tokio::test]
async fn computes_statistics() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let now = Utc::now();
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .completed(true)
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(now - Duration::hours(3), now - Duration::hours(2))
        .priority(ScheduleItemPriority::Urgent)
        .build()
        .await?;

    let service = ScheduleService::new(db);
    let stats = service.statistics(owner.id).await?;

    assert_eq!(stats.total_items, 3);
    assert_eq!(stats.completed_items, 1);
    assert_eq!(stats.pending_items, 1);
    assert_eq!(stats.overdue_items, 1);
    assert_eq!(stats.items_by_priority.values().sum::<u64>(), 3);

    assert_eq!(service.overdue(owner.id).await?.len(), 1);
    assert_eq!(service.upcoming(owner.id, 10).await?.len(), 1);

    Ok(())
}

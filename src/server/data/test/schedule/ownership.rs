use super::*;

/// Tests another user's item is treated as missing.
///
/// Expected: None for lookup, update and toggle; false for delete
#[tokio::test]
async fn hides_items_from_other_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;
    let item = factory::schedule_item::create_schedule_item(db, owner.id).await?;
    let repo = ScheduleRepository::new(db);

    assert!(repo.find_by_id(item.id, owner.id).await?.is_some());
    assert!(repo.find_by_id(item.id, stranger.id).await?.is_none());
    assert!(repo.toggle_completion(item.id, stranger.id).await?.is_none());
    assert!(!repo.soft_delete(item.id, stranger.id).await?);

    let now = Utc::now();
    let params = ScheduleItemParams {
        title: "Hijacked".to_string(),
        description: None,
        location: None,
        start_time: now,
        end_time: now + Duration::hours(1),
        item_type: ScheduleItemType::Other,
        priority: ScheduleItemPriority::Low,
        color: None,
        is_completed: false,
        note: None,
        activity_id: None,
    };
    assert!(repo.update(item.id, stranger.id, params).await?.is_none());

    Ok(())
}

/// Tests toggling flips completion each time.
///
/// Expected: true then false
#[tokio::test]
async fn toggles_completion() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let item = factory::schedule_item::create_schedule_item(db, owner.id).await?;
    let repo = ScheduleRepository::new(db);

    let toggled = repo.toggle_completion(item.id, owner.id).await?.unwrap();
    assert!(toggled.is_completed);

    let toggled = repo.toggle_completion(item.id, owner.id).await?.unwrap();
    assert!(!toggled.is_completed);

    Ok(())
}

/// Tests soft-deleted items are gone for their owner too.
///
/// Expected: find_by_id returns None after delete
#[tokio::test]
async fn soft_delete_hides_item() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let item = factory::schedule_item::create_schedule_item(db, owner.id).await?;
    let repo = ScheduleRepository::new(db);

    assert!(repo.soft_delete(item.id, owner.id).await?);
    assert!(repo.find_by_id(item.id, owner.id).await?.is_none());
    assert!(repo.find_all_for_user(owner.id).await?.is_empty());

    Ok(())
}

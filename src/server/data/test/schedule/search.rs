use super::*;

/// Tests search filters by type and completion, in chronological order.
///
/// Expected: only the user's incomplete study items, earliest first
#[tokio::test]
async fn filters_by_type_and_completion() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    let now = Utc::now();

    let later = factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .item_type(ScheduleItemType::Study)
        .between(now + Duration::days(2), now + Duration::days(2) + Duration::hours(1))
        .build()
        .await?;
    let sooner = factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .item_type(ScheduleItemType::Study)
        .between(now + Duration::days(1), now + Duration::days(1) + Duration::hours(1))
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .item_type(ScheduleItemType::Study)
        .completed(true)
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .item_type(ScheduleItemType::Meeting)
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, other.id)
        .item_type(ScheduleItemType::Study)
        .build()
        .await?;

    let params = ScheduleSearchParams {
        item_type: Some(ScheduleItemType::Study),
        is_completed: Some(false),
        ..Default::default()
    };
    let page = ScheduleRepository::new(db).search(owner.id, &params).await?;

    assert_eq!(page.total_count, 2);
    let ids: Vec<i32> = page.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);

    Ok(())
}

/// Tests the start-time window is half open.
///
/// Expected: an item starting exactly at `to` is excluded
#[tokio::test]
async fn starting_between_excludes_end_bound() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let from = Utc::now() + Duration::days(1);
    let to = from + Duration::days(1);

    let inside = factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(from, from + Duration::hours(1))
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(to, to + Duration::hours(1))
        .build()
        .await?;

    let items = ScheduleRepository::new(db)
        .find_starting_between(owner.id, from, to)
        .await?;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, inside.id);

    Ok(())
}

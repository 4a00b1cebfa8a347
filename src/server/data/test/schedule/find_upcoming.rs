use super::*;

/// Tests upcoming items exclude completed and past items and honor the limit.
///
/// Expected: the two soonest future incomplete items
#[tokio::test]
async fn returns_soonest_incomplete_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let now = Utc::now();
    let mut future = Vec::new();
    for hours in [1, 2, 3] {
        let item = factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
            .between(now + Duration::hours(hours), now + Duration::hours(hours + 1))
            .build()
            .await?;
        future.push(item.id);
    }
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(now + Duration::minutes(30), now + Duration::hours(1))
        .completed(true)
        .build()
        .await?;

    let upcoming = ScheduleRepository::new(db)
        .find_upcoming(owner.id, now, 2)
        .await?;

    let ids: Vec<i32> = upcoming.iter().map(|i| i.id).collect();
    assert_eq!(ids, future[..2].to_vec());

    Ok(())
}

/// Tests overdue items are incomplete items whose end has passed.
///
/// Expected: only the past incomplete item
#[tokio::test]
async fn returns_overdue_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let now = Utc::now();
    let overdue = factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(now - Duration::hours(3), now - Duration::hours(2))
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(now - Duration::hours(3), now - Duration::hours(2))
        .completed(true)
        .build()
        .await?;
    factory::schedule_item::create_schedule_item(db, owner.id).await?;

    let items = ScheduleRepository::new(db).find_overdue(owner.id, now).await?;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, overdue.id);

    Ok(())
}

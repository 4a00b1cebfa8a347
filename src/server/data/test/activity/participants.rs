use super::*;

/// Tests the conditional increment stops at capacity.
///
/// Expected: two successful increments, then false with the count unchanged
#[tokio::test]
async fn increment_stops_at_capacity() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::category::create_category(db).await?;
    let activity = factory::activity::ActivityFactory::new(db, category.id)
        .max_participants(2)
        .build()
        .await?;
    let repo = ActivityRepository::new(db);

    assert!(repo.try_increment_participants(activity.id).await?);
    assert!(repo.try_increment_participants(activity.id).await?);
    assert!(!repo.try_increment_participants(activity.id).await?);

    let row = repo.find_entity(activity.id).await?.unwrap();
    assert_eq!(row.current_participants, 2);

    Ok(())
}

/// Tests deleted activities never gain participants.
///
/// Expected: Ok(false)
#[tokio::test]
async fn increment_ignores_deleted_activity() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::category::create_category(db).await?;
    let activity = factory::activity::ActivityFactory::new(db, category.id)
        .deleted()
        .build()
        .await?;

    assert!(!ActivityRepository::new(db)
        .try_increment_participants(activity.id)
        .await?);

    Ok(())
}

/// Tests the decrement never goes below zero.
///
/// Expected: 1 -> 0 -> 0
#[tokio::test]
async fn decrement_floors_at_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::category::create_category(db).await?;
    let activity = factory::activity::ActivityFactory::new(db, category.id)
        .current_participants(1)
        .build()
        .await?;
    let repo = ActivityRepository::new(db);

    repo.decrement_participants(activity.id).await?;
    assert_eq!(
        repo.find_entity(activity.id).await?.unwrap().current_participants,
        0
    );

    repo.decrement_participants(activity.id).await?;
    assert_eq!(
        repo.find_entity(activity.id).await?.unwrap().current_participants,
        0
    );

    Ok(())
}

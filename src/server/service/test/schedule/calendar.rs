use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Tests items are grouped under their start day and empty days are kept.
///
/// Expected: three days, two items on the first, none on the second, one on the third
#[tokio::test]
async fn groups_items_by_day() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2030, 5, d, h, 0, 0).unwrap();

    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(at(1, 9), at(1, 10))
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(at(1, 14), at(1, 15))
        .build()
        .await?;
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(at(3, 23), at(4, 1))
        .build()
        .await?;
    // Outside the range
    factory::schedule_item::ScheduleItemFactory::new(db, owner.id)
        .between(at(4, 0), at(4, 1))
        .build()
        .await?;

    let days = ScheduleService::new(db)
        .calendar(date(2030, 5, 1), date(2030, 5, 3), owner.id)
        .await?;

    assert_eq!(days.len(), 3);
    assert_eq!(days[0].date, date(2030, 5, 1));
    assert_eq!(days[0].items.len(), 2);
    assert!(days[1].items.is_empty());
    assert_eq!(days[2].items.len(), 1);

    Ok(())
}

/// Tests reversed and oversized ranges.
///
/// Expected: Err(AppError::BadRequest) for both, Ok for a single day
#[tokio::test]
async fn rejects_invalid_ranges() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let service = ScheduleService::new(db);

    assert!(matches!(
        service
            .calendar(date(2030, 5, 2), date(2030, 5, 1), owner.id)
            .await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service
            .calendar(date(2030, 1, 1), date(2031, 1, 2), owner.id)
            .await,
        Err(AppError::BadRequest(_))
    ));

    let single = service
        .calendar(date(2030, 5, 2), date(2030, 5, 2), owner.id)
        .await?;
    assert_eq!(single.len(), 1);

    Ok(())
}

use super::*;

/// Tests keyword search matches title or description.
///
/// Expected: only the two matching activities
#[tokio::test]
async fn filters_by_keyword() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::category::create_category(db).await?;
    let by_title = factory::activity::ActivityFactory::new(db, category.id)
        .title("Chess Night")
        .build()
        .await?;
    let by_description = factory::activity::ActivityFactory::new(db, category.id)
        .title("Board games")
        .description("Chess, go and more")
        .build()
        .await?;
    factory::activity::ActivityFactory::new(db, category.id)
        .title("Football")
        .description("Outdoor match")
        .build()
        .await?;

    let params = ActivitySearchParams {
        keyword: Some("Chess".to_string()),
        sort_by: ActivitySort::Title,
        ..Default::default()
    };
    let page = ActivityRepository::new(db).search(&params, Utc::now()).await?;

    assert_eq!(page.total_count, 2);
    let ids: Vec<i32> = page.items.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![by_description.id, by_title.id]);

    Ok(())
}

/// Tests the registerable filter drops closed, full and unpublished activities.
///
/// Expected: only the open activity
#[tokio::test]
async fn filters_registerable() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::category::create_category(db).await?;
    let open = factory::activity::create_activity(db, category.id).await?;
    factory::activity::ActivityFactory::new(db, category.id)
        .max_participants(3)
        .current_participants(3)
        .build()
        .await?;
    factory::activity::ActivityFactory::new(db, category.id)
        .registration_deadline(Utc::now() - Duration::hours(1))
        .build()
        .await?;
    factory::activity::ActivityFactory::new(db, category.id)
        .status(ActivityStatus::Draft)
        .build()
        .await?;

    let params = ActivitySearchParams {
        registerable: Some(true),
        ..Default::default()
    };
    let page = ActivityRepository::new(db).search(&params, Utc::now()).await?;

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, open.id);

    Ok(())
}

/// Tests paging and exclusion of soft-deleted activities.
///
/// Expected: 3 visible activities split 2 + 1 in start-time order
#[tokio::test]
async fn pages_visible_activities() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::category::create_category(db).await?;
    let now = Utc::now();
    let mut expected = Vec::new();
    for days in [2, 4, 6] {
        let activity = factory::activity::ActivityFactory::new(db, category.id)
            .starts_at(now + Duration::days(days))
            .build()
            .await?;
        expected.push(activity.id);
    }
    factory::activity::ActivityFactory::new(db, category.id)
        .starts_at(now + Duration::days(1))
        .deleted()
        .build()
        .await?;

    let repo = ActivityRepository::new(db);
    let first = repo
        .search(
            &ActivitySearchParams {
                page: PageRequest::new(Some(1), Some(2), 10),
                ..Default::default()
            },
            now,
        )
        .await?;
    let second = repo
        .search(
            &ActivitySearchParams {
                page: PageRequest::new(Some(2), Some(2), 10),
                ..Default::default()
            },
            now,
        )
        .await?;

    assert_eq!(first.total_count, 3);
    assert_eq!(
        first.items.iter().map(|a| a.id).collect::<Vec<_>>(),
        expected[..2].to_vec()
    );
    assert!(first.has_next_page());
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].id, expected[2]);
    assert!(!second.has_next_page());

    Ok(())
}

use super::*;

/// Tests creating a category starts active with no activities.
///
/// Expected: Ok(Category) with activity_count 0
#[tokio::test]
async fn creates_active_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);
    let category = repo
        .create(CreateCategoryParams {
            name: "Sports".to_string(),
            description: Some("Games and matches".to_string()),
            icon_url: None,
            sort_order: 2,
        })
        .await?;

    assert!(category.is_active);
    assert_eq!(category.name, "Sports");
    assert_eq!(category.sort_order, 2);
    assert_eq!(category.activity_count, 0);

    assert!(repo.name_exists("Sports").await?);
    assert!(!repo.name_exists("Music").await?);

    Ok(())
}

/// Tests lookup by ID includes the visible activity count.
///
/// Expected: activity_count ignores soft-deleted activities
#[tokio::test]
async fn counts_visible_activities() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::category::create_category(db).await?;
    factory::activity::create_activity(db, category.id).await?;
    factory::activity::create_activity(db, category.id).await?;
    factory::activity::ActivityFactory::new(db, category.id)
        .deleted()
        .build()
        .await?;

    let found = CategoryRepository::new(db)
        .find_by_id(category.id)
        .await?
        .expect("category should exist");

    assert_eq!(found.activity_count, 2);

    Ok(())
}

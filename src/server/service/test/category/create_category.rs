use super::*;

/// Tests creating a category drops the cached list.
///
/// Expected: second read includes the new category
#[tokio::test]
async fn invalidates_cached_categories() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    factory::category::create_category(db).await?;
    let service = CategoryService::new(db, &cache);

    assert_eq!(service.get_categories().await?.len(), 1);

    let created = service.create_category(params("Volunteering")).await?;

    let categories = service.get_categories().await?;
    assert_eq!(categories.len(), 2);
    assert!(categories.iter().any(|c| c.id == created.id));

    Ok(())
}

/// Tests duplicate and empty names.
///
/// Expected: Conflict for a duplicate, BadRequest for an empty name
#[tokio::test]
async fn rejects_duplicate_and_empty_names() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();
    let service = CategoryService::new(db, &cache);

    service.create_category(params("Sports")).await?;

    assert!(matches!(
        service.create_category(params("Sports")).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        service.create_category(params("")).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

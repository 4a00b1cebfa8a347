use super::*;

/// Tests weights outside the unit interval are refused.
///
/// Expected: Err(AppError::BadRequest) for -0.1 and 1.1
#[tokio::test]
async fn rejects_out_of_range_weight() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_recommendation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;
    let category = factory::category::create_category(db).await?;
    let service = RecommendationService::new(db, &cache);

    for weight in [-0.1, 1.1] {
        let result = service
            .update_preference(student.id, category.id, weight)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}

/// Tests a preference for an unknown category.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_unknown_category() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_recommendation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;

    let result = RecommendationService::new(db, &cache)
        .update_preference(student.id, 9_999, 0.5)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests updating a weight twice keeps one preference with the latest value.
///
/// Expected: single preference with weight 0.7 and the category name
#[tokio::test]
async fn stores_latest_weight() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_recommendation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;
    let category = factory::category::CategoryFactory::new(db)
        .name("Music")
        .build()
        .await?;
    let service = RecommendationService::new(db, &cache);

    service.update_preference(student.id, category.id, 0.2).await?;
    let stored = service.update_preference(student.id, category.id, 0.7).await?;
    assert_eq!(stored.category_name, "Music");

    let preferences = service.get_preferences(student.id).await?;
    assert_eq!(preferences.len(), 1);
    assert_eq!(preferences[0].weight, 0.7);

    Ok(())
}

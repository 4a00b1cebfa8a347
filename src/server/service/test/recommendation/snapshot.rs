use super::*;

/// Tests recalculation persists the hybrid ranking.
///
/// Expected: one snapshot row for the preferred activity only
#[tokio::test]
async fn recalculate_writes_snapshot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_recommendation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    let student = factory::user::create_user(db).await?;
    let liked = factory::category::create_category(db).await?;
    let other = factory::category::create_category(db).await?;
    let preferred = factory::activity::create_activity(db, liked.id).await?;
    factory::activity::create_activity(db, other.id).await?;
    factory::preference::create_preference(db, student.id, liked.id, 1.0).await?;

    let written = RecommendationService::new(db, &cache)
        .recalculate(student.id)
        .await?;
    assert_eq!(written, 1);

    let rows = RecommendationRepository::new(db)
        .find_by_user(student.id)
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].activity_id, preferred.id);

    Ok(())
}

/// Tests the refresh job covers active users only.
///
/// Expected: two refreshed users when a third is disabled
#[tokio::test]
async fn refresh_all_skips_inactive_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_recommendation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = AppCache::new();

    factory::user::create_user(db).await?;
    factory::user::create_user(db).await?;
    factory::user::UserFactory::new(db)
        .is_active(false)
        .build()
        .await?;

    let refreshed = RecommendationService::new(db, &cache).refresh_all().await?;

    assert_eq!(refreshed, 2);

    Ok(())
}

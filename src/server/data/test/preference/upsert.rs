use super::*;

/// Tests upserting twice updates the same row.
///
/// Expected: one preference with the latest weight
#[tokio::test]
async fn updates_existing_weight() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_recommendation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::user::create_user(db).await?;
    let category = factory::category::create_category(db).await?;
    let repo = PreferenceRepository::new(db);

    let first = repo.upsert(student.id, category.id, 0.2).await?;
    let second = repo.upsert(student.id, category.id, 0.8).await?;

    assert_eq!(first.id, second.id);
    let weights = repo.find_weights(student.id).await?;
    assert_eq!(weights.len(), 1);
    assert_eq!(weights[&category.id], 0.8);

    Ok(())
}

/// Tests a soft-deleted preference is revived instead of duplicated.
///
/// Expected: same row ID, visible again with the new weight
#[tokio::test]
async fn revives_soft_deleted_preference() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_recommendation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::user::create_user(db).await?;
    let category = factory::category::create_category(db).await?;
    let existing = factory::preference::create_preference(db, student.id, category.id, 0.4).await?;

    let mut active: entity::user_activity_preference::ActiveModel = existing.clone().into();
    active.is_deleted = ActiveValue::Set(true);
    active.update(db).await?;

    let repo = PreferenceRepository::new(db);
    assert!(repo.find_weights(student.id).await?.is_empty());

    let revived = repo.upsert(student.id, category.id, 0.7).await?;

    assert_eq!(revived.id, existing.id);
    assert!(!revived.is_deleted);
    assert_eq!(repo.find_weights(student.id).await?[&category.id], 0.7);

    Ok(())
}

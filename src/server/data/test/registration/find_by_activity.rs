use super::*;

/// Tests registrations for an activity carry user names and titles.
///
/// Expected: both registrations, oldest first, with names resolved
#[tokio::test]
async fn lists_registrations_with_names() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, activity) = factory::helpers::create_activity_with_dependencies(db).await?;
    let first = factory::user::UserFactory::new(db)
        .full_name("First Student")
        .build()
        .await?;
    let second = factory::user::UserFactory::new(db)
        .full_name("Second Student")
        .build()
        .await?;
    factory::registration::create_registration(db, activity.id, first.id).await?;
    factory::registration::create_registration(db, activity.id, second.id).await?;

    let registrations = RegistrationRepository::new(db)
        .find_by_activity(activity.id)
        .await?;

    assert_eq!(registrations.len(), 2);
    assert_eq!(registrations[0].user_name, "First Student");
    assert_eq!(registrations[1].user_name, "Second Student");
    assert!(registrations
        .iter()
        .all(|r| r.activity_title == activity.title));

    Ok(())
}

/// Tests a user's registrations include cancelled ones.
///
/// Expected: both rows returned for the user
#[tokio::test]
async fn lists_user_registrations_of_any_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_activity_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::user::create_user(db).await?;
    let (category, active) = factory::helpers::create_activity_with_dependencies(db).await?;
    let other = factory::activity::create_activity(db, category.id).await?;
    factory::registration::create_registration(db, active.id, student.id).await?;
    factory::registration::RegistrationFactory::new(db, other.id, student.id)
        .status(RegistrationStatus::Cancelled)
        .build()
        .await?;

    let repo = RegistrationRepository::new(db);
    let registrations = repo.find_by_user(student.id).await?;

    assert_eq!(registrations.len(), 2);
    assert_eq!(
        repo.find_registered_activity_ids(student.id).await?,
        vec![active.id]
    );

    Ok(())
}

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_activity_category_table;
mod m20260301_000003_create_activity_table;
mod m20260301_000004_create_activity_registration_table;
mod m20260301_000005_create_activity_tag_table;
mod m20260301_000006_create_user_activity_preference_table;
mod m20260301_000007_create_schedule_item_table;
mod m20260301_000008_create_activity_recommendation_table;
mod m20260301_000009_seed_activity_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_activity_category_table::Migration),
            Box::new(m20260301_000003_create_activity_table::Migration),
            Box::new(m20260301_000004_create_activity_registration_table::Migration),
            Box::new(m20260301_000005_create_activity_tag_table::Migration),
            Box::new(m20260301_000006_create_user_activity_preference_table::Migration),
            Box::new(m20260301_000007_create_schedule_item_table::Migration),
            Box::new(m20260301_000008_create_activity_recommendation_table::Migration),
            Box::new(m20260301_000009_seed_activity_categories::Migration),
        ]
    }
}

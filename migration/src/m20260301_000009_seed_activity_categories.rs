use sea_orm_migration::prelude::*;

use super::m20260301_000002_create_activity_category_table::ActivityCategory;

/// Default categories available on a fresh install.
const DEFAULT_CATEGORIES: &[(&str, &str, i32)] = &[
    ("Academic", "Lectures, seminars and workshops", 1),
    ("Sports", "Competitions and fitness events", 2),
    ("Arts", "Performances, exhibitions and creative clubs", 3),
    ("Volunteering", "Community service and outreach", 4),
    ("Social", "Gatherings and club meetups", 5),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert()
            .into_table(ActivityCategory::Table)
            .columns([
                ActivityCategory::Name,
                ActivityCategory::Description,
                ActivityCategory::SortOrder,
            ])
            .to_owned();

        for (name, description, sort_order) in DEFAULT_CATEGORIES {
            insert.values_panic([(*name).into(), (*description).into(), (*sort_order).into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names: Vec<&str> = DEFAULT_CATEGORIES.iter().map(|(name, _, _)| *name).collect();

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(ActivityCategory::Table)
                    .and_where(Expr::col(ActivityCategory::Name).is_in(names))
                    .to_owned(),
            )
            .await
    }
}

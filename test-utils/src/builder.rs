use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityName, EntityTrait, IdenStatic, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, ActivityCategory};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(ActivityCategory)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// CREATE INDEX statements executed after every table exists.
    indexes: Vec<IndexCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys must be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds a unique index over `columns` of `entity`'s table.
    ///
    /// Composite unique indexes live in the migrations rather than the entities, so
    /// tests that rely on them declare them here.
    ///
    /// # Arguments
    /// - `entity` - Entity whose table receives the index
    /// - `columns` - Indexed columns, in order
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_unique_index<E: EntityTrait>(mut self, entity: E, columns: &[E::Column]) -> Self {
        let mut index = Index::create();
        index.table(entity.table_ref()).unique();
        for column in columns {
            index.col(*column);
        }
        let column_names: Vec<String> = columns
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();
        index.name(format!(
            "idx_{}_{}",
            entity.table_name(),
            column_names.join("_")
        ));
        self.indexes.push(index.to_owned());
        self
    }

    /// Adds the tables needed to create activities and register for them.
    ///
    /// Adds, in dependency order:
    /// - User
    /// - ActivityCategory
    /// - Activity
    /// - ActivityTag
    /// - ActivityRegistration
    /// - ScheduleItem
    ///
    /// plus the unique `(activity_id, user_id)` index on registrations.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_activity_tables(self) -> Self {
        use entity::activity_registration::Column;

        self.with_table(User)
            .with_table(ActivityCategory)
            .with_table(Activity)
            .with_table(ActivityTag)
            .with_table(ActivityRegistration)
            .with_table(ScheduleItem)
            .with_unique_index(ActivityRegistration, &[Column::ActivityId, Column::UserId])
    }

    /// Adds every table including preferences and recommendation snapshots.
    ///
    /// Equivalent to `with_activity_tables()` followed by `UserActivityPreference` and
    /// `ActivityRecommendation`, each with its unique per-user index.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_recommendation_tables(self) -> Self {
        use entity::{activity_recommendation, user_activity_preference};

        self.with_activity_tables()
            .with_table(UserActivityPreference)
            .with_table(ActivityRecommendation)
            .with_unique_index(
                UserActivityPreference,
                &[
                    user_activity_preference::Column::UserId,
                    user_activity_preference::Column::CategoryId,
                ],
            )
            .with_unique_index(
                ActivityRecommendation,
                &[
                    activity_recommendation::Column::ActivityId,
                    activity_recommendation::Column::UserId,
                ],
            )
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

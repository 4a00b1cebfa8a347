//! Activity category factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct CategoryFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    is_active: bool,
    sort_order: i32,
}

impl<'a> CategoryFactory<'a> {
    /// Defaults: name `"Category {id}"`, active, sort order 0.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Category {}", next_id()),
            is_active: true,
            sort_order: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub async fn build(self) -> Result<entity::activity_category::Model, DbErr> {
        entity::activity_category::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(None),
            icon_url: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            sort_order: ActiveValue::Set(self.sort_order),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active category with default values.
pub async fn create_category(
    db: &DatabaseConnection,
) -> Result<entity::activity_category::Model, DbErr> {
    CategoryFactory::new(db).build().await
}

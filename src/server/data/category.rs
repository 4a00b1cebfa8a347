use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::category::{Category, CreateCategoryParams};

pub struct CategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new active category.
    pub async fn create(&self, params: CreateCategoryParams) -> Result<Category, DbErr> {
        let category = entity::activity_category::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            icon_url: ActiveValue::Set(params.icon_url),
            is_active: ActiveValue::Set(true),
            sort_order: ActiveValue::Set(params.sort_order),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Category::from_entity(category, 0))
    }

    /// Gets a visible category by ID with its activity count
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DbErr> {
        let Some(category) = entity::prelude::ActivityCategory::find_by_id(id)
            .filter(entity::activity_category::Column::IsDeleted.eq(false))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let activity_count = entity::prelude::Activity::find()
            .filter(entity::activity::Column::CategoryId.eq(id))
            .filter(entity::activity::Column::IsDeleted.eq(false))
            .count(self.db)
            .await?;

        Ok(Some(Category::from_entity(category, activity_count)))
    }

    /// Checks whether a category with this name already exists
    pub async fn name_exists(&self, name: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::ActivityCategory::find()
            .filter(entity::activity_category::Column::Name.eq(name))
            .filter(entity::activity_category::Column::IsDeleted.eq(false))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets active categories ordered by sort order then ID, each with its activity count
    pub async fn get_all_active(&self) -> Result<Vec<Category>, DbErr> {
        let categories = entity::prelude::ActivityCategory::find()
            .filter(entity::activity_category::Column::IsActive.eq(true))
            .filter(entity::activity_category::Column::IsDeleted.eq(false))
            .order_by_asc(entity::activity_category::Column::SortOrder)
            .order_by_asc(entity::activity_category::Column::Id)
            .all(self.db)
            .await?;

        // One query for every visible activity's category instead of a count per row
        let category_ids: Vec<i32> = entity::prelude::Activity::find()
            .select_only()
            .column(entity::activity::Column::CategoryId)
            .filter(entity::activity::Column::IsDeleted.eq(false))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for category_id in category_ids {
            *counts.entry(category_id).or_insert(0) += 1;
        }

        Ok(categories
            .into_iter()
            .map(|c| {
                let count = counts.get(&c.id).copied().unwrap_or(0);
                Category::from_entity(c, count)
            })
            .collect())
    }
}

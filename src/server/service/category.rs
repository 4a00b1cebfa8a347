//! Activity category service.
//!
//! Categories change rarely and are read on every activity listing, so the active list
//! is served through the shared cache and invalidated on every write.

use sea_orm::DatabaseConnection;

use crate::server::{
    cache::{AppCache, CATEGORIES_KEY, LONG_TTL},
    data::category::CategoryRepository,
    error::AppError,
    model::category::{Category, CreateCategoryParams},
    util::validation::{check_length, check_max_length},
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a AppCache,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a AppCache) -> Self {
        Self { db, cache }
    }

    /// Gets active categories with activity counts, reading through the cache.
    ///
    /// # Returns
    /// - `Ok(Vec<Category>)` - Categories ordered by sort order then ID
    /// - `Err(AppError::DbErr)` - Database error on a cache miss
    pub async fn get_categories(&self) -> Result<Vec<Category>, AppError> {
        if let Some(categories) = self.cache.get_json::<Vec<Category>>(CATEGORIES_KEY).await {
            return Ok(categories);
        }

        let categories = CategoryRepository::new(self.db).get_all_active().await?;
        self.cache
            .set_json(CATEGORIES_KEY, &categories, LONG_TTL)
            .await;

        Ok(categories)
    }

    /// Creates a category and drops the cached list.
    ///
    /// # Returns
    /// - `Ok(Category)` - The created category
    /// - `Err(AppError::BadRequest)` - Invalid name, description or icon URL
    /// - `Err(AppError::Conflict)` - A category with this name exists
    pub async fn create_category(&self, params: CreateCategoryParams) -> Result<Category, AppError> {
        check_length("Category name", &params.name, 1, 50)?;
        check_max_length("Description", params.description.as_deref(), 200)?;
        check_max_length("Icon URL", params.icon_url.as_deref(), 200)?;

        let category_repo = CategoryRepository::new(self.db);

        if category_repo.name_exists(&params.name).await? {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                params.name
            )));
        }

        let category = category_repo.create(params).await?;
        self.cache.remove(CATEGORIES_KEY).await;

        tracing::info!("Created category {} ({})", category.name, category.id);

        Ok(category)
    }
}

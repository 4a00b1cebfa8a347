//! Activity category domain models and parameters.

use serde::{Deserialize, Serialize};

use crate::model::category::{CategoryDto, CreateCategoryDto};

/// Category with the number of visible activities it holds.
///
/// Serializable so the category list can be cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub activity_count: u64,
}

impl Category {
    pub fn from_entity(entity: entity::activity_category::Model, activity_count: u64) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            icon_url: entity.icon_url,
            sort_order: entity.sort_order,
            is_active: entity.is_active,
            activity_count,
        }
    }

    pub fn into_dto(self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            name: self.name,
            description: self.description,
            icon_url: self.icon_url,
            sort_order: self.sort_order,
            activity_count: self.activity_count,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub sort_order: i32,
}

impl CreateCategoryParams {
    pub fn from_dto(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: dto.description,
            icon_url: dto.icon_url,
            sort_order: dto.sort_order,
        }
    }
}

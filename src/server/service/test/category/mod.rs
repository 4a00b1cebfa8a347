use crate::server::{
    cache::AppCache, error::AppError, model::category::CreateCategoryParams,
    service::category::CategoryService,
};
use test_utils::{builder::TestBuilder, factory};

mod create_category;

fn params(name: &str) -> CreateCategoryParams {
    CreateCategoryParams {
        name: name.to_string(),
        description: None,
        icon_url: None,
        sort_order: 0,
    }
}

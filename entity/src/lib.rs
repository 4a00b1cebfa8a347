//! SeaORM entity models for the campus activity database.
//!
//! Every table carries `id`, `created_at`, `updated_at` and `is_deleted`. The audit
//! columns are maintained by each entity's `ActiveModelBehavior::before_save` hook,
//! so inserts and updates issued through `ActiveModel` never need to set them by hand.
//! Bulk statements (`update_many`) bypass the hook and must set `updated_at` themselves.

pub mod prelude;

pub mod activity;
pub mod activity_category;
pub mod activity_recommendation;
pub mod activity_registration;
pub mod activity_tag;
pub mod enums;
pub mod schedule_item;
pub mod user;
pub mod user_activity_preference;

mod audit;

//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` convenience
//! function for quick default creation. Factories insert through `ActiveModel`, so the
//! entity audit hook fills `created_at`, `updated_at` and `is_deleted`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let student = factory::user::create_user(db).await?;
//! let (category, activity) = factory::helpers::create_activity_with_dependencies(db).await?;
//!
//! let full = factory::activity::ActivityFactory::new(db, category.id)
//!     .max_participants(1)
//!     .current_participants(1)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users of any role
//! - `category` - Activity categories
//! - `activity` - Activities (published, upcoming and open by default)
//! - `registration` - Registrations of a user for an activity
//! - `schedule_item` - Personal schedule entries
//! - `preference` - Category preference weights
//! - `helpers` - Id generation and multi-entity setups

pub mod activity;
pub mod category;
pub mod helpers;
pub mod preference;
pub mod registration;
pub mod schedule_item;
pub mod user;

pub use activity::create_activity;
pub use category::create_category;
pub use preference::create_preference;
pub use registration::create_registration;
pub use schedule_item::create_schedule_item;
pub use user::create_user;

pub use super::activity::Entity as Activity;
pub use super::activity_category::Entity as ActivityCategory;
pub use super::activity_recommendation::Entity as ActivityRecommendation;
pub use super::activity_registration::Entity as ActivityRegistration;
pub use super::activity_tag::Entity as ActivityTag;
pub use super::schedule_item::Entity as ScheduleItem;
pub use super::user::Entity as User;
pub use super::user_activity_preference::Entity as UserActivityPreference;

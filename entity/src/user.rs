use sea_orm::entity::prelude::*;

use crate::enums::UserRole;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTimeUtc>,
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub grade: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::activity_registration::Entity")]
    ActivityRegistration,
    #[sea_orm(has_many = "super::schedule_item::Entity")]
    ScheduleItem,
    #[sea_orm(has_many = "super::user_activity_preference::Entity")]
    UserActivityPreference,
}

impl Related<super::activity_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityRegistration.def()
    }
}

impl Related<super::schedule_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleItem.def()
    }
}

impl Related<super::user_activity_preference::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserActivityPreference.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        crate::audit::stamp(
            &mut self.created_at,
            &mut self.updated_at,
            &mut self.is_deleted,
            insert,
        );
        Ok(self)
    }
}

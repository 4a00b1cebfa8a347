use sea_orm::entity::prelude::*;

use crate::enums::ActivityStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,
    pub registration_deadline: DateTimeUtc,
    pub max_participants: i32,
    pub current_participants: i32,
    pub image_url: Option<String>,
    pub status: ActivityStatus,
    pub category_id: i32,
    pub created_by: Option<i32>,
    pub updated_by: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity_category::Entity",
        from = "Column::CategoryId",
        to = "super::activity_category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    ActivityCategory,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Creator,
    #[sea_orm(has_many = "super::activity_registration::Entity")]
    ActivityRegistration,
    #[sea_orm(has_many = "super::activity_tag::Entity")]
    ActivityTag,
}

impl Related<super::activity_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityCategory.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::activity_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityRegistration.def()
    }
}

impl Related<super::activity_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityTag.def()
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

//! Activity registration repository.
//!
//! One row exists per (activity, user). Cancelling keeps the row with a `Cancelled`
//! status so a later registration can reactivate it.

use chrono::Utc;
use entity::enums::RegistrationStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::server::model::registration::Registration;

pub struct RegistrationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RegistrationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the registration row for an activity and user, whatever its status.
    pub async fn find(
        &self,
        activity_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::activity_registration::Model>, DbErr> {
        entity::prelude::ActivityRegistration::find()
            .filter(entity::activity_registration::Column::ActivityId.eq(activity_id))
            .filter(entity::activity_registration::Column::UserId.eq(user_id))
            .filter(entity::activity_registration::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    /// Checks whether the user holds a `Registered` registration for the activity.
    pub async fn is_registered(&self, activity_id: i32, user_id: i32) -> Result<bool, DbErr> {
        Ok(self
            .find(activity_id, user_id)
            .await?
            .is_some_and(|r| r.status == RegistrationStatus::Registered))
    }

    /// Inserts a new `Registered` row stamped with the current time.
    pub async fn create(
        &self,
        activity_id: i32,
        user_id: i32,
        note: Option<String>,
    ) -> Result<entity::activity_registration::Model, DbErr> {
        entity::activity_registration::ActiveModel {
            activity_id: ActiveValue::Set(activity_id),
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(RegistrationStatus::Registered),
            note: ActiveValue::Set(note),
            registration_time: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Returns an existing row to `Registered` with a fresh registration time.
    pub async fn reactivate(
        &self,
        registration: entity::activity_registration::Model,
        note: Option<String>,
    ) -> Result<entity::activity_registration::Model, DbErr> {
        let mut active = registration.into_active_model();
        active.status = ActiveValue::Set(RegistrationStatus::Registered);
        active.note = ActiveValue::Set(note);
        active.registration_time = ActiveValue::Set(Utc::now());
        active.update(self.db).await
    }

    /// Sets a registration's status.
    pub async fn set_status(
        &self,
        registration: entity::activity_registration::Model,
        status: RegistrationStatus,
    ) -> Result<entity::activity_registration::Model, DbErr> {
        let mut active = registration.into_active_model();
        active.status = ActiveValue::Set(status);
        active.update(self.db).await
    }

    /// Gets every registration for an activity with user names, oldest first.
    pub async fn find_by_activity(&self, activity_id: i32) -> Result<Vec<Registration>, DbErr> {
        let rows = entity::prelude::ActivityRegistration::find()
            .filter(entity::activity_registration::Column::ActivityId.eq(activity_id))
            .filter(entity::activity_registration::Column::IsDeleted.eq(false))
            .order_by_asc(entity::activity_registration::Column::RegistrationTime)
            .order_by_asc(entity::activity_registration::Column::Id)
            .all(self.db)
            .await?;

        self.hydrate(rows).await
    }

    /// Gets every registration a user holds with activity titles, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<Registration>, DbErr> {
        let rows = entity::prelude::ActivityRegistration::find()
            .filter(entity::activity_registration::Column::UserId.eq(user_id))
            .filter(entity::activity_registration::Column::IsDeleted.eq(false))
            .order_by_desc(entity::activity_registration::Column::RegistrationTime)
            .order_by_desc(entity::activity_registration::Column::Id)
            .all(self.db)
            .await?;

        self.hydrate(rows).await
    }

    /// IDs of activities the user is currently registered for, ascending.
    pub async fn find_registered_activity_ids(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::ActivityRegistration::find()
            .select_only()
            .column(entity::activity_registration::Column::ActivityId)
            .filter(entity::activity_registration::Column::UserId.eq(user_id))
            .filter(
                entity::activity_registration::Column::Status.eq(RegistrationStatus::Registered),
            )
            .filter(entity::activity_registration::Column::IsDeleted.eq(false))
            .order_by_asc(entity::activity_registration::Column::ActivityId)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Every user's set of `Registered` activity IDs, keyed by user ID.
    ///
    /// Ordered maps keep downstream iteration deterministic.
    pub async fn find_all_registered_sets(
        &self,
    ) -> Result<BTreeMap<i32, BTreeSet<i32>>, DbErr> {
        let pairs: Vec<(i32, i32)> = entity::prelude::ActivityRegistration::find()
            .select_only()
            .column(entity::activity_registration::Column::UserId)
            .column(entity::activity_registration::Column::ActivityId)
            .filter(
                entity::activity_registration::Column::Status.eq(RegistrationStatus::Registered),
            )
            .filter(entity::activity_registration::Column::IsDeleted.eq(false))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut sets: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();
        for (user_id, activity_id) in pairs {
            sets.entry(user_id).or_default().insert(activity_id);
        }
        Ok(sets)
    }

    async fn hydrate(
        &self,
        rows: Vec<entity::activity_registration::Model>,
    ) -> Result<Vec<Registration>, DbErr> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let activity_ids: Vec<i32> = rows.iter().map(|r| r.activity_id).collect();
        let user_ids: Vec<i32> = rows.iter().map(|r| r.user_id).collect();

        let titles: HashMap<i32, String> = entity::prelude::Activity::find()
            .filter(entity::activity::Column::Id.is_in(activity_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a.title))
            .collect();

        let names: HashMap<i32, String> = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.full_name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|r| {
                let title = titles.get(&r.activity_id).cloned().unwrap_or_default();
                let name = names.get(&r.user_id).cloned().unwrap_or_default();
                Registration::from_entity(r, title, name)
            })
            .collect())
    }
}

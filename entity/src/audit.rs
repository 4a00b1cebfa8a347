use chrono::Utc;
use sea_orm::{entity::prelude::DateTimeUtc, ActiveValue};

/// Fills the audit columns shared by every table.
///
/// On insert, `created_at` and `is_deleted` are only filled when the caller left them
/// unset so factories can backdate rows. `updated_at` is refreshed on every save.
pub(crate) fn stamp(
    created_at: &mut ActiveValue<DateTimeUtc>,
    updated_at: &mut ActiveValue<DateTimeUtc>,
    is_deleted: &mut ActiveValue<bool>,
    insert: bool,
) {
    let now = Utc::now();

    if insert {
        if created_at.is_not_set() {
            *created_at = ActiveValue::Set(now);
        }
        if is_deleted.is_not_set() {
            *is_deleted = ActiveValue::Set(false);
        }
    }

    *updated_at = ActiveValue::Set(now);
}

use axum::{
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        activity::{
            ActivityDto, ActivityStatusDto, ActivityTagDto, CreateActivityDto,
            PaginatedActivitiesDto, UpdateActivityDto, UpdateActivityStatusDto,
        },
        api::{ErrorDto, MessageDto},
        category::{CategoryDto, CreateCategoryDto},
        recommendation::{PreferenceDto, RecommendationDto, UpdatePreferenceDto},
        registration::{RegisterActivityDto, RegistrationDto, RegistrationStatusDto},
        schedule::{
            CalendarDayDto, CreateScheduleItemDto, PaginatedScheduleItemsDto, ScheduleItemDto,
            ScheduleItemPriorityDto, ScheduleItemTypeDto, ScheduleStatisticsDto,
            UpdateScheduleItemDto,
        },
        user::{
            ChangePasswordDto, ClaimAdminDto, LoginDto, PaginatedUsersDto, RegisterUserDto,
            SetUserActiveDto, SetUserRoleDto, UpdateProfileDto, UserContextDto, UserDto,
            UserRoleDto,
        },
    },
    server::{
        controller::{activity, admin, auth, category, recommendation, schedule, user},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Campus Activity API"),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::get_user,
        auth::claim_admin,
        user::get_profile,
        user::update_profile,
        user::change_password,
        user::get_context,
        admin::get_users,
        admin::set_user_active,
        admin::set_user_role,
        activity::search_activities,
        activity::get_activity,
        activity::create_activity,
        activity::update_activity,
        activity::delete_activity,
        activity::update_activity_status,
        activity::register_for_activity,
        activity::cancel_registration,
        activity::get_activity_registrations,
        activity::get_my_registrations,
        activity::get_popular_activities,
        category::get_categories,
        category::create_category,
        recommendation::get_recommendations,
        recommendation::get_collaborative,
        recommendation::get_content_based,
        recommendation::get_preferences,
        recommendation::update_preference,
        recommendation::recalculate,
        schedule::create_item,
        schedule::search_items,
        schedule::get_item,
        schedule::update_item,
        schedule::delete_item,
        schedule::toggle_completion,
        schedule::get_calendar,
        schedule::get_statistics,
        schedule::get_upcoming,
        schedule::get_overdue,
        schedule::add_activity,
        schedule::remove_activity,
    ),
    components(schemas(
        ErrorDto,
        MessageDto,
        UserDto,
        UserRoleDto,
        RegisterUserDto,
        LoginDto,
        UpdateProfileDto,
        ChangePasswordDto,
        ClaimAdminDto,
        SetUserActiveDto,
        SetUserRoleDto,
        PaginatedUsersDto,
        UserContextDto,
        ActivityDto,
        ActivityStatusDto,
        ActivityTagDto,
        CreateActivityDto,
        UpdateActivityDto,
        UpdateActivityStatusDto,
        PaginatedActivitiesDto,
        CategoryDto,
        CreateCategoryDto,
        RegistrationDto,
        RegistrationStatusDto,
        RegisterActivityDto,
        RecommendationDto,
        PreferenceDto,
        UpdatePreferenceDto,
        ScheduleItemDto,
        ScheduleItemTypeDto,
        ScheduleItemPriorityDto,
        CreateScheduleItemDto,
        UpdateScheduleItemDto,
        PaginatedScheduleItemsDto,
        CalendarDayDto,
        ScheduleStatisticsDto,
    )),
    tags(
        (name = "auth", description = "Registration, login and sessions"),
        (name = "user", description = "Profile and dashboard"),
        (name = "admin", description = "Account administration"),
        (name = "activity", description = "Activities and registrations"),
        (name = "category", description = "Activity categories"),
        (name = "recommendation", description = "Personalized recommendations"),
        (name = "schedule", description = "Personal schedule"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .route("/api/auth/admin-code", post(auth::claim_admin))
        .route(
            "/api/user/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/api/user/password", put(user::change_password))
        .route("/api/user/context", get(user::get_context))
        .route("/api/admin/users", get(admin::get_users))
        .route("/api/admin/users/{id}/active", put(admin::set_user_active))
        .route("/api/admin/users/{id}/role", put(admin::set_user_role))
        .route(
            "/api/activities",
            get(activity::search_activities).post(activity::create_activity),
        )
        .route("/api/activities/popular", get(activity::get_popular_activities))
        .route(
            "/api/activities/categories",
            get(category::get_categories).post(category::create_category),
        )
        .route(
            "/api/activities/my-registrations",
            get(activity::get_my_registrations),
        )
        .route(
            "/api/activities/{id}",
            get(activity::get_activity)
                .put(activity::update_activity)
                .delete(activity::delete_activity),
        )
        .route(
            "/api/activities/{id}/status",
            put(activity::update_activity_status),
        )
        .route(
            "/api/activities/{id}/register",
            post(activity::register_for_activity).delete(activity::cancel_registration),
        )
        .route(
            "/api/activities/{id}/registrations",
            get(activity::get_activity_registrations),
        )
        .route(
            "/api/recommendations",
            get(recommendation::get_recommendations),
        )
        .route(
            "/api/recommendations/collaborative",
            get(recommendation::get_collaborative),
        )
        .route(
            "/api/recommendations/content-based",
            get(recommendation::get_content_based),
        )
        .route(
            "/api/recommendations/preferences",
            get(recommendation::get_preferences).post(recommendation::update_preference),
        )
        .route(
            "/api/recommendations/recalculate",
            post(recommendation::recalculate),
        )
        .route(
            "/api/schedule",
            get(schedule::search_items).post(schedule::create_item),
        )
        .route("/api/schedule/calendar", get(schedule::get_calendar))
        .route("/api/schedule/statistics", get(schedule::get_statistics))
        .route("/api/schedule/upcoming", get(schedule::get_upcoming))
        .route("/api/schedule/overdue", get(schedule::get_overdue))
        .route(
            "/api/schedule/{id}",
            get(schedule::get_item)
                .put(schedule::update_item)
                .delete(schedule::delete_item),
        )
        .route(
            "/api/schedule/{id}/toggle-completion",
            post(schedule::toggle_completion),
        )
        .route(
            "/api/schedule/activities/{activity_id}",
            post(schedule::add_activity).delete(schedule::remove_activity),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{MacroSet, MacroTargets, MealRecord, MealType};
use crate::routes::auth::UserResponse;
use crate::services::library::{self, TypeFilter, DEFAULT_PAGE_SIZE};
use crate::services::{aggregate_for_day, evaluate, meals_on_day, DailyTotals, DayEvaluation};
use crate::time_utils::{can_step_forward_day, day_label_for, format_utc_rfc3339, local_day};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

const MAX_PER_PAGE: u32 = 50;
/// Largest UTC offset in use is UTC+14 / UTC-12.
const MAX_TZ_OFFSET_MINUTES: i32 = 14 * 60;
/// Grace period for client clock skew when rejecting future timestamps.
const CLOCK_SKEW_SECONDS: i64 = 60;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/meals", get(list_meals).post(create_meal))
        .route("/api/meals/{meal_id}", delete(delete_meal))
        .route("/api/targets", get(get_targets).put(put_targets))
        .route("/api/dashboard", get(get_dashboard))
}

/// Build the viewer's fixed-offset zone from a JavaScript
/// `Date.getTimezoneOffset()` value (minutes west of UTC).
fn viewer_zone(tz_offset_minutes: i32) -> Result<FixedOffset> {
    if tz_offset_minutes.abs() > MAX_TZ_OFFSET_MINUTES {
        return Err(AppError::BadRequest(
            "Invalid 'tz_offset_minutes' parameter".to_string(),
        ));
    }
    FixedOffset::west_opt(tz_offset_minutes * 60)
        .ok_or_else(|| AppError::BadRequest("Invalid 'tz_offset_minutes' parameter".to_string()))
}

// ─── User Profile ────────────────────────────────────────────

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .db
        .get_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(UserResponse::from(&profile)))
}

// ─── Meals ───────────────────────────────────────────────────

/// One meal in an API response.
#[derive(Serialize)]
pub struct MealResponse {
    pub meal_id: Uuid,
    pub name: String,
    pub description: String,
    pub meal_type: MealType,
    pub macros: MacroSet,
    pub occurred_at: String,
}

impl From<&MealRecord> for MealResponse {
    fn from(meal: &MealRecord) -> Self {
        Self {
            meal_id: meal.meal_id,
            name: meal.name.clone(),
            description: meal.description.clone(),
            meal_type: meal.meal_type,
            macros: meal.macros,
            occurred_at: format_utc_rfc3339(meal.occurred_at),
        }
    }
}

#[derive(Deserialize)]
struct LibraryQuery {
    /// Free-text search against name and description
    #[serde(default)]
    query: String,
    /// Meal type filter: breakfast/lunch/dinner/snack, or "all"
    meal_type: Option<String>,
    /// Pagination: 1-indexed page of today's partition
    #[serde(default = "default_page")]
    today_page: u32,
    /// Pagination: 1-indexed page of the previous-days partition
    #[serde(default = "default_page")]
    previous_page: u32,
    /// Items per page for both partitions
    #[serde(default = "default_per_page")]
    per_page: u32,
    /// Viewer offset, minutes west of UTC
    #[serde(default)]
    tz_offset_minutes: i32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    DEFAULT_PAGE_SIZE as u32
}

fn parse_type_filter(raw: Option<&str>) -> Result<TypeFilter> {
    match raw {
        None | Some("all") => Ok(TypeFilter::All),
        Some(s) => s
            .parse::<MealType>()
            .map(TypeFilter::Only)
            .map_err(|e| AppError::BadRequest(e.to_string())),
    }
}

/// One page of one library partition.
#[derive(Serialize)]
pub struct PageResponse {
    pub meals: Vec<MealResponse>,
    pub page: u32,
    pub page_count: u32,
    pub total: u32,
}

impl From<library::Page<'_>> for PageResponse {
    fn from(page: library::Page<'_>) -> Self {
        Self {
            meals: page.items.iter().map(|m| MealResponse::from(*m)).collect(),
            page: page.page as u32,
            page_count: page.page_count as u32,
            total: page.total as u32,
        }
    }
}

#[derive(Serialize)]
pub struct LibraryResponse {
    pub today: PageResponse,
    pub previous: PageResponse,
    /// Records matching the filters across both partitions
    pub total_matching: u32,
}

/// Browse the meal library: filter, partition into today/previous, and
/// paginate each partition independently.
///
/// Out-of-range page numbers clamp to the nearest valid page rather than
/// failing; the listing is a best-effort view over whatever snapshot the
/// store returns.
async fn list_meals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<LibraryQuery>,
) -> Result<Json<LibraryResponse>> {
    let tz = viewer_zone(params.tz_offset_minutes)?;
    let type_filter = parse_type_filter(params.meal_type.as_deref())?;
    let per_page = params.per_page.clamp(1, MAX_PER_PAGE) as usize;

    let records = state.db.list_meals_for_user(user.user_id).await?;

    let filtered = library::filter_meals(&records, &params.query, type_filter);
    let total_matching = filtered.len() as u32;

    let today = local_day(Utc::now(), &tz);
    let (today_records, previous_records) = library::partition_by_day(&filtered, today, &tz);

    let today_page = library::paginate(&today_records, per_page, params.today_page as usize);
    let previous_page =
        library::paginate(&previous_records, per_page, params.previous_page as usize);

    Ok(Json(LibraryResponse {
        today: PageResponse::from(today_page),
        previous: PageResponse::from(previous_page),
        total_matching,
    }))
}

/// Request to log a meal.
///
/// Macro fields arrive as strings (legacy wire format); each is parsed
/// leniently, with malformed values becoming 0 for that field only.
#[derive(Deserialize, Validate)]
pub struct CreateMealRequest {
    /// Client-assigned ID; generated server-side when absent
    pub meal_id: Option<Uuid>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub meal_type: MealType,
    pub calories: String,
    pub protein_g: String,
    pub carbs_g: String,
    pub fats_g: String,
    /// When the meal was eaten (RFC3339); must not be in the future
    pub occurred_at: DateTime<Utc>,
}

/// Log a meal.
async fn create_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealResponse>)> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let now = Utc::now();
    if body.occurred_at > now + chrono::Duration::seconds(CLOCK_SKEW_SECONDS) {
        return Err(AppError::BadRequest(
            "'occurred_at' must not be in the future".to_string(),
        ));
    }

    let meal = MealRecord {
        meal_id: body.meal_id.unwrap_or_else(Uuid::new_v4),
        user_id: user.user_id,
        name: body.name.trim().to_string(),
        description: body.description.trim().to_string(),
        meal_type: body.meal_type,
        macros: MacroSet::parse_lossy(
            &body.calories,
            &body.protein_g,
            &body.carbs_g,
            &body.fats_g,
        ),
        occurred_at: body.occurred_at,
        created_at: now,
    };

    state.db.set_meal(&meal).await?;

    tracing::info!(
        user_id = %user.user_id,
        meal_id = %meal.meal_id,
        meal_type = %meal.meal_type,
        "Meal logged"
    );

    Ok((StatusCode::CREATED, Json(MealResponse::from(&meal))))
}

#[derive(Serialize)]
pub struct DeleteMealResponse {
    pub success: bool,
}

/// Delete a meal by ID. Returns 404 for unknown IDs and for meals owned by
/// someone else.
async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(meal_id): Path<Uuid>,
) -> Result<Json<DeleteMealResponse>> {
    let meal = state
        .db
        .get_meal(meal_id)
        .await?
        .filter(|m| m.user_id == user.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Meal {} not found", meal_id)))?;

    state.db.delete_meal(meal.meal_id).await?;

    tracing::info!(user_id = %user.user_id, meal_id = %meal_id, "Meal deleted");

    Ok(Json(DeleteMealResponse { success: true }))
}

// ─── Targets ─────────────────────────────────────────────────

/// Get the user's daily macro targets, falling back to the defaults until
/// they save their own.
async fn get_targets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MacroTargets>> {
    let targets = state
        .db
        .get_targets(user.user_id)
        .await?
        .unwrap_or_default();
    Ok(Json(targets))
}

/// Replace the user's daily macro targets wholesale.
async fn put_targets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(targets): Json<MacroTargets>,
) -> Result<Json<MacroTargets>> {
    if !targets.is_valid() {
        return Err(AppError::BadRequest(
            "All target fields must be finite and non-negative".to_string(),
        ));
    }

    state.db.set_targets(user.user_id, &targets).await?;

    tracing::info!(user_id = %user.user_id, "Macro targets updated");

    Ok(Json(targets))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Deserialize)]
struct DashboardQuery {
    /// Day to view (YYYY-MM-DD in the viewer's zone); defaults to today
    date: Option<NaiveDate>,
    /// Viewer offset, minutes west of UTC
    #[serde(default)]
    tz_offset_minutes: i32,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub date: NaiveDate,
    /// "Today", "Yesterday", or the weekday-and-date label
    pub label: String,
    /// Whether the date navigator may step forward from this day
    pub can_step_forward: bool,
    pub totals: DailyTotals,
    pub targets: MacroTargets,
    pub evaluation: DayEvaluation,
    /// Banner message for the day status
    pub message: String,
    /// The day's meals, most recent first
    pub meals: Vec<MealResponse>,
}

/// Daily progress view: the selected day's totals, their evaluation against
/// the configured targets, and the day's meals.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>> {
    let tz = viewer_zone(params.tz_offset_minutes)?;
    let today = local_day(Utc::now(), &tz);
    let date = params.date.unwrap_or(today);

    let records = state.db.list_meals_for_user(user.user_id).await?;
    let targets = state
        .db
        .get_targets(user.user_id)
        .await?
        .unwrap_or_default();

    let totals = aggregate_for_day(&records, date, &tz);
    let evaluation = evaluate(&totals, &targets);
    let meals = meals_on_day(&records, date, &tz)
        .into_iter()
        .map(MealResponse::from)
        .collect();

    Ok(Json(DashboardResponse {
        date,
        label: day_label_for(date, today),
        can_step_forward: can_step_forward_day(date, today),
        totals,
        targets,
        evaluation,
        message: evaluation.day.message().to_string(),
        meals,
    }))
}

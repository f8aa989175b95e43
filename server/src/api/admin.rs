//! Admin endpoints. Every handler takes an [`AdminSession`], so a request
//! without a valid token is rejected before the store is touched.
//!
//! - GET/PUT /api/admin/event
//! - GET/POST /api/admin/food-choices
//! - PUT/DELETE /api/admin/food-choices/:id
//! - GET /api/admin/invites
//! - POST /api/admin/invites/import
//! - GET /api/admin/rsvps
//! - GET /api/admin/metrics

use crate::auth::AdminSession;
use crate::auth::handlers::OkResponse;
use crate::server::state::AppState;
use crate::telemetry;
use axum::{Json, extract::State};
use party_rsvp_core::{
    EventSettings, EventSettingsInput, FoodChoice, FoodChoiceId, ImportSummary, Invite, Metrics,
    Rsvp,
    validation::{validate_event_settings, validate_food_label},
};
use party_rsvp_web::{AppError, AppJson, AppMultipart, AppPath};
use serde::Deserialize;

// ============================================================================
// Event settings
// ============================================================================

/// Get the event settings.
pub async fn get_event(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<EventSettings>, AppError> {
    Ok(Json(state.stores.event_settings.get_event_settings().await?))
}

/// Replace the event settings. All five fields are required.
pub async fn update_event(
    admin: AdminSession,
    State(state): State<AppState>,
    AppJson(input): AppJson<EventSettingsInput>,
) -> Result<Json<EventSettings>, AppError> {
    let settings = validate_event_settings(&input)?;
    let updated = state
        .stores
        .event_settings
        .replace_event_settings(&settings)
        .await?;
    tracing::info!(admin_id = %admin.admin_id, "Event settings replaced");
    Ok(Json(updated))
}

// ============================================================================
// Food choices
// ============================================================================

/// Request to create a food choice.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateFoodChoiceRequest {
    /// Display label
    pub label: String,
}

/// Request to update a food choice. A missing `active` means inactive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateFoodChoiceRequest {
    /// Display label
    pub label: String,
    /// Whether the form offers it
    pub active: bool,
}

/// List every food choice, active or not, id ascending.
pub async fn list_food_choices(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodChoice>>, AppError> {
    Ok(Json(state.stores.food_choices.list_food_choices(false).await?))
}

/// Create an active food choice.
pub async fn create_food_choice(
    admin: AdminSession,
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateFoodChoiceRequest>,
) -> Result<Json<FoodChoice>, AppError> {
    let label = validate_food_label(&request.label)?;
    let choice = state.stores.food_choices.create_food_choice(&label).await?;
    tracing::info!(admin_id = %admin.admin_id, food_choice_id = %choice.id, "Food choice created");
    Ok(Json(choice))
}

/// Rename and/or toggle a food choice.
pub async fn update_food_choice(
    admin: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateFoodChoiceRequest>,
) -> Result<Json<FoodChoice>, AppError> {
    let label = validate_food_label(&request.label)?;
    let choice = state
        .stores
        .food_choices
        .update_food_choice(FoodChoiceId::new(id), &label, request.active)
        .await?;
    tracing::info!(
        admin_id = %admin.admin_id,
        food_choice_id = %choice.id,
        active = choice.active,
        "Food choice updated"
    );
    Ok(Json(choice))
}

/// Delete a food choice no child has picked. Answers 409 otherwise.
pub async fn delete_food_choice(
    admin: AdminSession,
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<OkResponse>, AppError> {
    state
        .stores
        .food_choices
        .delete_food_choice(FoodChoiceId::new(id))
        .await?;
    tracing::info!(admin_id = %admin.admin_id, food_choice_id = id, "Food choice deleted");
    Ok(Json(OkResponse::OK))
}

// ============================================================================
// Invites
// ============================================================================

/// List the guest list in import order.
pub async fn list_invites(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Invite>>, AppError> {
    Ok(Json(state.stores.invites.list_invites().await?))
}

/// Import a guest list from the multipart field `file`.
///
/// ```bash
/// curl -X POST http://localhost:3001/api/admin/invites/import \
///   -H "Authorization: Bearer <token>" \
///   -F file=@guests.csv
/// # {"inserted":1,"skipped":1}
/// ```
pub async fn import_invites(
    admin: AdminSession,
    State(state): State<AppState>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<ImportSummary>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            upload = Some(field.bytes().await?);
            break;
        }
    }
    let upload = upload.ok_or_else(|| AppError::validation("Missing file"))?;

    let summary = state.invite_importer.import(&upload).await?;
    telemetry::record_import(&summary);
    tracing::info!(
        admin_id = %admin.admin_id,
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Guest list imported"
    );
    Ok(Json(summary))
}

// ============================================================================
// Reporting
// ============================================================================

/// List RSVPs newest first, each with its children.
pub async fn list_rsvps(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Rsvp>>, AppError> {
    Ok(Json(state.stores.rsvps.list_rsvps().await?))
}

/// Dashboard counts.
pub async fn get_metrics(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Metrics>, AppError> {
    Ok(Json(state.metrics_aggregator.compute().await?))
}

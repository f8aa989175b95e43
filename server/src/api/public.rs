//! Public endpoints used by the RSVP form.
//!
//! - GET /api/event - Event details
//! - GET /api/food-choices - Active food choices
//! - POST /api/rsvp - Submit an RSVP

use crate::server::state::AppState;
use crate::telemetry;
use axum::{Json, extract::State};
use party_rsvp_core::{EventSettings, FoodChoiceId, RsvpId, RsvpSubmission};
use party_rsvp_web::{AppError, AppJson, CorrelationId};
use serde::Serialize;

/// A food choice as offered on the form.
#[derive(Debug, Clone, Serialize)]
pub struct PublicFoodChoice {
    /// Food choice id
    pub id: FoodChoiceId,
    /// Display label
    pub label: String,
}

/// Response after recording an RSVP.
#[derive(Debug, Clone, Serialize)]
pub struct RsvpAccepted {
    /// Always `true`
    pub ok: bool,
    /// Id of the new RSVP
    pub id: RsvpId,
}

/// Get the event details shown above the form.
pub async fn get_event(State(state): State<AppState>) -> Result<Json<EventSettings>, AppError> {
    let settings = state.stores.event_settings.get_event_settings().await?;
    Ok(Json(settings))
}

/// List the active food choices, id ascending.
pub async fn list_food_choices(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicFoodChoice>>, AppError> {
    let choices = state
        .stores
        .food_choices
        .list_food_choices(true)
        .await?
        .into_iter()
        .map(|c| PublicFoodChoice {
            id: c.id,
            label: c.label,
        })
        .collect();
    Ok(Json(choices))
}

/// Submit an RSVP.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:3001/api/rsvp \
///   -H "Content-Type: application/json" \
///   -d '{
///     "invite_name_entered": "Alex",
///     "phone": "0700000000",
///     "children": [
///       {"child_name": "Sam", "food_choice_id": 1},
///       {"child_name": "Kim", "food_choice_id": "2",
///        "has_dietary_requirements": true, "dietary_requirements": "No nuts"}
///     ]
///   }'
/// # {"ok":true,"id":42}
/// ```
pub async fn submit_rsvp(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    AppJson(submission): AppJson<RsvpSubmission>,
) -> Result<Json<RsvpAccepted>, AppError> {
    match state.rsvp_writer.submit(&submission).await {
        Ok(rsvp) => {
            telemetry::record_submission_accepted(rsvp.children.len());
            tracing::info!(
                correlation_id = %correlation_id.0,
                rsvp_id = %rsvp.id,
                children = rsvp.children.len(),
                "RSVP accepted"
            );
            Ok(Json(RsvpAccepted { ok: true, id: rsvp.id }))
        }
        Err(e) => {
            telemetry::record_submission_error(&e);
            Err(e.into())
        }
    }
}

//! Router configuration for the party RSVP server.

use super::state::AppState;
use crate::api::{admin, public};
use crate::auth::handlers::{login, logout};
use crate::config::ServerConfig;
use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    routing::{get, post, put},
};
use party_rsvp_web::{correlation_id, handlers::health_check};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// Configures:
/// - Liveness and Prometheus endpoints
/// - Public form endpoints under `/api`
/// - Admin login/logout and the token-gated admin endpoints under `/api/admin`
/// - CORS for the form's origin, a request body limit, request tracing and
///   correlation ids
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let public_routes = Router::new()
        .route("/event", get(public::get_event))
        .route("/food-choices", get(public::list_food_choices))
        .route("/rsvp", post(public::submit_rsvp));

    let admin_routes = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/event", get(admin::get_event).put(admin::update_event))
        .route(
            "/food-choices",
            get(admin::list_food_choices).post(admin::create_food_choice),
        )
        .route(
            "/food-choices/:id",
            put(admin::update_food_choice).delete(admin::delete_food_choice),
        )
        .route("/invites", get(admin::list_invites))
        .route("/invites/import", post(admin::import_invites))
        .route("/rsvps", get(admin::list_rsvps))
        .route("/metrics", get(admin::get_metrics));

    Router::new()
        .route("/health", get(health_check))
        .route("/internal/metrics", get(render_metrics))
        .nest("/api", public_routes.nest("/admin", admin_routes))
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(cors_layer(&config.frontend_origin))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(correlation_id))
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Invalid FRONTEND_ORIGIN, cross-origin requests disabled");
            layer
        }
    }
}

/// Prometheus text exposition.
#[allow(clippy::unused_async)]
async fn render_metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

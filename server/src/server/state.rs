//! Application state for the party RSVP HTTP server.
//!
//! Contains all shared resources needed by HTTP handlers:
//! - The three core services
//! - The admin authenticator
//! - The repositories the thin admin CRUD handlers call directly
//! - The Prometheus handle, when a recorder is installed

use crate::config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use party_rsvp_auth::{
    AdminAuthenticator, AuthConfig,
    providers::{AdminRepository, SessionStore},
};
use party_rsvp_core::{
    Clock, InviteImporter, MetricsAggregator, RsvpWriter,
    providers::{
        EventSettingsRepository, FoodChoiceRepository, InviteRepository, MetricsRepository,
        RsvpRepository,
    },
};
use std::sync::Arc;

/// The core repositories, usually all backed by one store.
#[derive(Clone)]
pub struct Stores {
    /// Event settings singleton
    pub event_settings: Arc<dyn EventSettingsRepository>,
    /// Food choices
    pub food_choices: Arc<dyn FoodChoiceRepository>,
    /// Guest list
    pub invites: Arc<dyn InviteRepository>,
    /// RSVPs with their children
    pub rsvps: Arc<dyn RsvpRepository>,
    /// Aggregate counts
    pub metrics: Arc<dyn MetricsRepository>,
}

impl Stores {
    /// Use one store for every repository.
    #[must_use]
    pub fn shared<T>(store: &Arc<T>) -> Self
    where
        T: EventSettingsRepository
            + FoodChoiceRepository
            + InviteRepository
            + RsvpRepository
            + MetricsRepository
            + 'static,
    {
        Self {
            event_settings: store.clone(),
            food_choices: store.clone(),
            invites: store.clone(),
            rsvps: store.clone(),
            metrics: store.clone(),
        }
    }
}

/// Admin auth backends.
#[derive(Clone)]
pub struct AuthStores {
    /// Admin accounts
    pub admins: Arc<dyn AdminRepository>,
    /// Sessions
    pub sessions: Arc<dyn SessionStore>,
}

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via Arc) for each request.
#[derive(Clone)]
pub struct AppState {
    /// Validates and records RSVPs
    pub rsvp_writer: Arc<RsvpWriter>,
    /// Loads guest list uploads
    pub invite_importer: Arc<InviteImporter>,
    /// Dashboard numbers
    pub metrics_aggregator: Arc<MetricsAggregator>,
    /// Admin login and token validation
    pub authenticator: Arc<AdminAuthenticator>,
    /// Repositories used directly by the admin CRUD handlers
    pub stores: Stores,
    /// Prometheus exporter, absent when no recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire the services from their backends and the loaded config.
    #[must_use]
    pub fn new(
        stores: Stores,
        auth: AuthStores,
        clock: Arc<dyn Clock>,
        config: &Config,
        prometheus: Option<PrometheusHandle>,
    ) -> Self {
        let session_ttl = i64::try_from(config.auth.session_ttl)
            .ok()
            .and_then(chrono::Duration::try_seconds);
        let auth_config = match session_ttl {
            Some(ttl) => AuthConfig::default().with_session_ttl(ttl),
            None => {
                tracing::warn!(
                    session_ttl = config.auth.session_ttl,
                    "Session TTL out of range, using default"
                );
                AuthConfig::default()
            }
        };

        Self {
            rsvp_writer: Arc::new(RsvpWriter::new(stores.rsvps.clone(), config.rsvp.policy())),
            invite_importer: Arc::new(InviteImporter::new(
                stores.invites.clone(),
                config.rsvp.invite_name_matching,
            )),
            metrics_aggregator: Arc::new(MetricsAggregator::new(stores.metrics.clone())),
            authenticator: Arc::new(AdminAuthenticator::new(
                auth.admins,
                auth.sessions,
                clock,
                auth_config,
            )),
            stores,
            prometheus,
        }
    }
}

//! # Party RSVP Server
//!
//! The HTTP surface of the party RSVP collector: the public form
//! endpoints, the admin login and the token-gated admin endpoints.
//!
//! ## Architecture
//!
//! - **Config**: environment variables, loaded once at startup
//! - **State**: the core services and stores behind `Arc`s
//! - **Router**: Axum routes with CORS, body limit, tracing and
//!   correlation ids
//! - **Telemetry**: Prometheus counters for submissions, imports and logins
//!
//! Handlers stay thin: they extract, call a core service or repository,
//! and map the result. Every error flows through
//! [`party_rsvp_web::AppError`].

pub mod api;
pub mod auth;
pub mod config;
pub mod server;
pub mod telemetry;

pub use config::{Config, ConfigError};
pub use server::{AppState, AuthStores, Stores, build_router};

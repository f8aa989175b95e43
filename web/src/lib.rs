//! Axum glue for the party RSVP HTTP surface.
//!
//! The handlers themselves live in the server crate. This crate holds the
//! pieces every handler shares:
//!
//! - [`AppError`]: the single HTTP error type, with conversions from the
//!   core and auth error enums.
//! - Extractors for the correlation id, the client address and the bearer
//!   token, plus JSON, path and multipart wrappers that reject with
//!   [`AppError`].
//! - The correlation-id middleware.
//! - The liveness handler.
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, routing::get, Router};
//! use party_rsvp_web::{correlation_id, handlers::health_check};
//!
//! let app = Router::new()
//!     .route("/health", get(health_check))
//!     .layer(middleware::from_fn(correlation_id));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

pub use error::AppError;
pub use extractors::{AppJson, AppMultipart, AppPath, BearerToken, ClientIp, CorrelationId};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;

//! # Party RSVP Authentication
//!
//! The auth gate in front of the admin surface.
//!
//! - Admins log in with email and password (bcrypt, verified on the blocking
//!   pool) and receive an opaque bearer token.
//! - Tokens are 256 random bits; only their SHA-256 digest is stored, with
//!   an expiry.
//! - Every admin request presents the token; [`AdminAuthenticator::authenticate`]
//!   turns it into an [`AdminIdentity`] or rejects it.
//!
//! ## Example
//!
//! ```rust,ignore
//! use party_rsvp_auth::{AdminAuthenticator, AuthConfig};
//!
//! let auth = AdminAuthenticator::new(admins, sessions, clock, AuthConfig::default());
//! let issued = auth.login("host@example.com", "secret").await?;
//! let identity = auth.authenticate(&issued.token).await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]

pub mod authenticator;
pub mod config;
pub mod constants;
pub mod error;
pub mod password;
pub mod providers;
pub mod state;
pub mod stores;
pub mod token;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use authenticator::AdminAuthenticator;
pub use config::AuthConfig;
pub use error::{AuthError, Result};
pub use state::{AdminId, AdminIdentity, AdminRecord, IssuedSession, SessionRecord};

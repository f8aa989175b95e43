//! Store traits the auth gate depends on.
//!
//! Mocks live in [`crate::mocks`] (feature `test-utils`), `PostgreSQL`
//! implementations in [`crate::stores`] (feature `postgres`).

pub mod admin;
pub mod session;

pub use admin::AdminRepository;
pub use session::SessionStore;

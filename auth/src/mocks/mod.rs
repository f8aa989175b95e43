//! Mock store implementations for testing.
//!
//! In-memory implementations of every auth store trait for unit and
//! integration tests.

pub mod admin;
pub mod session;

pub use admin::MockAdminRepository;
pub use session::MockSessionStore;

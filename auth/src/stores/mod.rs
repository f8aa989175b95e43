//! Persistent store implementations.

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::{PostgresAdminRepository, PostgresSessionStore};

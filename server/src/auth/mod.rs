//! Admin authentication for the HTTP surface.

pub mod handlers;
pub mod middleware;

pub use middleware::AdminSession;

//! Handlers shared by every deployment of the HTTP surface.

pub mod health;

pub use health::health_check;

//! Store capabilities the core depends on.
//!
//! Each trait abstracts one table (or one group of read queries) of the
//! relational store. Services receive them as `Arc<dyn Trait>` so the same
//! code runs against `PostgreSQL` in production and an in-memory store in
//! tests.

pub mod event;
pub mod food;
pub mod invite;
pub mod metrics;
pub mod rsvp;

pub use event::EventSettingsRepository;
pub use food::FoodChoiceRepository;
pub use invite::InviteRepository;
pub use metrics::MetricsRepository;
pub use rsvp::RsvpRepository;

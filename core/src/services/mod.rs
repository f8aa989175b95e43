//! The three core operations: writing RSVPs, importing invites and
//! aggregating metrics.
//!
//! Services are cheap to clone and hold their stores behind `Arc`, so the
//! HTTP layer can keep one instance in shared state.

pub mod import;
pub mod metrics;
pub mod rsvp;

pub use import::InviteImporter;
pub use metrics::MetricsAggregator;
pub use rsvp::RsvpWriter;

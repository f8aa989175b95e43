//! # Party RSVP Core
//!
//! Domain types, validation and the three core services of the party RSVP
//! collector.
//!
//! ## Services
//!
//! - [`RsvpWriter`]: validates a household's response and writes the RSVP
//!   and all of its children atomically.
//! - [`InviteImporter`]: loads a guest list upload, inserting each name at
//!   most once.
//! - [`MetricsAggregator`]: counts invites, RSVPs and children per food
//!   choice.
//!
//! The services share the store but never call each other. Stores are
//! reached through the traits in [`providers`], so this crate has no
//! database dependency.
//!
//! ## Example
//!
//! ```ignore
//! use party_rsvp_core::{RsvpPolicy, RsvpWriter};
//! use std::sync::Arc;
//!
//! let writer = RsvpWriter::new(Arc::new(store), RsvpPolicy::default());
//! let rsvp = writer.submit(&submission).await?;
//! assert_eq!(rsvp.children.len(), submission.children.len());
//! ```

pub mod environment;
pub mod error;
pub mod import;
pub mod matching;
pub mod providers;
pub mod services;
pub mod types;
pub mod validation;

pub use environment::{Clock, SystemClock};
pub use error::{IntegrityKind, Result, RsvpError};
pub use matching::{InviteNameMatching, UnknownMatchingMode};
pub use services::{InviteImporter, MetricsAggregator, RsvpWriter};
pub use types::{
    ChildId, EventSettings, FoodChoice, FoodChoiceId, FoodTotal, ImportSummary, InsertOutcome,
    Invite, InviteId, Metrics, NewInvite, NewRsvp, NewRsvpChild, Rsvp, RsvpChild, RsvpHeader,
    RsvpId, assemble_rsvps,
};
pub use validation::{
    ChildSubmission, EventSettingsInput, FoodChoiceIdInput, RsvpPolicy, RsvpSubmission,
};

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

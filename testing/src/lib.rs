//! # Party RSVP Testing
//!
//! Testing utilities for the party RSVP collector.
//!
//! This crate provides:
//! - [`InMemoryStore`]: every core repository trait over in-memory tables
//! - [`FixedClock`]: deterministic time
//! - Fixtures for building submissions and uploads
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```ignore
//! use party_rsvp_testing::{InMemoryStore, fixtures};
//! use party_rsvp_core::{RsvpPolicy, RsvpWriter};
//!
//! #[tokio::test]
//! async fn test_rsvp_flow() {
//!     let store = Arc::new(InMemoryStore::with_food_choices(&["Pizza"]));
//!     let pizza = store.food_choice_id("Pizza").unwrap();
//!     let writer = RsvpWriter::new(store.clone(), RsvpPolicy::default());
//!
//!     writer
//!         .submit(&fixtures::submission("Alex", &[("Sam", pizza)]))
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(store.child_count(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use party_rsvp_core::environment::Clock;

pub mod store;

pub use store::{InMemoryStore, default_event_settings};

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::RwLock;

    /// Clock for deterministic tests.
    ///
    /// Returns the same time until moved with [`FixedClock::advance`].
    ///
    /// # Example
    ///
    /// ```
    /// use party_rsvp_testing::mocks::FixedClock;
    /// use party_rsvp_core::environment::Clock;
    /// use chrono::{Duration, Utc};
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// assert_eq!(time1, clock.now());
    ///
    /// clock.advance(Duration::hours(1));
    /// assert_eq!(clock.now() - time1, Duration::hours(1));
    /// ```
    #[derive(Debug)]
    pub struct FixedClock {
        time: RwLock<DateTime<Utc>>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: RwLock::new(time),
            }
        }

        /// Move the clock forward.
        #[allow(clippy::unwrap_used)] // Lock poisoning only follows a test panic
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.write().unwrap();
            *time += by;
        }
    }

    impl Clock for FixedClock {
        #[allow(clippy::unwrap_used)] // Lock poisoning only follows a test panic
        fn now(&self) -> DateTime<Utc> {
            *self.time.read().unwrap()
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }
}

/// Builders for common test inputs.
pub mod fixtures {
    use party_rsvp_core::{ChildSubmission, FoodChoiceId, FoodChoiceIdInput, RsvpSubmission};

    /// A submission with one child per `(name, food)` pair and no dietary notes.
    #[must_use]
    pub fn submission(name: &str, children: &[(&str, FoodChoiceId)]) -> RsvpSubmission {
        RsvpSubmission {
            invite_name_entered: name.to_string(),
            phone: Some("0700 000 000".to_string()),
            children: children
                .iter()
                .map(|(child_name, food)| child(child_name, *food))
                .collect(),
        }
    }

    /// A child entry without dietary requirements.
    #[must_use]
    pub fn child(name: &str, food: FoodChoiceId) -> ChildSubmission {
        ChildSubmission {
            child_name: name.to_string(),
            food_choice_id: Some(FoodChoiceIdInput::Number(food.get())),
            has_dietary_requirements: false,
            dietary_requirements: None,
        }
    }

    /// A child entry with a dietary note.
    #[must_use]
    pub fn child_with_diet(name: &str, food: FoodChoiceId, note: &str) -> ChildSubmission {
        ChildSubmission {
            has_dietary_requirements: true,
            dietary_requirements: Some(note.to_string()),
            ..child(name, food)
        }
    }

    /// A guest list upload with an `invite_name,phone` header.
    #[must_use]
    pub fn guest_list(rows: &[(&str, &str)]) -> Vec<u8> {
        let mut out = String::from("invite_name,phone\n");
        for (name, phone) in rows {
            out.push_str(name);
            out.push(',');
            out.push_str(phone);
            out.push('\n');
        }
        out.into_bytes()
    }
}

/// Property-based testing strategies.
pub mod properties {
    use party_rsvp_core::{ChildSubmission, FoodChoiceId, FoodChoiceIdInput};
    use proptest::prelude::*;

    /// Names that survive trimming.
    pub fn name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z ]{0,15}[A-Za-z]"
    }

    /// A valid child entry choosing one of `foods`.
    pub fn child(foods: Vec<FoodChoiceId>) -> impl Strategy<Value = ChildSubmission> {
        (name(), proptest::sample::select(foods), proptest::option::of("[a-z ]{0,8}[a-z]"))
            .prop_map(|(child_name, food, note)| ChildSubmission {
                child_name,
                food_choice_id: Some(FoodChoiceIdInput::Number(food.get())),
                has_dietary_requirements: note.is_some(),
                dietary_requirements: note,
            })
    }

    /// Between one and `max` valid children.
    pub fn children(
        foods: Vec<FoodChoiceId>,
        max: usize,
    ) -> impl Strategy<Value = Vec<ChildSubmission>> {
        proptest::collection::vec(child(foods), 1..=max)
    }
}

/// Install a test-friendly tracing subscriber once per process.
///
/// Output is captured by the test harness; set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};

//! Core service behavior against the in-memory store.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use party_rsvp_core::providers::{FoodChoiceRepository, RsvpRepository};
use party_rsvp_core::{
    FoodChoiceId, FoodTotal, InviteImporter, InviteNameMatching, MetricsAggregator, RsvpError,
    RsvpPolicy, RsvpWriter,
};
use party_rsvp_testing::{InMemoryStore, fixtures, init_tracing, properties};
use proptest::prelude::*;
use std::sync::Arc;

fn pizza_pasta() -> (Arc<InMemoryStore>, FoodChoiceId, FoodChoiceId) {
    init_tracing();
    let store = Arc::new(InMemoryStore::with_food_choices(&["Pizza", "Pasta"]));
    let pizza = store.food_choice_id("Pizza").expect("seeded");
    let pasta = store.food_choice_id("Pasta").expect("seeded");
    (store, pizza, pasta)
}

fn writer(store: &Arc<InMemoryStore>) -> RsvpWriter {
    RsvpWriter::new(store.clone(), RsvpPolicy::default())
}

fn importer(store: &Arc<InMemoryStore>, matching: InviteNameMatching) -> InviteImporter {
    InviteImporter::new(store.clone(), matching)
}

// ============================================================================
// RSVP Writer
// ============================================================================

#[tokio::test]
async fn test_rsvp_persists_parent_and_every_child() {
    let (store, pizza, pasta) = pizza_pasta();

    let rsvp = writer(&store)
        .submit(&fixtures::submission(
            "Alex",
            &[("Alex", pizza), ("Sam", pasta), ("Kim", pizza)],
        ))
        .await
        .unwrap();

    assert_eq!(rsvp.invite_name_entered, "Alex");
    assert_eq!(rsvp.children.len(), 3);
    assert!(rsvp.children.iter().all(|c| c.rsvp_id == rsvp.id));
    assert_eq!(rsvp.children[1].food_choice_label, "Pasta");
    assert_eq!(store.rsvp_count(), 1);
    assert_eq!(store.child_count(), 3);
}

#[tokio::test]
async fn test_rsvp_with_unknown_food_choice_leaves_no_parent() {
    let (store, pizza, _) = pizza_pasta();

    let result = writer(&store)
        .submit(&fixtures::submission(
            "Alex",
            &[("Alex", pizza), ("Sam", FoodChoiceId::new(404))],
        ))
        .await;

    assert_eq!(result, Err(RsvpError::unknown_food_choice(404)));
    assert_eq!(store.rsvp_count(), 0);
    assert_eq!(store.child_count(), 0);
}

#[tokio::test]
async fn test_rsvp_store_failure_leaves_nothing() {
    let (store, pizza, _) = pizza_pasta();
    store.fail_writes_after(0);

    let result = writer(&store)
        .submit(&fixtures::submission("Alex", &[("Sam", pizza)]))
        .await;

    assert!(matches!(result, Err(RsvpError::Persistence(_))));
    assert_eq!(store.rsvp_count(), 0);
    assert_eq!(store.child_count(), 0);
}

#[tokio::test]
async fn test_invalid_rsvp_never_reaches_store() {
    let (store, _, _) = pizza_pasta();
    // A write would fail, so a validation error proves no write was attempted.
    store.fail_writes_after(0);

    let result = writer(&store)
        .submit(&fixtures::submission("Alex", &[]))
        .await;

    assert_eq!(
        result,
        Err(RsvpError::validation("At least one child is required"))
    );
}

#[tokio::test]
async fn test_same_payload_twice_creates_two_rsvps() {
    let (store, pizza, _) = pizza_pasta();
    let submission = fixtures::submission("Alex", &[("Sam", pizza)]);

    let first = writer(&store).submit(&submission).await.unwrap();
    let second = writer(&store).submit(&submission).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.rsvp_count(), 2);
    assert_eq!(store.child_count(), 2);
}

#[tokio::test]
async fn test_inactive_food_choice_is_still_accepted() {
    let (store, pizza, _) = pizza_pasta();
    store.update_food_choice(pizza, "Pizza", false).await.unwrap();

    let rsvp = writer(&store)
        .submit(&fixtures::submission("Alex", &[("Sam", pizza)]))
        .await;

    assert!(rsvp.is_ok());
}

#[tokio::test]
async fn test_dietary_note_is_stored_with_flag() {
    let (store, pizza, _) = pizza_pasta();
    let mut submission = fixtures::submission("Alex", &[]);
    submission
        .children
        .push(fixtures::child_with_diet("Sam", pizza, "No nuts"));

    let rsvp = writer(&store).submit(&submission).await.unwrap();

    assert!(rsvp.children[0].has_dietary_requirements);
    assert_eq!(
        rsvp.children[0].dietary_requirements.as_deref(),
        Some("No nuts")
    );
}

#[tokio::test]
async fn test_required_phone_policy() {
    let (store, pizza, _) = pizza_pasta();
    let strict = RsvpWriter::new(store.clone(), RsvpPolicy { require_phone: true });
    let mut submission = fixtures::submission("Alex", &[("Sam", pizza)]);
    submission.phone = None;

    assert!(matches!(
        strict.submit(&submission).await,
        Err(RsvpError::Validation(_))
    ));
    assert!(writer(&store).submit(&submission).await.is_ok());
}

#[tokio::test]
async fn test_listing_is_newest_first_with_children_in_order() {
    let (store, pizza, pasta) = pizza_pasta();
    let w = writer(&store);
    let first = w
        .submit(&fixtures::submission("Alex", &[("A", pizza), ("B", pasta)]))
        .await
        .unwrap();
    let second = w
        .submit(&fixtures::submission("Jordan", &[("C", pasta)]))
        .await
        .unwrap();

    let rsvps = store.list_rsvps().await.unwrap();

    assert_eq!(rsvps.len(), 2);
    assert_eq!(rsvps[0].id, second.id);
    assert_eq!(rsvps[1].id, first.id);
    let names: Vec<_> = rsvps[1]
        .children
        .iter()
        .map(|c| c.child_name.as_str())
        .collect();
    assert_eq!(names, ["A", "B"]);
}

proptest! {
    #[test]
    fn prop_child_count_matches_submission(
        children in properties::children(vec![FoodChoiceId::new(1), FoodChoiceId::new(2)], 6)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let store = Arc::new(InMemoryStore::with_food_choices(&["Pizza", "Pasta"]));
        let mut submission = fixtures::submission("Alex", &[]);
        submission.children = children;
        let expected = submission.children.len();

        let rsvp = runtime.block_on(writer(&store).submit(&submission)).unwrap();

        prop_assert_eq!(rsvp.children.len(), expected);
        prop_assert_eq!(store.rsvp_count(), 1);
        prop_assert_eq!(store.child_count(), expected);
    }

    #[test]
    fn prop_any_unknown_reference_rolls_back(
        mut children in properties::children(vec![FoodChoiceId::new(1), FoodChoiceId::new(2)], 6),
        bad_index in any::<prop::sample::Index>(),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let store = Arc::new(InMemoryStore::with_food_choices(&["Pizza", "Pasta"]));
        let bad = bad_index.index(children.len());
        children[bad] = fixtures::child("Ghost", FoodChoiceId::new(9_999));
        let mut submission = fixtures::submission("Alex", &[]);
        submission.children = children;

        let result = runtime.block_on(writer(&store).submit(&submission));

        let is_integrity = matches!(result, Err(RsvpError::Integrity { .. }));
        prop_assert!(is_integrity);
        prop_assert_eq!(store.rsvp_count(), 0);
        prop_assert_eq!(store.child_count(), 0);
    }
}

// ============================================================================
// Invite Importer
// ============================================================================

#[tokio::test]
async fn test_import_two_row_file() {
    let (store, _, _) = pizza_pasta();

    let summary = importer(&store, InviteNameMatching::Exact)
        .import(b"invite_name,phone\nJordan,0711\n,0722")
        .await
        .unwrap();

    assert_eq!((summary.inserted, summary.skipped), (1, 1));
    assert_eq!(summary.missing_name, 1);
    assert_eq!(store.invite_count(), 1);
}

#[tokio::test]
async fn test_reimport_is_a_no_op() {
    let (store, _, _) = pizza_pasta();
    let file = fixtures::guest_list(&[("Jordan", "0711"), ("Riley", ""), ("", "0722")]);
    let importer = importer(&store, InviteNameMatching::Exact);

    let first = importer.import(&file).await.unwrap();
    let second = importer.import(&file).await.unwrap();

    assert_eq!((first.inserted, first.skipped), (2, 1));
    assert_eq!(second.inserted, 0);
    assert_eq!(second.duplicates, first.inserted);
    assert_eq!(second.skipped, 3);
    assert_eq!(store.invite_count(), 2);
}

#[tokio::test]
async fn test_missing_name_does_not_affect_later_rows() {
    let (store, _, _) = pizza_pasta();

    let summary = importer(&store, InviteNameMatching::Exact)
        .import(b"name,phone\n,0700\nAna,0701\nBo,\nAna,0799\n")
        .await
        .unwrap();

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.missing_name, 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.skipped, 2);
}

#[tokio::test]
async fn test_every_row_is_counted_once() {
    let (store, _, _) = pizza_pasta();

    let summary = importer(&store, InviteNameMatching::Exact)
        .import(b"invite_name\nAna\n\xFF\n\nAna\n,\nBo\n")
        .await
        .unwrap();

    assert_eq!(summary.inserted + summary.skipped, 5);
    assert_eq!(summary.malformed, 1);
    assert_eq!(
        summary.skipped,
        summary.malformed + summary.duplicates + summary.missing_name
    );
}

#[tokio::test]
async fn test_matching_mode_decides_duplicates() {
    let file = b"invite_name\nJordan Lee\njordan lee\nJORDAN   LEE\n";

    for (matching, inserted) in [
        (InviteNameMatching::Exact, 3),
        (InviteNameMatching::CaseInsensitive, 2),
        (InviteNameMatching::Normalized, 1),
    ] {
        let (store, _, _) = pizza_pasta();
        let summary = importer(&store, matching).import(file).await.unwrap();
        assert_eq!(summary.inserted, inserted, "mode {matching}");
    }
}

#[tokio::test]
async fn test_store_failure_keeps_committed_prefix() {
    let (store, _, _) = pizza_pasta();
    store.fail_writes_after(2);
    let importer = importer(&store, InviteNameMatching::Exact);
    let file = fixtures::guest_list(&[("A", ""), ("B", ""), ("C", ""), ("D", "")]);

    let result = importer.import(&file).await;

    assert!(matches!(result, Err(RsvpError::Persistence(_))));
    assert_eq!(store.invite_count(), 2);

    // Re-running after recovery only adds the rest.
    store.heal();
    let summary = importer.import(&file).await.unwrap();
    assert_eq!((summary.inserted, summary.skipped), (2, 2));
    assert_eq!(store.invite_count(), 4);
}

// ============================================================================
// Metrics Aggregator
// ============================================================================

#[tokio::test]
async fn test_end_to_end_pizza_and_pasta() {
    let (store, pizza, pasta) = pizza_pasta();
    writer(&store)
        .submit(&fixtures::submission("Alex", &[("Alex", pizza), ("Sam", pasta)]))
        .await
        .unwrap();

    let metrics = MetricsAggregator::new(store.clone()).compute().await.unwrap();

    assert_eq!(metrics.rsvps, 1);
    assert_eq!(metrics.invited, 0);
    assert_eq!(
        metrics.food_totals,
        vec![
            FoodTotal { label: "Pizza".to_string(), count: 1 },
            FoodTotal { label: "Pasta".to_string(), count: 1 },
        ]
    );
}

#[tokio::test]
async fn test_food_totals_include_zero_counts_in_id_order() {
    let (store, pizza, _) = pizza_pasta();
    let soup = store.create_food_choice("Soup").await.unwrap();
    store.update_food_choice(soup.id, "Soup", false).await.unwrap();
    writer(&store)
        .submit(&fixtures::submission("Alex", &[("A", pizza), ("B", pizza)]))
        .await
        .unwrap();
    importer(&store, InviteNameMatching::Exact)
        .import(b"invite_name\nJordan\nRiley\n")
        .await
        .unwrap();

    let metrics = MetricsAggregator::new(store.clone()).compute().await.unwrap();

    assert_eq!(metrics.invited, 2);
    assert_eq!(metrics.rsvps, 1);
    let totals: Vec<_> = metrics
        .food_totals
        .iter()
        .map(|t| (t.label.as_str(), t.count))
        .collect();
    assert_eq!(totals, [("Pizza", 2), ("Pasta", 0), ("Soup", 0)]);
}

#[tokio::test]
async fn test_metrics_surface_store_failure() {
    let (store, _, _) = pizza_pasta();
    store.fail_reads();

    let result = MetricsAggregator::new(store.clone()).compute().await;

    assert!(matches!(result, Err(RsvpError::Persistence(_))));
}

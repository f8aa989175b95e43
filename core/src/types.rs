//! Domain types for the RSVP collector.
//!
//! Rows are identified by store-generated integer ids. Each table gets its
//! own newtype so a food choice id can never be passed where an RSVP id is
//! expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a [`FoodChoice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodChoiceId(i64);

impl FoodChoiceId {
    /// Wrap a raw store id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw store id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for FoodChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an [`Invite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteId(i64);

impl InviteId {
    /// Wrap a raw store id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw store id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for InviteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an [`Rsvp`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RsvpId(i64);

impl RsvpId {
    /// Wrap a raw store id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw store id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RsvpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an [`RsvpChild`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildId(i64);

impl ChildId {
    /// Wrap a raw store id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw store id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

// ============================================================================
// Event settings
// ============================================================================

/// The singleton event description shown on the public form.
///
/// Dates and times are free text: the form displays them as typed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSettings {
    /// Event title
    pub title: String,
    /// Date, as the host wants it displayed
    pub event_date: String,
    /// Time range, e.g. `"2pm - 4pm"`
    pub party_time: String,
    /// Introductory paragraph
    pub intro_text: String,
    /// Venue
    pub location: String,
}

// ============================================================================
// Food choices
// ============================================================================

/// A selectable meal option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodChoice {
    /// Store id
    pub id: FoodChoiceId,
    /// Display label
    pub label: String,
    /// Inactive choices are hidden from the public form but kept for history
    pub active: bool,
}

// ============================================================================
// Invites
// ============================================================================

/// A pre-registered guest list entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    /// Store id
    pub id: InviteId,
    /// Name as first imported
    pub invite_name: String,
    /// Optional contact number
    pub phone: Option<String>,
    /// Import time
    pub created_at: DateTime<Utc>,
}

/// An invite row ready for idempotent insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewInvite {
    /// Name as it appeared in the upload (trimmed)
    pub invite_name: String,
    /// Deduplication key derived from the name
    pub invite_key: String,
    /// Optional contact number
    pub phone: Option<String>,
}

/// Outcome of a single idempotent invite insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was created.
    Inserted,
    /// A row with the same key already existed; nothing changed.
    AlreadyPresent,
}

/// Totals reported by an invite import.
///
/// Only `inserted` and `skipped` go over the wire; the per-reason counters
/// always sum to `skipped`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Rows that created a new invite
    pub inserted: u64,
    /// Rows that did not
    pub skipped: u64,
    /// Rows with neither name column filled
    #[serde(skip)]
    pub missing_name: u64,
    /// Rows whose name was already on the list
    #[serde(skip)]
    pub duplicates: u64,
    /// Rows the tabular reader could not decode
    #[serde(skip)]
    pub malformed: u64,
}

impl ImportSummary {
    pub(crate) const fn record_inserted(&mut self) {
        self.inserted += 1;
    }

    pub(crate) const fn record_missing_name(&mut self) {
        self.missing_name += 1;
        self.skipped += 1;
    }

    pub(crate) const fn record_duplicate(&mut self) {
        self.duplicates += 1;
        self.skipped += 1;
    }

    pub(crate) const fn record_malformed(&mut self) {
        self.malformed += 1;
        self.skipped += 1;
    }
}

// ============================================================================
// RSVPs
// ============================================================================

/// A validated RSVP ready to be written atomically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRsvp {
    /// Name as typed by the submitter (trimmed)
    pub invite_name_entered: String,
    /// Contact number, if given
    pub phone: Option<String>,
    /// At least one child
    pub children: Vec<NewRsvpChild>,
}

/// A validated child row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRsvpChild {
    /// Child's name (trimmed)
    pub child_name: String,
    /// Chosen meal
    pub food_choice_id: FoodChoiceId,
    /// Dietary note; present exactly when the child has requirements
    pub dietary_requirements: Option<String>,
}

/// One household's response, with all of its children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rsvp {
    /// Store id
    pub id: RsvpId,
    /// Name as typed by the submitter
    pub invite_name_entered: String,
    /// Contact number
    pub phone: Option<String>,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Children, ordered by id
    pub children: Vec<RsvpChild>,
}

/// A persisted child row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RsvpChild {
    /// Store id
    pub id: ChildId,
    /// Owning RSVP
    pub rsvp_id: RsvpId,
    /// Child's name
    pub child_name: String,
    /// Chosen meal
    pub food_choice_id: FoodChoiceId,
    /// Label of the chosen meal at read time
    pub food_choice_label: String,
    /// Whether a dietary note was given
    pub has_dietary_requirements: bool,
    /// Dietary note
    pub dietary_requirements: Option<String>,
}

/// An RSVP header row as read from the store, before children are attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsvpHeader {
    /// Store id
    pub id: RsvpId,
    /// Name as typed by the submitter
    pub invite_name_entered: String,
    /// Contact number
    pub phone: Option<String>,
    /// Submission time
    pub created_at: DateTime<Utc>,
}

/// Attach child rows to their parents.
///
/// Parents keep the order they were given in; children are grouped by
/// `rsvp_id` and sorted by id. Children whose parent is not in `headers`
/// are dropped.
#[must_use]
pub fn assemble_rsvps(headers: Vec<RsvpHeader>, children: Vec<RsvpChild>) -> Vec<Rsvp> {
    let mut by_parent: HashMap<RsvpId, Vec<RsvpChild>> = HashMap::with_capacity(headers.len());
    for child in children {
        by_parent.entry(child.rsvp_id).or_default().push(child);
    }

    headers
        .into_iter()
        .map(|header| {
            let mut children = by_parent.remove(&header.id).unwrap_or_default();
            children.sort_by_key(|c| c.id);
            Rsvp {
                id: header.id,
                invite_name_entered: header.invite_name_entered,
                phone: header.phone,
                created_at: header.created_at,
                children,
            }
        })
        .collect()
}

// ============================================================================
// Metrics
// ============================================================================

/// Number of children that chose one food option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FoodTotal {
    /// Food choice label
    pub label: String,
    /// Children referencing it (zero included)
    pub count: u64,
}

/// Aggregated admin dashboard numbers.
///
/// `invited` and `rsvps` count unrelated tables: invites are not linked to
/// submissions, so their ratio is not a response rate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Metrics {
    /// Invite rows
    pub invited: u64,
    /// RSVP rows
    pub rsvps: u64,
    /// One entry per food choice, id ascending
    #[serde(rename = "foodTotals")]
    pub food_totals: Vec<FoodTotal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(id: i64, name: &str) -> RsvpHeader {
        RsvpHeader {
            id: RsvpId::new(id),
            invite_name_entered: name.to_string(),
            phone: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn child(id: i64, rsvp_id: i64, name: &str) -> RsvpChild {
        RsvpChild {
            id: ChildId::new(id),
            rsvp_id: RsvpId::new(rsvp_id),
            child_name: name.to_string(),
            food_choice_id: FoodChoiceId::new(1),
            food_choice_label: "Pizza".to_string(),
            has_dietary_requirements: false,
            dietary_requirements: None,
        }
    }

    #[test]
    fn test_assemble_groups_children_by_parent() {
        let rsvps = assemble_rsvps(
            vec![header(2, "Jordan"), header(1, "Alex")],
            vec![child(3, 1, "Sam"), child(1, 1, "Alex"), child(2, 2, "Riley")],
        );

        assert_eq!(rsvps.len(), 2);
        assert_eq!(rsvps[0].id, RsvpId::new(2));
        assert_eq!(rsvps[0].children.len(), 1);
        assert_eq!(rsvps[1].id, RsvpId::new(1));
        let names: Vec<_> = rsvps[1].children.iter().map(|c| c.child_name.as_str()).collect();
        assert_eq!(names, ["Alex", "Sam"]);
    }

    #[test]
    fn test_assemble_drops_orphans() {
        let rsvps = assemble_rsvps(vec![header(1, "Alex")], vec![child(1, 99, "Ghost")]);
        assert_eq!(rsvps.len(), 1);
        assert!(rsvps[0].children.is_empty());
    }

    #[test]
    fn test_metrics_wire_shape() {
        let metrics = Metrics {
            invited: 3,
            rsvps: 1,
            food_totals: vec![FoodTotal {
                label: "Pizza".to_string(),
                count: 0,
            }],
        };
        let json = serde_json::to_value(&metrics).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({
                "invited": 3,
                "rsvps": 1,
                "foodTotals": [{"label": "Pizza", "count": 0}]
            })
        );
    }

    #[test]
    fn test_import_summary_serializes_totals_only() {
        let mut summary = ImportSummary::default();
        summary.record_inserted();
        summary.record_missing_name();
        summary.record_duplicate();
        let json = serde_json::to_value(summary).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"inserted": 1, "skipped": 2}));
    }
}

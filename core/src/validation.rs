//! Input validation.
//!
//! Everything arriving from outside (the public form, admin forms) is
//! checked here before any store call. The form does its own checks, but
//! the server never relies on them.

use crate::error::{Result, RsvpError};
use crate::types::{EventSettings, FoodChoiceId, NewRsvp, NewRsvpChild};
use serde::Deserialize;

/// Knobs for RSVP validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RsvpPolicy {
    /// Reject submissions without a phone number.
    pub require_phone: bool,
}

/// RSVP as submitted by the public form.
///
/// Missing fields deserialize to empty values so that they are reported as
/// validation errors rather than decoder errors.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RsvpSubmission {
    /// Name the submitter typed
    pub invite_name_entered: String,
    /// Contact number
    pub phone: Option<String>,
    /// One entry per child
    pub children: Vec<ChildSubmission>,
}

/// One child entry of an [`RsvpSubmission`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChildSubmission {
    /// Child's name
    pub child_name: String,
    /// Chosen meal; the form sends either a number or a numeric string
    pub food_choice_id: Option<FoodChoiceIdInput>,
    /// Whether the child has dietary requirements
    pub has_dietary_requirements: bool,
    /// Dietary note, required when `has_dietary_requirements` is set
    pub dietary_requirements: Option<String>,
}

/// A food choice id as it arrives on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FoodChoiceIdInput {
    /// JSON number
    Number(i64),
    /// JSON string holding a number
    Text(String),
}

impl FoodChoiceIdInput {
    /// Parse into a positive id.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Validation` if the value is not a positive integer.
    pub fn parse(&self) -> Result<FoodChoiceId> {
        let raw = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| RsvpError::validation("Invalid child entries"))?,
        };
        if raw <= 0 {
            return Err(RsvpError::validation("Invalid child entries"));
        }
        Ok(FoodChoiceId::new(raw))
    }
}

impl From<i64> for FoodChoiceIdInput {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

/// Trim an optional string, mapping blank to `None`.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Validate a submission and produce the rows to write.
///
/// Only shape is checked here; whether each food choice exists is decided
/// by the store inside the write transaction.
///
/// # Errors
///
/// Returns `RsvpError::Validation` if:
/// - the entered name is blank
/// - the phone is blank while `policy.require_phone` is set
/// - there are no children
/// - any child has a blank name or a non-positive/unparseable food choice id
/// - any child flags dietary requirements without a note
pub fn validate_submission(submission: &RsvpSubmission, policy: RsvpPolicy) -> Result<NewRsvp> {
    let invite_name_entered = submission.invite_name_entered.trim();
    if invite_name_entered.is_empty() {
        return Err(RsvpError::validation("Missing required fields"));
    }

    let phone = non_blank(submission.phone.as_deref());
    if policy.require_phone && phone.is_none() {
        return Err(RsvpError::validation("Missing required fields"));
    }

    if submission.children.is_empty() {
        return Err(RsvpError::validation("At least one child is required"));
    }

    let children = submission
        .children
        .iter()
        .map(validate_child)
        .collect::<Result<Vec<_>>>()?;

    Ok(NewRsvp {
        invite_name_entered: invite_name_entered.to_string(),
        phone,
        children,
    })
}

fn validate_child(child: &ChildSubmission) -> Result<NewRsvpChild> {
    let child_name = child.child_name.trim();
    if child_name.is_empty() {
        return Err(RsvpError::validation("Invalid child entries"));
    }

    let food_choice_id = child
        .food_choice_id
        .as_ref()
        .ok_or_else(|| RsvpError::validation("Invalid child entries"))?
        .parse()?;

    let dietary_requirements = if child.has_dietary_requirements {
        Some(
            non_blank(child.dietary_requirements.as_deref()).ok_or_else(|| {
                RsvpError::validation("Dietary requirements must be described")
            })?,
        )
    } else {
        None
    };

    Ok(NewRsvpChild {
        child_name: child_name.to_string(),
        food_choice_id,
        dietary_requirements,
    })
}

/// Event settings as submitted by the admin form.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventSettingsInput {
    /// Event title
    pub title: String,
    /// Date text
    pub event_date: String,
    /// Time range text
    pub party_time: String,
    /// Intro paragraph
    pub intro_text: String,
    /// Venue
    pub location: String,
}

/// Validate an event settings update. Every field is required.
///
/// # Errors
///
/// Returns `RsvpError::Validation` if any field is blank.
pub fn validate_event_settings(input: &EventSettingsInput) -> Result<EventSettings> {
    let fields = [
        &input.title,
        &input.event_date,
        &input.party_time,
        &input.intro_text,
        &input.location,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(RsvpError::validation("Missing event details"));
    }

    Ok(EventSettings {
        title: input.title.trim().to_string(),
        event_date: input.event_date.trim().to_string(),
        party_time: input.party_time.trim().to_string(),
        intro_text: input.intro_text.trim().to_string(),
        location: input.location.trim().to_string(),
    })
}

/// Validate a food choice label.
///
/// # Errors
///
/// Returns `RsvpError::Validation` if the label is blank.
pub fn validate_food_label(label: &str) -> Result<String> {
    let label = label.trim();
    if label.is_empty() {
        return Err(RsvpError::validation("Label required"));
    }
    Ok(label.to_string())
}

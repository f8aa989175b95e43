//! Row structs: the only place store rows become domain types.

use chrono::{DateTime, Utc};
use party_rsvp_core::{
    ChildId, EventSettings, FoodChoice, FoodChoiceId, FoodTotal, Invite, InviteId, RsvpChild,
    RsvpHeader, RsvpId,
};

use crate::error::count;

#[derive(sqlx::FromRow)]
pub(crate) struct EventSettingsRow {
    title: String,
    event_date: String,
    party_time: String,
    intro_text: String,
    location: String,
}

impl From<EventSettingsRow> for EventSettings {
    fn from(row: EventSettingsRow) -> Self {
        Self {
            title: row.title,
            event_date: row.event_date,
            party_time: row.party_time,
            intro_text: row.intro_text,
            location: row.location,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct FoodChoiceRow {
    id: i64,
    label: String,
    active: bool,
}

impl FoodChoiceRow {
    pub(crate) const fn id(&self) -> i64 {
        self.id
    }
}

impl From<FoodChoiceRow> for FoodChoice {
    fn from(row: FoodChoiceRow) -> Self {
        Self {
            id: FoodChoiceId::new(row.id),
            label: row.label,
            active: row.active,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct InviteRow {
    id: i64,
    invite_name: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<InviteRow> for Invite {
    fn from(row: InviteRow) -> Self {
        Self {
            id: InviteId::new(row.id),
            invite_name: row.invite_name,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct RsvpRow {
    id: i64,
    invite_name_entered: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<RsvpRow> for RsvpHeader {
    fn from(row: RsvpRow) -> Self {
        Self {
            id: RsvpId::new(row.id),
            invite_name_entered: row.invite_name_entered,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct RsvpChildRow {
    id: i64,
    rsvp_id: i64,
    child_name: String,
    food_choice_id: i64,
    food_choice_label: String,
    has_dietary_requirements: bool,
    dietary_requirements: Option<String>,
}

impl From<RsvpChildRow> for RsvpChild {
    fn from(row: RsvpChildRow) -> Self {
        Self {
            id: ChildId::new(row.id),
            rsvp_id: RsvpId::new(row.rsvp_id),
            child_name: row.child_name,
            food_choice_id: FoodChoiceId::new(row.food_choice_id),
            food_choice_label: row.food_choice_label,
            has_dietary_requirements: row.has_dietary_requirements,
            dietary_requirements: row.dietary_requirements,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct FoodTotalRow {
    label: String,
    count: i64,
}

impl From<FoodTotalRow> for FoodTotal {
    fn from(row: FoodTotalRow) -> Self {
        Self {
            label: row.label,
            count: count(row.count),
        }
    }
}

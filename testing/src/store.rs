//! In-memory relational store.
//!
//! Provides the same observable behavior as the `PostgreSQL` store:
//! - [`InMemoryStore`] implements every core repository trait
//! - RSVP writes are all-or-nothing and check food choice references
//! - invite keys are unique, deletes of referenced food choices are blocked
//! - writes and reads can be made to fail on demand

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only happens after a test already panicked

use async_trait::async_trait;
use party_rsvp_core::environment::Clock;
use party_rsvp_core::providers::{
    EventSettingsRepository, FoodChoiceRepository, InviteRepository, MetricsRepository,
    RsvpRepository,
};
use party_rsvp_core::{
    ChildId, EventSettings, FoodChoice, FoodChoiceId, FoodTotal, InsertOutcome, Invite, InviteId,
    NewInvite, NewRsvp, Result, Rsvp, RsvpChild, RsvpError, RsvpHeader, RsvpId, assemble_rsvps,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::mocks::test_clock;

/// Event settings every fresh store starts with.
#[must_use]
pub fn default_event_settings() -> EventSettings {
    EventSettings {
        title: "Birthday Party".to_string(),
        event_date: "Saturday".to_string(),
        party_time: "2pm - 4pm".to_string(),
        intro_text: "Please let us know who is coming.".to_string(),
        location: "Community Hall".to_string(),
    }
}

#[derive(Debug, Clone)]
struct StoredInvite {
    invite: Invite,
    key: String,
}

#[derive(Debug, Clone)]
struct StoredChild {
    id: ChildId,
    rsvp_id: RsvpId,
    child_name: String,
    food_choice_id: FoodChoiceId,
    dietary_requirements: Option<String>,
}

#[derive(Debug, Default)]
struct Failures {
    /// Successful writes left before every write fails
    writes_remaining: Option<usize>,
    reads: bool,
}

#[derive(Debug)]
struct Tables {
    event: EventSettings,
    food_choices: BTreeMap<FoodChoiceId, FoodChoice>,
    invites: Vec<StoredInvite>,
    invite_keys: HashSet<String>,
    rsvps: Vec<RsvpHeader>,
    children: Vec<StoredChild>,
    next_id: i64,
    failures: Failures,
}

impl Tables {
    fn new() -> Self {
        Self {
            event: default_event_settings(),
            food_choices: BTreeMap::new(),
            invites: Vec::new(),
            invite_keys: HashSet::new(),
            rsvps: Vec::new(),
            children: Vec::new(),
            next_id: 0,
            failures: Failures::default(),
        }
    }

    const fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_write(&mut self) -> Result<()> {
        match self.failures.writes_remaining.as_mut() {
            Some(0) => Err(RsvpError::persistence("injected write failure")),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn check_read(&self) -> Result<()> {
        if self.failures.reads {
            return Err(RsvpError::persistence("injected read failure"));
        }
        Ok(())
    }

    fn child_row(&self, child: &StoredChild) -> RsvpChild {
        let label = self
            .food_choices
            .get(&child.food_choice_id)
            .map(|f| f.label.clone())
            .unwrap_or_default();
        RsvpChild {
            id: child.id,
            rsvp_id: child.rsvp_id,
            child_name: child.child_name.clone(),
            food_choice_id: child.food_choice_id,
            food_choice_label: label,
            has_dietary_requirements: child.dietary_requirements.is_some(),
            dietary_requirements: child.dietary_requirements.clone(),
        }
    }
}

/// In-memory store for fast, deterministic service and HTTP tests.
///
/// Ids come from a single counter shared by all tables, so they are unique
/// and increasing across the whole store.
///
/// # Example
///
/// ```
/// use party_rsvp_testing::InMemoryStore;
/// use party_rsvp_core::providers::FoodChoiceRepository;
///
/// # async fn example() -> party_rsvp_core::Result<()> {
/// let store = InMemoryStore::new();
/// store.create_food_choice("Pizza").await?;
///
/// let active = store.list_food_choices(true).await?;
/// assert_eq!(active.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store using [`test_clock`] for timestamps.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(test_clock()))
    }

    /// Create an empty store stamping rows with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::new())),
            clock,
        }
    }

    /// Create a store with one active food choice per label.
    #[must_use]
    pub fn with_food_choices(labels: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.write().unwrap();
            for label in labels {
                let id = FoodChoiceId::new(tables.next_id());
                tables.food_choices.insert(
                    id,
                    FoodChoice {
                        id,
                        label: (*label).to_string(),
                        active: true,
                    },
                );
            }
        }
        store
    }

    /// Id of the food choice with `label`, if any.
    #[must_use]
    pub fn food_choice_id(&self, label: &str) -> Option<FoodChoiceId> {
        self.tables
            .read()
            .unwrap()
            .food_choices
            .values()
            .find(|f| f.label == label)
            .map(|f| f.id)
    }

    /// Let `n` more writes succeed, then fail every write.
    pub fn fail_writes_after(&self, n: usize) {
        self.tables.write().unwrap().failures.writes_remaining = Some(n);
    }

    /// Fail every read.
    pub fn fail_reads(&self) {
        self.tables.write().unwrap().failures.reads = true;
    }

    /// Stop injecting failures.
    pub fn heal(&self) {
        self.tables.write().unwrap().failures = Failures::default();
    }

    /// Number of RSVP rows.
    #[must_use]
    pub fn rsvp_count(&self) -> usize {
        self.tables.read().unwrap().rsvps.len()
    }

    /// Number of RSVP child rows.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.tables.read().unwrap().children.len()
    }

    /// Number of invite rows.
    #[must_use]
    pub fn invite_count(&self) -> usize {
        self.tables.read().unwrap().invites.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("tables", &self.tables)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EventSettingsRepository for InMemoryStore {
    async fn get_event_settings(&self) -> Result<EventSettings> {
        let tables = self.tables.read().unwrap();
        tables.check_read()?;
        Ok(tables.event.clone())
    }

    async fn replace_event_settings(&self, settings: &EventSettings) -> Result<EventSettings> {
        let mut tables = self.tables.write().unwrap();
        tables.check_write()?;
        tables.event = settings.clone();
        Ok(tables.event.clone())
    }
}

#[async_trait]
impl FoodChoiceRepository for InMemoryStore {
    async fn list_food_choices(&self, active_only: bool) -> Result<Vec<FoodChoice>> {
        let tables = self.tables.read().unwrap();
        tables.check_read()?;
        Ok(tables
            .food_choices
            .values()
            .filter(|f| !active_only || f.active)
            .cloned()
            .collect())
    }

    async fn create_food_choice(&self, label: &str) -> Result<FoodChoice> {
        let mut tables = self.tables.write().unwrap();
        tables.check_write()?;
        let id = FoodChoiceId::new(tables.next_id());
        let choice = FoodChoice {
            id,
            label: label.to_string(),
            active: true,
        };
        tables.food_choices.insert(id, choice.clone());
        Ok(choice)
    }

    async fn update_food_choice(
        &self,
        id: FoodChoiceId,
        label: &str,
        active: bool,
    ) -> Result<FoodChoice> {
        let mut tables = self.tables.write().unwrap();
        tables.check_write()?;
        let choice = tables
            .food_choices
            .get_mut(&id)
            .ok_or_else(|| RsvpError::not_found("Food choice", id))?;
        choice.label = label.to_string();
        choice.active = active;
        Ok(choice.clone())
    }

    async fn delete_food_choice(&self, id: FoodChoiceId) -> Result<()> {
        let mut tables = self.tables.write().unwrap();
        tables.check_write()?;
        if !tables.food_choices.contains_key(&id) {
            return Err(RsvpError::not_found("Food choice", id));
        }
        if tables.children.iter().any(|c| c.food_choice_id == id) {
            return Err(RsvpError::still_referenced(
                "Food choice is used by existing RSVPs; deactivate it instead",
            ));
        }
        tables.food_choices.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl InviteRepository for InMemoryStore {
    async fn insert_invite_if_absent(&self, invite: &NewInvite) -> Result<InsertOutcome> {
        let mut tables = self.tables.write().unwrap();
        tables.check_write()?;
        if tables.invite_keys.contains(&invite.invite_key) {
            return Ok(InsertOutcome::AlreadyPresent);
        }
        let id = InviteId::new(tables.next_id());
        tables.invite_keys.insert(invite.invite_key.clone());
        tables.invites.push(StoredInvite {
            invite: Invite {
                id,
                invite_name: invite.invite_name.clone(),
                phone: invite.phone.clone(),
                created_at: self.clock.now(),
            },
            key: invite.invite_key.clone(),
        });
        Ok(InsertOutcome::Inserted)
    }

    async fn list_invites(&self) -> Result<Vec<Invite>> {
        let tables = self.tables.read().unwrap();
        tables.check_read()?;
        let mut invites: Vec<Invite> = tables.invites.iter().map(|s| s.invite.clone()).collect();
        invites.sort_by_key(|i| (i.created_at, i.id));
        Ok(invites)
    }
}

#[async_trait]
impl RsvpRepository for InMemoryStore {
    async fn create_rsvp(&self, rsvp: &NewRsvp) -> Result<Rsvp> {
        let mut tables = self.tables.write().unwrap();
        tables.check_write()?;

        // Every reference is checked before anything is written.
        if let Some(missing) = rsvp
            .children
            .iter()
            .find(|c| !tables.food_choices.contains_key(&c.food_choice_id))
        {
            return Err(RsvpError::unknown_food_choice(missing.food_choice_id));
        }

        let header = RsvpHeader {
            id: RsvpId::new(tables.next_id()),
            invite_name_entered: rsvp.invite_name_entered.clone(),
            phone: rsvp.phone.clone(),
            created_at: self.clock.now(),
        };
        let mut children = Vec::with_capacity(rsvp.children.len());
        for child in &rsvp.children {
            let stored = StoredChild {
                id: ChildId::new(tables.next_id()),
                rsvp_id: header.id,
                child_name: child.child_name.clone(),
                food_choice_id: child.food_choice_id,
                dietary_requirements: child.dietary_requirements.clone(),
            };
            children.push(tables.child_row(&stored));
            tables.children.push(stored);
        }
        tables.rsvps.push(header.clone());

        Ok(assemble_rsvps(vec![header], children)
            .into_iter()
            .next()
            .unwrap())
    }

    async fn list_rsvps(&self) -> Result<Vec<Rsvp>> {
        let tables = self.tables.read().unwrap();
        tables.check_read()?;
        let mut headers = tables.rsvps.clone();
        headers.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let children = tables.children.iter().map(|c| tables.child_row(c)).collect();
        Ok(assemble_rsvps(headers, children))
    }
}

#[async_trait]
impl MetricsRepository for InMemoryStore {
    async fn count_invites(&self) -> Result<u64> {
        let tables = self.tables.read().unwrap();
        tables.check_read()?;
        Ok(tables.invites.len() as u64)
    }

    async fn count_rsvps(&self) -> Result<u64> {
        let tables = self.tables.read().unwrap();
        tables.check_read()?;
        Ok(tables.rsvps.len() as u64)
    }

    async fn food_totals(&self) -> Result<Vec<FoodTotal>> {
        let tables = self.tables.read().unwrap();
        tables.check_read()?;
        Ok(tables
            .food_choices
            .values()
            .map(|food| FoodTotal {
                label: food.label.clone(),
                count: tables
                    .children
                    .iter()
                    .filter(|c| c.food_choice_id == food.id)
                    .count() as u64,
            })
            .collect())
    }
}

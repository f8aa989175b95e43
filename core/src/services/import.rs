//! Invite importer.

use crate::error::Result;
use crate::import::{ImportRow, parse_invite_rows};
use crate::matching::InviteNameMatching;
use crate::providers::InviteRepository;
use crate::types::{ImportSummary, InsertOutcome, NewInvite};
use std::sync::Arc;

/// Loads guest lists, skipping rows that are already present.
///
/// Importing the same file twice leaves the invite table unchanged the
/// second time. Rows are inserted one by one; a store failure part way
/// through keeps the rows already written.
#[derive(Clone)]
pub struct InviteImporter {
    invites: Arc<dyn InviteRepository>,
    matching: InviteNameMatching,
}

impl InviteImporter {
    /// Create an importer over `invites`.
    ///
    /// `matching` must stay the same for the life of a database: keys
    /// stored under one mode are not recomputed when it changes.
    #[must_use]
    pub fn new(invites: Arc<dyn InviteRepository>, matching: InviteNameMatching) -> Self {
        Self { invites, matching }
    }

    /// Matching mode in use.
    #[must_use]
    pub const fn matching(&self) -> InviteNameMatching {
        self.matching
    }

    /// Import an uploaded guest list.
    ///
    /// Every data row is counted exactly once, as inserted or skipped.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The header row is unreadable → `RsvpError::Validation`, nothing written
    /// - The store fails → `RsvpError::Persistence`; earlier rows stay written
    #[tracing::instrument(skip_all, fields(bytes = data.len(), matching = %self.matching))]
    pub async fn import(&self, data: &[u8]) -> Result<ImportSummary> {
        let rows = parse_invite_rows(data)?;
        let mut summary = ImportSummary::default();

        for row in rows {
            match row {
                ImportRow::Candidate { invite_name, phone } => {
                    let invite = NewInvite {
                        invite_key: self.matching.key(&invite_name),
                        invite_name,
                        phone,
                    };
                    match self.invites.insert_invite_if_absent(&invite).await? {
                        InsertOutcome::Inserted => summary.record_inserted(),
                        InsertOutcome::AlreadyPresent => {
                            tracing::debug!(invite_name = %invite.invite_name, "Skipping invite already on the list");
                            summary.record_duplicate();
                        }
                    }
                }
                ImportRow::MissingName { line } => {
                    tracing::debug!(line, "Skipping row without a name");
                    summary.record_missing_name();
                }
                ImportRow::Malformed { line, reason } => {
                    tracing::warn!(?line, %reason, "Skipping unreadable row");
                    summary.record_malformed();
                }
            }
        }

        tracing::info!(
            inserted = summary.inserted,
            skipped = summary.skipped,
            duplicates = summary.duplicates,
            missing_name = summary.missing_name,
            malformed = summary.malformed,
            "Invite import finished"
        );
        Ok(summary)
    }
}

impl std::fmt::Debug for InviteImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InviteImporter")
            .field("matching", &self.matching)
            .finish_non_exhaustive()
    }
}

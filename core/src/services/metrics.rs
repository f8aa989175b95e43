//! Metrics aggregator.

use crate::error::Result;
use crate::providers::MetricsRepository;
use crate::types::Metrics;
use std::sync::Arc;

/// Read-only dashboard numbers.
#[derive(Clone)]
pub struct MetricsAggregator {
    repo: Arc<dyn MetricsRepository>,
}

impl MetricsAggregator {
    /// Create an aggregator over `repo`.
    #[must_use]
    pub fn new(repo: Arc<dyn MetricsRepository>) -> Self {
        Self { repo }
    }

    /// Compute invite count, RSVP count and per-food child counts.
    ///
    /// The three queries run concurrently and are not taken from one
    /// snapshot; under concurrent writes the numbers may be a moment apart.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if any query fails.
    pub async fn compute(&self) -> Result<Metrics> {
        let (invited, rsvps, food_totals) = futures::try_join!(
            self.repo.count_invites(),
            self.repo.count_rsvps(),
            self.repo.food_totals(),
        )?;

        Ok(Metrics {
            invited,
            rsvps,
            food_totals,
        })
    }
}

impl std::fmt::Debug for MetricsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsAggregator").finish_non_exhaustive()
    }
}

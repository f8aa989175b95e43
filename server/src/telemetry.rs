//! Business metrics for the party RSVP server.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `party_rsvp_submissions_total{outcome}` - RSVP submissions by outcome
//! - `party_rsvp_children_total` - Children recorded by accepted RSVPs
//! - `party_rsvp_invites_imported_total{result}` - Import rows by result
//! - `party_rsvp_admin_logins_total{outcome}` - Admin logins by outcome
//! - `party_rsvp_store_errors_total{operation}` - Store failures (recorded by the Postgres store)

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use party_rsvp_core::{ImportSummary, RsvpError};

/// Register all business metric descriptions.
pub fn register_business_metrics() {
    describe_counter!(
        "party_rsvp_submissions_total",
        "RSVP submissions by outcome (accepted, rejected, failed)"
    );
    describe_counter!(
        "party_rsvp_children_total",
        "Children recorded by accepted RSVPs"
    );
    describe_counter!(
        "party_rsvp_invites_imported_total",
        "Guest list rows by result (inserted, missing_name, duplicate, malformed)"
    );
    describe_counter!(
        "party_rsvp_admin_logins_total",
        "Admin login attempts by outcome (success, rejected, failed)"
    );
    describe_counter!(
        "party_rsvp_store_errors_total",
        "Store operations that failed, by operation"
    );

    tracing::info!("Business metrics registered");
}

/// Install the Prometheus recorder and register descriptions.
///
/// # Errors
///
/// Returns the exporter's error if a recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_business_metrics();
    Ok(handle)
}

/// Record an accepted RSVP with `children` children.
pub fn record_submission_accepted(children: usize) {
    metrics::counter!("party_rsvp_submissions_total", "outcome" => "accepted").increment(1);
    metrics::counter!("party_rsvp_children_total")
        .increment(u64::try_from(children).unwrap_or(u64::MAX));
}

/// Record a submission that did not produce an RSVP.
pub fn record_submission_error(err: &RsvpError) {
    let outcome = if err.is_caller_error() { "rejected" } else { "failed" };
    metrics::counter!("party_rsvp_submissions_total", "outcome" => outcome).increment(1);
}

/// Record the rows of a completed import.
pub fn record_import(summary: &ImportSummary) {
    for (result, count) in [
        ("inserted", summary.inserted),
        ("missing_name", summary.missing_name),
        ("duplicate", summary.duplicates),
        ("malformed", summary.malformed),
    ] {
        if count > 0 {
            metrics::counter!("party_rsvp_invites_imported_total", "result" => result)
                .increment(count);
        }
    }
}

/// Record an admin login attempt.
pub fn record_login(outcome: &'static str) {
    metrics::counter!("party_rsvp_admin_logins_total", "outcome" => outcome).increment(1);
}

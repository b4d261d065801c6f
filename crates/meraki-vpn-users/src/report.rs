//! Run summary and generated-password disclosure.

use meraki_vpn_types::{Action, BatchSummary, OperationResult};
use tracing::info;

use crate::error::Result;
use crate::interaction::{Credential, InputSource, OutputSink};
use crate::workflow::Batch;

/// What a finished run looks like to the operator
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub action: Action,
    pub results: Vec<OperationResult>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn new(action: Action, results: Vec<OperationResult>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self {
            action,
            results,
            summary,
        }
    }

    /// One-line summary, e.g. "3 users created, 1 failed"
    pub fn headline(&self) -> String {
        format!(
            "{} users {}, {} failed",
            self.summary.succeeded,
            self.action.past_tense(),
            self.summary.failed
        )
    }
}

#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Self
    }

    /// Render the report and its headline, then offer to display generated
    /// passwords
    pub fn report(
        &self,
        batch: &Batch,
        results: &[OperationResult],
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<BatchSummary> {
        let report = BatchReport::new(batch.action, results.to_vec());
        info!(
            succeeded = report.summary.succeeded,
            failed = report.summary.failed,
            "run complete"
        );
        output.render_report(&report);
        if report.summary.failed > 0 {
            output.warn(&report.headline());
        } else if !report.results.is_empty() {
            output.success(&report.headline());
        }

        let credentials = generated_credentials(batch, results);
        if !credentials.is_empty() && input.confirm("Show auto-generated passwords?", false)? {
            output.render_credentials(&credentials);
        }

        Ok(report.summary)
    }
}

/// Generated passwords of records that were created on at least one network
fn generated_credentials(batch: &Batch, results: &[OperationResult]) -> Vec<Credential> {
    if batch.action != Action::Provision {
        return Vec::new();
    }

    batch
        .valid_records()
        .filter(|record| record.password_generated)
        .filter(|record| {
            results
                .iter()
                .any(|r| r.is_success() && r.user.email == record.email)
        })
        .map(|record| Credential {
            name: record.name.clone(),
            email: record.email.clone(),
            password: record.password.clone(),
        })
        .collect()
}

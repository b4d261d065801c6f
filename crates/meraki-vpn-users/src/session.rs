//! One interactive run, from collection to report.

use std::fmt;

use meraki_vpn_dashboard::DashboardApi;
use meraki_vpn_types::{BatchSummary, OperationResult, Organization};
use tracing::info;
use uuid::Uuid;

use crate::collector::InputCollector;
use crate::config::WorkflowConfig;
use crate::error::Result;
use crate::interaction::{InputSource, OutputSink};
use crate::report::Reporter;
use crate::validator::RecordValidator;
use crate::workflow::{Batch, ProvisioningWorkflow};

/// Phases of a run. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Collecting,
    Validating,
    Executing,
    Reporting,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Collecting => "collecting",
            Phase::Validating => "validating",
            Phase::Executing => "executing",
            Phase::Reporting => "reporting",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub results: Vec<OperationResult>,
    pub summary: BatchSummary,
}

pub struct ProvisioningSession<'a, A: DashboardApi + ?Sized> {
    api: &'a A,
    config: WorkflowConfig,
    phase: Phase,
    run_id: Uuid,
}

impl<'a, A: DashboardApi + ?Sized> ProvisioningSession<'a, A> {
    pub fn new(api: &'a A, config: WorkflowConfig) -> Self {
        Self {
            api,
            config,
            phase: Phase::Collecting,
            run_id: Uuid::new_v4(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drive a complete run. Errors before execution abort the run; per-pair
    /// failures only show up in the outcome.
    pub async fn run(
        &mut self,
        organizations: Vec<Organization>,
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<RunOutcome> {
        info!(run_id = %self.run_id, phase = %self.phase, "session started");

        let plan = InputCollector::new(self.api, &self.config)
            .collect(organizations, input, output)
            .await?;

        self.advance(Phase::Validating);
        let batch = Batch::validate(plan, &RecordValidator::new(), output);

        self.advance(Phase::Executing);
        let workflow = ProvisioningWorkflow::new(self.api, self.config.clone());
        let results = workflow.execute(&batch, output).await;

        self.advance(Phase::Reporting);
        let summary = Reporter::new().report(&batch, &results, input, output)?;

        self.advance(Phase::Done);
        Ok(RunOutcome { results, summary })
    }

    fn advance(&mut self, next: Phase) {
        if next <= self.phase {
            return;
        }
        info!(run_id = %self.run_id, from = %self.phase, to = %next, "phase transition");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_are_ordered() {
        assert!(Phase::Collecting < Phase::Validating);
        assert!(Phase::Validating < Phase::Executing);
        assert!(Phase::Executing < Phase::Reporting);
        assert!(Phase::Reporting < Phase::Done);
        assert_eq!(Phase::Executing.to_string(), "executing");
    }
}

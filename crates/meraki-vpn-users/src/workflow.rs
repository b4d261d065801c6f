//! The provisioning/deauthorization orchestrator.
//!
//! Pairs are processed networks-outer, records-inner, in selection and input
//! order respectively. Every call is awaited before the next is issued, and a
//! failing pair never stops the ones after it.

use meraki_vpn_dashboard::{AuthUser, CreateAuthUserRequest, DashboardApi, DashboardError};
use meraki_vpn_types::{Action, FailureReason, Network, OperationResult, Outcome, VpnUserRecord};
use tracing::{debug, info};

use crate::collector::RunPlan;
use crate::config::WorkflowConfig;
use crate::interaction::OutputSink;
use crate::validator::{RecordValidator, ValidationIssue};

/// A record after validation
#[derive(Debug, Clone)]
pub enum BatchEntry {
    Valid(VpnUserRecord),
    Rejected(VpnUserRecord, ValidationIssue),
}

impl BatchEntry {
    pub fn record(&self) -> &VpnUserRecord {
        match self {
            BatchEntry::Valid(record) | BatchEntry::Rejected(record, _) => record,
        }
    }
}

/// Everything the orchestrator needs for one run
#[derive(Debug, Clone)]
pub struct Batch {
    pub action: Action,
    pub organization_id: String,
    pub networks: Vec<Network>,
    pub entries: Vec<BatchEntry>,
}

impl Batch {
    /// Validate every record of a plan, warning once per rejected record
    pub fn validate(plan: RunPlan, validator: &RecordValidator, output: &mut dyn OutputSink) -> Self {
        let action = plan.action;
        let entries = plan
            .records
            .into_iter()
            .map(|record| match validator.validate(&record, action) {
                Ok(()) => BatchEntry::Valid(record),
                Err(issue) => {
                    let message = format!("Rejected {}: {}", record.display_name(), issue);
                    debug!("{}", message);
                    output.warn(&message);
                    BatchEntry::Rejected(record, issue)
                }
            })
            .collect();

        Self {
            action,
            organization_id: plan.organization.id,
            networks: plan.networks,
            entries,
        }
    }

    /// Number of (record, network) pairs the batch will report on
    pub fn pair_count(&self) -> usize {
        self.networks
            .iter()
            .map(|network| {
                self.entries
                    .iter()
                    .filter(|entry| entry.record().applies_to(network))
                    .count()
            })
            .sum()
    }

    pub fn valid_records(&self) -> impl Iterator<Item = &VpnUserRecord> {
        self.entries.iter().filter_map(|entry| match entry {
            BatchEntry::Valid(record) => Some(record),
            BatchEntry::Rejected(..) => None,
        })
    }
}

pub struct ProvisioningWorkflow<'a, A: DashboardApi + ?Sized> {
    api: &'a A,
    config: WorkflowConfig,
}

impl<'a, A: DashboardApi + ?Sized> ProvisioningWorkflow<'a, A> {
    pub fn new(api: &'a A, config: WorkflowConfig) -> Self {
        Self { api, config }
    }

    /// Produce one result per (record, network) pair in scope. Rejected
    /// records are reported as validation failures without a remote call.
    pub async fn execute(&self, batch: &Batch, output: &mut dyn OutputSink) -> Vec<OperationResult> {
        let mut results = Vec::with_capacity(batch.pair_count());

        info!(
            action = %batch.action,
            organization_id = %batch.organization_id,
            networks = batch.networks.len(),
            records = batch.entries.len(),
            "starting batch"
        );
        output.begin_batch(batch.pair_count());

        for network in &batch.networks {
            let mut directory = NetworkDirectory::Unloaded;

            for entry in batch.entries.iter().filter(|e| e.record().applies_to(network)) {
                let outcome = match entry {
                    BatchEntry::Rejected(..) => Outcome::Failure(FailureReason::Validation),
                    BatchEntry::Valid(record) => match batch.action {
                        Action::Provision => self.provision(network, record).await,
                        Action::Deauthorize => self.deauthorize(network, record, &mut directory).await,
                    },
                };

                let result = OperationResult::new(entry.record(), network, outcome);
                match result.reason() {
                    None => debug!(network = %network.name, email = %result.user.email, "pair succeeded"),
                    Some(reason) => debug!(
                        network = %network.name,
                        email = %result.user.email,
                        %reason,
                        "pair failed"
                    ),
                }
                output.record_result(&result);
                results.push(result);
            }
        }

        output.finish_batch();
        results
    }

    async fn provision(&self, network: &Network, record: &VpnUserRecord) -> Outcome {
        let request = CreateAuthUserRequest::client_vpn(
            &record.name,
            &record.email,
            &record.password,
            network.appliance_zone(),
            self.config.email_password_to_user,
        );

        match self.api.create_auth_user(&network.id, &request).await {
            Ok(user) => {
                debug!(user_id = %user.id, network_id = %network.id, "created auth user");
                Outcome::Success
            }
            Err(e) => Outcome::Failure(e.classify(Action::Provision)),
        }
    }

    async fn deauthorize(
        &self,
        network: &Network,
        record: &VpnUserRecord,
        directory: &mut NetworkDirectory,
    ) -> Outcome {
        if let NetworkDirectory::Unloaded = directory {
            *directory = match self.api.list_auth_users(&network.id).await {
                Ok(users) => NetworkDirectory::Loaded(users),
                Err(e) => NetworkDirectory::Failed(e),
            };
        }

        let user = match &*directory {
            NetworkDirectory::Loaded(users) => users.iter().find(|u| u.has_email(&record.email)),
            NetworkDirectory::Failed(e) => return Outcome::Failure(listing_failure(e)),
            NetworkDirectory::Unloaded => None,
        };

        let Some(user) = user else {
            return Outcome::Failure(FailureReason::UserNotFound);
        };

        match self.api.revoke_authorization(&network.id, &user.id).await {
            Ok(()) => Outcome::Success,
            Err(e) => Outcome::Failure(e.classify(Action::Deauthorize)),
        }
    }
}

/// A failed user listing is about the network, not the user
fn listing_failure(error: &DashboardError) -> FailureReason {
    match error.classify(Action::Deauthorize) {
        FailureReason::UserNotFound => FailureReason::NetworkNotFound,
        other => other,
    }
}

/// Meraki Auth users of the network being processed, fetched on first use
enum NetworkDirectory {
    Unloaded,
    Loaded(Vec<AuthUser>),
    Failed(DashboardError),
}

//! Per-pair outcomes of a provisioning run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::organization::Network;
use crate::user::VpnUserRecord;

/// Why a (record, network) pair failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// Record was rejected before any remote call
    Validation,
    /// The user already exists on the network
    AlreadyExists,
    /// The user has no account on the network
    UserNotFound,
    /// The network does not exist or is not visible to the key
    NetworkNotFound,
    /// Client VPN is not enabled on the network
    ClientVpnDisabled,
    /// Any other error reported by the dashboard
    Remote(String),
    /// The request never produced a usable dashboard answer
    Transport(String),
}

impl FailureReason {
    /// Failures that are informational rather than real problems
    pub fn is_warning(&self) -> bool {
        matches!(self, FailureReason::AlreadyExists)
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Validation => f.write_str("validation error"),
            FailureReason::AlreadyExists => f.write_str("user already exists"),
            FailureReason::UserNotFound => f.write_str("user not found"),
            FailureReason::NetworkNotFound => f.write_str("network not found"),
            FailureReason::ClientVpnDisabled => f.write_str("VPN not enabled"),
            FailureReason::Remote(message) => f.write_str(message),
            FailureReason::Transport(message) => write!(f, "request failed: {}", message),
        }
    }
}

/// Outcome of one remote operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure(FailureReason),
}

/// The user half of a result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub name: String,
    pub email: String,
}

impl From<&VpnUserRecord> for UserRef {
    fn from(record: &VpnUserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

/// The network half of a result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRef {
    pub id: String,
    pub name: String,
}

impl From<&Network> for NetworkRef {
    fn from(network: &Network) -> Self {
        Self {
            id: network.id.clone(),
            name: network.name.clone(),
        }
    }
}

/// Result of processing one (record, network) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub user: UserRef,
    pub network: NetworkRef,
    pub outcome: Outcome,
    pub completed_at: DateTime<Utc>,
}

impl OperationResult {
    pub fn new(record: &VpnUserRecord, network: &Network, outcome: Outcome) -> Self {
        Self {
            user: record.into(),
            network: network.into(),
            outcome,
            completed_at: Utc::now(),
        }
    }

    pub fn success(record: &VpnUserRecord, network: &Network) -> Self {
        Self::new(record, network, Outcome::Success)
    }

    pub fn failure(record: &VpnUserRecord, network: &Network, reason: FailureReason) -> Self {
        Self::new(record, network, Outcome::Failure(reason))
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    pub fn reason(&self) -> Option<&FailureReason> {
        match &self.outcome {
            Outcome::Success => None,
            Outcome::Failure(reason) => Some(reason),
        }
    }
}

/// Aggregate counts over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Failures that only warrant a warning (already existing users)
    pub warnings: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[OperationResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            match result.reason() {
                None => summary.succeeded += 1,
                Some(reason) => {
                    summary.failed += 1;
                    if reason.is_warning() {
                        summary.warnings += 1;
                    }
                }
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

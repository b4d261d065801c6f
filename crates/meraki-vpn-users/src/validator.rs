use std::collections::HashSet;
use std::fmt;

use meraki_vpn_types::{require_non_empty, Action, CommonError, EmailValidator, VpnUserRecord};

/// Why a record was kept out of the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &'static str, error: CommonError) -> Self {
        let CommonError::Validation(message) = error;
        Self { field, message }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks records before any remote call is made
#[derive(Default)]
pub struct RecordValidator {
    email: EmailValidator,
}

impl RecordValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self, record: &VpnUserRecord, action: Action) -> Result<(), ValidationIssue> {
        if action == Action::Provision {
            require_non_empty("Name", &record.name).map_err(|e| ValidationIssue::new("name", e))?;
        }

        self.email
            .validate(record.email.trim())
            .map_err(|e| ValidationIssue::new("email", e))?;

        if action == Action::Provision {
            require_non_empty("Password", &record.password)
                .map_err(|e| ValidationIssue::new("password", e))?;
        }

        Ok(())
    }
}

/// Drop records whose email was already seen in this run, keeping the first.
/// Returns the kept records and one warning per dropped duplicate.
pub fn dedupe_by_email(records: Vec<VpnUserRecord>) -> (Vec<VpnUserRecord>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    let kept = records
        .into_iter()
        .filter(|record| {
            let key = record.identity_key();
            if key.is_empty() || seen.insert(key) {
                true
            } else {
                warnings.push(format!("Skipping duplicate entry for {}", record.email.trim()));
                false
            }
        })
        .collect();

    (kept, warnings)
}

use meraki_vpn_types::{Action, FailureReason};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("API key cannot be empty")]
    MissingApiKey,

    #[error("API key contains characters that cannot be sent in a header")]
    InvalidApiKey,

    #[error("API key rejected by the dashboard (HTTP {0})")]
    Unauthorized(u16),

    #[error("Dashboard API error (HTTP {status}): {}", .errors.join("; "))]
    Api {
        status: u16,
        errors: Vec<String>,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    /// HTTP status reported by the dashboard, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::Unauthorized(status) => Some(*status),
            DashboardError::Api { status, .. } => Some(*status),
            DashboardError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The key was refused, as opposed to a failing request
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            DashboardError::Unauthorized(_) | DashboardError::MissingApiKey | DashboardError::InvalidApiKey
        )
    }

    /// Map a failed call onto the reason recorded for its (record, network)
    /// pair. `action` decides what a not-found answer refers to.
    pub fn classify(&self, action: Action) -> FailureReason {
        let DashboardError::Api { status, errors } = self else {
            return FailureReason::Transport(self.to_string());
        };

        let lowered: Vec<String> = errors.iter().map(|e| e.to_lowercase()).collect();
        let mentions = |needle: &str| lowered.iter().any(|e| e.contains(needle));

        if mentions("already exists") || mentions("has already been taken") {
            return FailureReason::AlreadyExists;
        }

        if lowered.iter().any(|e| is_client_vpn_disabled(e)) {
            return FailureReason::ClientVpnDisabled;
        }

        if *status == 404 || mentions("not found") {
            return match action {
                Action::Provision => FailureReason::NetworkNotFound,
                Action::Deauthorize => FailureReason::UserNotFound,
            };
        }

        match errors.first() {
            Some(message) => FailureReason::Remote(message.clone()),
            None => FailureReason::Remote(format!("dashboard returned HTTP {}", status)),
        }
    }
}

fn is_client_vpn_disabled(message: &str) -> bool {
    let mentions_vpn = message.contains("vpn");
    let disabled = message.contains("not enabled")
        || message.contains("disabled")
        || message.contains("must be enabled")
        || message.contains("is not configured");
    mentions_vpn && disabled
}

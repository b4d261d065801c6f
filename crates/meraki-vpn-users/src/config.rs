use serde::{Deserialize, Serialize};

/// Switches that shape a provisioning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Ask the dashboard to include the password in the notification email.
    /// Users are notified about the new Client VPN network either way.
    pub email_password_to_user: bool,
    /// Only offer networks that have an active security appliance (MX)
    pub filter_only_mx_networks: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            email_password_to_user: true,
            filter_only_mx_networks: true,
        }
    }
}

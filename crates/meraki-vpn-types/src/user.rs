//! User record types shared across crates

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::organization::Network;

/// What a run does to each (record, network) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create a Client VPN user on the network
    Provision,
    /// Revoke the user's Client VPN authorization on the network
    Deauthorize,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Provision => "provision",
            Action::Deauthorize => "deauthorize",
        }
    }

    /// Past-tense verb used in summaries
    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::Provision => "created",
            Action::Deauthorize => "deauthorized",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One VPN user as entered by the operator or read from CSV
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnUserRecord {
    /// Display name (ignored when deauthorizing)
    pub name: String,
    /// Email address, the identity of the record within a run
    pub email: String,
    /// Client VPN password (ignored when deauthorizing)
    pub password: String,
    /// True when the password was generated rather than entered
    pub password_generated: bool,
    /// Network IDs or names this record is limited to; empty means all
    pub networks: Vec<String>,
}

impl VpnUserRecord {
    pub fn provision(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            password_generated: false,
            networks: Vec::new(),
        }
    }

    pub fn deauthorize(email: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            email: email.into(),
            password: String::new(),
            password_generated: false,
            networks: Vec::new(),
        }
    }

    pub fn with_generated_password(mut self, password: String) -> Self {
        self.password = password;
        self.password_generated = true;
        self
    }

    pub fn with_networks(mut self, networks: Vec<String>) -> Self {
        self.networks = networks;
        self
    }

    /// Check whether the record targets the given network
    pub fn applies_to(&self, network: &Network) -> bool {
        self.networks.is_empty() || self.networks.iter().any(|marker| network.matches_marker(marker))
    }

    /// Name if present, otherwise the email
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// Case-insensitive key used for per-run uniqueness
    pub fn identity_key(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

impl fmt::Debug for VpnUserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VpnUserRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("password_generated", &self.password_generated)
            .field("networks", &self.networks)
            .finish()
    }
}

//! Dashboard inventory types: organizations, networks and devices

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Model prefix marking a security appliance
const SECURITY_APPLIANCE_MARKER: &str = "MX";

/// A Meraki organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID
    pub id: String,
    /// Organization name
    pub name: String,
}

/// A network inside an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Network ID
    pub id: String,
    /// Network name
    pub name: String,
    /// Owning organization ID
    #[serde(default)]
    pub organization_id: String,
    /// Whether an active security appliance is assigned to this network.
    /// Not part of the dashboard payload; derived from the device inventory.
    #[serde(default, skip_serializing)]
    pub has_security_appliance: bool,
}

impl Network {
    pub fn new(id: impl Into<String>, name: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            organization_id: organization_id.into(),
            has_security_appliance: false,
        }
    }

    pub fn with_security_appliance(mut self, present: bool) -> Self {
        self.has_security_appliance = present;
        self
    }

    /// Name of the appliance zone used in Client VPN authorizations
    pub fn appliance_zone(&self) -> String {
        format!("{} - appliance", self.name)
    }

    /// Match a scope marker against this network's ID or name
    pub fn matches_marker(&self, marker: &str) -> bool {
        self.id == marker || self.name.eq_ignore_ascii_case(marker)
    }
}

/// A device from the organization inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Device serial number
    pub serial: String,
    /// Hardware model, e.g. `MX68`
    #[serde(default)]
    pub model: String,
    /// Network the device is assigned to, if any
    #[serde(default)]
    pub network_id: Option<String>,
    /// Device name
    #[serde(default)]
    pub name: Option<String>,
}

impl Device {
    /// Check if the device is a security appliance (MX)
    pub fn is_security_appliance(&self) -> bool {
        self.model.to_ascii_uppercase().contains(SECURITY_APPLIANCE_MARKER)
    }
}

/// Flag each network that has a security appliance assigned, optionally
/// drop the rest, and sort the outcome by network name.
pub fn mark_security_appliances(
    networks: Vec<Network>,
    devices: &[Device],
    only_with_appliance: bool,
) -> Vec<Network> {
    let appliance_networks: HashSet<&str> = devices
        .iter()
        .filter(|device| device.is_security_appliance())
        .filter_map(|device| device.network_id.as_deref())
        .collect();

    let mut networks: Vec<Network> = networks
        .into_iter()
        .map(|network| {
            let present = appliance_networks.contains(network.id.as_str());
            network.with_security_appliance(present)
        })
        .filter(|network| !only_with_appliance || network.has_security_appliance)
        .collect();

    networks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    networks
}

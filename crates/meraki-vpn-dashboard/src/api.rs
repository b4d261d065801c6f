use async_trait::async_trait;
use meraki_vpn_types::{Device, Network, Organization};

use crate::error::Result;
use crate::models::{AuthUser, CreateAuthUserRequest};

/// The slice of the Dashboard API used by the provisioning workflow.
///
/// Implementations must issue exactly one logical request per call and must
/// not retry; failure attribution is per (record, network) pair.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// List organizations visible to the API key
    async fn list_organizations(&self) -> Result<Vec<Organization>>;

    /// List every network of an organization
    async fn list_networks(&self, organization_id: &str) -> Result<Vec<Network>>;

    /// List the organization-wide device inventory
    async fn list_devices(&self, organization_id: &str) -> Result<Vec<Device>>;

    /// Create a Meraki Auth user on a network
    async fn create_auth_user(
        &self,
        network_id: &str,
        request: &CreateAuthUserRequest,
    ) -> Result<AuthUser>;

    /// List the Meraki Auth users of a network
    async fn list_auth_users(&self, network_id: &str) -> Result<Vec<AuthUser>>;

    /// Revoke a Client VPN user's authorization on a network. The account
    /// itself is left in place.
    async fn revoke_authorization(&self, network_id: &str, auth_user_id: &str) -> Result<()>;
}

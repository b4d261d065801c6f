use serde::{Deserialize, Serialize};

/// Account type for Client VPN users
pub const CLIENT_VPN_ACCOUNT_TYPE: &str = "Client VPN";

/// Authorizations created by this tool never expire
const NEVER_EXPIRES: &str = "Never";

/// Body of `POST /networks/{networkId}/merakiAuthUsers`
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub account_type: String,
    pub email_password_to_user: bool,
    pub authorizations: Vec<Authorization>,
}

impl CreateAuthUserRequest {
    /// Build a Client VPN user authorized on the given appliance zone
    pub fn client_vpn(
        name: &str,
        email: &str,
        password: &str,
        authorized_zone: String,
        email_password_to_user: bool,
    ) -> Self {
        Self {
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            password: password.to_string(),
            account_type: CLIENT_VPN_ACCOUNT_TYPE.to_string(),
            email_password_to_user,
            authorizations: vec![Authorization {
                ssid_number: 0,
                authorized_zone,
                expires_at: NEVER_EXPIRES.to_string(),
            }],
        }
    }
}

impl std::fmt::Debug for CreateAuthUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateAuthUserRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("account_type", &self.account_type)
            .field("email_password_to_user", &self.email_password_to_user)
            .field("authorizations", &self.authorizations)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub ssid_number: u8,
    pub authorized_zone: String,
    pub expires_at: String,
}

/// A Meraki Auth user as returned by the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
}

impl AuthUser {
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

/// Error envelope returned by the dashboard
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}

use std::time::Duration;

use async_trait::async_trait;
use meraki_vpn_types::{Device, Network, Organization};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::DashboardApi;
use crate::error::{DashboardError, Result};
use crate::models::{ApiErrorBody, AuthUser, CreateAuthUserRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";

const USER_AGENT: &str = concat!("MerakiClientVpnProvisioning/", env!("CARGO_PKG_VERSION"));

/// Largest page size accepted by the inventory endpoints
const PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// `reqwest` implementation of [`DashboardApi`]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(api_key: &str, options: ClientOptions) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(DashboardError::MissingApiKey);
        }

        let base_url = options.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DashboardError::Configuration(format!(
                "base URL must start with http:// or https://, got '{}'",
                options.base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| DashboardError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Follow `Link: <...>; rel=next` headers until the listing is exhausted
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(self.url(path));

        while let Some(url) = next.take() {
            debug!(%url, "GET");
            let response = Self::check(self.http.get(&url).send().await?).await?;
            next = next_page(response.headers());
            let page: Vec<T> = Self::decode(response).await?;
            items.extend(page);
        }

        Ok(items)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DashboardError::Unauthorized(status.as_u16()));
        }

        let body = response.text().await.unwrap_or_default();
        let errors = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) if !parsed.errors.is_empty() => parsed.errors,
            _ if !body.trim().is_empty() => vec![body.trim().to_string()],
            _ => vec![status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()],
        };

        debug!(status = status.as_u16(), ?errors, "dashboard returned an error");
        Err(DashboardError::Api {
            status: status.as_u16(),
            errors,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| DashboardError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let organizations: Vec<Organization> = self.get_all("/organizations").await?;
        debug!(count = organizations.len(), "retrieved organizations");
        Ok(organizations)
    }

    async fn list_networks(&self, organization_id: &str) -> Result<Vec<Network>> {
        let path = format!("/organizations/{}/networks?perPage={}", organization_id, PAGE_SIZE);
        let networks: Vec<Network> = self.get_all(&path).await?;
        debug!(organization_id, count = networks.len(), "retrieved networks");
        Ok(networks)
    }

    async fn list_devices(&self, organization_id: &str) -> Result<Vec<Device>> {
        let path = format!("/organizations/{}/devices?perPage={}", organization_id, PAGE_SIZE);
        let devices: Vec<Device> = self.get_all(&path).await?;
        debug!(organization_id, count = devices.len(), "retrieved devices");
        Ok(devices)
    }

    async fn create_auth_user(
        &self,
        network_id: &str,
        request: &CreateAuthUserRequest,
    ) -> Result<AuthUser> {
        let url = self.url(&format!("/networks/{}/merakiAuthUsers", network_id));
        debug!(%url, email = %request.email, "POST");
        let response = self.http.post(&url).json(request).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn list_auth_users(&self, network_id: &str) -> Result<Vec<AuthUser>> {
        self.get_all(&format!("/networks/{}/merakiAuthUsers", network_id))
            .await
    }

    async fn revoke_authorization(&self, network_id: &str, auth_user_id: &str) -> Result<()> {
        let url = self.url(&format!(
            "/networks/{}/merakiAuthUsers/{}",
            network_id, auth_user_id
        ));
        debug!(%url, "DELETE");
        Self::check(self.http.delete(&url).send().await?).await?;
        Ok(())
    }
}

/// Extract the `rel=next` target from a `Link` header
fn next_page(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| {
            let param = param.trim().replace('"', "");
            param.eq_ignore_ascii_case("rel=next")
        });
        if is_next && target.starts_with('<') && target.ends_with('>') {
            Some(target[1..target.len() - 1].to_string())
        } else {
            None
        }
    })
}

//! Recording dashboard fake and scripted terminal used by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use meraki_vpn_dashboard::{AuthUser, CreateAuthUserRequest, DashboardApi, DashboardError};
use meraki_vpn_types::{Device, Network, OperationResult, Organization};
use meraki_vpn_users::{BatchReport, Credential, InputSource, OutputSink, UserError};

/// A remote call as seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListOrganizations,
    ListNetworks(String),
    ListDevices(String),
    CreateAuthUser {
        network_id: String,
        email: String,
        email_password_to_user: bool,
    },
    ListAuthUsers(String),
    RevokeAuthorization { network_id: String, auth_user_id: String },
}

/// In-memory dashboard that records every call
#[derive(Default)]
pub struct FakeDashboard {
    pub organizations: Vec<Organization>,
    pub networks: Vec<Network>,
    pub devices: Vec<Device>,
    /// Network IDs where Client VPN is switched off
    pub vpn_disabled: HashSet<String>,
    /// Existing auth users per network ID
    pub auth_users: HashMap<String, Vec<AuthUser>>,
    /// Emails whose create calls never get a usable answer
    pub unreachable_emails: HashSet<String>,
    /// The key may list networks but not the device inventory
    pub devices_denied: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organizations(mut self, names: &[&str]) -> Self {
        self.organizations = names
            .iter()
            .enumerate()
            .map(|(i, name)| Organization {
                id: format!("{}", i + 1),
                name: name.to_string(),
            })
            .collect();
        self
    }

    /// Add a network; `model` is the device assigned to it, if any
    pub fn with_network(mut self, id: &str, name: &str, model: Option<&str>) -> Self {
        self.networks.push(Network::new(id, name, "1"));
        if let Some(model) = model {
            self.devices.push(Device {
                serial: format!("Q2XX-{}", id),
                model: model.to_string(),
                network_id: Some(id.to_string()),
                name: None,
            });
        }
        self
    }

    pub fn with_vpn_disabled(mut self, network_id: &str) -> Self {
        self.vpn_disabled.insert(network_id.to_string());
        self
    }

    pub fn with_auth_user(mut self, network_id: &str, user_id: &str, email: &str) -> Self {
        self.auth_users
            .entry(network_id.to_string())
            .or_default()
            .push(AuthUser {
                id: user_id.to_string(),
                email: email.to_string(),
                name: None,
                account_type: Some("Client VPN".to_string()),
            });
        self
    }

    pub fn with_unreachable_email(mut self, email: &str) -> Self {
        self.unreachable_emails.insert(email.to_string());
        self
    }

    pub fn with_device_listing_denied(mut self) -> Self {
        self.devices_denied = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::CreateAuthUser { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn known_network(&self, network_id: &str) -> meraki_vpn_dashboard::Result<()> {
        if self.networks.iter().any(|n| n.id == network_id) {
            Ok(())
        } else {
            Err(api_error(404, "Network not found"))
        }
    }
}

fn api_error(status: u16, message: &str) -> DashboardError {
    DashboardError::Api {
        status,
        errors: vec![message.to_string()],
    }
}

#[async_trait]
impl DashboardApi for FakeDashboard {
    async fn list_organizations(&self) -> meraki_vpn_dashboard::Result<Vec<Organization>> {
        self.record(Call::ListOrganizations);
        Ok(self.organizations.clone())
    }

    async fn list_networks(&self, organization_id: &str) -> meraki_vpn_dashboard::Result<Vec<Network>> {
        self.record(Call::ListNetworks(organization_id.to_string()));
        Ok(self.networks.clone())
    }

    async fn list_devices(&self, organization_id: &str) -> meraki_vpn_dashboard::Result<Vec<Device>> {
        self.record(Call::ListDevices(organization_id.to_string()));
        if self.devices_denied {
            return Err(api_error(403, "Insufficient privileges"));
        }
        Ok(self.devices.clone())
    }

    async fn create_auth_user(
        &self,
        network_id: &str,
        request: &CreateAuthUserRequest,
    ) -> meraki_vpn_dashboard::Result<AuthUser> {
        self.record(Call::CreateAuthUser {
            network_id: network_id.to_string(),
            email: request.email.clone(),
            email_password_to_user: request.email_password_to_user,
        });
        self.known_network(network_id)?;

        if self.unreachable_emails.contains(&request.email) {
            return Err(DashboardError::Decode("unexpected end of body".to_string()));
        }

        if self.vpn_disabled.contains(network_id) {
            return Err(api_error(400, "Client VPN is not enabled on this network"));
        }

        let existing = self
            .auth_users
            .get(network_id)
            .map(|users| users.iter().any(|u| u.has_email(&request.email)))
            .unwrap_or(false);
        if existing {
            return Err(api_error(400, "Email has already been taken"));
        }

        Ok(AuthUser {
            id: format!("{}-{}", network_id, request.email),
            email: request.email.clone(),
            name: Some(request.name.clone()),
            account_type: Some(request.account_type.clone()),
        })
    }

    async fn list_auth_users(&self, network_id: &str) -> meraki_vpn_dashboard::Result<Vec<AuthUser>> {
        self.record(Call::ListAuthUsers(network_id.to_string()));
        self.known_network(network_id)?;
        Ok(self.auth_users.get(network_id).cloned().unwrap_or_default())
    }

    async fn revoke_authorization(&self, network_id: &str, auth_user_id: &str) -> meraki_vpn_dashboard::Result<()> {
        self.record(Call::RevokeAuthorization {
            network_id: network_id.to_string(),
            auth_user_id: auth_user_id.to_string(),
        });
        Ok(())
    }
}

/// A canned operator answer
#[derive(Debug, Clone)]
pub enum Answer {
    Select(usize),
    MultiSelect(Vec<usize>),
    Text(String),
    Confirm(bool),
}

/// Replays answers in order and remembers every prompt it was shown
#[derive(Default)]
pub struct ScriptedInput {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            prompts: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer, UserError> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| UserError::InputError(format!("no scripted answer for '{}'", prompt)))
    }

    fn unexpected(prompt: &str, answer: Answer) -> UserError {
        UserError::InputError(format!("unexpected answer {:?} for '{}'", answer, prompt))
    }
}

impl InputSource for ScriptedInput {
    fn select(&mut self, prompt: &str, _items: &[String]) -> Result<usize, UserError> {
        match self.next(prompt)? {
            Answer::Select(index) => Ok(index),
            other => Err(Self::unexpected(prompt, other)),
        }
    }

    fn multi_select(&mut self, prompt: &str, _items: &[String]) -> Result<Vec<usize>, UserError> {
        match self.next(prompt)? {
            Answer::MultiSelect(indices) => Ok(indices),
            other => Err(Self::unexpected(prompt, other)),
        }
    }

    fn input(&mut self, prompt: &str) -> Result<String, UserError> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(text),
            other => Err(Self::unexpected(prompt, other)),
        }
    }

    fn password(&mut self, prompt: &str) -> Result<String, UserError> {
        self.input(prompt)
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool, UserError> {
        match self.next(prompt)? {
            Answer::Confirm(value) => Ok(value),
            other => Err(Self::unexpected(prompt, other)),
        }
    }
}

/// Collects everything the workflow tells the operator
#[derive(Default)]
pub struct RecordingOutput {
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
    pub successes: Vec<String>,
    pub progress: Vec<OperationResult>,
    pub batch_sizes: Vec<usize>,
    pub reports: Vec<BatchReport>,
    pub credentials: Vec<Credential>,
}

impl OutputSink for RecordingOutput {
    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn begin_batch(&mut self, total: usize) {
        self.batch_sizes.push(total);
    }

    fn record_result(&mut self, result: &OperationResult) {
        self.progress.push(result.clone());
    }

    fn render_report(&mut self, report: &BatchReport) {
        self.reports.push(report.clone());
    }

    fn render_credentials(&mut self, credentials: &[Credential]) {
        self.credentials.extend_from_slice(credentials);
    }
}

pub fn text(value: &str) -> Answer {
    Answer::Text(value.to_string())
}

//! Wiring of config, authentication and the provisioning session.

use meraki_vpn_dashboard::{ClientOptions, DashboardClient};
use meraki_vpn_types::Organization;
use meraki_vpn_users::{InputCollector, InputSource, ProvisioningSession, RunOutcome, UserError, WorkflowConfig};
use tracing::{debug, info, warn};

use crate::cli::Cli;
use crate::config::ConfigManager;
use crate::error::Result;
use crate::terminal::{prompt_api_key, ConsoleOutput, DialoguerInput};
use crate::utils::display;

/// Environment variable holding the Dashboard API key
pub const API_KEY_ENV: &str = "MERAKI_DASHBOARD_API_KEY";

/// Where the API key came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Environment(String),
    Prompt,
}

impl KeySource {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(API_KEY_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(key) if !key.trim().is_empty() => KeySource::Environment(key.trim().to_string()),
            _ => KeySource::Prompt,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<RunOutcome> {
    let config_manager = ConfigManager::new(cli.config.clone())?;
    let config = config_manager.get_config().clone();
    debug!(path = %config_manager.config_path().display(), "configuration loaded");

    if !config.ui.color_output {
        display::disable_colors();
    }

    for warning in config_manager.validate_config() {
        display::warning(&warning);
    }

    display::header("Meraki Client VPN User Provisioning");

    let mut input = DialoguerInput::new();
    let mut output = ConsoleOutput::new(config.ui.progress_bars);

    let (client, organizations) = authenticate(
        KeySource::from_env(),
        config.dashboard.client_options(),
        &config.workflow,
        &mut input,
    )
    .await?;

    let mut session = ProvisioningSession::new(&client, config.workflow.clone());
    let outcome = session.run(organizations, &mut input, &mut output).await?;
    Ok(outcome)
}

/// Build a client and list organizations with it. A rejected key that was
/// typed in is asked for again; one from the environment is fatal.
pub async fn authenticate(
    source: KeySource,
    options: ClientOptions,
    workflow: &WorkflowConfig,
    input: &mut dyn InputSource,
) -> Result<(DashboardClient, Vec<Organization>)> {
    loop {
        let key = match &source {
            KeySource::Environment(key) => {
                info!("using API key from {}", API_KEY_ENV);
                key.clone()
            }
            KeySource::Prompt => prompt_api_key(input)?,
        };

        let client = match DashboardClient::new(&key, options.clone()) {
            Ok(client) => client,
            Err(e) if e.is_auth_rejection() && source == KeySource::Prompt => {
                display::error(&e.to_string());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match InputCollector::new(&client, workflow).organizations().await {
            Ok(organizations) => return Ok((client, organizations)),
            Err(UserError::DashboardError(e)) if e.is_auth_rejection() && source == KeySource::Prompt => {
                warn!(status = ?e.status(), "API key rejected");
                display::error("The API key was rejected by the dashboard. Please try again.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

use anyhow::Context;
use meraki_vpn_dashboard::{ClientOptions, DEFAULT_BASE_URL};
use meraki_vpn_users::WorkflowConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub dashboard: DashboardConfig,
    pub workflow: WorkflowConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub color_output: bool,
    pub progress_bars: bool,
}

impl DashboardConfig {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

pub struct ConfigManager {
    config: CliConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Load the config file, falling back to defaults when it does not exist
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(Self::default_config_path);

        let config = if config_path.exists() {
            Self::load_config(&config_path)?
        } else {
            CliConfig::default()
        };

        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn get_config(&self) -> &CliConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn validate_config(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let dashboard = &self.config.dashboard;

        if !dashboard.base_url.starts_with("https://") {
            warnings.push(format!(
                "Dashboard base URL '{}' does not use https; the API key is sent in clear text",
                dashboard.base_url
            ));
        }

        if dashboard.timeout_seconds == 0 {
            warnings.push("Dashboard timeout must be greater than 0".to_string());
        }

        warnings
    }

    fn default_config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("meraki-vpn").join("config.toml")
        } else {
            PathBuf::from("/etc/meraki-vpn/config.toml")
        }
    }

    fn load_config(path: &Path) -> Result<CliConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            progress_bars: true,
        }
    }
}

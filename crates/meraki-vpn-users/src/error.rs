use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("No organizations are accessible with this API key")]
    NoOrganizations,

    #[error("No eligible networks found in organization {0}")]
    NoEligibleNetworks(String),

    #[error("No user records provided")]
    NoRecords,

    #[error("User input error: {0}")]
    InputError(String),

    #[error("Dashboard error: {0}")]
    DashboardError(#[from] meraki_vpn_dashboard::DashboardError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, UserError>;

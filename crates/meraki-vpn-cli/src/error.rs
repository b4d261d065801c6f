use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    UserError(#[from] meraki_vpn_users::UserError),

    #[error("{0}")]
    DashboardError(#[from] meraki_vpn_dashboard::DashboardError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0:#}")]
    AnyhowError(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

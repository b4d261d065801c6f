use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "meraki-vpn",
    about = "Bulk provisioning of Meraki Client VPN users",
    version = env!("CARGO_PKG_VERSION"),
    long_about = "Interactively add Client VPN users to, or deauthorize them from, one or more \
                  networks of a Meraki organization. The API key is read from \
                  MERAKI_DASHBOARD_API_KEY or prompted for."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

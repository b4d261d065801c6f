use clap::Parser;
use colored::*;
use std::process;

use meraki_vpn_cli::{app, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Per-pair failures are part of the report; only setup errors end up here
    if let Err(e) = app::run(&cli).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Level used when `RUST_LOG` is not set
fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

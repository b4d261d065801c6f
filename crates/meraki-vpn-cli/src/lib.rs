pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod terminal;
pub mod utils;

pub use cli::Cli;
pub use config::{CliConfig, ConfigManager, DashboardConfig, UiConfig};
pub use error::{CliError, Result};
pub use terminal::{ConsoleOutput, DialoguerInput};
pub use utils::display;

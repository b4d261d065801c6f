//! Terminal-backed input and output for a provisioning session.

use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use meraki_vpn_types::OperationResult;
use meraki_vpn_users::{BatchReport, Credential, InputSource, OutputSink, UserError};

use crate::report;
use crate::utils::display;

type PromptResult<T> = std::result::Result<T, UserError>;

fn prompt_error(e: dialoguer::Error) -> UserError {
    UserError::InputError(e.to_string())
}

/// Prompts rendered with dialoguer
pub struct DialoguerInput {
    theme: ColorfulTheme,
}

impl DialoguerInput {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for DialoguerInput {
    fn select(&mut self, prompt: &str, items: &[String]) -> PromptResult<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(prompt_error)
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> PromptResult<Vec<usize>> {
        MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{} (space to toggle, enter to accept)", prompt))
            .items(items)
            .interact()
            .map_err(prompt_error)
    }

    fn input(&mut self, prompt: &str) -> PromptResult<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn password(&mut self, prompt: &str) -> PromptResult<String> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> PromptResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }
}

/// Colored console output with an optional progress bar during batches
pub struct ConsoleOutput {
    progress_bars: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleOutput {
    pub fn new(progress_bars: bool) -> Self {
        Self {
            progress_bars,
            bar: None,
        }
    }

    /// Print above the progress bar when one is running
    fn print(&self, emit: impl FnOnce()) {
        match &self.bar {
            Some(bar) => bar.suspend(emit),
            None => emit(),
        }
    }
}

impl OutputSink for ConsoleOutput {
    fn info(&mut self, message: &str) {
        self.print(|| display::info(message));
    }

    fn warn(&mut self, message: &str) {
        self.print(|| display::warning(message));
    }

    fn success(&mut self, message: &str) {
        self.print(|| display::success(message));
    }

    fn begin_batch(&mut self, total: usize) {
        display::subheader(&format!("Processing {} operations", total));
        if !self.progress_bars || total == 0 {
            return;
        }

        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        bar.set_style(style);
        self.bar = Some(bar);
    }

    fn record_result(&mut self, result: &OperationResult) {
        let line = report::progress_line(result);
        match &self.bar {
            Some(bar) => {
                if !result.is_success() {
                    bar.println(format!("{} {}", "✗".red(), line));
                }
                bar.set_message(result.user.email.clone());
                bar.inc(1);
            }
            None if result.is_success() => println!("{} {}", "✓".green(), line),
            None => println!("{} {}", "✗".red(), line),
        }
    }

    fn finish_batch(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn render_report(&mut self, report: &BatchReport) {
        display::header("Results");
        if report.results.is_empty() {
            display::warning("No operations were performed");
            return;
        }

        println!("{}", report::results_table(report));
        println!();
        for line in report::summary_lines(report) {
            println!("{}", line);
        }
    }

    fn render_credentials(&mut self, credentials: &[Credential]) {
        display::subheader("Auto-generated passwords");
        println!("{}", report::credentials_table(credentials));
    }
}

/// Ask for an API key until a non-blank one is entered
pub fn prompt_api_key(input: &mut dyn InputSource) -> PromptResult<String> {
    loop {
        let key = input.password("Enter your Meraki Dashboard API key")?;
        let key = key.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
        display::warning("The API key cannot be empty");
    }
}

//! Table rendering for run reports.

use meraki_vpn_types::{OperationResult, Outcome};
use meraki_vpn_users::{BatchReport, Credential};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    #[tabled(rename = "Network")]
    pub network: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Reason")]
    pub reason: String,
}

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct CredentialRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Password")]
    pub password: String,
}

pub fn status_label(result: &OperationResult) -> &'static str {
    match &result.outcome {
        Outcome::Success => "success",
        Outcome::Failure(reason) if reason.is_warning() => "warning",
        Outcome::Failure(_) => "failed",
    }
}

pub fn result_rows(report: &BatchReport) -> Vec<ResultRow> {
    report
        .results
        .iter()
        .map(|result| ResultRow {
            network: result.network.name.clone(),
            name: result.user.name.clone(),
            email: result.user.email.clone(),
            status: status_label(result).to_string(),
            reason: result.reason().map(|r| r.to_string()).unwrap_or_default(),
        })
        .collect()
}

pub fn results_table(report: &BatchReport) -> String {
    Table::new(result_rows(report)).with(Style::rounded()).to_string()
}

pub fn credentials_table(credentials: &[Credential]) -> String {
    let rows = credentials.iter().map(|c| CredentialRow {
        name: c.name.clone(),
        email: c.email.clone(),
        password: c.password.clone(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Count lines printed under the table
pub fn summary_lines(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![
        format!("Total operations: {}", report.summary.total()),
        format!("Succeeded: {}", report.summary.succeeded),
        format!("Failed: {}", report.summary.failed),
    ];
    if report.summary.warnings > 0 {
        lines.push(format!("  of which already existing: {}", report.summary.warnings));
    }
    lines
}

/// One line for a finished pair, used while the batch is running
pub fn progress_line(result: &OperationResult) -> String {
    match result.reason() {
        None => format!("{} on {}: {}", result.user.email, result.network.name, status_label(result)),
        Some(reason) => format!(
            "{} on {}: {} ({})",
            result.user.email,
            result.network.name,
            status_label(result),
            reason
        ),
    }
}

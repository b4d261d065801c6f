//! Capability interfaces between the workflow and the terminal.
//!
//! The workflow never talks to a terminal directly. The CLI provides
//! interactive implementations; tests provide scripted ones.

use meraki_vpn_types::OperationResult;

use crate::error::Result;
use crate::report::BatchReport;

/// Where operator answers come from
pub trait InputSource {
    /// Pick one item, returning its index
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Pick any number of items, returning their indices
    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;

    /// Free text; may be empty
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Hidden text; may be empty
    fn password(&mut self, prompt: &str) -> Result<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Where operator-facing output goes
pub trait OutputSink {
    fn info(&mut self, message: &str);

    fn warn(&mut self, message: &str);

    fn success(&mut self, message: &str);

    /// Called once before the first remote call of a batch
    fn begin_batch(&mut self, _total: usize) {}

    /// Called for every pair as soon as its outcome is known
    fn record_result(&mut self, result: &OperationResult);

    /// Called once after the last pair of a batch
    fn finish_batch(&mut self) {}

    fn render_report(&mut self, report: &BatchReport);

    fn render_credentials(&mut self, credentials: &[Credential]);
}

/// A generated password the operator may need to hand out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub name: String,
    pub email: String,
    pub password: String,
}

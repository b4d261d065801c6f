pub mod collector;
pub mod config;
pub mod error;
pub mod import;
pub mod interaction;
pub mod password;
pub mod report;
pub mod session;
pub mod validator;
pub mod workflow;

pub use collector::{InputCollector, InputMethod, RunPlan};
pub use config::WorkflowConfig;
pub use error::{Result, UserError};
pub use import::{CsvImport, CsvImporter};
pub use interaction::{Credential, InputSource, OutputSink};
pub use report::{BatchReport, Reporter};
pub use session::{Phase, ProvisioningSession, RunOutcome};
pub use validator::{RecordValidator, ValidationIssue};
pub use workflow::{Batch, BatchEntry, ProvisioningWorkflow};

// Re-export the shared vocabulary for external use
pub use meraki_vpn_types::{Action, OperationResult, VpnUserRecord};

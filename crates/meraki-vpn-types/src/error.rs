//! Common error types shared across crates

use thiserror::Error;

/// Common result type
pub type Result<T> = std::result::Result<T, CommonError>;

/// Common errors that can occur across the provisioning crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

//! Common types shared across the provisioning crates
//!
//! This crate holds the transient data model of a provisioning run
//! (organizations, networks, user records and per-pair results) so the
//! dashboard client, the workflow and the CLI agree on one vocabulary.

pub mod error;
pub mod organization;
pub mod result;
pub mod user;
pub mod validation;

pub use error::*;
pub use organization::*;
pub use result::*;
pub use user::*;
pub use validation::*;

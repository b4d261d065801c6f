pub mod api;
pub mod client;
pub mod error;
pub mod models;

pub use api::DashboardApi;
pub use client::{ClientOptions, DashboardClient, DEFAULT_BASE_URL};
pub use error::{DashboardError, Result};
pub use models::{AuthUser, Authorization, CreateAuthUserRequest};

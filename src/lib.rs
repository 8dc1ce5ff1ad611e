pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod report;

pub use auth::BearerAuth;
pub use client::{ProbeClient, ProbeOutcome};
pub use config::ProbeConfig;
pub use error::{ProbeError, Result};

//! ovh-core: Core library for the ovh CLI client
//!
//! This crate provides the core functionality for the ovh CLI, including:
//! - Configuration management
//! - Credential resolution (file plus `OVH_*` environment overrides)
//! - The API endpoint registry
//! - ApiClient trait for request dispatch
//!
//! This crate is designed to be independent of any specific HTTP stack,
//! allowing for easy testing and potential future support for other
//! transports.

pub mod config;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod traits;

pub use config::{Config, ConfigManager, Defaults};
pub use credentials::{CredentialSet, Credentials, EnvOverrides};
pub use endpoint::DEFAULT_ENDPOINT;
pub use error::{Error, Result};
pub use traits::{ApiClient, ApiResponse, Method};

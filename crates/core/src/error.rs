//! Error types for ovh-core
//!
//! One unified error type covering the fatal classes the tool knows about:
//! setup errors (configuration, credentials, endpoint), input errors
//! (malformed payload), and transport errors surfaced by the HTTP client.
//! Raw dispatch hands every HTTP status back as an ordinary response; only
//! the typed client verbs convert a non-2xx status into an `Api` error.

use thiserror::Error;

/// Result type alias for ovh-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ovh-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required credential field could not be resolved
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Endpoint name is neither a known alias nor a literal URL
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// The request payload is not valid JSON
    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request signing failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Non-2xx response surfaced by a typed client call
    #[error("HTTP Error {status}: {message:?}")]
    Api { status: u16, message: String },

    /// Transport error from the HTTP client
    #[error("Network error: {0}")]
    Network(String),
}

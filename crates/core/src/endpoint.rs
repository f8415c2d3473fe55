//! API endpoint registry
//!
//! Maps the short region names used in configuration (`ovh-eu`, `ovh-ca`,
//! ...) to their base URLs. A literal `http(s)://` value is passed through
//! untouched, which is how the test suite points the client at a local
//! server.

use crate::error::{Error, Result};

/// Endpoint used when neither the configuration file nor the environment
/// names one.
pub const DEFAULT_ENDPOINT: &str = "ovh-eu";

/// Known region names and their base URLs.
const ENDPOINTS: &[(&str, &str)] = &[
    ("ovh-eu", "https://eu.api.ovh.com/1.0"),
    ("ovh-ca", "https://ca.api.ovh.com/1.0"),
    ("ovh-us", "https://api.us.ovhcloud.com/1.0"),
    ("kimsufi-eu", "https://eu.api.kimsufi.com/1.0"),
    ("kimsufi-ca", "https://ca.api.kimsufi.com/1.0"),
    ("soyoustart-eu", "https://eu.api.soyoustart.com/1.0"),
    ("soyoustart-ca", "https://ca.api.soyoustart.com/1.0"),
];

/// Resolve an endpoint name to a base URL.
///
/// Accepts either a known region name or a full `http(s)://` URL. URLs keep
/// everything except a trailing slash, so path concatenation stays
/// predictable.
pub fn resolve(name: &str) -> Result<String> {
    if let Some((_, url)) = ENDPOINTS.iter().find(|(alias, _)| *alias == name) {
        return Ok((*url).to_string());
    }

    if name.starts_with("https://") || name.starts_with("http://") {
        url::Url::parse(name)?;
        return Ok(name.trim_end_matches('/').to_string());
    }

    Err(Error::UnknownEndpoint(format!(
        "{name} (known endpoints: {})",
        known_endpoints().join(", ")
    )))
}

/// All known region names, for error messages and help text.
pub fn known_endpoints() -> Vec<&'static str> {
    ENDPOINTS.iter().map(|(alias, _)| *alias).collect()
}

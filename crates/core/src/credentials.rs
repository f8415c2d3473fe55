//! Credential resolution
//!
//! Credentials are stored per endpoint in the configuration file and can be
//! overridden field-by-field through the vendor-documented environment
//! variables (`OVH_ENDPOINT`, `OVH_APPLICATION_KEY`, `OVH_APPLICATION_SECRET`,
//! `OVH_CONSUMER_KEY`). Environment always wins, so an exported variable can
//! redirect a single invocation without touching the file.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::endpoint;
use crate::error::{Error, Result};

/// Environment variable naming the target endpoint
pub const ENDPOINT_ENV: &str = "OVH_ENDPOINT";
/// Environment variable carrying the application key
pub const APPLICATION_KEY_ENV: &str = "OVH_APPLICATION_KEY";
/// Environment variable carrying the application secret
pub const APPLICATION_SECRET_ENV: &str = "OVH_APPLICATION_SECRET";
/// Environment variable carrying the consumer key
pub const CONSUMER_KEY_ENV: &str = "OVH_CONSUMER_KEY";

/// A credential set declared for one endpoint in the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialSet {
    /// Endpoint this set applies to: a region name or a literal base URL
    pub endpoint: String,

    /// Application key issued when the API application was registered
    pub application_key: String,

    /// Application secret issued alongside the key
    pub application_secret: String,

    /// Consumer key granting this application access to an account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_key: Option<String>,
}

/// Field-by-field overrides sourced from the environment
///
/// Empty variables count as unset, matching the vendor client.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub endpoint: Option<String>,
    pub application_key: Option<String>,
    pub application_secret: Option<String>,
    pub consumer_key: Option<String>,
}

impl EnvOverrides {
    /// Read the four `OVH_*` variables from the process environment
    pub fn from_env() -> Self {
        Self {
            endpoint: read_env(ENDPOINT_ENV),
            application_key: read_env(APPLICATION_KEY_ENV),
            application_secret: read_env(APPLICATION_SECRET_ENV),
            consumer_key: read_env(CONSUMER_KEY_ENV),
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Fully resolved credentials, ready to build a client from
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Resolved endpoint base URL (not the region name)
    pub endpoint_url: String,
    pub application_key: String,
    pub application_secret: String,
    pub consumer_key: String,
}

impl Credentials {
    /// Resolve credentials from configuration plus environment overrides.
    ///
    /// The endpoint name comes from the environment, then the configuration
    /// defaults. Each credential field comes from the environment, then from
    /// the credential set declared for that endpoint. Anything still missing
    /// is a fatal setup error.
    pub fn resolve(config: &Config, env: &EnvOverrides) -> Result<Self> {
        let endpoint_name = env
            .endpoint
            .clone()
            .unwrap_or_else(|| config.defaults.endpoint.clone());

        let set = config.credentials_for(&endpoint_name);

        let application_key = env
            .application_key
            .clone()
            .or_else(|| set.map(|s| s.application_key.clone()).filter(|v| !v.is_empty()))
            .ok_or_else(|| missing("application_key", APPLICATION_KEY_ENV))?;

        let application_secret = env
            .application_secret
            .clone()
            .or_else(|| set.map(|s| s.application_secret.clone()).filter(|v| !v.is_empty()))
            .ok_or_else(|| missing("application_secret", APPLICATION_SECRET_ENV))?;

        let consumer_key = env
            .consumer_key
            .clone()
            .or_else(|| set.and_then(|s| s.consumer_key.clone()).filter(|v| !v.is_empty()))
            .ok_or_else(|| missing("consumer_key", CONSUMER_KEY_ENV))?;

        let endpoint_url = endpoint::resolve(&endpoint_name)?;

        Ok(Self {
            endpoint_url,
            application_key,
            application_secret,
            consumer_key,
        })
    }
}

fn missing(field: &str, env_var: &str) -> Error {
    Error::MissingCredential(format!(
        "{field} (set {env_var} or add it to the configuration file)"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_set(consumer_key: Option<&str>) -> Config {
        let mut config = Config::default();
        config.credentials.push(CredentialSet {
            endpoint: "ovh-eu".to_string(),
            application_key: "file-app-key".to_string(),
            application_secret: "file-app-secret".to_string(),
            consumer_key: consumer_key.map(str::to_string),
        });
        config
    }

    #[test]
    fn test_resolve_from_file_only() {
        let config = config_with_set(Some("file-consumer-key"));
        let creds = Credentials::resolve(&config, &EnvOverrides::default()).unwrap();

        assert_eq!(creds.endpoint_url, "https://eu.api.ovh.com/1.0");
        assert_eq!(creds.application_key, "file-app-key");
        assert_eq!(creds.application_secret, "file-app-secret");
        assert_eq!(creds.consumer_key, "file-consumer-key");
    }

    #[test]
    fn test_env_overrides_single_field() {
        let config = config_with_set(Some("file-consumer-key"));
        let env = EnvOverrides {
            consumer_key: Some("env-consumer-key".to_string()),
            ..Default::default()
        };

        let creds = Credentials::resolve(&config, &env).unwrap();
        assert_eq!(creds.application_key, "file-app-key");
        assert_eq!(creds.consumer_key, "env-consumer-key");
    }

    #[test]
    fn test_env_only_operation() {
        let env = EnvOverrides {
            endpoint: Some("ovh-ca".to_string()),
            application_key: Some("k".to_string()),
            application_secret: Some("s".to_string()),
            consumer_key: Some("c".to_string()),
        };

        let creds = Credentials::resolve(&Config::default(), &env).unwrap();
        assert_eq!(creds.endpoint_url, "https://ca.api.ovh.com/1.0");
    }

    #[test]
    fn test_env_endpoint_selects_credential_set() {
        let mut config = config_with_set(Some("eu-ck"));
        config.credentials.push(CredentialSet {
            endpoint: "ovh-ca".to_string(),
            application_key: "ca-ak".to_string(),
            application_secret: "ca-as".to_string(),
            consumer_key: Some("ca-ck".to_string()),
        });
        let env = EnvOverrides {
            endpoint: Some("ovh-ca".to_string()),
            ..Default::default()
        };

        let creds = Credentials::resolve(&config, &env).unwrap();
        assert_eq!(creds.application_key, "ca-ak");
        assert_eq!(creds.consumer_key, "ca-ck");
    }

    #[test]
    fn test_missing_application_key() {
        let err = Credentials::resolve(&Config::default(), &EnvOverrides::default()).unwrap_err();
        assert!(matches!(err, Error::MissingCredential(_)));
        assert!(err.to_string().contains("application_key"));
        assert!(err.to_string().contains("OVH_APPLICATION_KEY"));
    }

    #[test]
    fn test_missing_consumer_key() {
        let config = config_with_set(None);
        let err = Credentials::resolve(&config, &EnvOverrides::default()).unwrap_err();
        assert!(matches!(err, Error::MissingCredential(_)));
        assert!(err.to_string().contains("consumer_key"));
    }

    #[test]
    fn test_unknown_endpoint_from_env() {
        let env = EnvOverrides {
            endpoint: Some("ovh-mars".to_string()),
            application_key: Some("k".to_string()),
            application_secret: Some("s".to_string()),
            consumer_key: Some("c".to_string()),
        };

        let err = Credentials::resolve(&Config::default(), &env).unwrap_err();
        assert!(matches!(err, Error::UnknownEndpoint(_)));
    }

    #[test]
    fn test_literal_url_endpoint() {
        let mut config = Config::default();
        config.defaults.endpoint = "http://127.0.0.1:4000/1.0".to_string();
        config.credentials.push(CredentialSet {
            endpoint: "http://127.0.0.1:4000/1.0".to_string(),
            application_key: "k".to_string(),
            application_secret: "s".to_string(),
            consumer_key: Some("c".to_string()),
        });

        let creds = Credentials::resolve(&config, &EnvOverrides::default()).unwrap();
        assert_eq!(creds.endpoint_url, "http://127.0.0.1:4000/1.0");
    }

    #[test]
    fn test_empty_file_field_counts_as_missing() {
        let mut config = Config::default();
        config.credentials.push(CredentialSet {
            endpoint: "ovh-eu".to_string(),
            application_key: String::new(),
            application_secret: "s".to_string(),
            consumer_key: Some("c".to_string()),
        });

        let err = Credentials::resolve(&config, &EnvOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("application_key"));
    }
}

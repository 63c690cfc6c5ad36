//! Connection settings for the NSX-T manager.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// NSX-T manager connection configuration.
///
/// Exactly one authentication method must be configured: HTTP basic
/// (`username` + `password`) or mutual TLS (`client_cert_path` +
/// `client_key_path`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NsxtConfig {
    /// Base URL of the manager, e.g. `https://nsx.example.com`.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// PEM client certificate for mutual TLS.
    #[serde(default)]
    pub client_cert_path: Option<String>,

    /// PEM private key matching `client_cert_path`.
    #[serde(default)]
    pub client_key_path: Option<String>,

    /// Extra PEM CA bundle to trust.
    #[serde(default)]
    pub ca_cert_path: Option<String>,

    /// Accept any server certificate.
    #[serde(default)]
    pub skip_ssl_verify: bool,

    /// Retries for throttled (429/503) or failed requests (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Lower bound of the random retry delay (default: 500).
    #[serde(default = "default_retry_min_delay")]
    pub retry_min_delay_ms: u64,

    /// Upper bound of the random retry delay (default: 5000).
    #[serde(default = "default_retry_max_delay")]
    pub retry_max_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout() -> u64 {
    30
}

fn default_retry_min_delay() -> u64 {
    500
}

fn default_retry_max_delay() -> u64 {
    5000
}

impl Default for NsxtConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: None,
            password: None,
            client_cert_path: None,
            client_key_path: None,
            ca_cert_path: None,
            skip_ssl_verify: false,
            max_retries: default_max_retries(),
            timeout_secs: default_timeout(),
            retry_min_delay_ms: default_retry_min_delay(),
            retry_max_delay_ms: default_retry_max_delay(),
        }
    }
}

/// How the client proves its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Basic { username: String, password: String },
    Certificate { cert_path: String, key_path: String },
}

impl NsxtConfig {
    /// Convenience constructor for basic authentication.
    pub fn with_basic_auth(url: impl Into<String>, username: &str, password: &str) -> Self {
        Self {
            url: url.into(),
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            ..Self::default()
        }
    }

    /// Resolve the configured authentication method.
    pub fn auth(&self) -> Result<Auth, ApiError> {
        let basic = match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Auth::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            (None, None) => None,
            _ => {
                return Err(ApiError::Config(
                    "username and password must be set together".to_string(),
                ));
            }
        };

        let cert = match (&self.client_cert_path, &self.client_key_path) {
            (Some(cert_path), Some(key_path)) => Some(Auth::Certificate {
                cert_path: cert_path.clone(),
                key_path: key_path.clone(),
            }),
            (None, None) => None,
            _ => {
                return Err(ApiError::Config(
                    "client_cert_path and client_key_path must be set together".to_string(),
                ));
            }
        };

        match (basic, cert) {
            (Some(auth), None) | (None, Some(auth)) => Ok(auth),
            (Some(_), Some(_)) => Err(ApiError::Config(
                "configure either username/password or a client certificate, not both"
                    .to_string(),
            )),
            (None, None) => Err(ApiError::Config(
                "no authentication configured (username/password or client certificate)"
                    .to_string(),
            )),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.url.is_empty() {
            return Err(ApiError::Config("nsxt.url is required".to_string()));
        }

        let url = reqwest::Url::parse(&self.url)
            .map_err(|e| ApiError::Config(format!("Invalid nsxt.url {}: {}", self.url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::Config(format!(
                "nsxt.url must be http or https: {}",
                self.url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ApiError::Config("timeout_secs must be > 0".to_string()));
        }

        if self.retry_min_delay_ms > self.retry_max_delay_ms {
            return Err(ApiError::Config(
                "retry_min_delay_ms must not exceed retry_max_delay_ms".to_string(),
            ));
        }

        self.auth()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: NsxtConfig = serde_json::from_str(r#"{"url": "https://nsx"}"#).unwrap();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry_min_delay_ms, 500);
        assert_eq!(config.retry_max_delay_ms, 5000);
        assert!(!config.skip_ssl_verify);
    }

    #[test]
    fn test_basic_auth_valid() {
        let config = NsxtConfig::with_basic_auth("https://nsx", "admin", "secret");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.auth().unwrap(),
            Auth::Basic {
                username: "admin".into(),
                password: "secret".into()
            }
        );
    }

    #[test]
    fn test_certificate_auth_valid() {
        let config = NsxtConfig {
            url: "https://nsx".into(),
            client_cert_path: Some("/etc/nsx/client.crt".into()),
            client_key_path: Some("/etc/nsx/client.key".into()),
            ..NsxtConfig::default()
        };
        assert!(matches!(config.auth().unwrap(), Auth::Certificate { .. }));
    }

    #[test]
    fn test_missing_url() {
        let err = NsxtConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("nsxt.url is required"));
    }

    #[test]
    fn test_unparseable_url() {
        let config = NsxtConfig::with_basic_auth("not a url", "a", "b");
        assert!(config.validate().unwrap_err().to_string().contains("Invalid nsxt.url"));
    }

    #[test]
    fn test_half_pairs_rejected() {
        let mut config = NsxtConfig::with_basic_auth("https://nsx", "admin", "secret");
        config.password = None;
        assert!(config.validate().unwrap_err().to_string().contains("together"));

        let config = NsxtConfig {
            url: "https://nsx".into(),
            client_cert_path: Some("c".into()),
            ..NsxtConfig::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("together"));
    }

    #[test]
    fn test_exactly_one_auth() {
        let mut config = NsxtConfig::with_basic_auth("https://nsx", "admin", "secret");
        config.client_cert_path = Some("c".into());
        config.client_key_path = Some("k".into());
        assert!(config.validate().unwrap_err().to_string().contains("not both"));

        let config = NsxtConfig {
            url: "https://nsx".into(),
            ..NsxtConfig::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("no authentication"));
    }
}

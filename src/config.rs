//! Porter configuration types.
//!
//! This module defines TOML-deserializable configuration for the porter: the
//! gateway display name, the deployment environment, the offsite redirect
//! URLs, and one set of client credentials per API endpoint id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    entity::OffsiteUrls,
    error::{PorterError, Result},
};

/// Deployment environment a gateway endpoint is bound to.
///
/// Selects the gateway's base URL; it is applied at client construction and
/// never stored per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// The gateway's sandbox, for development and testing.
    Sandbox,
    /// The live gateway. Real money moves here.
    Live,
}

impl Environment {
    /// The REST base URL for this environment.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://api.sandbox.paypal.com",
            Self::Live => "https://api.paypal.com",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sandbox => f.write_str("sandbox"),
            Self::Live => f.write_str("live"),
        }
    }
}

/// Client credentials for one gateway API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayCredentials {
    /// OAuth client id issued by the gateway.
    pub client_id: String,
    /// OAuth client secret issued by the gateway.
    pub secret: String,
}

/// Root porter configuration.
///
/// # Examples
///
/// ```
/// use paypal_porter::config::PorterConfig;
///
/// let toml = r#"
///     gateway_name = "PayPal"
///     environment = "sandbox"
///
///     [offsite_urls]
///     return_url = "https://shop.example.com/checkout/return"
///     cancel_url = "https://shop.example.com/checkout/cancel"
///
///     [endpoints.default]
///     client_id = "client-id"
///     secret = "client-secret"
/// "#;
///
/// let config = PorterConfig::from_toml(toml).unwrap();
/// assert_eq!(config.gateway_name, "PayPal");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PorterConfig {
    /// Display name identifying this gateway configuration in responses.
    pub gateway_name: String,

    /// Which gateway environment the endpoints are bound to.
    pub environment: Environment,

    /// Redirect URLs for the gateway's hosted approval page.
    pub offsite_urls: OffsiteUrls,

    /// Client credentials per endpoint id. Controllers built without an
    /// explicit endpoint use the `"default"` entry.
    #[serde(default)]
    pub endpoints: HashMap<String, GatewayCredentials>,
}

impl PorterConfig {
    /// Parses a configuration from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] if TOML parsing or validation
    /// fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| PorterError::Configuration(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] if the file cannot be read or
    /// its content fails to parse or validate.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PorterError::Configuration(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// The offsite URLs are opaque to this crate, so only presence is
    /// checked, not URL syntax.
    ///
    /// # Errors
    ///
    /// Returns [`PorterError::Configuration`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        if self.gateway_name.is_empty() {
            return Err(PorterError::Configuration("gateway_name is empty".to_owned()));
        }
        if self.offsite_urls.return_url.is_empty() {
            return Err(PorterError::Configuration("offsite return_url is empty".to_owned()));
        }
        if self.offsite_urls.cancel_url.is_empty() {
            return Err(PorterError::Configuration("offsite cancel_url is empty".to_owned()));
        }
        for (endpoint_id, credentials) in &self.endpoints {
            if credentials.client_id.is_empty() || credentials.secret.is_empty() {
                return Err(PorterError::Configuration(format!(
                    "endpoint '{endpoint_id}' has incomplete credentials"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        gateway_name = "PayPal"
        environment = "sandbox"

        [offsite_urls]
        return_url = "https://shop.example.com/checkout/return"
        cancel_url = "https://shop.example.com/checkout/cancel"

        [endpoints.default]
        client_id = "client-id"
        secret = "client-secret"
    "#;

    #[test]
    fn test_parses_valid_config() {
        let config = PorterConfig::from_toml(VALID).unwrap();
        assert_eq!(config.gateway_name, "PayPal");
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.endpoints.len(), 1);
        assert_eq!(config.endpoints["default"].client_id, "client-id");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = PorterConfig::from_toml("gateway_name = ").unwrap_err();
        assert!(matches!(err, PorterError::Configuration(_)));
    }

    #[test]
    fn test_rejects_empty_gateway_name() {
        let toml = VALID.replace("\"PayPal\"", "\"\"");
        let err = PorterConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("gateway_name"));
    }

    #[test]
    fn test_rejects_incomplete_credentials() {
        let toml = VALID.replace("\"client-secret\"", "\"\"");
        let err = PorterConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("incomplete credentials"));
    }

    #[test]
    fn test_multiple_endpoints() {
        let toml = format!(
            "{VALID}\n[endpoints.backup]\nclient_id = \"other-id\"\nsecret = \"other-secret\"\n"
        );
        let config = PorterConfig::from_toml(&toml).unwrap();
        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.endpoints["backup"].client_id, "other-id");
    }

    #[test]
    fn test_environment_base_urls() {
        assert!(Environment::Sandbox.base_url().contains("sandbox"));
        assert!(!Environment::Live.base_url().contains("sandbox"));
    }

    #[test]
    fn test_live_environment_parses() {
        let toml = VALID.replace("\"sandbox\"", "\"live\"");
        let config = PorterConfig::from_toml(&toml).unwrap();
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.environment.to_string(), "live");
    }
}

//! Validator configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cep::DEFAULT_BASE_URL;
use crate::error::Error;
use crate::validators::DEFAULT_MINIMUM_AGE;

/// Configuration for the standard validator set.
///
/// Every field has a default, so an empty JSON object is a valid config.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cadastro_lib::config::ValidatorConfig;
///
/// let config = ValidatorConfig::default()
///     .with_minimum_age(21)
///     .with_cep_timeout(Duration::from_secs(3));
/// assert_eq!(config.cep.timeout_secs, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Age a birth date must reach to be accepted.
    ///
    /// Default: 18
    pub minimum_age: u32,

    /// Postal-code lookup settings.
    pub cep: CepConfig,
}

/// Settings for the postal-code lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CepConfig {
    /// Whether lookups run at all. When disabled, `cep` fields only get the
    /// native checks.
    ///
    /// Default: true
    pub enabled: bool,

    /// Service base URL; requests go to `{base_url}/{digits}/json/`.
    pub base_url: String,

    /// Request timeout in seconds.
    ///
    /// Default: 10
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    ///
    /// Default: 5
    pub connect_timeout_secs: u64,

    /// How long answers are cached, in seconds. Zero disables the cache.
    ///
    /// Default: 1 hour
    pub cache_ttl_secs: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            minimum_age: DEFAULT_MINIMUM_AGE,
            cep: CepConfig::default(),
        }
    }
}

impl Default for CepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
            cache_ttl_secs: 3600, // 1 hour
        }
    }
}

impl ValidatorConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the minimum age.
    pub fn with_minimum_age(mut self, years: u32) -> Self {
        self.minimum_age = years;
        self
    }

    /// Sets the lookup service base URL.
    pub fn with_cep_base_url(mut self, url: impl Into<String>) -> Self {
        self.cep.base_url = url.into();
        self
    }

    /// Sets the lookup request timeout, rounded up to whole seconds.
    pub fn with_cep_timeout(mut self, timeout: Duration) -> Self {
        self.cep.timeout_secs = ceil_secs(timeout);
        self
    }

    /// Sets the lookup cache TTL, rounded up to whole seconds.
    pub fn with_cep_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cep.cache_ttl_secs = ceil_secs(ttl);
        self
    }

    /// Disables the postal-code lookup.
    pub fn offline(mut self) -> Self {
        self.cep.enabled = false;
        self
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    duration
        .as_secs()
        .saturating_add(u64::from(duration.subsec_nanos() > 0))
}

impl CepConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ValidatorConfig::from_json("{}").unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.minimum_age, 18);
        assert_eq!(config.cep.base_url, "https://viacep.com.br/ws");
        assert!(config.cep.enabled);
    }

    #[test]
    fn test_partial_override() {
        let config =
            ValidatorConfig::from_json(r#"{"cep": {"timeout_secs": 2, "cache_ttl_secs": 0}}"#)
                .unwrap();
        assert_eq!(config.cep.timeout(), Duration::from_secs(2));
        assert_eq!(config.cep.cache_ttl(), Duration::ZERO);
        assert_eq!(config.cep.connect_timeout_secs, 5);
        assert_eq!(config.minimum_age, 18);
    }

    #[test]
    fn test_sub_second_durations_round_up() {
        let config = ValidatorConfig::default()
            .with_cep_timeout(Duration::from_millis(1500))
            .with_cep_cache_ttl(Duration::from_millis(500));
        assert_eq!(config.cep.timeout(), Duration::from_secs(2));
        assert_eq!(config.cep.cache_ttl(), Duration::from_secs(1));

        let config = ValidatorConfig::default().with_cep_timeout(Duration::from_secs(3));
        assert_eq!(config.cep.timeout_secs, 3);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ValidatorConfig::from_json(r#"{"minimum_age": "x"}"#),
            Err(Error::Json(_))
        ));
    }
}
